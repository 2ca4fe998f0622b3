use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the `-v` count.
pub fn init_logging(verbose: u8) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose >= 2)
		.try_init();
}

fn default_directives(verbose: u8) -> String {
	let level = match verbose {
		0 => return "warn".to_string(),
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	format!("warn,termchat={level}")
}
