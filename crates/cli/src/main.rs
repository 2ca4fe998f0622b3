use clap::Parser;
use termchat_cli::cli::Cli;
use termchat_cli::config::Settings;
use termchat_cli::error::Result;
use termchat_cli::{commands, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = run(cli).await {
		error!(target = "termchat.cli", error = %err, "command failed");
		std::process::exit(1);
	}
}

async fn run(cli: Cli) -> Result<()> {
	let settings = Settings::load(cli.config.as_deref())?.with_credential_path(cli.credential);
	commands::dispatch(cli.command, settings).await
}
