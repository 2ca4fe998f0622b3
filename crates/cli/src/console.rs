use async_trait::async_trait;
use termchat::{ChatError, Console};

/// Console backed by the process's stdin and stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

#[async_trait]
impl Console for StdConsole {
	fn print(&mut self, text: &str) {
		// Rendered grids already end each row with a newline.
		if text.ends_with('\n') {
			print!("{text}");
		} else {
			println!("{text}");
		}
	}

	async fn read_line(&mut self) -> termchat::Result<Option<String>> {
		let line = tokio::task::spawn_blocking(|| {
			let mut input = String::new();
			std::io::stdin().read_line(&mut input).map(|read| (read > 0).then_some(input))
		})
		.await
		.map_err(|e| ChatError::Context(format!("stdin reader failed: {e}")))??;
		Ok(line)
	}
}
