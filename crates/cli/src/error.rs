use std::path::PathBuf;

use termchat::ChatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Chat(#[from] ChatError),

	#[error("Failed to read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Configuration error: {0}")]
	Config(String),
}
