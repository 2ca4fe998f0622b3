//! Error type shared by the termchat core.

use std::path::PathBuf;

use thiserror::Error;

use crate::login::TransitionError;

pub type Result<T> = std::result::Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Failed to decode token image: {0}")]
	ImageDecode(#[from] image::ImageError),

	#[error("Invalid replay script {}: {message}", path.display())]
	Script { path: PathBuf, message: String },

	#[error(transparent)]
	Transition(#[from] TransitionError),

	/// The user declined to retry after a failed login.
	#[error("Login abandoned by user")]
	LoginAbandoned,

	#[error("{0}")]
	Context(String),
}
