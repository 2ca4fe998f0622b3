//! Credential persistence.
//!
//! The stored blob is whatever the session service exported; this layer never
//! interprets it.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::error::Result;

/// Storage for the exported session credential.
pub trait CredentialStore: Send + Sync {
	/// Returns the stored credential, or `None` when nothing has been saved.
	fn load(&self) -> Result<Option<Vec<u8>>>;

	fn save(&self, credential: &[u8]) -> Result<()>;

	/// Removes the stored credential; `false` when there was nothing to remove.
	fn clear(&self) -> Result<bool>;
}

/// File-backed store. A store without a path never persists anything.
#[derive(Debug, Clone, Default)]
pub struct FileCredentialStore {
	path: Option<PathBuf>,
}

impl FileCredentialStore {
	pub fn new(path: Option<PathBuf>) -> Self {
		Self { path }
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}
}

impl CredentialStore for FileCredentialStore {
	fn load(&self) -> Result<Option<Vec<u8>>> {
		let Some(path) = self.path() else {
			return Ok(None);
		};
		match fs::read(path) {
			Ok(bytes) => Ok(Some(bytes)),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(err) => Err(err.into()),
		}
	}

	fn save(&self, credential: &[u8]) -> Result<()> {
		let Some(path) = self.path() else {
			return Ok(());
		};
		if let Some(parent) = path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent)?;
			}
		}
		fs::write(path, credential)?;
		debug!(target = "termchat.store", path = %path.display(), bytes = credential.len(), "saved credential");
		Ok(())
	}

	fn clear(&self) -> Result<bool> {
		let Some(path) = self.path() else {
			return Ok(false);
		};
		match fs::remove_file(path) {
			Ok(()) => Ok(true),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
			Err(err) => Err(err.into()),
		}
	}
}

/// Process-local store, mostly useful in tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
	credential: Mutex<Option<Vec<u8>>>,
}

impl MemoryCredentialStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_credential(credential: impl Into<Vec<u8>>) -> Self {
		Self {
			credential: Mutex::new(Some(credential.into())),
		}
	}

	pub fn get(&self) -> Option<Vec<u8>> {
		self.credential.lock().clone()
	}
}

impl CredentialStore for MemoryCredentialStore {
	fn load(&self) -> Result<Option<Vec<u8>>> {
		Ok(self.get())
	}

	fn save(&self, credential: &[u8]) -> Result<()> {
		*self.credential.lock() = Some(credential.to_vec());
		Ok(())
	}

	fn clear(&self) -> Result<bool> {
		Ok(self.credential.lock().take().is_some())
	}
}
