//! Inspection and removal of the stored session credential.
//!
//! The credential is opaque to termchat. `show` reports its shape without
//! printing any values.

use std::path::Path;

use serde_json::Value;
use termchat::{CredentialStore, FileCredentialStore};
use tracing::info;

use crate::error::Result;

pub fn show(path: &Path) -> Result<()> {
	let store = FileCredentialStore::new(Some(path.to_path_buf()));

	println!("Credential file: {}", path.display());
	let Some(blob) = store.load()? else {
		println!("  (none stored)");
		return Ok(());
	};

	println!("  Size: {} bytes", blob.len());
	match serde_json::from_slice::<Value>(&blob) {
		Ok(Value::Object(map)) => {
			let keys: Vec<&str> = map.keys().map(String::as_str).collect();
			println!("  Format: JSON object");
			println!("  Keys: {}", if keys.is_empty() { "(none)".to_string() } else { keys.join(", ") });
		}
		Ok(_) => println!("  Format: JSON"),
		Err(_) => println!("  Format: opaque"),
	}
	Ok(())
}

pub fn clear(path: &Path) -> Result<()> {
	let store = FileCredentialStore::new(Some(path.to_path_buf()));
	if store.clear()? {
		info!(target = "termchat.cli", path = %path.display(), "credential removed");
		println!("Removed credential: {}", path.display());
	} else {
		println!("No credential stored at {}", path.display());
	}
	Ok(())
}
