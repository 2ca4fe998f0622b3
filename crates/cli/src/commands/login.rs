//! Interactive login followed by the live message log.

use std::path::Path;
use std::sync::Arc;

use termchat::{Bootstrapper, EventBus, FileCredentialStore, ReplayService, SessionService, present, spawn_dispatch};
use tracing::{debug, info, warn};

use crate::cli::GlyphArgs;
use crate::config::Settings;
use crate::console::StdConsole;
use crate::error::Result;

/// Logs in through the replayed session and prints messages until it closes.
///
/// The stored credential is tried first; otherwise login codes are printed
/// until one is accepted or the user declines to retry.
///
/// # Errors
///
/// Returns an error if the replay script cannot be loaded, the settings
/// describe an invalid glyph ramp, or the user abandons the login.
pub async fn run(script: &Path, settings: &Settings, glyphs: &GlyphArgs) -> Result<()> {
	let options = settings.encode_options(glyphs)?;
	let service = ReplayService::from_file(script)?;
	let credential_path = settings.credential_path();
	let store = FileCredentialStore::new(Some(credential_path.clone()));

	info!(target = "termchat.cli", script = %script.display(), credential = %credential_path.display(), "starting login");

	let bus = Arc::new(EventBus::new());
	present::register_console(&bus, Arc::new(|line: &str| println!("{line}")));
	let events = service.take_events();

	let mut console = StdConsole;
	let report = Bootstrapper::new(&service, &store, &mut console).with_options(options).run().await?;
	info!(target = "termchat.cli", via = ?report.via, token_attempts = report.token_attempts, "logged in");

	let nickname = service.nickname().unwrap_or_else(|| "anonymous".to_string());
	println!("Login success, {nickname}!");

	// Messages queued during login are printed only after the greeting.
	let dispatch = events.map(|events| spawn_dispatch(Arc::clone(&bus), events));

	service.closed().await;
	if let Some(handle) = dispatch {
		match handle.await {
			Ok(count) => debug!(target = "termchat.cli", count, "message stream drained"),
			Err(err) => warn!(target = "termchat.cli", error = %err, "message dispatch task failed"),
		}
	}
	info!(target = "termchat.cli", "session closed");
	Ok(())
}
