//! Boundary to the chat backend that actually authenticates and delivers events.

mod replay;

use async_trait::async_trait;
use termchat_protocol::{ChatEvent, LoginOutcome};
use tokio::sync::mpsc;

use crate::error::Result;

pub use replay::{ReplayScript, ReplayService, TokenStep};

/// Receives the encoded token image for one login attempt.
pub type TokenCallback<'a> = dyn for<'b> FnMut(&'b [u8]) + Send + 'a;

/// A chat session backend.
///
/// Implementations own the transport and the authenticated session; the
/// bootstrapper only sees [`LoginOutcome`]s and opaque credential bytes.
#[async_trait]
pub trait SessionService: Send + Sync {
	/// Attempts to resume a session from a previously exported credential.
	async fn login_with_credential(&self, credential: &[u8]) -> LoginOutcome;

	/// Requests a fresh visual token and waits until it resolves.
	///
	/// `on_token` receives the encoded token image once per attempt, before
	/// the service starts waiting.
	async fn login_with_token(&self, on_token: &mut TokenCallback<'_>) -> LoginOutcome;

	/// Serializes the active session so it can be replayed later.
	async fn export_credential(&self) -> Result<Vec<u8>>;

	/// Display name of the logged-in account, once known.
	fn nickname(&self) -> Option<String>;

	/// Hands out the inbound event stream. Only the first call returns `Some`.
	fn take_events(&self) -> Option<mpsc::UnboundedReceiver<ChatEvent>>;

	/// Resolves once the session has ended.
	async fn closed(&self);
}
