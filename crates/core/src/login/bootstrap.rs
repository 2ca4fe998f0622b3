//! Login orchestration over a [`SessionService`].

use termchat_protocol::LoginOutcome;
use tracing::{debug, info, warn};

use super::console::Console;
use super::state::{LoginState, Signal, UserChoice, transition};
use crate::error::{ChatError, Result};
use crate::glyph::{self, EncodeOptions};
use crate::service::SessionService;
use crate::store::CredentialStore;

/// Printed under every token so the user knows to flip its colours.
pub const DEFAULT_TOKEN_HINT: &str = "The login code is printed above. Select (invert) the code region, then scan it with your phone.";

const RETRY_PROMPT: &str = "Login failed. Try again? (y/n)";
const UNRENDERABLE_TOKEN: &str = "The login code could not be rendered; waiting for the next one.";

/// How the session was finally established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPath {
	Credential,
	Token,
}

/// Summary of a successful login run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginReport {
	pub via: LoginPath,
	/// Calls made to `login_with_token`.
	pub token_attempts: u32,
	/// Times the user was asked whether to retry.
	pub prompts: u32,
}

/// Drives the login state machine and performs the I/O each state needs.
pub struct Bootstrapper<'a> {
	service: &'a dyn SessionService,
	store: &'a dyn CredentialStore,
	console: &'a mut dyn Console,
	options: EncodeOptions,
	hint: String,
}

impl<'a> Bootstrapper<'a> {
	pub fn new(service: &'a dyn SessionService, store: &'a dyn CredentialStore, console: &'a mut dyn Console) -> Self {
		Self {
			service,
			store,
			console,
			options: EncodeOptions::default(),
			hint: DEFAULT_TOKEN_HINT.to_string(),
		}
	}

	pub fn with_options(mut self, options: EncodeOptions) -> Self {
		self.options = options;
		self
	}

	pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
		self.hint = hint.into();
		self
	}

	/// Runs until the session is authenticated or the user gives up.
	///
	/// # Errors
	///
	/// Returns [`ChatError::LoginAbandoned`] when the user declines to retry
	/// after a failed token login. Every other failure along the way is
	/// absorbed into a state transition.
	pub async fn run(&mut self) -> Result<LoginReport> {
		let mut state = LoginState::Idle;
		let mut credential = None;
		let mut via = LoginPath::Token;
		let mut token_attempts: u32 = 0;
		let mut prompts: u32 = 0;

		loop {
			let signal = match state {
				LoginState::Idle => {
					credential = self.load_credential();
					if credential.is_some() {
						Signal::CredentialFound
					} else {
						Signal::CredentialMissing
					}
				}
				LoginState::CredentialAttempt => {
					let blob = credential.take().unwrap_or_default();
					Signal::Outcome(self.service.login_with_credential(&blob).await)
				}
				LoginState::TokenIssued => {
					token_attempts = token_attempts.saturating_add(1);
					Signal::Outcome(self.issue_token().await)
				}
				LoginState::UserDecision => {
					prompts = prompts.saturating_add(1);
					Signal::Choice(self.ask_retry().await)
				}
				LoginState::Authenticated => {
					info!(target = "termchat.login", ?via, token_attempts, "session authenticated");
					self.persist_session().await;
					return Ok(LoginReport { via, token_attempts, prompts });
				}
				LoginState::Abandoned => {
					info!(target = "termchat.login", token_attempts, prompts, "login abandoned");
					return Err(ChatError::LoginAbandoned);
				}
			};

			let next = transition(state, signal)?;
			debug!(target = "termchat.login", from = ?state, to = ?next, ?signal, "login transition");
			if state == LoginState::CredentialAttempt && next == LoginState::Authenticated {
				via = LoginPath::Credential;
			}
			state = next;
		}
	}

	fn load_credential(&self) -> Option<Vec<u8>> {
		match self.store.load() {
			Ok(credential) => credential,
			Err(err) => {
				debug!(target = "termchat.login", error = %err, "credential unreadable; using token login");
				None
			}
		}
	}

	async fn issue_token(&mut self) -> LoginOutcome {
		let Self {
			service,
			console,
			options,
			hint,
			..
		} = self;
		let options = &*options;
		let hint = hint.as_str();

		let mut show_token = |bytes: &[u8]| match glyph::encode_bytes(bytes, options) {
			Ok(grid) => {
				console.print(&grid.to_string());
				console.print(hint);
			}
			Err(err) => {
				warn!(target = "termchat.login", error = %err, "token image could not be rendered");
				console.print(UNRENDERABLE_TOKEN);
			}
		};
		service.login_with_token(&mut show_token).await
	}

	async fn ask_retry(&mut self) -> UserChoice {
		self.console.print(RETRY_PROMPT);
		match self.console.read_line().await {
			Ok(Some(line)) => UserChoice::parse(&line),
			Ok(None) => UserChoice::Abandon,
			Err(err) => {
				warn!(target = "termchat.login", error = %err, "could not read answer");
				UserChoice::Abandon
			}
		}
	}

	/// Best effort: a session that cannot be exported or saved is still live,
	/// and the next run simply shows a new token.
	async fn persist_session(&self) {
		if let Ok(blob) = self.service.export_credential().await {
			let _ = self.store.save(&blob);
		}
	}
}
