//! Offline session service that replays a recorded login and message log.
//!
//! Useful for demos, terminal testing and exercising the bootstrapper
//! without a live backend. A script lists the outcome of each token attempt,
//! the credential it accepts for fast login and the events delivered once the
//! session is up.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use termchat_protocol::{ChatEvent, LoginOutcome};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use super::{SessionService, TokenCallback};
use crate::error::{ChatError, Result};

/// On-disk replay script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayScript {
	#[serde(default)]
	pub nickname: Option<String>,
	/// Credential accepted by `login_with_credential`.
	#[serde(default)]
	pub accepted_credential: Option<String>,
	/// Credential handed out by `export_credential` after login.
	#[serde(default)]
	pub export_credential: Option<String>,
	/// Token attempts, consumed in order.
	#[serde(default)]
	pub tokens: Vec<TokenStep>,
	/// Events delivered once the session is established.
	#[serde(default)]
	pub events: Vec<ChatEvent>,
}

/// One scripted token attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStep {
	/// Token image, relative to the script's directory.
	pub image: PathBuf,
	pub outcome: LoginOutcome,
}

struct ReplayState {
	tokens: VecDeque<(Vec<u8>, LoginOutcome)>,
	events: Vec<ChatEvent>,
	event_tx: Option<mpsc::UnboundedSender<ChatEvent>>,
	/// Image shown again once the scripted tokens run out.
	last_image: Option<Vec<u8>>,
	authenticated: bool,
}

pub struct ReplayService {
	nickname: Option<String>,
	accepted_credential: Option<Vec<u8>>,
	export_credential: Option<Vec<u8>>,
	state: Mutex<ReplayState>,
	event_rx: Mutex<Option<mpsc::UnboundedReceiver<ChatEvent>>>,
	closed_tx: watch::Sender<bool>,
	closed_rx: watch::Receiver<bool>,
	token_requests: AtomicUsize,
	credential_attempts: AtomicUsize,
}

impl ReplayService {
	pub fn new(nickname: Option<String>) -> Self {
		let (event_tx, event_rx) = mpsc::unbounded_channel();
		let (closed_tx, closed_rx) = watch::channel(false);
		Self {
			nickname,
			accepted_credential: None,
			export_credential: None,
			state: Mutex::new(ReplayState {
				tokens: VecDeque::new(),
				events: Vec::new(),
				event_tx: Some(event_tx),
				last_image: None,
				authenticated: false,
			}),
			event_rx: Mutex::new(Some(event_rx)),
			closed_tx,
			closed_rx,
			token_requests: AtomicUsize::new(0),
			credential_attempts: AtomicUsize::new(0),
		}
	}

	/// Loads a script and the token images it references.
	pub fn from_file(path: &Path) -> Result<Self> {
		let script_error = |message: String| ChatError::Script {
			path: path.to_path_buf(),
			message,
		};
		let content = fs::read_to_string(path).map_err(|e| script_error(e.to_string()))?;
		let script: ReplayScript = serde_json::from_str(&content).map_err(|e| script_error(e.to_string()))?;
		let base_dir = path.parent().unwrap_or(Path::new("."));
		let service = Self::from_script(script, base_dir).map_err(|e| script_error(e.to_string()))?;
		info!(target = "termchat.replay", path = %path.display(), "loaded replay script");
		Ok(service)
	}

	/// Builds a service from a parsed script, resolving images against `base_dir`.
	pub fn from_script(script: ReplayScript, base_dir: &Path) -> Result<Self> {
		let mut service = Self::new(script.nickname);
		if let Some(credential) = script.accepted_credential {
			service = service.accept_credential(credential);
		}
		if let Some(credential) = script.export_credential {
			service = service.export_as(credential);
		}
		for step in script.tokens {
			let path = base_dir.join(&step.image);
			let image = fs::read(&path).map_err(|e| ChatError::Context(format!("Failed to read token image {}: {e}", path.display())))?;
			service = service.token(image, step.outcome);
		}
		for event in script.events {
			service = service.event(event);
		}
		Ok(service)
	}

	pub fn accept_credential(mut self, credential: impl Into<Vec<u8>>) -> Self {
		self.accepted_credential = Some(credential.into());
		self
	}

	pub fn export_as(mut self, credential: impl Into<Vec<u8>>) -> Self {
		self.export_credential = Some(credential.into());
		self
	}

	/// Appends a token attempt that shows `image` and then resolves to `outcome`.
	pub fn token(mut self, image: impl Into<Vec<u8>>, outcome: LoginOutcome) -> Self {
		self.state.get_mut().tokens.push_back((image.into(), outcome));
		self
	}

	pub fn event(mut self, event: ChatEvent) -> Self {
		self.state.get_mut().events.push(event);
		self
	}

	pub fn token_requests(&self) -> usize {
		self.token_requests.load(Ordering::SeqCst)
	}

	pub fn credential_attempts(&self) -> usize {
		self.credential_attempts.load(Ordering::SeqCst)
	}

	pub fn is_authenticated(&self) -> bool {
		self.state.lock().authenticated
	}

	/// Ends the session; [`SessionService::closed`] resolves afterwards.
	pub fn close(&self) {
		self.closed_tx.send_replace(true);
	}

	fn establish(&self) {
		let mut state = self.state.lock();
		state.authenticated = true;
		let events = std::mem::take(&mut state.events);
		if let Some(tx) = state.event_tx.take() {
			debug!(target = "termchat.replay", count = events.len(), "delivering recorded events");
			for event in events {
				if tx.send(event).is_err() {
					break;
				}
			}
		}
		drop(state);
		// The recording ends once its events are out.
		self.close();
	}
}

#[async_trait]
impl SessionService for ReplayService {
	async fn login_with_credential(&self, credential: &[u8]) -> LoginOutcome {
		self.credential_attempts.fetch_add(1, Ordering::SeqCst);
		if self.accepted_credential.as_deref() == Some(credential) {
			self.establish();
			LoginOutcome::Succeeded
		} else {
			LoginOutcome::Failed
		}
	}

	async fn login_with_token(&self, on_token: &mut TokenCallback<'_>) -> LoginOutcome {
		self.token_requests.fetch_add(1, Ordering::SeqCst);
		let (image, outcome) = {
			let mut state = self.state.lock();
			match state.tokens.pop_front() {
				Some((image, outcome)) => {
					state.last_image = Some(image.clone());
					(image, outcome)
				}
				None => {
					debug!(target = "termchat.replay", "no scripted token left; re-presenting the last one");
					(state.last_image.clone().unwrap_or_default(), LoginOutcome::Failed)
				}
			}
		};

		on_token(&image);
		tokio::task::yield_now().await;

		if outcome.is_success() {
			self.establish();
		}
		outcome
	}

	async fn export_credential(&self) -> Result<Vec<u8>> {
		if !self.is_authenticated() {
			return Err(ChatError::Context("no active session to export".into()));
		}
		self.export_credential
			.clone()
			.or_else(|| self.accepted_credential.clone())
			.ok_or_else(|| ChatError::Context("replay script has no credential to export".into()))
	}

	fn nickname(&self) -> Option<String> {
		self.nickname.clone()
	}

	fn take_events(&self) -> Option<mpsc::UnboundedReceiver<ChatEvent>> {
		self.event_rx.lock().take()
	}

	async fn closed(&self) {
		let mut rx = self.closed_rx.clone();
		loop {
			let closed = *rx.borrow_and_update();
			if closed || rx.changed().await.is_err() {
				return;
			}
		}
	}
}
