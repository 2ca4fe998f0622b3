//! Pure login state transitions.
//!
//! [`transition`] decides where the login flow goes next; it performs no I/O.
//! The [`Bootstrapper`](super::Bootstrapper) owns the effects each state needs.

use termchat_protocol::LoginOutcome;
use thiserror::Error;

/// Where the login flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginState {
	Idle,
	/// Replaying a previously exported credential.
	CredentialAttempt,
	/// A visual token is (about to be) on screen and awaiting resolution.
	TokenIssued,
	/// A token login failed and the user is being asked whether to retry.
	UserDecision,
	Authenticated,
	Abandoned,
}

impl LoginState {
	pub fn is_terminal(self) -> bool {
		matches!(self, LoginState::Authenticated | LoginState::Abandoned)
	}
}

/// Answer to the retry prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserChoice {
	Retry,
	Abandon,
}

impl UserChoice {
	/// Interprets one line of user input.
	///
	/// Anything starting with `y` (any case, surrounding whitespace ignored) is
	/// affirmative. Everything else, including an empty line, abandons.
	pub fn parse(input: &str) -> Self {
		match input.trim_start().chars().next() {
			Some('y' | 'Y') => UserChoice::Retry,
			_ => UserChoice::Abandon,
		}
	}
}

/// Input that moves the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
	CredentialFound,
	CredentialMissing,
	Outcome(LoginOutcome),
	Choice(UserChoice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid login transition from {from:?} on {signal:?}")]
pub struct TransitionError {
	pub from: LoginState,
	pub signal: Signal,
}

/// Computes the next state.
pub fn transition(from: LoginState, signal: Signal) -> Result<LoginState, TransitionError> {
	use LoginOutcome::*;
	use LoginState::*;

	let next = match (from, signal) {
		(Idle, Signal::CredentialFound) => CredentialAttempt,
		(Idle, Signal::CredentialMissing) => TokenIssued,
		(CredentialAttempt, Signal::Outcome(Succeeded)) => Authenticated,
		// Replay failure of either kind falls back to the token flow silently.
		(CredentialAttempt, Signal::Outcome(TokenExpired | Failed)) => TokenIssued,
		(TokenIssued, Signal::Outcome(Succeeded)) => Authenticated,
		(TokenIssued, Signal::Outcome(TokenExpired)) => TokenIssued,
		(TokenIssued, Signal::Outcome(Failed)) => UserDecision,
		(UserDecision, Signal::Choice(UserChoice::Retry)) => TokenIssued,
		(UserDecision, Signal::Choice(UserChoice::Abandon)) => Abandoned,
		_ => return Err(TransitionError { from, signal }),
	};
	Ok(next)
}
