//! Login result kinds reported by a session service.

use serde::{Deserialize, Serialize};

/// Result of a single login attempt.
///
/// Only [`LoginOutcome::Succeeded`] leaves the service holding a usable
/// session. The other two kinds never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginOutcome {
	Succeeded,
	/// The visual token lapsed before anyone scanned it.
	TokenExpired,
	/// Rejection, network fault or any other reason the service gives up.
	Failed,
}

impl LoginOutcome {
	pub fn is_success(self) -> bool {
		matches!(self, LoginOutcome::Succeeded)
	}
}

impl std::fmt::Display for LoginOutcome {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LoginOutcome::Succeeded => write!(f, "succeeded"),
			LoginOutcome::TokenExpired => write!(f, "token-expired"),
			LoginOutcome::Failed => write!(f, "failed"),
		}
	}
}
