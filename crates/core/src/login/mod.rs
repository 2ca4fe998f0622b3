//! Session login: credential replay first, then visual tokens until one sticks.
//!
//! [`state`] holds the pure transition table; [`Bootstrapper`] runs it against
//! a [`SessionService`](crate::service::SessionService), a
//! [`CredentialStore`](crate::store::CredentialStore) and a [`Console`].

mod bootstrap;
mod console;
pub mod state;

pub use bootstrap::{Bootstrapper, DEFAULT_TOKEN_HINT, LoginPath, LoginReport};
pub use console::{Console, ScriptedConsole};
pub use state::{LoginState, Signal, TransitionError, UserChoice, transition};
