//! termchat: terminal login bootstrap and message dispatch for chat sessions.
//!
//! The crate is split along the two pieces with real logic:
//!
//! - [`glyph`] turns a token image into a grid of terminal glyphs
//! - [`login`] runs credential replay and the visual-token retry loop
//!
//! plus the plumbing around them: a [`SessionService`] boundary (with an
//! offline [`ReplayService`]), [`CredentialStore`]s, the [`EventBus`] and
//! line formatting in [`present`].

pub mod error;
pub mod events;
pub mod glyph;
pub mod login;
pub mod present;
pub mod service;
pub mod store;

pub use error::{ChatError, Result};
pub use events::{EventBus, Handler, spawn_dispatch};
pub use glyph::{EdgePolicy, EncodeOptions, GlyphGrid, GlyphRamp, encode, encode_bytes};
pub use login::{Bootstrapper, Console, LoginPath, LoginReport, LoginState, UserChoice};
pub use service::{ReplayScript, ReplayService, SessionService, TokenCallback};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use termchat_protocol as protocol;
pub use termchat_protocol::{ChatEvent, EventKind, LoginOutcome, Sender};
