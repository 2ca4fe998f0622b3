//! Values a chat session service hands to termchat: the result of a login
//! attempt and the inbound events that follow it. Dispatch and presentation of
//! these live in `termchat-core`.

pub mod event;
pub mod outcome;

pub use event::*;
pub use outcome::*;
