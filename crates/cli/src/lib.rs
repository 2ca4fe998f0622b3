//! Command-line front end for termchat.
//!
//! The binary in `main.rs` only parses arguments and reports failures; the
//! commands themselves live here so integration tests and other front ends
//! can reuse them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
