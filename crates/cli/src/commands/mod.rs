//! Subcommand implementations.

pub mod credential;
pub mod login;
pub mod render;

use crate::cli::{Commands, CredentialAction};
use crate::config::Settings;
use crate::error::Result;

pub async fn dispatch(command: Commands, settings: Settings) -> Result<()> {
	match command {
		Commands::Login { replay, glyphs } => login::run(&replay, &settings, &glyphs).await,
		Commands::Render { image, glyphs } => render::run(&image, &settings, &glyphs),
		Commands::Credential { action } => {
			let path = settings.credential_path();
			match action {
				CredentialAction::Show => credential::show(&path),
				CredentialAction::Clear => credential::clear(&path),
			}
		}
	}
}
