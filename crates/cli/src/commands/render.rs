use std::fs;
use std::path::Path;

use tracing::debug;

use crate::cli::GlyphArgs;
use crate::config::Settings;
use crate::error::{CliError, Result};

/// Prints `image` as a glyph grid on stdout.
pub fn run(image: &Path, settings: &Settings, glyphs: &GlyphArgs) -> Result<()> {
	let options = settings.encode_options(glyphs)?;
	let bytes = fs::read(image).map_err(|source| CliError::Read {
		path: image.to_path_buf(),
		source,
	})?;
	let grid = termchat::encode_bytes(&bytes, &options)?;
	debug!(target = "termchat.cli", rows = grid.row_count(), columns = grid.column_count(), "rendered image");
	print!("{grid}");
	Ok(())
}
