//! User settings, read from a JSON file in the platform config directory.
//!
//! Every field is optional in the file. Command-line flags are layered on top
//! through [`Settings::with_credential_path`] and [`Settings::encode_options`].

use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use termchat::glyph::{DEFAULT_BLOCK, DEFAULT_RAMP};
use termchat::{EdgePolicy, EncodeOptions, GlyphRamp};
use tracing::debug;

use crate::cli::GlyphArgs;
use crate::error::{CliError, Result};

const APP_DIR: &str = "termchat";
const CONFIG_FILE: &str = "config.json";
const CREDENTIAL_FILE: &str = "credential.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
	pub credential_path: Option<PathBuf>,
	pub row_block: NonZeroU32,
	pub col_block: NonZeroU32,
	/// Glyphs from lightest to darkest.
	pub ramp: String,
	pub edge: EdgePolicy,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			credential_path: None,
			row_block: DEFAULT_BLOCK,
			col_block: DEFAULT_BLOCK,
			ramp: DEFAULT_RAMP.to_string(),
			edge: EdgePolicy::default(),
		}
	}
}

impl Settings {
	/// Loads settings from `path`, or from the default location when `None`.
	///
	/// A missing default file yields defaults; an explicit path must exist.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		match path {
			Some(path) => Self::read(path),
			None => match default_config_path() {
				Some(path) if path.is_file() => Self::read(&path),
				_ => Ok(Self::default()),
			},
		}
	}

	fn read(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path).map_err(|source| CliError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let settings = serde_json::from_str(&content).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
		debug!(target = "termchat.cli", path = %path.display(), "loaded settings");
		Ok(settings)
	}

	/// Replaces the credential location when `path` is given.
	pub fn with_credential_path(mut self, path: Option<PathBuf>) -> Self {
		if path.is_some() {
			self.credential_path = path;
		}
		self
	}

	pub fn credential_path(&self) -> PathBuf {
		self.credential_path.clone().unwrap_or_else(default_credential_path)
	}

	/// Encoder configuration from these settings with `overrides` applied.
	pub fn encode_options(&self, overrides: &GlyphArgs) -> Result<EncodeOptions> {
		let ramp = match &overrides.ramp {
			Some(ramp) => ramp.clone(),
			None => self
				.ramp
				.parse::<GlyphRamp>()
				.map_err(|e| CliError::Config(format!("ramp: {e}")))?,
		};
		let (rows, cols) = overrides.block.map_or((self.row_block, self.col_block), |block| (block.rows, block.cols));
		let edge = if overrides.zero_fill { EdgePolicy::ZeroFill } else { self.edge };

		Ok(EncodeOptions::default().with_block(rows, cols).with_ramp(ramp).with_edge(edge))
	}
}

pub fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// `<config dir>/termchat/credential.json`, or `credential.json` in the
/// working directory on platforms without a config directory.
pub fn default_credential_path() -> PathBuf {
	dirs::config_dir().map_or_else(|| PathBuf::from(CREDENTIAL_FILE), |dir| dir.join(APP_DIR).join(CREDENTIAL_FILE))
}
