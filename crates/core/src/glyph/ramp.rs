//! Ordered symbol ramps used to quantize brightness.

use std::str::FromStr;

use crate::error::{ChatError, Result};

/// Ideographic space followed by a lower seven-eighths block.
///
/// Both glyphs occupy a full CJK-width cell in most terminal fonts, so a
/// printed code keeps square modules.
pub const DEFAULT_RAMP: &str = "\u{3000}\u{2587}";

/// Symbols ordered from lightest (shown for the brightest blocks) to darkest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
	symbols: Vec<char>,
}

impl GlyphRamp {
	pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self> {
		let symbols: Vec<char> = symbols.into_iter().collect();
		if symbols.is_empty() {
			return Err(ChatError::Context("glyph ramp needs at least one symbol".into()));
		}
		Ok(Self { symbols })
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	/// Always false; a ramp cannot be built empty.
	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	pub fn symbols(&self) -> &[char] {
		&self.symbols
	}

	pub fn lightest(&self) -> char {
		self.symbols[0]
	}

	pub fn darkest(&self) -> char {
		self.symbols[self.symbols.len() - 1]
	}

	/// Maps a mean brightness in `[0, 1]` to a symbol.
	///
	/// The brightness is scaled by the ramp length and truncated; exactly 1.0
	/// clamps onto the last bucket. The bucket index is then inverted so the
	/// brightest bucket lands on the lightest symbol.
	pub fn quantize(&self, brightness: f64) -> char {
		let n = self.symbols.len();
		let index = ((brightness.clamp(0.0, 1.0) * n as f64) as usize).min(n - 1);
		self.symbols[n - 1 - index]
	}

	/// Position of `symbol` counted from the darkest end, or `None` if absent.
	///
	/// Higher rank means lighter.
	pub fn lightness_rank(&self, symbol: char) -> Option<usize> {
		self.symbols.iter().rev().position(|&s| s == symbol)
	}
}

impl Default for GlyphRamp {
	fn default() -> Self {
		Self {
			symbols: DEFAULT_RAMP.chars().collect(),
		}
	}
}

impl FromStr for GlyphRamp {
	type Err = ChatError;

	fn from_str(s: &str) -> Result<Self> {
		Self::new(s.chars())
	}
}

impl std::fmt::Display for GlyphRamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for symbol in &self.symbols {
			write!(f, "{symbol}")?;
		}
		Ok(())
	}
}
