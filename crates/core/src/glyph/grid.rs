//! Character grid produced by the encoder.

/// Rows of glyphs ready for terminal display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphGrid {
	rows: Vec<String>,
	columns: usize,
}

impl GlyphGrid {
	pub(crate) fn new(rows: Vec<String>, columns: usize) -> Self {
		Self { rows, columns }
	}

	pub fn rows(&self) -> &[String] {
		&self.rows
	}

	pub fn row_count(&self) -> usize {
		self.rows.len()
	}

	/// Glyphs per row (every row has the same width).
	pub fn column_count(&self) -> usize {
		self.columns
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty() || self.columns == 0
	}

	pub fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
		self.rows.iter().flat_map(|row| row.chars())
	}
}

impl std::fmt::Display for GlyphGrid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for row in &self.rows {
			writeln!(f, "{row}")?;
		}
		Ok(())
	}
}
