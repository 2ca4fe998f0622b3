//! Bitmap to text encoder for printing visual tokens in a terminal.
//!
//! The image is cut into `row_block × col_block` pixel blocks starting at the
//! top-left corner. Each block's mean brightness is quantized onto a
//! [`GlyphRamp`], producing one glyph per block.

mod grid;
mod ramp;

use std::num::NonZeroU32;

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::trace;

pub use grid::GlyphGrid;
pub use ramp::{DEFAULT_RAMP, GlyphRamp};

use crate::error::Result;

/// Pixels per token module in the images the chat service issues.
pub const DEFAULT_BLOCK: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// How blocks that run past the right or bottom edge are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgePolicy {
	/// Drop trailing partial blocks (floor division of the dimensions).
	#[default]
	Discard,
	/// Keep trailing partial blocks; samples outside the image count as black.
	///
	/// Edge blocks come out darker than their in-bounds pixels would suggest.
	ZeroFill,
}

/// Sampling and quantization parameters for [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
	pub row_block: NonZeroU32,
	pub col_block: NonZeroU32,
	pub ramp: GlyphRamp,
	pub edge: EdgePolicy,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self {
			row_block: DEFAULT_BLOCK,
			col_block: DEFAULT_BLOCK,
			ramp: GlyphRamp::default(),
			edge: EdgePolicy::default(),
		}
	}
}

impl EncodeOptions {
	pub fn with_block(mut self, row_block: NonZeroU32, col_block: NonZeroU32) -> Self {
		self.row_block = row_block;
		self.col_block = col_block;
		self
	}

	pub fn with_ramp(mut self, ramp: GlyphRamp) -> Self {
		self.ramp = ramp;
		self
	}

	pub fn with_edge(mut self, edge: EdgePolicy) -> Self {
		self.edge = edge;
		self
	}

	/// Grid dimensions `(rows, columns)` this configuration yields for an image.
	pub fn grid_size(&self, width: u32, height: u32) -> (u32, u32) {
		let (r, c) = (self.row_block.get(), self.col_block.get());
		match self.edge {
			EdgePolicy::Discard => (height / r, width / c),
			EdgePolicy::ZeroFill => (height.div_ceil(r), width.div_ceil(c)),
		}
	}
}

/// HSL lightness of a pixel in `[0, 1]`; alpha is ignored.
pub fn brightness(pixel: &Rgba<u8>) -> f64 {
	let [r, g, b, _] = pixel.0;
	let max = r.max(g).max(b) as f64;
	let min = r.min(g).min(b) as f64;
	(max + min) / 2.0 / 255.0
}

/// Mean brightness of the block whose top-left pixel is `(left, top)`.
///
/// Every one of the `row_block × col_block` sample positions counts toward the
/// divisor; positions outside the image contribute zero.
pub fn block_mean(image: &RgbaImage, top: u32, left: u32, row_block: NonZeroU32, col_block: NonZeroU32) -> f64 {
	let (width, height) = image.dimensions();
	let mut sum = 0.0;
	for dy in 0..row_block.get() {
		for dx in 0..col_block.get() {
			let (x, y) = (left.saturating_add(dx), top.saturating_add(dy));
			if x < width && y < height {
				sum += brightness(image.get_pixel(x, y));
			}
		}
	}
	sum / (row_block.get() as f64 * col_block.get() as f64)
}

/// Converts an image into a glyph grid.
pub fn encode(image: &RgbaImage, options: &EncodeOptions) -> GlyphGrid {
	let (width, height) = image.dimensions();
	let (rows, columns) = options.grid_size(width, height);
	let (r, c) = (options.row_block.get(), options.col_block.get());

	let mut lines = Vec::with_capacity(rows as usize);
	for row in 0..rows {
		let mut line = String::with_capacity(columns as usize * 3);
		for col in 0..columns {
			let mean = block_mean(image, row * r, col * c, options.row_block, options.col_block);
			line.push(options.ramp.quantize(mean));
		}
		lines.push(line);
	}

	trace!(target = "termchat.glyph", width, height, rows, columns, "encoded image");
	GlyphGrid::new(lines, columns as usize)
}

/// Decodes `bytes` (PNG, JPEG, GIF or BMP) and encodes the result.
pub fn encode_bytes(bytes: &[u8], options: &EncodeOptions) -> Result<GlyphGrid> {
	let image = image::load_from_memory(bytes)?.to_rgba8();
	Ok(encode(&image, options))
}
