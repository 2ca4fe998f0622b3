use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use termchat::GlyphRamp;

#[derive(Parser, Debug)]
#[command(name = "termchat")]
#[command(about = "termchat - log in to a chat session from the terminal and follow its messages")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Settings file (defaults to <config dir>/termchat/config.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Where the session credential is kept between runs
	#[arg(long, global = true, value_name = "FILE")]
	pub credential: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Log in, reusing the stored credential when it is still accepted, then print incoming messages
	Login {
		/// Replay script that stands in for the chat service
		#[arg(long, value_name = "SCRIPT")]
		replay: PathBuf,

		#[command(flatten)]
		glyphs: GlyphArgs,
	},

	/// Print an image as a grid of terminal glyphs
	Render {
		image: PathBuf,

		#[command(flatten)]
		glyphs: GlyphArgs,
	},

	/// Inspect or remove the stored credential
	#[command(alias = "cred")]
	Credential {
		#[command(subcommand)]
		action: CredentialAction,
	},
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialAction {
	/// Show where the credential lives and a summary of its contents
	Show,
	/// Delete the stored credential
	Clear,
}

/// Rendering overrides shared by `login` and `render`.
#[derive(Args, Debug, Clone, Default)]
pub struct GlyphArgs {
	/// Pixels sampled per glyph, as SIZE or ROWSxCOLS
	#[arg(long, value_name = "R[xC]")]
	pub block: Option<BlockSize>,

	/// Glyphs ordered from lightest to darkest
	#[arg(long, value_name = "SYMBOLS")]
	pub ramp: Option<GlyphRamp>,

	/// Keep partial blocks at the right and bottom edges, padding them with black
	#[arg(long)]
	pub zero_fill: bool,
}

/// Block dimensions given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSize {
	pub rows: NonZeroU32,
	pub cols: NonZeroU32,
}

impl FromStr for BlockSize {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let parse = |part: &str| {
			part.trim()
				.parse::<NonZeroU32>()
				.map_err(|_| format!("invalid block size '{s}': expected a positive integer or ROWSxCOLS"))
		};
		match s.split_once(['x', 'X']) {
			Some((rows, cols)) => Ok(Self {
				rows: parse(rows)?,
				cols: parse(cols)?,
			}),
			None => {
				let size = parse(s)?;
				Ok(Self { rows: size, cols: size })
			}
		}
	}
}
