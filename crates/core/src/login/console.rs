//! Line-oriented user interaction used during login.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::error::Result;

/// Where the login flow prints tokens and asks questions.
#[async_trait]
pub trait Console: Send {
	/// Writes `text` followed by a line break.
	fn print(&mut self, text: &str);

	/// Reads one line of input; `None` at end of input.
	async fn read_line(&mut self) -> Result<Option<String>>;
}

/// In-memory console that answers from a fixed list and records output.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
	answers: VecDeque<String>,
	output: Vec<String>,
	reads: usize,
}

impl ScriptedConsole {
	pub fn new<I, S>(answers: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			answers: answers.into_iter().map(Into::into).collect(),
			..Default::default()
		}
	}

	/// Everything printed so far, one entry per `print` call.
	pub fn output(&self) -> &[String] {
		&self.output
	}

	/// Number of times input was requested.
	pub fn reads(&self) -> usize {
		self.reads
	}
}

#[async_trait]
impl Console for ScriptedConsole {
	fn print(&mut self, text: &str) {
		self.output.push(text.to_string());
	}

	async fn read_line(&mut self) -> Result<Option<String>> {
		self.reads += 1;
		Ok(self.answers.pop_front())
	}
}
