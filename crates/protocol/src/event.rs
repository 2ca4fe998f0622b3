//! Inbound chat events and their sender metadata.

use serde::{Deserialize, Serialize};

/// Category an event is dispatched under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
	/// One-to-one message from a contact.
	Direct,
	/// Message posted in a group.
	Group,
	/// Message posted in an ad-hoc discussion.
	Discussion,
	/// Echo of a message this client sent.
	Echo,
}

impl EventKind {
	pub const ALL: [EventKind; 4] = [EventKind::Direct, EventKind::Group, EventKind::Discussion, EventKind::Echo];
}

impl std::fmt::Display for EventKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			EventKind::Direct => write!(f, "direct"),
			EventKind::Group => write!(f, "group"),
			EventKind::Discussion => write!(f, "discussion"),
			EventKind::Echo => write!(f, "echo"),
		}
	}
}

/// Identity fields attached to the author of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
	/// Name the local user assigned to this contact, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub alias: Option<String>,
	/// Name the contact chose for themselves.
	pub nickname: String,
}

impl Sender {
	pub fn new(nickname: impl Into<String>) -> Self {
		Self {
			alias: None,
			nickname: nickname.into(),
		}
	}

	pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
		self.alias = Some(alias.into());
		self
	}

	/// Display name for this sender: the alias when one is set, else the nickname.
	///
	/// Aliases can be reassigned between messages, so callers compute this at
	/// display time instead of storing it.
	pub fn label(&self) -> &str {
		match self.alias.as_deref() {
			Some(alias) if !alias.is_empty() => alias,
			_ => &self.nickname,
		}
	}
}

/// A named conversation container (group, discussion or echo target).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
	pub name: String,
}

impl Conversation {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
	pub sender: Sender,
	pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMessage {
	pub group: Conversation,
	pub sender: Sender,
	pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionMessage {
	pub discussion: Conversation,
	pub sender: Sender,
	pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEcho {
	pub target: Conversation,
	pub content: String,
}

/// Any inbound event a session can deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChatEvent {
	Direct(DirectMessage),
	Group(GroupMessage),
	Discussion(DiscussionMessage),
	Echo(MessageEcho),
}

impl ChatEvent {
	pub fn kind(&self) -> EventKind {
		match self {
			ChatEvent::Direct(_) => EventKind::Direct,
			ChatEvent::Group(_) => EventKind::Group,
			ChatEvent::Discussion(_) => EventKind::Discussion,
			ChatEvent::Echo(_) => EventKind::Echo,
		}
	}

	/// Author of the event; echoes are authored locally and have none.
	pub fn sender(&self) -> Option<&Sender> {
		match self {
			ChatEvent::Direct(msg) => Some(&msg.sender),
			ChatEvent::Group(msg) => Some(&msg.sender),
			ChatEvent::Discussion(msg) => Some(&msg.sender),
			ChatEvent::Echo(_) => None,
		}
	}

	pub fn content(&self) -> &str {
		match self {
			ChatEvent::Direct(msg) => &msg.content,
			ChatEvent::Group(msg) => &msg.content,
			ChatEvent::Discussion(msg) => &msg.content,
			ChatEvent::Echo(msg) => &msg.content,
		}
	}
}
