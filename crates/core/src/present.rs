//! One-line rendering of chat events for a terminal.

use std::sync::Arc;

use termchat_protocol::{ChatEvent, EventKind};

use crate::events::EventBus;

/// Formats an event the way it is shown in the message log.
///
/// The sender label is resolved here, per event, so alias changes show up
/// immediately.
pub fn format_event(event: &ChatEvent) -> String {
	match event {
		ChatEvent::Direct(msg) => format!("{}:{}", msg.sender.label(), msg.content),
		ChatEvent::Group(msg) => format!("[{}]{}:{}", msg.group.name, msg.sender.label(), msg.content),
		ChatEvent::Discussion(msg) => format!("[{}]{}:{}", msg.discussion.name, msg.sender.label(), msg.content),
		ChatEvent::Echo(msg) => format!("{}>{}", msg.target.name, msg.content),
	}
}

/// Subscribes a formatter for every event kind that writes lines to `sink`.
pub fn register_console(bus: &EventBus, sink: Arc<dyn Fn(&str) + Send + Sync>) {
	for kind in EventKind::ALL {
		let sink = Arc::clone(&sink);
		bus.subscribe(kind, move |event| sink(&format_event(event)));
	}
}
