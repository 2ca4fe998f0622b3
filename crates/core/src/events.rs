//! Event subscription and dispatch.
//!
//! Handlers subscribe per [`EventKind`] and run in registration order. The
//! handler list is cloned out of the lock before any handler runs, so a
//! handler may subscribe further handlers without deadlocking.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::RwLock;
use termchat_protocol::{ChatEvent, EventKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

/// Callback invoked for each event of the kind it subscribed to.
pub type Handler = Arc<dyn Fn(&ChatEvent) + Send + Sync>;

#[derive(Default)]
pub struct EventBus {
	handlers: RwLock<HashMap<EventKind, Vec<Handler>>>,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn subscribe<F>(&self, kind: EventKind, handler: F)
	where
		F: Fn(&ChatEvent) + Send + Sync + 'static,
	{
		self.handlers.write().entry(kind).or_default().push(Arc::new(handler));
	}

	pub fn handler_count(&self, kind: EventKind) -> usize {
		self.handlers.read().get(&kind).map_or(0, Vec::len)
	}

	/// Runs every handler registered for the event's kind and returns how many ran.
	///
	/// A panicking handler is logged and skipped; the remaining handlers still run.
	pub fn dispatch(&self, event: &ChatEvent) -> usize {
		let kind = event.kind();
		let handlers = self.handlers.read().get(&kind).cloned().unwrap_or_default();
		trace!(target = "termchat.events", %kind, handlers = handlers.len(), "dispatching event");

		for (index, handler) in handlers.iter().enumerate() {
			if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
				warn!(target = "termchat.events", %kind, index, "event handler panicked");
			}
		}
		handlers.len()
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let handlers = self.handlers.read();
		let mut map = f.debug_map();
		for kind in EventKind::ALL {
			map.entry(&kind, &handlers.get(&kind).map_or(0, Vec::len));
		}
		map.finish()
	}
}

/// Pumps `events` into `bus` on a separate task until the sender side closes.
///
/// The task resolves to the number of events received.
pub fn spawn_dispatch(bus: Arc<EventBus>, mut events: mpsc::UnboundedReceiver<ChatEvent>) -> JoinHandle<usize> {
	tokio::spawn(async move {
		let mut received = 0;
		while let Some(event) = events.recv().await {
			received += 1;
			bus.dispatch(&event);
		}
		received
	})
}
