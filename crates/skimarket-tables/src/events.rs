//! Table events
//!
//! Listeners are plain closures registered on a table. Events are delivered
//! synchronously, after the table has finished recomputing, in subscription
//! order.

use crate::sorting::SortState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Something a host screen may want to react to
#[derive(Debug)]
pub enum TableEvent<'a, T> {
	/// A row was opened (clicked or activated from the keyboard)
	RowActivated(&'a T),
	/// The selection changed; carries every selected row in collection order
	SelectionChanged(Vec<&'a T>),
	/// The current page changed; carries the new 1-based page
	PageChanged(usize),
	/// The sort changed; carries the new sort state
	SortChanged(&'a SortState),
}

impl<T> TableEvent<'_, T> {
	/// Short event name for logging
	pub fn name(&self) -> &'static str {
		match self {
			Self::RowActivated(_) => "row_activated",
			Self::SelectionChanged(_) => "selection_changed",
			Self::PageChanged(_) => "page_changed",
			Self::SortChanged(_) => "sort_changed",
		}
	}
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

/// Type alias for listener closures
type ListenerFn<T> = Box<dyn FnMut(&TableEvent<'_, T>) + 'static>;

/// Ordered registry of listeners
pub(crate) struct Listeners<T> {
	next_id: u64,
	listeners: BTreeMap<SubscriptionId, ListenerFn<T>>,
}

impl<T> Listeners<T> {
	pub(crate) fn new() -> Self {
		Self {
			next_id: 0,
			listeners: BTreeMap::new(),
		}
	}

	pub(crate) fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
	where
		F: FnMut(&TableEvent<'_, T>) + 'static,
	{
		let id = SubscriptionId(self.next_id);
		self.next_id += 1;
		self.listeners.insert(id, Box::new(listener));
		id
	}

	pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		self.listeners.remove(&id).is_some()
	}

	pub(crate) fn len(&self) -> usize {
		self.listeners.len()
	}

	pub(crate) fn emit(&mut self, event: &TableEvent<'_, T>) {
		tracing::trace!(event = event.name(), listeners = self.listeners.len(), "emitting table event");
		for listener in self.listeners.values_mut() {
			listener(event);
		}
	}
}

impl<T> fmt::Debug for Listeners<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Listeners")
			.field("count", &self.listeners.len())
			.finish()
	}
}
