use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

use crate::palettes::palette::Entry;

/// Handle returned by [Observers::subscribe], used to unsubscribe again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Notifications emitted by a [Palette](crate::palettes::palette::Palette).
///
/// Color changes are coarse: every mutation carries the complete new list,
/// views are expected to refresh fully.
#[derive(Clone, Debug, PartialEq)]
pub enum PaletteEvent {
	ColorsChanged(Vec<Entry>),
	ColumnsChanged(u32),
	NameChanged(String),
	FileNameChanged(Option<PathBuf>),
	DirtyChanged(bool),
}

/// Notifications emitted by a [PaletteCollection](crate::palettes::collection::PaletteCollection).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionEvent {
	RowsInserted(usize),
	RowsRemoved(usize),
	DataChanged(usize),
	Reset,
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// A list of callbacks interested in events of type `E`.
pub struct Observers<E> {
	next_id: u64,
	callbacks: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Default for Observers<E> {
	fn default() -> Self {
		Self {
			next_id: 0,
			callbacks: Vec::new(),
		}
	}
}

impl<E> Debug for Observers<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Observers").field("subscribers", &self.callbacks.len()).finish()
	}
}

impl<E> Observers<E> {
	pub fn subscribe<F: FnMut(&E) + 'static>(&mut self, callback: F) -> SubscriptionId {
		let id = SubscriptionId(self.next_id);
		self.next_id += 1;
		self.callbacks.push((id, Box::new(callback)));
		id
	}

	/// Returns `false` if `id` was not subscribed.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.callbacks.len();
		self.callbacks.retain(|(i, _)| *i != id);
		self.callbacks.len() != before
	}

	pub fn emit(&mut self, event: &E) {
		for (_, callback) in self.callbacks.iter_mut() {
			callback(event);
		}
	}

	pub fn len(&self) -> usize {
		self.callbacks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.callbacks.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use std::rc::Rc;

	#[test]
	fn unsubscribed_callbacks_stop_receiving() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let mut observers: Observers<CollectionEvent> = Observers::default();

		let sink = Rc::clone(&seen);
		let id = observers.subscribe(move |e| sink.borrow_mut().push(*e));
		observers.emit(&CollectionEvent::RowsInserted(0));

		assert!(observers.unsubscribe(id));
		assert!(!observers.unsubscribe(id));
		observers.emit(&CollectionEvent::Reset);

		assert_eq!(*seen.borrow(), vec![CollectionEvent::RowsInserted(0)]);
		assert!(observers.is_empty());
	}
}
