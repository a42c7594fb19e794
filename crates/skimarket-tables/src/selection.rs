//! Row selection tracking
//!
//! Selection is keyed by row identity, so it survives filtering, sorting and
//! page navigation. It is not pruned on its own: whoever owns the collection
//! calls [`Selection::retain`] when rows go away.

use crate::value::RowId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Aggregate selection state shown by the header checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
	/// No row of the collection is selected
	None,
	/// Some but not all rows are selected
	Partial,
	/// Every row of a non-empty collection is selected
	All,
}

/// Set of selected row identities
///
/// # Examples
///
/// ```
/// use skimarket_tables::{RowId, Selection, SelectionState};
///
/// let filtered = [RowId::from(1), RowId::from(2), RowId::from(3)];
/// let mut selection = Selection::new();
///
/// selection.toggle(RowId::from(2));
/// assert_eq!(selection.state(&filtered), SelectionState::Partial);
///
/// selection.toggle_all(&filtered);
/// assert_eq!(selection.state(&filtered), SelectionState::All);
///
/// selection.toggle_all(&filtered);
/// assert!(selection.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
	ids: BTreeSet<RowId>,
}

impl Selection {
	/// Creates an empty selection
	pub fn new() -> Self {
		Self::default()
	}

	/// Flips membership of one row; returns whether it is now selected
	pub fn toggle(&mut self, id: RowId) -> bool {
		if self.ids.remove(&id) {
			false
		} else {
			self.ids.insert(id);
			true
		}
	}

	/// Selects one row
	pub fn select(&mut self, id: RowId) {
		self.ids.insert(id);
	}

	/// Deselects one row
	pub fn deselect(&mut self, id: &RowId) {
		self.ids.remove(id);
	}

	/// Header checkbox click.
	///
	/// Clears the selection when every id in `scope` is already selected,
	/// otherwise replaces it with exactly the ids in `scope`.
	pub fn toggle_all(&mut self, scope: &[RowId]) {
		if self.state(scope) == SelectionState::All {
			self.ids.clear();
		} else {
			self.ids = scope.iter().cloned().collect();
		}
	}

	/// Deselects everything
	pub fn clear(&mut self) {
		self.ids.clear();
	}

	/// Whether `id` is selected
	pub fn contains(&self, id: &RowId) -> bool {
		self.ids.contains(id)
	}

	/// Number of selected ids
	pub fn len(&self) -> usize {
		self.ids.len()
	}

	/// Whether nothing is selected
	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Selected ids in identity order
	pub fn iter(&self) -> impl Iterator<Item = &RowId> {
		self.ids.iter()
	}

	/// Selection state relative to `scope`
	pub fn state(&self, scope: &[RowId]) -> SelectionState {
		let selected = scope.iter().filter(|id| self.ids.contains(*id)).count();
		match selected {
			0 => SelectionState::None,
			n if n == scope.len() => SelectionState::All,
			_ => SelectionState::Partial,
		}
	}

	/// Drops ids that are not in `current`; returns how many were dropped
	pub fn retain<'a, I>(&mut self, current: I) -> usize
	where
		I: IntoIterator<Item = &'a RowId>,
	{
		let current: HashSet<&RowId> = current.into_iter().collect();
		let before = self.ids.len();
		self.ids.retain(|id| current.contains(id));
		before - self.ids.len()
	}
}
