//! Sorting functionality for tables

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Ascending order
	Ascending,
	/// Descending order
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Parses a sort direction from a query parameter
	///
	/// Returns `Ascending` for positive values and `Descending` for negative values
	/// (e.g., "name" -> Ascending, "-name" -> Descending)
	pub fn parse_from_query(s: &str) -> (Self, &str) {
		if let Some(field) = s.strip_prefix('-') {
			(Self::Descending, field)
		} else {
			(Self::Ascending, s)
		}
	}
}

/// Current sort of a table.
///
/// There is no "direction without key" state: clearing the sort clears both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SortState {
	/// Rows keep their filtered order
	#[default]
	Unsorted,
	/// Rows are ordered by `key`
	Sorted {
		/// Field sorted on
		key: String,
		/// Direction
		direction: SortDirection,
	},
}

impl SortState {
	/// Sorted ascending on `key`
	pub fn ascending(key: impl Into<String>) -> Self {
		Self::Sorted {
			key: key.into(),
			direction: SortDirection::Ascending,
		}
	}

	/// Sorted descending on `key`
	pub fn descending(key: impl Into<String>) -> Self {
		Self::Sorted {
			key: key.into(),
			direction: SortDirection::Descending,
		}
	}

	/// Sort key, if any
	pub fn key(&self) -> Option<&str> {
		match self {
			Self::Unsorted => None,
			Self::Sorted { key, .. } => Some(key),
		}
	}

	/// Sort direction, if any
	pub fn direction(&self) -> Option<SortDirection> {
		match self {
			Self::Unsorted => None,
			Self::Sorted { direction, .. } => Some(*direction),
		}
	}

	/// Whether a sort is active
	pub fn is_sorted(&self) -> bool {
		!matches!(self, Self::Unsorted)
	}

	/// Header click on `key`.
	///
	/// The same column cycles ascending → descending → unsorted; another
	/// column starts over at ascending.
	///
	/// ```
	/// use skimarket_tables::SortState;
	///
	/// let sort = SortState::Unsorted.toggle("price");
	/// assert_eq!(sort, SortState::ascending("price"));
	/// let sort = sort.toggle("price");
	/// assert_eq!(sort, SortState::descending("price"));
	/// assert_eq!(sort.clone().toggle("price"), SortState::Unsorted);
	/// assert_eq!(sort.toggle("name"), SortState::ascending("name"));
	/// ```
	pub fn toggle(self, clicked: &str) -> Self {
		match self {
			Self::Sorted { key, direction } if key == clicked => match direction {
				SortDirection::Ascending => Self::Sorted {
					key,
					direction: SortDirection::Descending,
				},
				SortDirection::Descending => Self::Unsorted,
			},
			_ => Self::ascending(clicked),
		}
	}

	/// Parses the `-field` query convention; an empty string is unsorted
	pub fn parse_from_query(s: &str) -> Self {
		let s = s.trim();
		let (direction, key) = SortDirection::parse_from_query(s);
		if key.is_empty() {
			Self::Unsorted
		} else {
			Self::Sorted {
				key: key.to_string(),
				direction,
			}
		}
	}

	/// Renders the `-field` query convention; `None` when unsorted
	pub fn to_query(&self) -> Option<String> {
		match self {
			Self::Unsorted => None,
			Self::Sorted {
				key,
				direction: SortDirection::Ascending,
			} => Some(key.clone()),
			Self::Sorted {
				key,
				direction: SortDirection::Descending,
			} => Some(format!("-{}", key)),
		}
	}
}

/// Orders `indices` (positions into `rows`) by the sort state.
///
/// Ties keep their input order in both directions. Unsorted leaves the
/// slice untouched.
pub fn sort_indices<T: Record>(rows: &[T], indices: &mut Vec<usize>, sort: &SortState) {
	let SortState::Sorted { key, direction } = sort else {
		return;
	};
	// One read per row instead of one per comparison
	let keyed: Vec<(usize, crate::value::CellValue)> = indices
		.iter()
		.map(|&index| (index, rows[index].cell(key)))
		.collect();
	let direction = *direction;
	let sorted = stable_merge_sort(keyed, |a, b| {
		let ordering = a.1.compare(&b.1);
		match direction {
			SortDirection::Ascending => ordering,
			SortDirection::Descending => ordering.reverse(),
		}
	});
	*indices = sorted.into_iter().map(|(index, _)| index).collect();
}

/// Returns `rows` ordered by the sort state; the input is left as is.
pub fn sort_rows<'r, T: Record>(rows: &[&'r T], sort: &SortState) -> Vec<&'r T> {
	let mut indices: Vec<usize> = (0..rows.len()).collect();
	sort_indices(rows, &mut indices, sort);
	indices.into_iter().map(|index| rows[index]).collect()
}

/// Bottom-up merge sort that takes the left element on ties.
///
/// `slice::sort_by` may panic when the comparator is not a total order, and
/// the cell comparator is not one once incomparable pairs tie.
fn stable_merge_sort<E, F>(items: Vec<E>, mut compare: F) -> Vec<E>
where
	F: FnMut(&E, &E) -> Ordering,
{
	let len = items.len();
	let mut current: Vec<Option<E>> = items.into_iter().map(Some).collect();
	let mut width = 1;
	while width < len {
		let mut merged: Vec<Option<E>> = Vec::with_capacity(len);
		let mut start = 0;
		while start < len {
			let mid = (start + width).min(len);
			let end = (start + 2 * width).min(len);
			let (mut left, mut right) = (start, mid);
			while left < mid && right < end {
				let take_right = match (&current[left], &current[right]) {
					(Some(l), Some(r)) => compare(r, l) == Ordering::Less,
					_ => false,
				};
				if take_right {
					merged.push(current[right].take());
					right += 1;
				} else {
					merged.push(current[left].take());
					left += 1;
				}
			}
			merged.extend(current[left..mid].iter_mut().map(Option::take));
			merged.extend(current[right..end].iter_mut().map(Option::take));
			start = end;
		}
		current = merged;
		width *= 2;
	}
	current.into_iter().flatten().collect()
}
