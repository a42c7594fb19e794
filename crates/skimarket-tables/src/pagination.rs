//! Pagination functionality for tables

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Smallest page size the slicer accepts
pub const MIN_PAGE_SIZE: usize = 1;

/// Page counts at or below this are listed in full by [`Pagination::page_numbers`]
const FULL_LIST_MAX: usize = 7;

/// One entry of the page-number strip rendered under a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageItem {
	/// A clickable page number
	Page(usize),
	/// A collapsed run of page numbers
	Ellipsis,
}

/// Pagination state
///
/// `page` stays within `[1, total_pages]` after every change, and there is
/// always at least one page, even for an empty collection.
///
/// # Examples
///
/// ```
/// use skimarket_tables::Pagination;
///
/// let mut pagination = Pagination::new(10);
/// pagination.set_total(23);
/// assert_eq!(pagination.total_pages(), 3);
///
/// assert!(pagination.go_to(3));
/// assert_eq!(pagination.start_index(), 21);
/// assert_eq!(pagination.end_index(), 23);
///
/// // Out of range navigation leaves the state alone
/// assert!(!pagination.go_to(4));
/// assert_eq!(pagination.page(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	page: usize,
	page_size: usize,
	total: usize,
}

impl Pagination {
	/// Creates a pagination on page 1 of an empty collection.
	///
	/// A zero page size is clamped to [`MIN_PAGE_SIZE`].
	pub fn new(page_size: usize) -> Self {
		Self {
			page: 1,
			page_size: clamp_page_size(page_size),
			total: 0,
		}
	}

	/// Current page (1-indexed)
	pub fn page(&self) -> usize {
		self.page
	}

	/// Items per page
	pub fn page_size(&self) -> usize {
		self.page_size
	}

	/// Number of items paginated
	pub fn total(&self) -> usize {
		self.total
	}

	/// Returns the total number of pages (at least 1)
	pub fn total_pages(&self) -> usize {
		self.total.div_ceil(self.page_size).max(1)
	}

	/// Updates the item count and pulls the page back into range
	pub fn set_total(&mut self, total: usize) {
		self.total = total;
		self.page = self.page.clamp(1, self.total_pages());
	}

	/// Moves to `page`; returns `false` and changes nothing when it is out of range
	pub fn go_to(&mut self, page: usize) -> bool {
		if page == 0 || page > self.total_pages() {
			tracing::debug!(page, total_pages = self.total_pages(), "ignoring out of range page");
			return false;
		}
		self.page = page;
		true
	}

	/// Moves to the next page if available
	pub fn next_page(&mut self) -> bool {
		self.has_next() && self.go_to(self.page + 1)
	}

	/// Moves to the previous page if available
	pub fn prev_page(&mut self) -> bool {
		self.has_previous() && self.go_to(self.page - 1)
	}

	/// Returns true if there is a next page
	pub fn has_next(&self) -> bool {
		self.page < self.total_pages()
	}

	/// Returns true if there is a previous page
	pub fn has_previous(&self) -> bool {
		self.page > 1
	}

	/// Changes the page size and returns to page 1.
	///
	/// A zero page size is clamped to [`MIN_PAGE_SIZE`].
	pub fn set_page_size(&mut self, page_size: usize) {
		self.page_size = clamp_page_size(page_size);
		self.page = 1;
	}

	/// Zero-based bounds of the current page, clamped to the collection
	pub fn range(&self) -> Range<usize> {
		let start = ((self.page - 1) * self.page_size).min(self.total);
		let end = (start + self.page_size).min(self.total);
		start..end
	}

	/// 1-based position of the first item on the page; 0 when empty
	pub fn start_index(&self) -> usize {
		let range = self.range();
		if range.is_empty() { 0 } else { range.start + 1 }
	}

	/// 1-based position of the last item on the page; 0 when empty
	pub fn end_index(&self) -> usize {
		self.range().end
	}

	/// Returns the current page's slice of `items`.
	///
	/// `items` is expected to hold [`Pagination::total`] elements; a shorter
	/// slice is clamped rather than indexed out of bounds.
	pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
		let range = self.range();
		let start = range.start.min(items.len());
		let end = range.end.min(items.len());
		&items[start..end]
	}

	/// Returns the page-number strip with ellipsis markers.
	///
	/// Up to seven pages are listed in full. Past that, the first and last
	/// pages are always present: near the start pages 1-5 are shown, near the
	/// end the last five, and in between the current page with one neighbour
	/// on each side.
	///
	/// ```
	/// use skimarket_tables::{PageItem, Pagination};
	///
	/// let mut pagination = Pagination::new(10);
	/// pagination.set_total(100);
	/// pagination.go_to(5);
	/// assert_eq!(
	///     pagination.page_numbers(),
	///     vec![
	///         PageItem::Page(1),
	///         PageItem::Ellipsis,
	///         PageItem::Page(4),
	///         PageItem::Page(5),
	///         PageItem::Page(6),
	///         PageItem::Ellipsis,
	///         PageItem::Page(10),
	///     ]
	/// );
	/// ```
	pub fn page_numbers(&self) -> Vec<PageItem> {
		let total = self.total_pages();
		let current = self.page;
		if total <= FULL_LIST_MAX {
			return (1..=total).map(PageItem::Page).collect();
		}

		let mut items = Vec::with_capacity(FULL_LIST_MAX);
		if current <= 3 {
			items.extend((1..=5).map(PageItem::Page));
			items.push(PageItem::Ellipsis);
			items.push(PageItem::Page(total));
		} else if current >= total - 2 {
			items.push(PageItem::Page(1));
			items.push(PageItem::Ellipsis);
			items.extend((total - 4..=total).map(PageItem::Page));
		} else {
			items.push(PageItem::Page(1));
			items.push(PageItem::Ellipsis);
			items.extend((current - 1..=current + 1).map(PageItem::Page));
			items.push(PageItem::Ellipsis);
			items.push(PageItem::Page(total));
		}
		items
	}
}

impl Default for Pagination {
	fn default() -> Self {
		Self::new(crate::settings::DEFAULT_PAGE_SIZE)
	}
}

fn clamp_page_size(page_size: usize) -> usize {
	if page_size < MIN_PAGE_SIZE {
		tracing::warn!(page_size, "page size below minimum, clamping");
		MIN_PAGE_SIZE
	} else {
		page_size
	}
}
