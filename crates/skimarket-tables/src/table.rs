//! The derived-state pipeline
//!
//! [`DataTable`] owns a collection and the four inputs that shape it (filter
//! values, sort, pagination, selection). Every mutation recomputes the whole
//! view (filter, then sort, then paginate) before any listener runs, so
//! observers never see a half-updated table.

use crate::column::Column;
use crate::events::{Listeners, SubscriptionId, TableEvent};
use crate::filtering::{Filter, FilterChain, FilterKind, FilterValue, FilterValues, filter_indices};
use crate::format::CellFormatter;
use crate::pagination::{PageItem, Pagination};
use crate::query::TableQuery;
use crate::record::Record;
use crate::selection::{Selection, SelectionState};
use crate::settings::TableSettings;
use crate::sorting::{SortState, sort_indices};
use crate::value::RowId;

static UNSORTED: SortState = SortState::Unsorted;

/// Snapshot of what a table renders
#[derive(Debug)]
pub struct TableView<'a, T> {
	/// Rows of the current page, in display order
	pub rows: Vec<&'a T>,
	/// Current page (1-based)
	pub page: usize,
	/// Rows per page
	pub page_size: usize,
	/// 1-based position of the first visible row; 0 when empty
	pub start_index: usize,
	/// 1-based position of the last visible row; 0 when empty
	pub end_index: usize,
	/// Number of rows matching the filters
	pub total: usize,
	/// Number of pages (at least 1)
	pub total_pages: usize,
	/// Page strip with ellipsis markers
	pub page_numbers: Vec<PageItem>,
	/// Whether a previous page exists
	pub has_previous: bool,
	/// Whether a next page exists
	pub has_next: bool,
	/// Sort applied to the rows
	pub sort: &'a SortState,
	/// Header checkbox state relative to the filtered rows
	pub selection: SelectionState,
}

/// A filterable, sortable, paginated and selectable table over `T`
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use skimarket_tables::{Column, DataTable, Filter, SortState, TableSettings};
///
/// let rows: Vec<serde_json::Value> = (1..=23)
///     .map(|id| {
///         let status = if id % 2 == 0 { "open" } else { "closed" };
///         json!({"id": id, "status": status})
///     })
///     .collect();
///
/// let mut table = DataTable::new(TableSettings::default())
///     .with_columns(vec![Column::new("id", "#"), Column::new("status", "Status")])
///     .with_filters(vec![Filter::select("status", "Status")])
///     .with_rows(rows);
///
/// assert_eq!(table.view().total_pages, 3);
///
/// table.set_filter("status", "open");
/// table.toggle_sort("id");
/// table.toggle_sort("id");
/// let view = table.view();
/// assert_eq!(view.total, 11);
/// assert_eq!(view.sort, &SortState::descending("id"));
/// assert_eq!(view.rows[0]["id"], 22);
/// ```
#[derive(Debug)]
pub struct DataTable<T> {
	settings: TableSettings,
	rows: Vec<T>,
	columns: Vec<Column>,
	filters: Vec<Filter>,
	filter_values: FilterValues,
	sort: SortState,
	pagination: Pagination,
	selection: Selection,
	// Positions into `rows` after filtering and sorting
	derived: Vec<usize>,
	listeners: Listeners<T>,
}

impl<T: Record> Default for DataTable<T> {
	fn default() -> Self {
		Self::new(TableSettings::default())
	}
}

impl<T: Record> DataTable<T> {
	/// Creates an empty table; the settings are normalized first
	pub fn new(settings: TableSettings) -> Self {
		let settings = settings.normalized();
		let pagination = Pagination::new(settings.page_size);
		Self {
			settings,
			rows: Vec::new(),
			columns: Vec::new(),
			filters: Vec::new(),
			filter_values: FilterValues::new(),
			sort: SortState::Unsorted,
			pagination,
			selection: Selection::new(),
			derived: Vec::new(),
			listeners: Listeners::new(),
		}
	}

	/// Sets the collection
	pub fn with_rows(mut self, rows: Vec<T>) -> Self {
		self.rows = rows;
		self.reconcile_selection();
		self.recompute();
		self
	}

	/// Sets the column descriptors.
	///
	/// With no columns declared every key is sortable.
	pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
		self.columns = columns;
		self.recompute();
		self
	}

	/// Sets the filter descriptors
	pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
		self.filters = filters;
		self.recompute();
		self
	}

	/// Sets initial filter values
	pub fn with_filter_values(mut self, values: FilterValues) -> Self {
		self.filter_values = values;
		self.recompute();
		self
	}

	/// Sets the initial sort
	pub fn with_sort(mut self, sort: SortState) -> Self {
		self.sort = sort;
		self.recompute();
		self
	}

	// Collection

	/// Replaces the collection; selected ids no longer present are dropped
	pub fn set_rows(&mut self, rows: Vec<T>) {
		let page = self.pagination.page();
		self.rows = rows;
		self.collection_changed(page);
	}

	/// Appends a row
	pub fn push_row(&mut self, row: T) {
		let page = self.pagination.page();
		self.rows.push(row);
		self.collection_changed(page);
	}

	/// Removes the row with identity `id` and returns it
	pub fn remove_row(&mut self, id: &RowId) -> Option<T> {
		let identity_field = &self.settings.identity_field;
		let Some(position) = self
			.rows
			.iter()
			.position(|row| row.row_id(identity_field).as_ref() == Some(id))
		else {
			tracing::debug!(%id, "no row to remove");
			return None;
		};
		let page = self.pagination.page();
		let removed = self.rows.remove(position);
		self.collection_changed(page);
		Some(removed)
	}

	/// Keeps the rows for which `keep` returns true; returns how many were removed
	pub fn retain_rows<F>(&mut self, keep: F) -> usize
	where
		F: FnMut(&T) -> bool,
	{
		let page = self.pagination.page();
		let before = self.rows.len();
		self.rows.retain(keep);
		let removed = before - self.rows.len();
		if removed > 0 {
			self.collection_changed(page);
		}
		removed
	}

	// Filters

	/// Sets a filter value and returns to page 1
	pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
		self.filter_values.set(key, value);
		self.filters_changed();
	}

	/// Sets the text of the first search filter and returns to page 1.
	///
	/// Returns `false` when no search filter is declared.
	pub fn set_search(&mut self, text: impl Into<String>) -> bool {
		let Some(key) = self.search_key().map(str::to_string) else {
			tracing::debug!("no search filter declared, ignoring search text");
			return false;
		};
		self.set_filter(key, FilterValue::text(text));
		true
	}

	/// Clears one filter value and returns to page 1
	pub fn clear_filter(&mut self, key: &str) {
		self.filter_values.remove(key);
		self.filters_changed();
	}

	/// Clears every filter value and returns to page 1
	pub fn clear_filters(&mut self) {
		self.filter_values.clear();
		self.filters_changed();
	}

	// Sorting

	/// Header click: cycles ascending, descending, unsorted on `key`.
	///
	/// Returns `false` and changes nothing when `key` is not a sortable column.
	pub fn toggle_sort(&mut self, key: &str) -> bool {
		if !is_sortable(&self.columns, key) {
			tracing::debug!(column = key, "column is not sortable");
			return false;
		}
		let sort = self.sort.clone().toggle(key);
		self.replace_sort(sort);
		true
	}

	/// Sets the sort; a key that is not a sortable column disables sorting
	pub fn set_sort(&mut self, sort: SortState) {
		let sort = self.validated_sort(sort);
		self.replace_sort(sort);
	}

	/// Removes the sort
	pub fn clear_sort(&mut self) {
		self.replace_sort(SortState::Unsorted);
	}

	// Pagination

	/// Moves to `page`; out of range pages are ignored
	pub fn go_to_page(&mut self, page: usize) -> bool {
		let before = self.pagination.page();
		if !self.pagination.go_to(page) {
			return false;
		}
		self.recompute();
		self.emit_page_change(before);
		true
	}

	/// Moves to the next page if there is one
	pub fn next_page(&mut self) -> bool {
		self.go_to_page(self.pagination.page() + 1)
	}

	/// Moves to the previous page if there is one
	pub fn previous_page(&mut self) -> bool {
		match self.pagination.page() {
			1 => false,
			page => self.go_to_page(page - 1),
		}
	}

	/// Changes the page size and returns to page 1.
	///
	/// Zero falls back to the smallest configured option.
	pub fn set_page_size(&mut self, page_size: usize) {
		let page_size = self.clamp_page_size(page_size);
		let before = self.pagination.page();
		self.pagination.set_page_size(page_size);
		self.recompute();
		self.emit_page_change(before);
	}

	// Selection

	/// Flips the selection of one row; returns whether it is now selected.
	///
	/// Ids that are not in the collection are ignored.
	pub fn toggle_row(&mut self, id: &RowId) -> bool {
		if !self.contains(id) {
			tracing::debug!(%id, "ignoring selection of unknown row");
			return false;
		}
		let selected = self.selection.toggle(id.clone());
		self.emit_selection_changed();
		selected
	}

	/// Header checkbox: selects every filtered row, or clears the selection
	/// when they are all selected already
	pub fn toggle_all(&mut self) {
		let scope = self.filtered_ids();
		self.selection.toggle_all(&scope);
		self.emit_selection_changed();
	}

	/// Deselects everything
	pub fn clear_selection(&mut self) {
		if self.selection.is_empty() {
			return;
		}
		self.selection.clear();
		self.emit_selection_changed();
	}

	/// Selected rows in collection order
	pub fn selected_rows(&self) -> Vec<&T> {
		selected_in(&self.rows, &self.selection, &self.settings.identity_field)
	}

	/// Header checkbox state relative to the filtered rows
	pub fn selection_state(&self) -> SelectionState {
		self.selection.state(&self.filtered_ids())
	}

	/// Whether the row with identity `id` is selected
	pub fn is_selected(&self, id: &RowId) -> bool {
		self.selection.contains(id)
	}

	/// Selected identities
	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	// Events

	/// Emits [`TableEvent::RowActivated`] for the row with identity `id`
	pub fn activate_row(&mut self, id: &RowId) -> bool {
		let identity_field = &self.settings.identity_field;
		match self
			.rows
			.iter()
			.find(|row| row.row_id(identity_field).as_ref() == Some(id))
		{
			Some(row) => {
				self.listeners.emit(&TableEvent::RowActivated(row));
				true
			}
			None => {
				tracing::debug!(%id, "no row to activate");
				false
			}
		}
	}

	/// Registers a listener
	pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
	where
		F: FnMut(&TableEvent<'_, T>) + 'static,
	{
		self.listeners.subscribe(listener)
	}

	/// Removes a listener; returns whether it was registered
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		self.listeners.unsubscribe(id)
	}

	// Query state

	/// Applies a decoded query: filters, then sort, then page size, then page.
	///
	/// The query replaces the current filter values. A page outside the
	/// resulting range leaves the table on page 1.
	pub fn apply_query(&mut self, query: &TableQuery) {
		let page_before = self.pagination.page();
		let sort_before = self.sort.clone();

		self.filter_values = query.filters.clone();
		if let Some(search) = &query.search {
			match self.search_key().map(str::to_string) {
				Some(key) => {
					self.filter_values.set(key, FilterValue::text(search.as_str()));
				}
				None => tracing::debug!("no search filter declared, ignoring search text"),
			}
		}
		if let Some(sort) = &query.sort {
			self.sort = self.validated_sort(sort.clone());
		}
		if let Some(page_size) = query.page_size {
			let page_size = self.clamp_page_size(page_size);
			self.pagination.set_page_size(page_size);
		}
		self.pagination.go_to(1);
		self.recompute();
		if let Some(page) = query.page {
			self.pagination.go_to(page);
		}

		self.emit_page_change(page_before);
		if self.sort != sort_before {
			self.listeners.emit(&TableEvent::SortChanged(&self.sort));
		}
	}

	/// Snapshot of the current state as a query
	pub fn to_query(&self) -> TableQuery {
		let search_key = self.search_key();
		let mut query = TableQuery {
			page: Some(self.pagination.page()),
			page_size: Some(self.pagination.page_size()),
			sort: self.sort.is_sorted().then(|| self.sort.clone()),
			..TableQuery::default()
		};
		for (key, value) in self.filter_values.active() {
			let disabled = self
				.filters
				.iter()
				.find(|filter| filter.key() == key)
				.is_some_and(|filter| filter.is_disabled_by(value));
			if disabled {
				continue;
			}
			match value {
				FilterValue::Scalar(text) if search_key == Some(key) => {
					query.search = Some(text.to_plain_text());
				}
				value => {
					query.filters.set(key, value.clone());
				}
			}
		}
		query
	}

	// Reads

	/// Everything needed to render the table
	pub fn view(&self) -> TableView<'_, T> {
		let pagination = &self.pagination;
		TableView {
			rows: self.visible_rows(),
			page: pagination.page(),
			page_size: pagination.page_size(),
			start_index: pagination.start_index(),
			end_index: pagination.end_index(),
			total: pagination.total(),
			total_pages: pagination.total_pages(),
			page_numbers: pagination.page_numbers(),
			has_previous: pagination.has_previous(),
			has_next: pagination.has_next(),
			sort: effective_sort(&self.columns, &self.sort),
			selection: self.selection_state(),
		}
	}

	/// Rows of the current page
	pub fn visible_rows(&self) -> Vec<&T> {
		self.pagination
			.slice(&self.derived)
			.iter()
			.map(|&index| &self.rows[index])
			.collect()
	}

	/// Every row matching the filters, in sorted order
	pub fn filtered_rows(&self) -> Vec<&T> {
		self.derived.iter().map(|&index| &self.rows[index]).collect()
	}

	/// The whole collection, unfiltered
	pub fn rows(&self) -> &[T] {
		&self.rows
	}

	/// Column descriptors
	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	/// Filter descriptors
	pub fn filters(&self) -> &[Filter] {
		&self.filters
	}

	/// Current filter values
	pub fn filter_values(&self) -> &FilterValues {
		&self.filter_values
	}

	/// Current sort as requested
	pub fn sort(&self) -> &SortState {
		&self.sort
	}

	/// Pagination state
	pub fn pagination(&self) -> &Pagination {
		&self.pagination
	}

	/// Settings in use
	pub fn settings(&self) -> &TableSettings {
		&self.settings
	}

	/// Renders one cell through `formatter`
	pub fn render_cell(&self, row: &T, column: &Column, formatter: &dyn CellFormatter) -> String {
		formatter.format(&row.cell(column.key()), column.cell_format())
	}

	// Internals

	fn recompute(&mut self) {
		let chain = FilterChain::new(&self.filters, &self.filter_values);
		let mut derived = filter_indices(&self.rows, &chain);
		sort_indices(&self.rows, &mut derived, effective_sort(&self.columns, &self.sort));
		self.pagination.set_total(derived.len());
		tracing::trace!(
			rows = self.rows.len(),
			filtered = derived.len(),
			active_filters = chain.len(),
			page = self.pagination.page(),
			"recomputed table view"
		);
		self.derived = derived;
	}

	fn collection_changed(&mut self, page_before: usize) {
		let pruned = self.reconcile_selection();
		self.recompute();
		self.emit_page_change(page_before);
		if pruned {
			self.emit_selection_changed();
		}
	}

	fn filters_changed(&mut self) {
		let before = self.pagination.page();
		self.pagination.go_to(1);
		self.recompute();
		self.emit_page_change(before);
	}

	fn replace_sort(&mut self, sort: SortState) {
		let before = self.pagination.page();
		let changed = sort != self.sort;
		self.sort = sort;
		self.recompute();
		self.emit_page_change(before);
		if changed {
			self.listeners.emit(&TableEvent::SortChanged(&self.sort));
		}
	}

	fn reconcile_selection(&mut self) -> bool {
		if self.selection.is_empty() {
			return false;
		}
		let identity_field = &self.settings.identity_field;
		let current: Vec<RowId> = self
			.rows
			.iter()
			.filter_map(|row| row.row_id(identity_field))
			.collect();
		let pruned = self.selection.retain(&current);
		if pruned > 0 {
			tracing::debug!(pruned, "dropped selection of removed rows");
		}
		pruned > 0
	}

	fn emit_page_change(&mut self, before: usize) {
		let page = self.pagination.page();
		if page != before {
			self.listeners.emit(&TableEvent::PageChanged(page));
		}
	}

	fn emit_selection_changed(&mut self) {
		let selected = selected_in(&self.rows, &self.selection, &self.settings.identity_field);
		self.listeners.emit(&TableEvent::SelectionChanged(selected));
	}

	fn filtered_ids(&self) -> Vec<RowId> {
		let identity_field = &self.settings.identity_field;
		self.derived
			.iter()
			.filter_map(|&index| self.rows[index].row_id(identity_field))
			.collect()
	}

	fn contains(&self, id: &RowId) -> bool {
		let identity_field = &self.settings.identity_field;
		self.rows
			.iter()
			.any(|row| row.row_id(identity_field).as_ref() == Some(id))
	}

	fn search_key(&self) -> Option<&str> {
		self.filters
			.iter()
			.find(|filter| matches!(filter.kind(), FilterKind::Search { .. }))
			.map(Filter::key)
	}

	fn validated_sort(&self, sort: SortState) -> SortState {
		let sortable = sort
			.key()
			.is_none_or(|key| is_sortable(&self.columns, key));
		if sortable {
			sort
		} else {
			tracing::debug!(sort = ?sort, "sort key is not a sortable column, disabling sort");
			SortState::Unsorted
		}
	}

	fn clamp_page_size(&self, page_size: usize) -> usize {
		if page_size == 0 {
			let smallest = self.settings.smallest_page_size();
			tracing::warn!(page_size = smallest, "page size must be positive, clamping");
			smallest
		} else {
			page_size
		}
	}
}

fn is_sortable(columns: &[Column], key: &str) -> bool {
	columns.is_empty()
		|| columns
			.iter()
			.any(|column| column.key() == key && column.is_sortable())
}

fn effective_sort<'s>(columns: &[Column], sort: &'s SortState) -> &'s SortState {
	match sort.key() {
		Some(key) if !is_sortable(columns, key) => &UNSORTED,
		_ => sort,
	}
}

fn selected_in<'r, T: Record>(rows: &'r [T], selection: &Selection, identity_field: &str) -> Vec<&'r T> {
	if selection.is_empty() {
		return Vec::new();
	}
	rows.iter()
		.filter(|row| {
			row.row_id(identity_field)
				.is_some_and(|id| selection.contains(&id))
		})
		.collect()
}
