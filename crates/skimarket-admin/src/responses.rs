//! Serializable list responses
//!
//! [`list`] runs a screen's table against a query string and packs the
//! visible page into a [`ListResponse`] with every cell already formatted.

use crate::error::AdminResult;
use crate::screens::{BookingScreen, ListScreen, LodgingScreen, PaymentScreen, ScreenKind, UserScreen};
use serde::{Deserialize, Serialize};
use skimarket_tables::{
	CellFormat, DataTable, DefaultFormatter, FilterKind, FilterOption, PageItem, Record,
	SelectionState, SortDirection, TableQuery,
};
use std::collections::BTreeMap;

/// Column metadata for the list header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
	/// Field key
	pub key: String,
	/// Header text
	pub label: String,
	/// Whether clicking the header sorts
	pub sortable: bool,
	/// Direction when the table is sorted by this column
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sorted: Option<SortDirection>,
	/// Cell format
	pub format: CellFormat,
}

/// Sidebar filter metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterInfo {
	/// Query key
	pub key: String,
	/// Display text
	pub label: String,
	/// `search`, `select`, `date_range` or `number_range`
	pub kind: String,
	/// Choices of a select filter
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub choices: Vec<FilterOption>,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRow {
	/// Row identity
	pub id: Option<String>,
	/// Formatted cells keyed by column key
	pub cells: BTreeMap<String, String>,
}

/// Response for a list screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
	/// Model name
	pub model_name: String,
	/// Rows matching the filters
	pub count: usize,
	/// Current page
	pub page: usize,
	/// Items per page
	pub page_size: usize,
	/// Total pages
	pub total_pages: usize,
	/// Page-number strip
	pub page_numbers: Vec<PageItem>,
	/// Items on this page
	pub results: Vec<ListRow>,
	/// Column definitions
	pub columns: Vec<ColumnInfo>,
	/// Available filters
	pub available_filters: Vec<FilterInfo>,
	/// Normalized query string of the rendered state
	pub query: String,
}

/// Renders `screen` for a raw query string such as `page=2&status=confirmed`
pub fn list<S: ListScreen>(screen: &S, query: &str) -> AdminResult<ListResponse> {
	let query = TableQuery::parse(query)?;
	let mut table = screen.load()?;
	table.apply_query(&query);
	tracing::debug!(
		model = screen.model_name(),
		page = table.pagination().page(),
		count = table.pagination().total(),
		"rendered list screen"
	);
	response(screen.model_name(), &table)
}

/// Exports the rows of `screen` matching a raw query string
#[cfg(feature = "export")]
pub fn export<S: ListScreen>(
	screen: &S,
	query: &str,
	format: skimarket_tables::ExportFormat,
	scope: skimarket_tables::ExportScope,
) -> AdminResult<skimarket_tables::ExportResult> {
	let query = TableQuery::parse(query)?;
	let mut table = screen.load()?;
	table.apply_query(&query);
	let formatter = DefaultFormatter::new(table.settings().formatting.clone());
	Ok(table.export(format, scope, &formatter)?)
}

/// Renders the screen registered under `slug`
pub fn list_by_slug(slug: &str, query: &str) -> AdminResult<ListResponse> {
	match slug.parse::<ScreenKind>()? {
		ScreenKind::Bookings => list(&BookingScreen, query),
		ScreenKind::Lodgings => list(&LodgingScreen, query),
		ScreenKind::Payments => list(&PaymentScreen, query),
		ScreenKind::Users => list(&UserScreen, query),
	}
}

/// Packs the current page of `table`
pub fn response<T: Record>(model_name: &str, table: &DataTable<T>) -> AdminResult<ListResponse> {
	let formatter = DefaultFormatter::new(table.settings().formatting.clone());
	let identity_field = table.settings().identity_field.as_str();
	let view = table.view();

	let results = view
		.rows
		.iter()
		.map(|row| ListRow {
			id: row.row_id(identity_field).map(|id| id.to_string()),
			cells: table
				.columns()
				.iter()
				.filter(|column| column.cell_format() != CellFormat::Actions)
				.map(|column| (column.key().to_string(), table.render_cell(row, column, &formatter)))
				.collect(),
		})
		.collect();

	let columns = table
		.columns()
		.iter()
		.map(|column| ColumnInfo {
			key: column.key().to_string(),
			label: column.label().to_string(),
			sortable: column.is_sortable(),
			sorted: view
				.sort
				.direction()
				.filter(|_| view.sort.key() == Some(column.key())),
			format: column.cell_format(),
		})
		.collect();

	let available_filters = table
		.filters()
		.iter()
		.map(|filter| FilterInfo {
			key: filter.key().to_string(),
			label: filter.label().to_string(),
			kind: filter_kind_name(filter.kind()).to_string(),
			choices: filter.options().to_vec(),
		})
		.collect();

	Ok(ListResponse {
		model_name: model_name.to_string(),
		count: view.total,
		page: view.page,
		page_size: view.page_size,
		total_pages: view.total_pages,
		page_numbers: view.page_numbers,
		results,
		columns,
		available_filters,
		query: table.to_query().to_query_string()?,
	})
}

/// Selection summary shown above bulk actions, e.g. `3 of 40 selected`
///
/// Both counts are over the filtered rows.
pub fn selection_summary<T: Record>(table: &DataTable<T>) -> String {
	let total = table.pagination().total();
	match table.selection_state() {
		SelectionState::None => String::new(),
		SelectionState::All => format!("All {} selected", total),
		SelectionState::Partial => {
			let identity_field = table.settings().identity_field.as_str();
			let selected = table
				.filtered_rows()
				.into_iter()
				.filter_map(|row| row.row_id(identity_field))
				.filter(|id| table.is_selected(id))
				.count();
			format!("{} of {} selected", selected, total)
		}
	}
}

fn filter_kind_name(kind: &FilterKind) -> &'static str {
	match kind {
		FilterKind::Search { .. } => "search",
		FilterKind::Select { .. } => "select",
		FilterKind::DateRange { .. } => "date_range",
		FilterKind::NumberRange { .. } => "number_range",
	}
}
