//! # Skimarket
//!
//! Back-office building blocks for the skimarket ski-lodging marketplace.
//!
//! Every list in the back-office (bookings, lodgings, payments, users) is a
//! [`tables::DataTable`]: rows narrowed by filters, ordered by a column,
//! split into pages, with identity-keyed row selection.
//!
//! ## Feature Flags
//!
//! - `admin` (default) - Admin list screens over the marketplace entities
//! - `export` - CSV and JSON export of table rows
//! - `full` - All features enabled
//!
//! ## Quick Example
//!
//! ```rust
//! use skimarket::prelude::*;
//! use serde_json::json;
//!
//! let mut table = DataTable::new(TableSettings::default().with_page_size(2))
//!     .with_filters(vec![Filter::select("status", "Status")])
//!     .with_rows(vec![
//!         json!({"id": 1, "status": "confirmed"}),
//!         json!({"id": 2, "status": "pending"}),
//!         json!({"id": 3, "status": "confirmed"}),
//!     ]);
//!
//! table.set_filter("status", "confirmed");
//! assert_eq!(table.view().total, 2);
//! assert_eq!(table.view().total_pages, 1);
//! ```

#[cfg(feature = "admin")]
pub mod admin;
pub mod tables;

/// Common imports
pub mod prelude {
	pub use skimarket_tables::{
		CellFormat, CellValue, Column, DataTable, DefaultFormatter, Filter, FilterValue, PageItem,
		Record, RowId, SelectionState, SortDirection, SortState, TableEvent, TableQuery,
		TableSettings, TableView,
	};

	#[cfg(feature = "export")]
	pub use skimarket_tables::{ExportFormat, ExportScope};

	#[cfg(feature = "admin")]
	pub use skimarket_admin::{AdminError, AdminResult, ListScreen, ScreenKind};
}
