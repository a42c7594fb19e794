//! List and table engine for the skimarket back-office
//!
//! Every admin list screen (bookings, lodgings, payments, users, ...) shows
//! the same kind of table: a collection narrowed by filters, ordered by a
//! clickable column, cut into pages, with a checkbox per row. This crate
//! implements that pipeline once, over any row type that implements
//! [`Record`].
//!
//! # Features
//!
//! - **Filtering**: Search, select and date/number range filters (`?status=confirmed`)
//! - **Sorting**: Stable column sorting that cycles ascending, descending, off (`?sort=-price`)
//! - **Pagination**: Page windows and an ellipsis page strip (`?page=N`)
//! - **Selection**: Identity-keyed row selection that survives filtering and paging
//! - **Events**: Row activation, selection, page and sort notifications
//! - **Export**: CSV and JSON export (requires `export` feature)
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[DataTable] --> B[Rows]
//!     B --> C[FilterChain]
//!     C --> D[sort_indices]
//!     D --> E[Pagination]
//!     E --> F[TableView]
//!     A --> G[Selection]
//!     A --> H[Listeners]
//!     A --> I[TableQuery]
//!     A --> K[Export]
//!     K --> L[CSV]
//!     K --> M[JSON]
//! ```
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use skimarket_tables::{Column, DataTable, Filter, RowId, SelectionState, TableSettings};
//!
//! let bookings = vec![
//!     json!({"id": 1, "guest": "Camille Roux", "status": "confirmed"}),
//!     json!({"id": 2, "guest": "Jonas Weber", "status": "pending"}),
//!     json!({"id": 3, "guest": "Chiara Conti", "status": "confirmed"}),
//! ];
//!
//! let mut table = DataTable::new(TableSettings::default())
//!     .with_columns(vec![Column::new("guest", "Guest"), Column::new("status", "Status")])
//!     .with_filters(vec![
//!         Filter::search("q", "Search", ["guest"]),
//!         Filter::select("status", "Status"),
//!     ])
//!     .with_rows(bookings);
//!
//! table.set_filter("status", "confirmed");
//! table.toggle_all();
//! assert_eq!(table.selection_state(), SelectionState::All);
//! assert!(!table.is_selected(&RowId::from(2)));
//!
//! table.clear_filters();
//! assert_eq!(table.selection_state(), SelectionState::Partial);
//! assert_eq!(table.selected_rows().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod events;
#[cfg(feature = "export")]
pub mod export;
pub mod filtering;
pub mod format;
pub mod pagination;
pub mod query;
pub mod record;
pub mod selection;
pub mod settings;
pub mod sorting;
pub mod table;
pub mod value;

// Re-exports for convenience
pub use column::{CellFormat, Column};
pub use error::{Result, TableError};
pub use events::{SubscriptionId, TableEvent};
#[cfg(feature = "export")]
pub use export::{ExportFormat, ExportResult, ExportScope};
pub use filtering::{
	Filter, FilterChain, FilterKind, FilterOption, FilterValue, FilterValues, filter_indices,
	filter_rows,
};
pub use format::{CellFormatter, DefaultFormatter};
pub use pagination::{PageItem, Pagination};
pub use query::TableQuery;
pub use record::Record;
pub use selection::{Selection, SelectionState};
pub use settings::{FormatSettings, TableSettings};
pub use sorting::{SortDirection, SortState, sort_indices, sort_rows};
pub use table::{DataTable, TableView};
pub use value::{CellValue, RowId};
