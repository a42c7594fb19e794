//! List and table engine
//!
//! This module provides access to the table engine through the
//! `skimarket::tables` namespace.
//!
//! ## Example
//!
//! ```rust
//! use skimarket::tables::{Column, DataTable, SortState, TableSettings};
//! use serde_json::json;
//!
//! let mut table = DataTable::new(TableSettings::default())
//!     .with_columns(vec![Column::new("name", "Name")])
//!     .with_rows(vec![json!({"id": 1, "name": "Refuge"}), json!({"id": 2, "name": "Auberge"})]);
//!
//! table.toggle_sort("name");
//! assert_eq!(table.sort(), &SortState::ascending("name"));
//! assert_eq!(table.visible_rows()[0]["name"], "Auberge");
//! ```

pub use skimarket_tables::*;
