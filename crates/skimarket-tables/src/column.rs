//! Column descriptors
//!
//! A column names the field it reads, the header text shown for it, whether
//! clicking the header sorts by it, and which formatter renders its cells.

use serde::{Deserialize, Serialize};

/// Named formatter applied to a column's cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFormat {
	/// Plain text
	#[default]
	Text,
	/// Grouped number
	Number,
	/// Monetary amount in the configured currency
	Currency,
	/// Date or datetime
	Date,
	/// Status pill; rendered as text by the default formatter
	Badge,
	/// Row action buttons; carries no data
	Actions,
}

/// Describes one column of a table.
///
/// The key is looked up on each row at run time; a key that no row carries
/// simply renders empty cells and sorts as a tie.
///
/// # Example
///
/// ```rust
/// use skimarket_tables::{CellFormat, Column};
///
/// let price = Column::new("total_price", "Total")
///     .format(CellFormat::Currency);
/// assert_eq!(price.key(), "total_price");
/// assert!(price.is_sortable());
///
/// let actions = Column::actions();
/// assert!(!actions.is_sortable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
	key: String,
	label: String,
	#[serde(default = "default_sortable")]
	sortable: bool,
	#[serde(default)]
	format: CellFormat,
}

fn default_sortable() -> bool {
	true
}

impl Column {
	/// Creates a sortable text column
	pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			sortable: true,
			format: CellFormat::Text,
		}
	}

	/// Creates the trailing, unsortable actions column
	pub fn actions() -> Self {
		Self::new("actions", "Actions")
			.sortable(false)
			.format(CellFormat::Actions)
	}

	/// Sets whether this column can be sorted
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets the cell format
	pub fn format(mut self, format: CellFormat) -> Self {
		self.format = format;
		self
	}

	/// Field name this column reads
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Header text
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Whether header clicks sort by this column
	pub fn is_sortable(&self) -> bool {
		self.sortable && self.format != CellFormat::Actions
	}

	/// Cell format
	pub fn cell_format(&self) -> CellFormat {
		self.format
	}
}
