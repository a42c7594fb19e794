//! CSV and JSON export of table rows
//!
//! Columns without data (the actions column) are never exported.

use crate::column::{CellFormat, Column};
use crate::error::{Result, TableError};
use crate::format::CellFormatter;
use crate::record::Record;
use crate::table::DataTable;
use csv::Writer;
use serde::{Deserialize, Serialize};

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
	/// Comma-separated values with formatted cells
	Csv,
	/// Array of objects with raw cell values
	Json,
}

impl ExportFormat {
	/// File extension for this format
	pub fn extension(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "csv",
			ExportFormat::Json => "json",
		}
	}

	/// MIME type for this format
	pub fn mime_type(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "text/csv",
			ExportFormat::Json => "application/json",
		}
	}
}

/// Which rows an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
	/// Rows of the current page
	Page,
	/// Every row matching the filters, in sorted order
	Filtered,
	/// Selected rows, in collection order
	Selected,
}

/// Export output
#[derive(Debug, Clone)]
pub struct ExportResult {
	/// Encoded payload
	pub data: Vec<u8>,
	/// Format of the payload
	pub format: ExportFormat,
	/// Number of rows exported
	pub row_count: usize,
}

impl ExportResult {
	/// MIME type of the payload
	pub fn mime_type(&self) -> &'static str {
		self.format.mime_type()
	}

	/// Suggested file name, e.g. `bookings.csv`
	pub fn filename(&self, stem: &str) -> String {
		format!("{}.{}", stem, self.format.extension())
	}

	/// Payload as text
	pub fn into_string(self) -> Result<String> {
		Ok(String::from_utf8(self.data)?)
	}
}

/// CSV exporter
pub struct CsvExporter;

impl CsvExporter {
	/// Writes a header row of column labels, then one row per record with
	/// cells rendered through `formatter`.
	///
	/// # Examples
	///
	/// ```
	/// use serde_json::json;
	/// use skimarket_tables::export::CsvExporter;
	/// use skimarket_tables::{CellFormat, Column, DefaultFormatter};
	///
	/// let columns = vec![
	///     Column::new("name", "Lodging"),
	///     Column::new("price", "Price").format(CellFormat::Currency),
	///     Column::actions(),
	/// ];
	/// let rows = vec![json!({"name": "Chalet Alpin", "price": 320})];
	///
	/// let csv = CsvExporter::export(&columns, &rows, &DefaultFormatter::default()).unwrap();
	/// assert_eq!(String::from_utf8(csv).unwrap(), "Lodging,Price\nChalet Alpin,\"320,00 €\"\n");
	/// ```
	pub fn export<R: Record>(
		columns: &[Column],
		rows: &[R],
		formatter: &dyn CellFormatter,
	) -> Result<Vec<u8>> {
		let columns = data_columns(columns);
		let mut writer = Writer::from_writer(Vec::new());

		writer.write_record(columns.iter().map(|column| column.label()))?;
		for row in rows {
			writer.write_record(
				columns
					.iter()
					.map(|column| formatter.format(&row.cell(column.key()), column.cell_format())),
			)?;
		}

		writer.flush()?;
		writer
			.into_inner()
			.map_err(|e| TableError::Io(e.into_error()))
	}
}

/// JSON exporter
pub struct JsonExporter;

impl JsonExporter {
	/// Writes an array of objects keyed by column key with raw cell values
	pub fn export<R: Record>(columns: &[Column], rows: &[R]) -> Result<Vec<u8>> {
		let columns = data_columns(columns);
		let objects: Vec<serde_json::Map<String, serde_json::Value>> = rows
			.iter()
			.map(|row| {
				columns
					.iter()
					.map(|column| -> Result<(String, serde_json::Value)> {
						let value = serde_json::to_value(row.cell(column.key()))?;
						Ok((column.key().to_string(), value))
					})
					.collect::<Result<serde_json::Map<String, serde_json::Value>>>()
			})
			.collect::<Result<_>>()?;
		Ok(serde_json::to_vec_pretty(&objects)?)
	}
}

fn data_columns(columns: &[Column]) -> Vec<&Column> {
	columns
		.iter()
		.filter(|column| column.cell_format() != CellFormat::Actions)
		.collect()
}

impl<T: Record> DataTable<T> {
	/// Exports the rows in `scope`
	pub fn export(
		&self,
		format: ExportFormat,
		scope: ExportScope,
		formatter: &dyn CellFormatter,
	) -> Result<ExportResult> {
		let rows = match scope {
			ExportScope::Page => self.visible_rows(),
			ExportScope::Filtered => self.filtered_rows(),
			ExportScope::Selected => self.selected_rows(),
		};
		tracing::debug!(?format, ?scope, rows = rows.len(), "exporting table");
		let data = match format {
			ExportFormat::Csv => CsvExporter::export(self.columns(), &rows, formatter)?,
			ExportFormat::Json => JsonExporter::export(self.columns(), &rows)?,
		};
		Ok(ExportResult {
			data,
			format,
			row_count: rows.len(),
		})
	}
}
