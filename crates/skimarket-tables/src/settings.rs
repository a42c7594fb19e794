//! Table defaults
//!
//! Settings are plain serde documents. Every field has a default, so a partial
//! JSON file only overrides what it names.
//!
//! ```
//! use skimarket_tables::TableSettings;
//!
//! let settings = TableSettings::from_json_str(r#"{"page_size": 20}"#).unwrap();
//! assert_eq!(settings.page_size, 20);
//! assert_eq!(settings.identity_field, "id");
//! assert_eq!(settings.page_size_options, vec![10, 20, 50, 100]);
//! ```

use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rows per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size picker
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Field read for row identity when nothing else is configured
pub const DEFAULT_IDENTITY_FIELD: &str = "id";

/// Behaviour and presentation defaults of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
	/// Field holding the row identity used for selection
	pub identity_field: String,
	/// Initial rows per page
	pub page_size: usize,
	/// Sizes offered to the user
	pub page_size_options: Vec<usize>,
	/// Cell formatting
	pub formatting: FormatSettings,
}

impl Default for TableSettings {
	fn default() -> Self {
		Self {
			identity_field: DEFAULT_IDENTITY_FIELD.to_string(),
			page_size: DEFAULT_PAGE_SIZE,
			page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
			formatting: FormatSettings::default(),
		}
	}
}

impl TableSettings {
	/// Parses a JSON settings document and normalizes it
	pub fn from_json_str(json: &str) -> Result<Self> {
		let settings: Self = serde_json::from_str(json)?;
		settings.validated()
	}

	/// Reads and parses a JSON settings file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path)?;
		tracing::debug!(path = %path.display(), "loading table settings");
		Self::from_json_str(&contents)
	}

	/// Sets the identity field
	pub fn with_identity_field(mut self, field: impl Into<String>) -> Self {
		self.identity_field = field.into();
		self
	}

	/// Sets the initial page size
	pub fn with_page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size;
		self
	}

	/// Sets the page-size options
	pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
		self.page_size_options = options;
		self
	}

	/// Sets the formatting defaults
	pub fn with_formatting(mut self, formatting: FormatSettings) -> Self {
		self.formatting = formatting;
		self
	}

	/// Returns a copy with every size usable.
	///
	/// Zero options are dropped and the rest sorted and deduplicated; an empty
	/// list falls back to the defaults. A zero page size becomes the smallest
	/// option. A page size missing from the options is kept and added to them.
	pub fn normalized(&self) -> Self {
		let mut settings = self.clone();
		settings.page_size_options.retain(|&size| size > 0);
		settings.page_size_options.sort_unstable();
		settings.page_size_options.dedup();
		if settings.page_size_options.is_empty() {
			tracing::warn!("page_size_options has no positive size, using defaults");
			settings.page_size_options = DEFAULT_PAGE_SIZE_OPTIONS.to_vec();
		}
		if settings.page_size == 0 {
			let smallest = settings.smallest_page_size();
			tracing::warn!(page_size = smallest, "page_size is zero, clamping");
			settings.page_size = smallest;
		}
		if !settings.page_size_options.contains(&settings.page_size) {
			settings.page_size_options.push(settings.page_size);
			settings.page_size_options.sort_unstable();
		}
		if settings.identity_field.trim().is_empty() {
			tracing::warn!("identity_field is blank, using \"{}\"", DEFAULT_IDENTITY_FIELD);
			settings.identity_field = DEFAULT_IDENTITY_FIELD.to_string();
		}
		settings
	}

	/// Smallest positive configured page size
	pub fn smallest_page_size(&self) -> usize {
		self.page_size_options
			.iter()
			.copied()
			.filter(|&size| size > 0)
			.min()
			.unwrap_or(crate::pagination::MIN_PAGE_SIZE)
	}

	fn validated(self) -> Result<Self> {
		self.formatting.validate()?;
		Ok(self.normalized())
	}
}

/// How cell values are turned into display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
	/// Symbol appended to currency amounts
	pub currency_symbol: String,
	/// ISO 4217 code of the currency
	pub currency_code: String,
	/// Separator between integer and fractional part
	pub decimal_separator: String,
	/// Separator between digit groups
	pub thousands_separator: String,
	/// Fractional digits for currency amounts
	pub decimals: usize,
	/// chrono format string for dates
	pub date_format: String,
	/// chrono format string for datetimes
	pub datetime_format: String,
}

impl Default for FormatSettings {
	fn default() -> Self {
		Self {
			currency_symbol: "€".to_string(),
			currency_code: "EUR".to_string(),
			decimal_separator: ",".to_string(),
			thousands_separator: " ".to_string(),
			decimals: 2,
			date_format: "%d/%m/%Y".to_string(),
			datetime_format: "%d/%m/%Y %H:%M".to_string(),
		}
	}
}

impl FormatSettings {
	fn validate(&self) -> Result<()> {
		for (name, format) in [
			("date_format", &self.date_format),
			("datetime_format", &self.datetime_format),
		] {
			let has_error = chrono::format::StrftimeItems::new(format)
				.any(|item| matches!(item, chrono::format::Item::Error));
			if has_error {
				return Err(TableError::InvalidSettings(format!(
					"{} is not a valid format string: {:?}",
					name, format
				)));
			}
		}
		if self.decimal_separator.is_empty() {
			return Err(TableError::InvalidSettings(
				"decimal_separator must not be empty".to_string(),
			));
		}
		Ok(())
	}
}
