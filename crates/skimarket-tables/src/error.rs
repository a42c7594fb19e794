//! Error types for the table engine.
//!
//! The engine operations themselves never fail: invalid configuration is
//! clamped or ignored. These errors cover the ambient edges only (loading
//! settings, parsing query strings, writing exports).

use thiserror::Error;

/// Errors raised while loading or serializing table state.
#[derive(Debug, Error)]
pub enum TableError {
	/// Settings document could not be used.
	#[error("Invalid settings: {0}")]
	InvalidSettings(String),

	/// Query string could not be decoded.
	#[error("Invalid query string: {0}")]
	InvalidQuery(#[from] serde_urlencoded::de::Error),

	/// Query string could not be encoded.
	#[error("Query encoding error: {0}")]
	QueryEncoding(#[from] serde_urlencoded::ser::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// CSV writer failed.
	#[cfg(feature = "export")]
	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	/// Exported bytes were not valid UTF-8.
	#[cfg(feature = "export")]
	#[error("Export encoding error: {0}")]
	Encoding(#[from] std::string::FromUtf8Error),
}

/// Result type alias for table operations that touch the outside world.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_invalid_settings_display() {
		let err = TableError::InvalidSettings("page_size_options is empty".to_string());
		assert_eq!(
			err.to_string(),
			"Invalid settings: page_size_options is empty"
		);
	}

	#[test]
	fn test_json_error_conversion() {
		let parse = serde_json::from_str::<serde_json::Value>("{not json");
		let err: TableError = parse.unwrap_err().into();
		assert!(matches!(err, TableError::Json(_)));
		assert!(err.to_string().starts_with("JSON error:"));
	}
}
