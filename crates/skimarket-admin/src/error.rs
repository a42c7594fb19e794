//! Error types for admin list screens

use skimarket_tables::TableError;
use thiserror::Error;

/// Admin screen errors
#[derive(Debug, Error)]
pub enum AdminError {
	/// Fixture document could not be decoded
	#[error("Invalid fixture for '{model}': {source}")]
	InvalidFixture {
		/// Model whose fixture failed
		model: String,
		/// Underlying decode error
		#[source]
		source: serde_json::Error,
	},

	/// No screen is registered under this model name
	#[error("Model '{0}' has no list screen")]
	UnknownScreen(String),

	/// Table engine error (settings, query string, export)
	#[error(transparent)]
	Table(#[from] TableError),
}

/// Result type for admin screen operations
pub type AdminResult<T> = Result<T, AdminError>;
