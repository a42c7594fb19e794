//! Field access for table rows
//!
//! The engine never assumes a concrete schema. A row only has to answer
//! "what is the value of field `key`?"; JSON-shaped rows get that for free,
//! typed entities implement [`Record`] by hand.

use crate::value::{CellValue, RowId};
use std::collections::HashMap;

/// A row whose fields can be addressed by string key.
///
/// # Examples
///
/// ```
/// use skimarket_tables::{CellValue, Record};
///
/// struct Station {
///     id: i64,
///     name: String,
/// }
///
/// impl Record for Station {
///     fn field(&self, key: &str) -> Option<CellValue> {
///         match key {
///             "id" => Some(self.id.into()),
///             "name" => Some(self.name.as_str().into()),
///             _ => None,
///         }
///     }
/// }
///
/// let station = Station { id: 3, name: "Val Thorens".to_string() };
/// assert_eq!(station.field("name"), Some(CellValue::from("Val Thorens")));
/// assert_eq!(station.field("altitude"), None);
/// ```
pub trait Record {
	/// Returns the value of `key`, or `None` when the row has no such field
	fn field(&self, key: &str) -> Option<CellValue>;

	/// Returns the value of `key`, treating a missing field as `Null`
	fn cell(&self, key: &str) -> CellValue {
		self.field(key).unwrap_or(CellValue::Null)
	}

	/// Returns the row identity read from `identity_field`
	fn row_id(&self, identity_field: &str) -> Option<RowId> {
		self.field(identity_field)
			.and_then(|value| RowId::from_cell(&value))
	}
}

impl Record for serde_json::Map<String, serde_json::Value> {
	fn field(&self, key: &str) -> Option<CellValue> {
		self.get(key).map(CellValue::from)
	}
}

impl Record for serde_json::Value {
	fn field(&self, key: &str) -> Option<CellValue> {
		self.as_object().and_then(|map| map.field(key))
	}
}

impl Record for HashMap<String, serde_json::Value> {
	fn field(&self, key: &str) -> Option<CellValue> {
		self.get(key).map(CellValue::from)
	}
}

impl Record for HashMap<String, CellValue> {
	fn field(&self, key: &str) -> Option<CellValue> {
		self.get(key).cloned()
	}
}

impl<R: Record + ?Sized> Record for &R {
	fn field(&self, key: &str) -> Option<CellValue> {
		(**self).field(key)
	}
}
