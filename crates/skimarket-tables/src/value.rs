//! Cell values and row identities
//!
//! Every field a table touches is read through [`CellValue`], a small closed
//! set of runtime types with a natural ordering inside each comparable class.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single field value read from a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
	/// Missing or explicit null
	Null,
	/// Boolean flag
	Bool(bool),
	/// Integral number
	Int(i64),
	/// Floating point number
	Float(f64),
	/// Calendar date
	Date(NaiveDate),
	/// Date and time without zone
	DateTime(NaiveDateTime),
	/// Free text
	Text(String),
}

impl CellValue {
	/// Returns true for `Null`
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns the value as `f64` when it is numeric
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Int(n) => Some(*n as f64),
			Self::Float(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the value as a datetime when it is a date, a datetime or an
	/// ISO-8601 text (`2025-01-31`, `2025-01-31T08:30:00`, RFC 3339).
	pub fn as_datetime(&self) -> Option<NaiveDateTime> {
		match self {
			Self::Date(d) => Some(d.and_time(NaiveTime::MIN)),
			Self::DateTime(dt) => Some(*dt),
			Self::Text(s) => parse_datetime(s),
			_ => None,
		}
	}

	/// Returns the calendar day of a date-like value
	pub fn as_date(&self) -> Option<NaiveDate> {
		self.as_datetime().map(|dt| dt.date())
	}

	/// Plain-text rendering used for search and equality matching.
	///
	/// Null renders as the empty string.
	pub fn to_plain_text(&self) -> String {
		match self {
			Self::Null => String::new(),
			Self::Bool(b) => b.to_string(),
			Self::Int(n) => n.to_string(),
			Self::Float(n) => n.to_string(),
			Self::Date(d) => d.format("%Y-%m-%d").to_string(),
			Self::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
			Self::Text(s) => s.clone(),
		}
	}

	/// Compares two values using the natural ordering of their runtime type.
	///
	/// Returns `None` for incomparable pairs: mismatched types, NaN, or null.
	/// Numbers compare across `Int`/`Float`, dates across `Date`/`DateTime`.
	pub fn partial_compare(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
			(Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
			(Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
			(a, b) if a.as_f64().is_some() && b.as_f64().is_some() => {
				a.as_f64()?.partial_cmp(&b.as_f64()?)
			}
			(Self::Date(_) | Self::DateTime(_), Self::Date(_) | Self::DateTime(_)) => {
				Some(self.as_datetime()?.cmp(&other.as_datetime()?))
			}
			_ => None,
		}
	}

	/// Total comparison used by the sort stage: incomparable pairs are equal.
	pub fn compare(&self, other: &Self) -> Ordering {
		self.partial_compare(other).unwrap_or(Ordering::Equal)
	}
}

impl fmt::Display for CellValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_plain_text())
	}
}

impl From<&serde_json::Value> for CellValue {
	fn from(value: &serde_json::Value) -> Self {
		use serde_json::Value;
		match value {
			Value::Null => Self::Null,
			Value::Bool(b) => Self::Bool(*b),
			Value::Number(n) => match n.as_i64() {
				Some(i) => Self::Int(i),
				None => n.as_f64().map(Self::Float).unwrap_or(Self::Null),
			},
			Value::String(s) => Self::Text(s.clone()),
			// Nested structures are rendered as their JSON text
			other => Self::Text(other.to_string()),
		}
	}
}

impl From<serde_json::Value> for CellValue {
	fn from(value: serde_json::Value) -> Self {
		Self::from(&value)
	}
}

impl From<&str> for CellValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for CellValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for CellValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for CellValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for CellValue {
	fn from(value: i32) -> Self {
		Self::Int(value.into())
	}
}

impl From<u32> for CellValue {
	fn from(value: u32) -> Self {
		Self::Int(value.into())
	}
}

impl From<f64> for CellValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<NaiveDate> for CellValue {
	fn from(value: NaiveDate) -> Self {
		Self::Date(value)
	}
}

impl From<NaiveDateTime> for CellValue {
	fn from(value: NaiveDateTime) -> Self {
		Self::DateTime(value)
	}
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
	fn from(value: Option<V>) -> Self {
		value.map(Into::into).unwrap_or(Self::Null)
	}
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
	let s = s.trim();
	if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
		return Some(d.and_time(NaiveTime::MIN));
	}
	if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
		return Some(dt);
	}
	if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
		return Some(dt);
	}
	DateTime::parse_from_rfc3339(s)
		.ok()
		.map(|dt| dt.naive_utc())
}

/// Identity of a row, read from the table's identity field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
	/// Numeric identity
	Int(i64),
	/// Textual identity (UUIDs, slugs, references)
	Text(String),
}

impl RowId {
	/// Derives an identity from a cell value.
	///
	/// Integral floats collapse to `Int`; null yields `None`.
	pub fn from_cell(value: &CellValue) -> Option<Self> {
		match value {
			CellValue::Null => None,
			CellValue::Int(n) => Some(Self::Int(*n)),
			CellValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(Self::Int(*f as i64)),
			other => Some(Self::Text(other.to_plain_text())),
		}
	}
}

impl fmt::Display for RowId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(n) => write!(f, "{}", n),
			Self::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for RowId {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for RowId {
	fn from(value: i32) -> Self {
		Self::Int(value.into())
	}
}

impl From<&str> for RowId {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for RowId {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[rstest]
	#[case(CellValue::Int(1), CellValue::Int(2), Some(Ordering::Less))]
	#[case(CellValue::Int(2), CellValue::Float(1.5), Some(Ordering::Greater))]
	#[case(CellValue::from("apple"), CellValue::from("banana"), Some(Ordering::Less))]
	#[case(CellValue::Bool(false), CellValue::Bool(true), Some(Ordering::Less))]
	#[case(CellValue::Int(1), CellValue::from("1"), None)]
	#[case(CellValue::Null, CellValue::Int(1), None)]
	#[case(CellValue::Float(f64::NAN), CellValue::Float(1.0), None)]
	fn test_partial_compare(
		#[case] a: CellValue,
		#[case] b: CellValue,
		#[case] expected: Option<Ordering>,
	) {
		assert_eq!(a.partial_compare(&b), expected);
	}

	#[test]
	fn test_compare_falls_back_to_equal() {
		assert_eq!(
			CellValue::Int(3).compare(&CellValue::from("x")),
			Ordering::Equal
		);
	}

	#[test]
	fn test_dates_compare_as_epoch() {
		let day = CellValue::Date(date(2025, 1, 31));
		let later = CellValue::DateTime(date(2025, 1, 31).and_hms_opt(9, 0, 0).unwrap());
		assert_eq!(day.partial_compare(&later), Some(Ordering::Less));
	}

	#[rstest]
	#[case("2025-02-14", Some(date(2025, 2, 14)))]
	#[case("2025-02-14T10:30:00", Some(date(2025, 2, 14)))]
	#[case("2025-02-14T10:30:00+01:00", Some(date(2025, 2, 14)))]
	#[case("14/02/2025", None)]
	fn test_text_as_date(#[case] text: &str, #[case] expected: Option<NaiveDate>) {
		assert_eq!(CellValue::from(text).as_date(), expected);
	}

	#[test]
	fn test_from_json() {
		assert_eq!(CellValue::from(&json!(null)), CellValue::Null);
		assert_eq!(CellValue::from(&json!(42)), CellValue::Int(42));
		assert_eq!(CellValue::from(&json!(4.5)), CellValue::Float(4.5));
		assert_eq!(CellValue::from(&json!("x")), CellValue::from("x"));
		assert_eq!(CellValue::from(&json!([1, 2])), CellValue::from("[1,2]"));
	}

	#[test]
	fn test_row_id_from_cell() {
		assert_eq!(RowId::from_cell(&CellValue::Int(7)), Some(RowId::Int(7)));
		assert_eq!(RowId::from_cell(&CellValue::Float(7.0)), Some(RowId::Int(7)));
		assert_eq!(
			RowId::from_cell(&CellValue::from("BK-001")),
			Some(RowId::from("BK-001"))
		);
		assert_eq!(RowId::from_cell(&CellValue::Null), None);
	}
}
