//! Filter predicate chain
//!
//! Filters are declared once per screen ([`Filter`]) and receive their current
//! values through [`FilterValues`]. A [`FilterChain`] joins the two: it prunes
//! empty values, drops values that have no declared filter, and keeps a row
//! only when every remaining predicate matches.

use crate::record::Record;
use crate::value::CellValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Select value that disables an equality filter
pub const ALL: &str = "all";

/// Matching rule of a filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterKind {
	/// Case-insensitive substring match against any of `fields`.
	///
	/// With no fields configured the filter key itself is searched.
	Search {
		/// Fields searched
		#[serde(default)]
		fields: Vec<String>,
	},
	/// Exact match against `field`
	Select {
		/// Field compared
		field: String,
	},
	/// Inclusive `[start, end]` date window on `field`
	DateRange {
		/// Date field constrained
		field: String,
	},
	/// Inclusive `[min, max]` numeric window on `field`
	NumberRange {
		/// Numeric field constrained
		field: String,
	},
}

/// One selectable option of a select filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
	/// Value placed in [`FilterValues`] when chosen
	pub value: String,
	/// Display text
	pub label: String,
}

/// Declares one filter control of a list screen
///
/// # Examples
///
/// ```
/// use skimarket_tables::Filter;
///
/// let status = Filter::select("status", "Status")
///     .add_choice("pending", "Pending")
///     .add_choice("confirmed", "Confirmed")
///     .add_choice("cancelled", "Cancelled");
///
/// assert_eq!(status.options().len(), 3);
/// assert_eq!(status.fields(), vec!["status"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
	key: String,
	label: String,
	kind: FilterKind,
	#[serde(default)]
	options: Vec<FilterOption>,
}

impl Filter {
	/// Creates a filter of any kind
	pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FilterKind) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			kind,
			options: Vec::new(),
		}
	}

	/// Text search over the given fields
	pub fn search<I, S>(key: impl Into<String>, label: impl Into<String>, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let fields = fields.into_iter().map(Into::into).collect();
		Self::new(key, label, FilterKind::Search { fields })
	}

	/// Equality filter on the field named like the key
	pub fn select(key: impl Into<String>, label: impl Into<String>) -> Self {
		let key = key.into();
		let field = key.clone();
		Self::new(key, label, FilterKind::Select { field })
	}

	/// Date window on the field named like the key
	pub fn date_range(key: impl Into<String>, label: impl Into<String>) -> Self {
		let key = key.into();
		let field = key.clone();
		Self::new(key, label, FilterKind::DateRange { field })
	}

	/// Numeric window on the field named like the key
	pub fn number_range(key: impl Into<String>, label: impl Into<String>) -> Self {
		let key = key.into();
		let field = key.clone();
		Self::new(key, label, FilterKind::NumberRange { field })
	}

	/// Points a select or range filter at a field other than its key
	pub fn on_field(mut self, target: impl Into<String>) -> Self {
		let target = target.into();
		match &mut self.kind {
			FilterKind::Search { fields } => *fields = vec![target],
			FilterKind::Select { field }
			| FilterKind::DateRange { field }
			| FilterKind::NumberRange { field } => *field = target,
		}
		self
	}

	/// Whether `value` switches this filter off: empty values for every
	/// kind, plus the [`ALL`] option for select filters
	pub fn is_disabled_by(&self, value: &FilterValue) -> bool {
		value.is_empty() || (matches!(self.kind, FilterKind::Select { .. }) && value.is_all())
	}

	/// Adds a choice option
	pub fn add_choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
		self.options.push(FilterOption {
			value: value.into(),
			label: label.into(),
		});
		self
	}

	/// Replaces all choice options
	pub fn with_choices(mut self, choices: Vec<(String, String)>) -> Self {
		self.options = choices
			.into_iter()
			.map(|(value, label)| FilterOption { value, label })
			.collect();
		self
	}

	/// Key under which this filter's value is stored
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Display label
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Matching rule
	pub fn kind(&self) -> &FilterKind {
		&self.kind
	}

	/// Choice options (select filters)
	pub fn options(&self) -> &[FilterOption] {
		&self.options
	}

	/// Fields this filter reads
	pub fn fields(&self) -> Vec<&str> {
		match &self.kind {
			FilterKind::Search { fields } if fields.is_empty() => vec![self.key.as_str()],
			FilterKind::Search { fields } => fields.iter().map(String::as_str).collect(),
			FilterKind::Select { field }
			| FilterKind::DateRange { field }
			| FilterKind::NumberRange { field } => vec![field.as_str()],
		}
	}

	/// Whether the filter expects a [`FilterValue::Range`]
	pub fn is_range(&self) -> bool {
		matches!(
			self.kind,
			FilterKind::DateRange { .. } | FilterKind::NumberRange { .. }
		)
	}

	/// Tests one row against a non-empty value.
	///
	/// A value of the wrong shape for this filter never matches.
	pub fn matches<R: Record + ?Sized>(&self, row: &R, value: &FilterValue) -> bool {
		match (&self.kind, value) {
			(FilterKind::Search { .. }, FilterValue::Scalar(needle)) => {
				let needle = needle.to_plain_text().trim().to_lowercase();
				self.fields().into_iter().any(|field| {
					row.cell(field)
						.to_plain_text()
						.to_lowercase()
						.contains(&needle)
				})
			}
			(FilterKind::Select { field }, FilterValue::Scalar(expected)) => row
				.field(field)
				.is_some_and(|cell| scalar_equals(&cell, expected)),
			(FilterKind::DateRange { field }, FilterValue::Range { start, end }) => {
				let cell = row.cell(field);
				date_bound_holds(&cell, start.as_ref(), Ordering::Less)
					&& date_bound_holds(&cell, end.as_ref(), Ordering::Greater)
			}
			(FilterKind::NumberRange { field }, FilterValue::Range { start, end }) => {
				let cell = row.cell(field);
				number_bound_holds(&cell, start.as_ref(), Ordering::Less)
					&& number_bound_holds(&cell, end.as_ref(), Ordering::Greater)
			}
			_ => false,
		}
	}
}

fn scalar_equals(cell: &CellValue, expected: &CellValue) -> bool {
	if cell.partial_compare(expected) == Some(Ordering::Equal) {
		return true;
	}
	// Select controls hand over text; compare it with the cell's rendering
	match expected {
		CellValue::Text(text) => !cell.is_null() && cell.to_plain_text() == *text,
		_ => false,
	}
}

/// `rejected` is the ordering of the cell against the bound that fails it:
/// `Less` for a lower bound, `Greater` for an upper bound.
fn date_bound_holds(cell: &CellValue, bound: Option<&CellValue>, rejected: Ordering) -> bool {
	let Some(bound) = bound else {
		return true;
	};
	let ordering = if let Some(day) = date_only(bound) {
		cell.as_date().map(|cell_day| cell_day.cmp(&day))
	} else {
		match (cell.as_datetime(), bound.as_datetime()) {
			(Some(a), Some(b)) => Some(a.cmp(&b)),
			_ => None,
		}
	};
	ordering.is_some_and(|ordering| ordering != rejected)
}

fn date_only(bound: &CellValue) -> Option<NaiveDate> {
	match bound {
		CellValue::Date(day) => Some(*day),
		CellValue::Text(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok(),
		_ => None,
	}
}

fn number_bound_holds(cell: &CellValue, bound: Option<&CellValue>, rejected: Ordering) -> bool {
	let Some(bound) = bound else {
		return true;
	};
	let bound = match bound {
		CellValue::Text(text) => match text.trim().parse::<f64>() {
			Ok(n) => n,
			Err(_) => return false,
		},
		other => match other.as_f64() {
			Some(n) => n,
			None => return false,
		},
	};
	cell.as_f64()
		.and_then(|n| n.partial_cmp(&bound))
		.is_some_and(|ordering| ordering != rejected)
}

/// Current value of one filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
	/// Inclusive window; a missing bound does not constrain
	Range {
		/// Lower bound
		start: Option<CellValue>,
		/// Upper bound
		end: Option<CellValue>,
	},
	/// Search text or selected option
	Scalar(CellValue),
}

impl FilterValue {
	/// Text value (search box, select option)
	pub fn text(value: impl Into<String>) -> Self {
		Self::Scalar(CellValue::Text(value.into()))
	}

	/// Window value
	pub fn range(start: Option<CellValue>, end: Option<CellValue>) -> Self {
		Self::Range { start, end }
	}

	/// Whether this value places no constraint on any filter.
	///
	/// Null, blank text and bound-less windows are empty. The [`ALL`]
	/// sentinel only disables select filters, see [`FilterValue::is_all`].
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Scalar(value) => is_blank(value),
			Self::Range { start, end } => {
				start.as_ref().is_none_or(is_blank) && end.as_ref().is_none_or(is_blank)
			}
		}
	}

	/// Whether this is the [`ALL`] select option, in any case
	pub fn is_all(&self) -> bool {
		matches!(self, Self::Scalar(CellValue::Text(text)) if text.trim().eq_ignore_ascii_case(ALL))
	}

	/// Drops blank bounds so that `Range { start: Some(""), .. }` behaves
	/// like a missing bound.
	fn normalized(&self) -> Self {
		match self {
			Self::Range { start, end } => Self::Range {
				start: start.clone().filter(|v| !is_blank(v)),
				end: end.clone().filter(|v| !is_blank(v)),
			},
			other => other.clone(),
		}
	}
}

fn is_blank(value: &CellValue) -> bool {
	match value {
		CellValue::Null => true,
		CellValue::Text(text) => text.trim().is_empty(),
		_ => false,
	}
}

impl From<&str> for FilterValue {
	fn from(value: &str) -> Self {
		Self::text(value)
	}
}

impl From<String> for FilterValue {
	fn from(value: String) -> Self {
		Self::text(value)
	}
}

impl From<CellValue> for FilterValue {
	fn from(value: CellValue) -> Self {
		Self::Scalar(value)
	}
}

/// Current values of a screen's filters, keyed by filter key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterValues {
	values: BTreeMap<String, FilterValue>,
}

impl FilterValues {
	/// Creates an empty set of values
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the value of a filter; returns the value it replaced
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Option<FilterValue> {
		self.values.insert(key.into(), value.into())
	}

	/// Builder form of [`FilterValues::set`]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
		self.set(key, value);
		self
	}

	/// Removes the value of a filter
	pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
		self.values.remove(key)
	}

	/// Removes every value
	pub fn clear(&mut self) {
		self.values.clear();
	}

	/// Value of a filter
	pub fn get(&self, key: &str) -> Option<&FilterValue> {
		self.values.get(key)
	}

	/// All stored values, including empty ones
	pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Stored values that constrain something
	pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
		self.iter().filter(|(_, value)| !value.is_empty())
	}

	/// Whether no stored value constrains anything
	pub fn is_empty(&self) -> bool {
		self.active().next().is_none()
	}
}

/// Declared filters joined with their current values
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use skimarket_tables::{Filter, FilterChain, FilterValues, filter_rows};
///
/// let filters = vec![
///     Filter::search("q", "Search", ["guest", "lodging"]),
///     Filter::select("status", "Status"),
/// ];
/// let values = FilterValues::new()
///     .with("q", "chalet")
///     .with("status", "all");
///
/// let rows = vec![
///     json!({"id": 1, "guest": "Ana", "lodging": "Chalet Edelweiss", "status": "confirmed"}),
///     json!({"id": 2, "guest": "Ben", "lodging": "Hôtel du Lac", "status": "pending"}),
/// ];
///
/// let chain = FilterChain::new(&filters, &values);
/// let matched = filter_rows(&rows, &chain);
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0]["id"], 1);
/// ```
#[derive(Debug, Clone)]
pub struct FilterChain<'a> {
	predicates: Vec<(&'a Filter, FilterValue)>,
}

impl<'a> FilterChain<'a> {
	/// Prunes empty values, [`ALL`] on select filters and values without a
	/// declared filter
	pub fn new(filters: &'a [Filter], values: &FilterValues) -> Self {
		let mut predicates = Vec::new();
		for (key, value) in values.active() {
			match filters.iter().find(|filter| filter.key() == key) {
				Some(filter) if filter.is_disabled_by(value) => {}
				Some(filter) => predicates.push((filter, value.normalized())),
				None => {
					tracing::debug!(filter = key, "ignoring value for undeclared filter");
				}
			}
		}
		Self { predicates }
	}

	/// Whether the chain keeps every row
	pub fn is_identity(&self) -> bool {
		self.predicates.is_empty()
	}

	/// Number of active predicates
	pub fn len(&self) -> usize {
		self.predicates.len()
	}

	/// Same as [`FilterChain::is_identity`]
	pub fn is_empty(&self) -> bool {
		self.is_identity()
	}

	/// Whether `row` satisfies every active predicate
	pub fn matches<R: Record + ?Sized>(&self, row: &R) -> bool {
		self.predicates
			.iter()
			.all(|(filter, value)| filter.matches(row, value))
	}
}

/// Positions of the rows kept by `chain`, in input order
pub fn filter_indices<T: Record>(rows: &[T], chain: &FilterChain<'_>) -> Vec<usize> {
	if chain.is_identity() {
		return (0..rows.len()).collect();
	}
	rows.iter()
		.enumerate()
		.filter(|(_, row)| chain.matches(*row))
		.map(|(index, _)| index)
		.collect()
}

/// Rows kept by `chain`, in input order
pub fn filter_rows<'r, T: Record>(rows: &'r [T], chain: &FilterChain<'_>) -> Vec<&'r T> {
	filter_indices(rows, chain)
		.into_iter()
		.map(|index| &rows[index])
		.collect()
}
