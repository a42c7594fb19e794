//! Table state in URL query strings
//!
//! Reserved keys are `page`, `page_size`, `sort` (`-field` for descending) and
//! `q` (the search box). Every other key is a filter value; a `__gte` or
//! `__lte` suffix marks the lower or upper bound of a range filter:
//!
//! ```text
//! ?page=2&sort=-check_in&status=confirmed&check_in__gte=2025-01-01
//! ```

use crate::error::Result;
use crate::filtering::{FilterValue, FilterValues};
use crate::sorting::SortState;
use crate::value::CellValue;
use std::collections::BTreeMap;

/// Query key of the current page
pub const PAGE_PARAM: &str = "page";
/// Query key of the page size
pub const PAGE_SIZE_PARAM: &str = "page_size";
/// Query key of the sort
pub const SORT_PARAM: &str = "sort";
/// Query key of the search text
pub const SEARCH_PARAM: &str = "q";

const LOWER_BOUND_SUFFIX: &str = "__gte";
const UPPER_BOUND_SUFFIX: &str = "__lte";

/// Decoded table state
///
/// # Examples
///
/// ```
/// use skimarket_tables::{SortState, TableQuery};
///
/// let query = TableQuery::parse("page=2&sort=-price&status=confirmed&q=chalet").unwrap();
/// assert_eq!(query.page, Some(2));
/// assert_eq!(query.sort, Some(SortState::descending("price")));
/// assert_eq!(query.search.as_deref(), Some("chalet"));
/// assert!(query.filters.get("status").is_some());
///
/// assert_eq!(
///     query.to_query_string().unwrap(),
///     "page=2&sort=-price&q=chalet&status=confirmed"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableQuery {
	/// Requested page; `None` when absent or not a positive number
	pub page: Option<usize>,
	/// Requested page size; zero when a non-positive size was given
	pub page_size: Option<usize>,
	/// Requested sort; `Some(Unsorted)` for an empty `sort=`
	pub sort: Option<SortState>,
	/// Search text
	pub search: Option<String>,
	/// Filter values by filter key
	pub filters: FilterValues,
}

impl TableQuery {
	/// Creates an empty query
	pub fn new() -> Self {
		Self::default()
	}

	/// Decodes a query string, with or without the leading `?`.
	///
	/// Malformed numbers are dropped rather than reported; only a query
	/// string that cannot be decoded at all is an error.
	pub fn parse(query: &str) -> Result<Self> {
		let query = query.strip_prefix('?').unwrap_or(query);
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
		Ok(Self::from_pairs(pairs))
	}

	/// Builds a query from decoded key/value pairs; later pairs win
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut query = Self::new();
		let mut ranges: BTreeMap<String, (Option<CellValue>, Option<CellValue>)> = BTreeMap::new();
		for (key, value) in pairs {
			let (key, value) = (key.as_ref(), value.as_ref().trim());
			match key {
				PAGE_PARAM => query.page = parse_page(value),
				PAGE_SIZE_PARAM => query.page_size = parse_page_size(value),
				SORT_PARAM => query.sort = Some(SortState::parse_from_query(value)),
				SEARCH_PARAM => query.search = Some(value.to_string()),
				_ => {
					if let Some(field) = key.strip_suffix(LOWER_BOUND_SUFFIX) {
						ranges.entry(field.to_string()).or_default().0 = Some(value.into());
					} else if let Some(field) = key.strip_suffix(UPPER_BOUND_SUFFIX) {
						ranges.entry(field.to_string()).or_default().1 = Some(value.into());
					} else {
						query.filters.set(key, value);
					}
				}
			}
		}
		for (field, (start, end)) in ranges {
			query.filters.set(field, FilterValue::range(start, end));
		}
		query
	}

	/// Key/value pairs in encoding order: reserved keys first, then filters
	/// by key. Empty filter values and the `all` select option are left out;
	/// the search text is kept as typed.
	pub fn to_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::new();
		if let Some(page) = self.page {
			pairs.push((PAGE_PARAM.to_string(), page.to_string()));
		}
		if let Some(page_size) = self.page_size {
			pairs.push((PAGE_SIZE_PARAM.to_string(), page_size.to_string()));
		}
		if let Some(sort) = self.sort.as_ref().and_then(SortState::to_query) {
			pairs.push((SORT_PARAM.to_string(), sort));
		}
		if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
			pairs.push((SEARCH_PARAM.to_string(), search.to_string()));
		}
		for (key, value) in self.filters.active().filter(|(_, value)| !value.is_all()) {
			match value {
				FilterValue::Scalar(value) => {
					pairs.push((key.to_string(), value.to_plain_text()));
				}
				FilterValue::Range { start, end } => {
					if let Some(start) = start.as_ref().filter(|v| !v.to_plain_text().trim().is_empty()) {
						pairs.push((format!("{}{}", key, LOWER_BOUND_SUFFIX), start.to_plain_text()));
					}
					if let Some(end) = end.as_ref().filter(|v| !v.to_plain_text().trim().is_empty()) {
						pairs.push((format!("{}{}", key, UPPER_BOUND_SUFFIX), end.to_plain_text()));
					}
				}
			}
		}
		pairs
	}

	/// Encodes the query, without a leading `?`
	pub fn to_query_string(&self) -> Result<String> {
		Ok(serde_urlencoded::to_string(self.to_pairs())?)
	}
}

fn parse_page(value: &str) -> Option<usize> {
	match value.parse::<i64>() {
		Ok(page) if page > 0 => usize::try_from(page).ok(),
		_ => {
			tracing::debug!(value, "ignoring malformed page parameter");
			None
		}
	}
}

fn parse_page_size(value: &str) -> Option<usize> {
	match value.parse::<i64>() {
		// Non-positive sizes are passed on as zero and clamped by the table
		Ok(size) if size <= 0 => Some(0),
		Ok(size) => usize::try_from(size).ok(),
		Err(_) => {
			tracing::debug!(value, "ignoring malformed page_size parameter");
			None
		}
	}
}
