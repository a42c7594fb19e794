//! List screen definitions
//!
//! A [`ListScreen`] describes one back-office list the way a model admin
//! does: which columns are displayed, which filters sit in the sidebar, which
//! fields the search box looks at, the default ordering and the page size.
//! [`ListScreen::build_table`] turns that description into a ready
//! [`DataTable`].

use crate::error::{AdminError, AdminResult};
use crate::fixtures;
use crate::models::{Booking, BookingStatus, Lodging, LodgingKind, Payment, PaymentStatus, User, UserRole};
use serde::de::DeserializeOwned;
use skimarket_tables::query::SEARCH_PARAM;
use skimarket_tables::settings::DEFAULT_PAGE_SIZE;
use skimarket_tables::{
	CellFormat, Column, DataTable, Filter, Record, SortState, TableSettings,
};
use std::fmt;
use std::str::FromStr;

/// Describes an admin list screen over rows of type [`ListScreen::Row`]
///
/// # Examples
///
/// ```
/// use skimarket_admin::screens::{ListScreen, LodgingScreen};
/// use skimarket_tables::SortState;
///
/// let table = LodgingScreen.load().unwrap();
/// assert_eq!(table.sort(), &SortState::ascending("name"));
/// assert_eq!(table.view().total, 12);
/// ```
pub trait ListScreen {
	/// Entity listed by this screen
	type Row: Record + DeserializeOwned;

	/// Get the model name
	fn model_name(&self) -> &str;

	/// Field holding the row identity
	fn identity_field(&self) -> &str {
		"id"
	}

	/// Columns displayed in the list view
	fn columns(&self) -> Vec<Column>;

	/// Sidebar filters
	fn filters(&self) -> Vec<Filter> {
		Vec::new()
	}

	/// Fields the search box matches against
	fn search_fields(&self) -> Vec<&str> {
		Vec::new()
	}

	/// Default ordering, `-field` for descending; empty for collection order
	fn ordering(&self) -> &str {
		"-id"
	}

	/// Rows per page
	fn list_per_page(&self) -> Option<usize> {
		None
	}

	/// Embedded JSON fixture listing this screen's rows
	fn fixture(&self) -> &'static str;

	/// Table settings for this screen
	fn settings(&self) -> TableSettings {
		TableSettings::default()
			.with_identity_field(self.identity_field())
			.with_page_size(self.list_per_page().unwrap_or(DEFAULT_PAGE_SIZE))
	}

	/// Builds the table over `rows`
	///
	/// The search box becomes a filter keyed `q` in front of the sidebar
	/// filters when any search field is declared.
	fn build_table(&self, rows: Vec<Self::Row>) -> DataTable<Self::Row> {
		let search_fields = self.search_fields();
		let mut filters = Vec::new();
		if !search_fields.is_empty() {
			filters.push(Filter::search(SEARCH_PARAM, "Search", search_fields));
		}
		filters.extend(self.filters());

		DataTable::new(self.settings())
			.with_columns(self.columns())
			.with_filters(filters)
			.with_sort(SortState::parse_from_query(self.ordering()))
			.with_rows(rows)
	}

	/// Builds the table over the embedded fixture
	fn load(&self) -> AdminResult<DataTable<Self::Row>> {
		let rows = fixtures::load(self.model_name(), self.fixture())?;
		Ok(self.build_table(rows))
	}
}

/// Bookings list
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingScreen;

impl ListScreen for BookingScreen {
	type Row = Booking;

	fn model_name(&self) -> &str {
		"Booking"
	}

	fn columns(&self) -> Vec<Column> {
		vec![
			Column::new("id", "#"),
			Column::new("reference", "Reference"),
			Column::new("guest_name", "Guest"),
			Column::new("lodging", "Lodging"),
			Column::new("check_in", "Check-in").format(CellFormat::Date),
			Column::new("nights", "Nights").format(CellFormat::Number),
			Column::new("total_price", "Total").format(CellFormat::Currency),
			Column::new("status", "Status").format(CellFormat::Badge),
			Column::actions(),
		]
	}

	fn filters(&self) -> Vec<Filter> {
		let status = BookingStatus::ALL
			.iter()
			.fold(Filter::select("status", "Status"), |filter, status| {
				filter.add_choice(status.as_str(), status.label())
			});
		vec![
			status,
			Filter::select("station", "Station"),
			Filter::date_range("check_in", "Check-in"),
			Filter::number_range("total_price", "Total"),
		]
	}

	fn search_fields(&self) -> Vec<&str> {
		vec!["reference", "guest_name", "guest_email", "lodging"]
	}

	fn fixture(&self) -> &'static str {
		fixtures::BOOKINGS
	}
}

/// Lodgings list
#[derive(Debug, Clone, Copy, Default)]
pub struct LodgingScreen;

impl ListScreen for LodgingScreen {
	type Row = Lodging;

	fn model_name(&self) -> &str {
		"Lodging"
	}

	fn columns(&self) -> Vec<Column> {
		vec![
			Column::new("name", "Name"),
			Column::new("station", "Station"),
			Column::new("kind", "Type").format(CellFormat::Badge),
			Column::new("capacity", "Capacity").format(CellFormat::Number),
			Column::new("price_per_night", "Price / night").format(CellFormat::Currency),
			Column::new("rating", "Rating").format(CellFormat::Number),
			Column::new("available_from", "Available from").format(CellFormat::Date),
			Column::actions(),
		]
	}

	fn filters(&self) -> Vec<Filter> {
		let kind = LodgingKind::ALL
			.iter()
			.fold(Filter::select("kind", "Type"), |filter, kind| {
				filter.add_choice(kind.as_str(), kind.label())
			});
		vec![
			kind,
			Filter::select("station", "Station"),
			Filter::select("published", "Published")
				.add_choice("true", "Yes")
				.add_choice("false", "No"),
			Filter::number_range("price_per_night", "Price / night"),
		]
	}

	fn search_fields(&self) -> Vec<&str> {
		vec!["name", "station"]
	}

	fn ordering(&self) -> &str {
		"name"
	}

	fn list_per_page(&self) -> Option<usize> {
		Some(20)
	}

	fn fixture(&self) -> &'static str {
		fixtures::LODGINGS
	}
}

/// Payments list, keyed by payment reference
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentScreen;

impl ListScreen for PaymentScreen {
	type Row = Payment;

	fn model_name(&self) -> &str {
		"Payment"
	}

	fn identity_field(&self) -> &str {
		"reference"
	}

	fn columns(&self) -> Vec<Column> {
		vec![
			Column::new("reference", "Reference"),
			Column::new("booking_reference", "Booking"),
			Column::new("payer", "Payer"),
			Column::new("amount", "Amount").format(CellFormat::Currency),
			Column::new("method", "Method").sortable(false),
			Column::new("status", "Status").format(CellFormat::Badge),
			Column::new("paid_at", "Paid at").format(CellFormat::Date),
		]
	}

	fn filters(&self) -> Vec<Filter> {
		let status = PaymentStatus::ALL
			.iter()
			.fold(Filter::select("status", "Status"), |filter, status| {
				filter.add_choice(status.as_str(), status.label())
			});
		vec![
			status,
			Filter::select("method", "Method"),
			Filter::date_range("paid_at", "Paid at"),
		]
	}

	fn search_fields(&self) -> Vec<&str> {
		vec!["reference", "booking_reference", "payer"]
	}

	fn ordering(&self) -> &str {
		"-reference"
	}

	fn list_per_page(&self) -> Option<usize> {
		Some(20)
	}

	fn fixture(&self) -> &'static str {
		fixtures::PAYMENTS
	}
}

/// Accounts list
#[derive(Debug, Clone, Copy, Default)]
pub struct UserScreen;

impl ListScreen for UserScreen {
	type Row = User;

	fn model_name(&self) -> &str {
		"User"
	}

	fn columns(&self) -> Vec<Column> {
		vec![
			Column::new("id", "#"),
			Column::new("full_name", "Name"),
			Column::new("email", "Email"),
			Column::new("role", "Role").format(CellFormat::Badge),
			Column::new("is_active", "Active").sortable(false),
			Column::new("date_joined", "Joined").format(CellFormat::Date),
			Column::new("last_login", "Last login").format(CellFormat::Date),
			Column::actions(),
		]
	}

	fn filters(&self) -> Vec<Filter> {
		let role = UserRole::ALL
			.iter()
			.fold(Filter::select("role", "Role"), |filter, role| {
				filter.add_choice(role.as_str(), role.label())
			});
		vec![
			role,
			Filter::select("is_active", "Active")
				.add_choice("true", "Yes")
				.add_choice("false", "No"),
			Filter::date_range("date_joined", "Joined"),
		]
	}

	fn search_fields(&self) -> Vec<&str> {
		vec!["first_name", "last_name", "email"]
	}

	fn fixture(&self) -> &'static str {
		fixtures::USERS
	}
}

/// The registered list screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
	/// [`BookingScreen`]
	Bookings,
	/// [`LodgingScreen`]
	Lodgings,
	/// [`PaymentScreen`]
	Payments,
	/// [`UserScreen`]
	Users,
}

impl ScreenKind {
	/// Every screen, in menu order
	pub const ALL: [ScreenKind; 4] = [
		ScreenKind::Bookings,
		ScreenKind::Lodgings,
		ScreenKind::Payments,
		ScreenKind::Users,
	];

	/// URL slug of the screen
	pub fn slug(&self) -> &'static str {
		match self {
			ScreenKind::Bookings => "bookings",
			ScreenKind::Lodgings => "lodgings",
			ScreenKind::Payments => "payments",
			ScreenKind::Users => "users",
		}
	}
}

impl fmt::Display for ScreenKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.slug())
	}
}

impl FromStr for ScreenKind {
	type Err = AdminError;

	fn from_str(s: &str) -> AdminResult<Self> {
		let s = s.trim();
		ScreenKind::ALL
			.into_iter()
			.find(|kind| kind.slug().eq_ignore_ascii_case(s))
			.ok_or_else(|| AdminError::UnknownScreen(s.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use skimarket_tables::FilterKind;

	#[rstest]
	#[case("bookings", ScreenKind::Bookings)]
	#[case("Users", ScreenKind::Users)]
	#[case(" payments ", ScreenKind::Payments)]
	fn test_screen_kind_from_slug(#[case] slug: &str, #[case] expected: ScreenKind) {
		assert_eq!(slug.parse::<ScreenKind>().unwrap(), expected);
	}

	#[test]
	fn test_unknown_screen_kind() {
		let err = "shops".parse::<ScreenKind>().unwrap_err();
		assert!(matches!(err, AdminError::UnknownScreen(ref name) if name == "shops"));
	}

	#[test]
	fn test_search_filter_comes_first() {
		let table = BookingScreen.build_table(Vec::new());
		let first = &table.filters()[0];
		assert_eq!(first.key(), "q");
		assert!(matches!(first.kind(), FilterKind::Search { .. }));
		assert_eq!(table.filters().len(), 5);
	}

	#[test]
	fn test_settings_follow_screen() {
		let settings = PaymentScreen.settings();
		assert_eq!(settings.identity_field, "reference");
		assert_eq!(settings.page_size, 20);
		assert_eq!(BookingScreen.settings().page_size, DEFAULT_PAGE_SIZE);
	}
}
