//! Embedded JSON fixtures for the admin list screens

use crate::error::{AdminError, AdminResult};
use serde::de::DeserializeOwned;

/// Bookings fixture
pub const BOOKINGS: &str = include_str!("../fixtures/bookings.json");
/// Lodgings fixture
pub const LODGINGS: &str = include_str!("../fixtures/lodgings.json");
/// Payments fixture
pub const PAYMENTS: &str = include_str!("../fixtures/payments.json");
/// Users fixture
pub const USERS: &str = include_str!("../fixtures/users.json");

/// Deserializes a JSON array of `T`
///
/// `model` only names the fixture in the error.
///
/// # Examples
///
/// ```
/// use skimarket_admin::fixtures;
/// use skimarket_admin::models::Lodging;
///
/// let lodgings: Vec<Lodging> = fixtures::load("Lodging", fixtures::LODGINGS).unwrap();
/// assert_eq!(lodgings.len(), 12);
/// ```
pub fn load<T: DeserializeOwned>(model: &str, json: &str) -> AdminResult<Vec<T>> {
	let rows: Vec<T> = serde_json::from_str(json).map_err(|source| AdminError::InvalidFixture {
		model: model.to_string(),
		source,
	})?;
	tracing::debug!(model, rows = rows.len(), "loaded fixture");
	Ok(rows)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::{Booking, Payment, User};

	#[test]
	fn test_embedded_fixtures_decode() {
		assert_eq!(load::<Booking>("Booking", BOOKINGS).unwrap().len(), 40);
		assert_eq!(load::<Payment>("Payment", PAYMENTS).unwrap().len(), 40);
		assert_eq!(load::<User>("User", USERS).unwrap().len(), 20);
	}

	#[test]
	fn test_invalid_fixture_names_model() {
		let err = load::<User>("User", r#"[{"id": "one"}]"#).unwrap_err();
		assert!(matches!(err, AdminError::InvalidFixture { ref model, .. } if model == "User"));
		assert!(err.to_string().starts_with("Invalid fixture for 'User':"));
	}
}
