//! Marketplace entities shown by the admin list screens
//!
//! Each entity implements [`Record`] by hand so that list screens can address
//! its fields by the same keys used in columns, filters and query strings.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use skimarket_tables::{CellValue, Record};

/// Lifecycle of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
	/// Awaiting payment
	Pending,
	/// Paid and confirmed
	Confirmed,
	/// Cancelled by the guest or the host
	Cancelled,
	/// Stay is over
	Completed,
}

impl BookingStatus {
	/// All statuses in display order
	pub const ALL: [BookingStatus; 4] = [
		BookingStatus::Pending,
		BookingStatus::Confirmed,
		BookingStatus::Cancelled,
		BookingStatus::Completed,
	];

	/// Wire name, as stored in fixtures and filter values
	pub fn as_str(&self) -> &'static str {
		match self {
			BookingStatus::Pending => "pending",
			BookingStatus::Confirmed => "confirmed",
			BookingStatus::Cancelled => "cancelled",
			BookingStatus::Completed => "completed",
		}
	}

	/// Human label
	pub fn label(&self) -> &'static str {
		match self {
			BookingStatus::Pending => "Pending",
			BookingStatus::Confirmed => "Confirmed",
			BookingStatus::Cancelled => "Cancelled",
			BookingStatus::Completed => "Completed",
		}
	}
}

/// A guest's reservation of a lodging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
	pub id: i64,
	pub reference: String,
	pub guest_name: String,
	pub guest_email: String,
	pub lodging: String,
	pub station: String,
	pub check_in: NaiveDate,
	pub check_out: NaiveDate,
	pub guests: u32,
	pub total_price: f64,
	pub status: BookingStatus,
	pub created_at: NaiveDateTime,
}

impl Booking {
	/// Number of nights between check-in and check-out
	pub fn nights(&self) -> i64 {
		(self.check_out - self.check_in).num_days().max(0)
	}
}

impl Record for Booking {
	fn field(&self, key: &str) -> Option<CellValue> {
		match key {
			"id" => Some(self.id.into()),
			"reference" => Some(self.reference.as_str().into()),
			"guest_name" => Some(self.guest_name.as_str().into()),
			"guest_email" => Some(self.guest_email.as_str().into()),
			"lodging" => Some(self.lodging.as_str().into()),
			"station" => Some(self.station.as_str().into()),
			"check_in" => Some(self.check_in.into()),
			"check_out" => Some(self.check_out.into()),
			"nights" => Some(self.nights().into()),
			"guests" => Some(self.guests.into()),
			"total_price" => Some(self.total_price.into()),
			"status" => Some(self.status.as_str().into()),
			"created_at" => Some(self.created_at.into()),
			_ => None,
		}
	}
}

/// Kind of lodging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LodgingKind {
	Chalet,
	Apartment,
	Hotel,
	Residence,
}

impl LodgingKind {
	/// All kinds in display order
	pub const ALL: [LodgingKind; 4] = [
		LodgingKind::Chalet,
		LodgingKind::Apartment,
		LodgingKind::Hotel,
		LodgingKind::Residence,
	];

	/// Wire name
	pub fn as_str(&self) -> &'static str {
		match self {
			LodgingKind::Chalet => "chalet",
			LodgingKind::Apartment => "apartment",
			LodgingKind::Hotel => "hotel",
			LodgingKind::Residence => "residence",
		}
	}

	/// Human label
	pub fn label(&self) -> &'static str {
		match self {
			LodgingKind::Chalet => "Chalet",
			LodgingKind::Apartment => "Apartment",
			LodgingKind::Hotel => "Hotel",
			LodgingKind::Residence => "Residence",
		}
	}
}

/// A rentable lodging in a ski station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lodging {
	pub id: i64,
	pub name: String,
	pub station: String,
	pub kind: LodgingKind,
	pub capacity: u32,
	pub price_per_night: f64,
	#[serde(default)]
	pub rating: Option<f64>,
	pub published: bool,
	pub available_from: NaiveDate,
}

impl Record for Lodging {
	fn field(&self, key: &str) -> Option<CellValue> {
		match key {
			"id" => Some(self.id.into()),
			"name" => Some(self.name.as_str().into()),
			"station" => Some(self.station.as_str().into()),
			"kind" => Some(self.kind.as_str().into()),
			"capacity" => Some(self.capacity.into()),
			"price_per_night" => Some(self.price_per_night.into()),
			"rating" => Some(self.rating.into()),
			"published" => Some(self.published.into()),
			"available_from" => Some(self.available_from.into()),
			_ => None,
		}
	}
}

/// Settlement state of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
	Pending,
	Paid,
	Refunded,
	Failed,
}

impl PaymentStatus {
	/// All statuses in display order
	pub const ALL: [PaymentStatus; 4] = [
		PaymentStatus::Pending,
		PaymentStatus::Paid,
		PaymentStatus::Refunded,
		PaymentStatus::Failed,
	];

	/// Wire name
	pub fn as_str(&self) -> &'static str {
		match self {
			PaymentStatus::Pending => "pending",
			PaymentStatus::Paid => "paid",
			PaymentStatus::Refunded => "refunded",
			PaymentStatus::Failed => "failed",
		}
	}

	/// Human label
	pub fn label(&self) -> &'static str {
		match self {
			PaymentStatus::Pending => "Pending",
			PaymentStatus::Paid => "Paid",
			PaymentStatus::Refunded => "Refunded",
			PaymentStatus::Failed => "Failed",
		}
	}
}

/// Payment attached to a booking
///
/// Payments are identified by their reference rather than a numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
	pub reference: String,
	pub booking_reference: String,
	pub payer: String,
	pub amount: f64,
	pub method: String,
	pub status: PaymentStatus,
	#[serde(default)]
	pub paid_at: Option<NaiveDateTime>,
}

impl Record for Payment {
	fn field(&self, key: &str) -> Option<CellValue> {
		match key {
			"reference" => Some(self.reference.as_str().into()),
			"booking_reference" => Some(self.booking_reference.as_str().into()),
			"payer" => Some(self.payer.as_str().into()),
			"amount" => Some(self.amount.into()),
			"method" => Some(self.method.as_str().into()),
			"status" => Some(self.status.as_str().into()),
			"paid_at" => Some(self.paid_at.into()),
			_ => None,
		}
	}
}

/// Back-office or customer account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
	Customer,
	Host,
	Staff,
	Admin,
}

impl UserRole {
	/// All roles in display order
	pub const ALL: [UserRole; 4] = [UserRole::Customer, UserRole::Host, UserRole::Staff, UserRole::Admin];

	/// Wire name
	pub fn as_str(&self) -> &'static str {
		match self {
			UserRole::Customer => "customer",
			UserRole::Host => "host",
			UserRole::Staff => "staff",
			UserRole::Admin => "admin",
		}
	}

	/// Human label
	pub fn label(&self) -> &'static str {
		match self {
			UserRole::Customer => "Customer",
			UserRole::Host => "Host",
			UserRole::Staff => "Staff",
			UserRole::Admin => "Admin",
		}
	}
}

/// Marketplace account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	pub id: i64,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub role: UserRole,
	pub is_active: bool,
	pub date_joined: NaiveDate,
	#[serde(default)]
	pub last_login: Option<NaiveDateTime>,
}

impl User {
	/// "First Last"
	pub fn full_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
	}
}

impl Record for User {
	fn field(&self, key: &str) -> Option<CellValue> {
		match key {
			"id" => Some(self.id.into()),
			"first_name" => Some(self.first_name.as_str().into()),
			"last_name" => Some(self.last_name.as_str().into()),
			"full_name" => Some(self.full_name().into()),
			"email" => Some(self.email.as_str().into()),
			"role" => Some(self.role.as_str().into()),
			"is_active" => Some(self.is_active.into()),
			"date_joined" => Some(self.date_joined.into()),
			"last_login" => Some(self.last_login.into()),
			_ => None,
		}
	}
}
