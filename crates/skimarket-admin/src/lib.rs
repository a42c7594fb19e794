//! Back-office list screens for the skimarket marketplace
//!
//! Each screen declares its columns, filters, search fields, default ordering
//! and page size, and builds a [`skimarket_tables::DataTable`] over its
//! entities.
//!
//! ## Screens
//!
//! | Slug       | Entity              | Identity    | Default ordering |
//! |------------|---------------------|-------------|------------------|
//! | `bookings` | [`models::Booking`] | `id`        | `-id`            |
//! | `lodgings` | [`models::Lodging`] | `id`        | `name`           |
//! | `payments` | [`models::Payment`] | `reference` | `-reference`     |
//! | `users`    | [`models::User`]    | `id`        | `-id`            |
//!
//! ## Example
//!
//! ```rust
//! use skimarket_admin::responses::list_by_slug;
//!
//! let response = list_by_slug("bookings", "status=pending&sort=total_price").unwrap();
//! assert_eq!(response.count, 7);
//! assert_eq!(response.query, "page=1&page_size=10&sort=total_price&status=pending");
//! ```

pub mod error;
pub mod fixtures;
pub mod models;
pub mod responses;
pub mod screens;

pub use error::{AdminError, AdminResult};
pub use responses::{ListResponse, list, list_by_slug};
pub use screens::{BookingScreen, ListScreen, LodgingScreen, PaymentScreen, ScreenKind, UserScreen};
