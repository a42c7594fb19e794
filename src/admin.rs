//! Admin list screens
//!
//! This module provides access to the back-office screens through the
//! `skimarket::admin` namespace.
//!
//! ## Example
//!
//! ```rust
//! use skimarket::admin::{ListScreen, UserScreen};
//!
//! let table = UserScreen.load().unwrap();
//! assert_eq!(table.settings().identity_field, "id");
//! ```

pub use skimarket_admin::*;
