//! Route-level page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page maps to one route in `app.rs`. Gated pages wrap their content
//! in `ProtectedRoute` so the guard runs before any data is fetched.

pub mod admin;
pub mod agency_dashboard;
pub mod login;
pub mod new_property;
pub mod properties;
pub mod property_detail;
pub mod rent_index;
pub mod subscribe;
