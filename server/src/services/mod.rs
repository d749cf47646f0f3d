//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and capability checks.

pub mod agency;
pub mod catalog;
pub mod email_auth;
pub mod mailer;
pub mod property;
pub mod session;
pub mod user;
