//! Shared client state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` creates one `RwSignal` per state struct and provides it to the tree.
//! Components read them with `expect_context`; nothing lives in module-level
//! statics.

pub mod auth;
pub mod notify;
pub mod session;
