//! # client
//!
//! Leptos + WASM frontend for the InmoGestion marketplace.
//!
//! Pages, components, application state, REST types, and the browser-side
//! access gating (`FeatureGate`, `ProtectedRoute`) built on the shared
//! `access` crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
