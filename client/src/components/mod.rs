//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages compose these. The gating components (`feature_gate`,
//! `protected_route`) read the shared permission memo; the rest are plain
//! presentation.

pub mod auth_prompt;
pub mod feature_gate;
pub mod nav_bar;
pub mod property_card;
pub mod protected_route;
pub mod toast_host;
