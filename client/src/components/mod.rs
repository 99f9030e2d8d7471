//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the workspace chrome and drawing surface while
//! reading/writing shared state from Leptos context providers.

pub mod auth_modal;
pub mod blueprint_actions;
pub mod blueprint_list;
pub mod connection_status;
pub mod drawing_surface;
pub mod toolbar;
