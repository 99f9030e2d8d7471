//! # client
//!
//! Leptos + WASM frontend for collaborative blueprint drawing.
//!
//! This crate contains the workspace page, its components, application state,
//! REST calls, and the realtime actor that drives the `realtime` adapter over
//! browser WebSockets. Drawing goes through the `canvas` crate.
//!
//! Browser-only code is gated behind the `csr` feature; without it the crate
//! builds natively with inert stubs so state and formatting logic can be unit
//! tested with plain `cargo test`.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger unavailable: {err}");
    }
    leptos::mount::mount_to_body(app::App);
}
