//! Application state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each struct here is wrapped in an `RwSignal` by `app::App` and read by
//! components with `expect_context`. The structs themselves are plain data so
//! their transitions can be tested natively.

pub mod blueprints;
pub mod board;
pub mod session;
pub mod workspace;
