//! Networking modules for REST calls and the realtime link.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls against the selected backend and
//! `realtime_client` runs the WebSocket side of the `realtime` adapter.

pub mod api;
pub mod realtime_client;
