//! Realtime transport adapter for blueprint collaboration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two backends push blueprint changes over different protocols: a Spring
//! backend speaking STOMP over a WebSocket (topic-based) and a Node backend
//! speaking Socket.IO (room-based). Callers want one contract regardless of
//! which is selected: a connection status, a stream of replacement point
//! sequences, list-changed notifications, and a way to send a single point.
//!
//! DESIGN
//! ======
//! The adapter is sans-IO. [`Realtime`] owns at most one [`Link`]; socket
//! drivers (the browser client over `gloo-net`, the CLI over
//! `tokio-tungstenite`) open the WebSocket named by the [`Ticket`] returned
//! from [`Realtime::connect`], then feed [`SocketEvent`]s tagged with the
//! ticket's epoch into [`Realtime::handle`]. Outbound frames leave through a
//! [`FrameSink`] handed over when the socket opens, and observable changes are
//! drained as [`LinkEvent`]s.
//!
//! Epochs are what make reconfiguration safe: `connect` tears the previous
//! link down first, and anything still arriving from an older socket is
//! dropped, so at most one link is ever live.
//!
//! TRADE-OFFS
//! ==========
//! There is no reconnection or backoff. A dropped connection reports
//! `disconnected` (or `error` during the handshake) and stays there until the
//! caller connects again.

pub mod config;
pub mod link;
pub mod socketio;
pub mod status;
pub mod stomp;

pub use config::{Endpoints, LinkConfig, TransportKind};
pub use link::{ChannelSink, FrameSink, Link, LinkEvent, Realtime, SocketEvent, SocketEventKind, Ticket};
pub use status::ConnectionStatus;

/// Log target for transport traffic and lifecycle.
pub const LOG_TARGET: &str = "blueprints::socket";

/// Error returned when a link cannot be configured or a frame cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("invalid blueprint key: {0}")]
    InvalidKey(#[from] frames::KeyError),
    #[error("unknown transport `{0}`; expected `stomp` or `socketio`")]
    UnknownTransport(String),
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Codec(#[from] frames::CodecError),
}
