//! Shared blueprint model, REST contract, and realtime frame codecs.
//!
//! This crate owns the wire representation used by both the browser `client`
//! and the native `cli`. Nothing here performs IO: every type is either a
//! serde payload or a pure text codec, so both runtimes share one definition
//! of what travels over HTTP and over the two realtime transports.
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Blueprint, point, and event payload types |
//! | [`rest`] | REST paths, bearer formatting, and [`rest::ApiError`] classification |
//! | [`stomp`] | STOMP 1.2 text frames (topic-based transport) |
//! | [`socketio`] | Engine.IO v4 / Socket.IO v5 packets (room-based transport) |

pub mod model;
pub mod rest;
pub mod socketio;
pub mod stomp;

pub use model::{
    AuthSession, Blueprint, BlueprintKey, BlueprintSummary, BlueprintUpdate, Credentials, DrawEvent,
    ErrorBody, KeyError, ListUpdate, NewBlueprint, ParsePointError, Point, PointsUpdate, RoomDrawEvent,
    User,
};

/// Error returned by the STOMP and Socket.IO decoders.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input was empty where a frame or packet was required.
    #[error("empty frame")]
    Empty,
    /// The STOMP command line is not a known command.
    #[error("unknown STOMP command: {0}")]
    UnknownCommand(String),
    /// A STOMP header line has no `:` separator or carries a bad escape.
    #[error("malformed STOMP header: {0}")]
    MalformedHeader(String),
    /// The STOMP frame has no blank line separating headers from the body.
    #[error("STOMP frame is missing the header terminator")]
    MissingHeaderTerminator,
    /// The STOMP body is shorter than its `content-length` header.
    #[error("STOMP body truncated: expected {expected} bytes, got {actual}")]
    TruncatedBody { expected: usize, actual: usize },
    /// The leading packet type digit is not a known Engine.IO / Socket.IO type.
    #[error("unknown packet type: {0}")]
    UnknownPacketType(char),
    /// Binary attachments are not carried by this client.
    #[error("binary packets are not supported")]
    Unsupported,
    /// A packet carried a JSON payload that failed to parse.
    #[error("invalid packet payload: {0}")]
    Json(#[from] serde_json::Error),
    /// A Socket.IO event packet was not a non-empty array headed by a string.
    #[error("malformed event packet")]
    MalformedEvent,
}
