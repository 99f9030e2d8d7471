//! Transport selection and backend endpoints.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::str::FromStr;

use frames::BlueprintKey;
use serde::{Deserialize, Serialize};

use crate::LinkError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
pub const DEFAULT_IO_BASE: &str = "http://localhost:3001";
pub const DEFAULT_STOMP_PATH: &str = "/ws-blueprints";

const SOCKET_IO_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

/// Which realtime protocol (and therefore which backend) a session uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    /// STOMP topics on the Spring backend.
    #[serde(rename = "stomp")]
    Topic,
    /// Socket.IO rooms on the Node backend.
    #[default]
    #[serde(rename = "socketio")]
    Room,
}

impl TransportKind {
    pub const ALL: [Self; 2] = [Self::Room, Self::Topic];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Topic => "stomp",
            Self::Room => "socketio",
        }
    }

    /// Label for transport pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Topic => "STOMP (Spring)",
            Self::Room => "Socket.IO (Node)",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stomp" | "topic" => Ok(Self::Topic),
            "socketio" | "socket.io" | "room" => Ok(Self::Room),
            other => Err(LinkError::UnknownTransport(other.to_owned())),
        }
    }
}

/// Base URLs of the two backends.
///
/// Each backend serves both REST and its realtime endpoint, so the selected
/// transport also decides where REST calls go.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub api_base: String,
    pub io_base: String,
    pub stomp_path: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            io_base: DEFAULT_IO_BASE.to_owned(),
            stomp_path: DEFAULT_STOMP_PATH.to_owned(),
        }
    }
}

impl Endpoints {
    /// HTTP base for REST calls under `kind`.
    #[must_use]
    pub fn rest_base(&self, kind: TransportKind) -> &str {
        match kind {
            TransportKind::Topic => &self.api_base,
            TransportKind::Room => &self.io_base,
        }
    }

    /// WebSocket URL the driver opens for `kind`.
    #[must_use]
    pub fn socket_url(&self, kind: TransportKind) -> String {
        let base = to_ws_scheme(self.rest_base(kind));
        let base = base.trim_end_matches('/');
        match kind {
            TransportKind::Topic => {
                let path = self.stomp_path.trim();
                if path.starts_with('/') {
                    format!("{base}{path}")
                } else {
                    format!("{base}/{path}")
                }
            }
            TransportKind::Room => format!("{base}{SOCKET_IO_PATH}"),
        }
    }

    /// Virtual host announced in the STOMP `CONNECT` frame.
    #[must_use]
    pub fn stomp_host(&self) -> String {
        host_of(&self.api_base)
    }
}

fn to_ws_scheme(base: &str) -> String {
    let base = base.trim();
    if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_owned()
    }
}

/// Host part of a URL, without scheme, port, or path.
#[must_use]
pub fn host_of(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = without_scheme.split(['/', '?']).next().unwrap_or_default();
    let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = authority.split(':').next().unwrap_or_default();
    if host.is_empty() { "localhost".to_owned() } else { host.to_owned() }
}

/// Everything needed to open one link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkConfig {
    pub kind: TransportKind,
    pub key: BlueprintKey,
    /// Bearer token. Sent in the Socket.IO `CONNECT` auth; the STOMP handshake
    /// carries no credential.
    pub token: Option<String>,
}

impl LinkConfig {
    /// Validate author and name and build a config.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidKey`] when author or name is blank or
    /// contains `/`.
    pub fn new(kind: TransportKind, author: &str, name: &str, token: Option<String>) -> Result<Self, LinkError> {
        let key = BlueprintKey::new(author, name)?;
        Ok(Self { kind, key, token: token.filter(|t| !t.trim().is_empty()) })
    }
}
