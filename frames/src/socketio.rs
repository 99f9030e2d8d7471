//! Engine.IO v4 and Socket.IO v5 text packets for the room-based transport.
//!
//! Over a WebSocket, each text message is one Engine.IO packet: a type digit
//! followed by its payload. Engine.IO `message` packets (`4`) carry one
//! Socket.IO packet, itself a type digit, an optional namespace and ack id,
//! and an optional JSON payload. `42["join-room","blueprints.a.b"]` is an
//! event on the default namespace.
//!
//! Binary attachments are outside this client's needs and decode as
//! [`CodecError::Unsupported`].

#[cfg(test)]
#[path = "socketio_test.rs"]
mod socketio_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CodecError;

pub const DEFAULT_NAMESPACE: &str = "/";

/// Payload of the Engine.IO `open` packet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenHandshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

/// Engine.IO transport-level packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnginePacket {
    Open(OpenHandshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    /// Serialize to the text carried in one WebSocket message.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if the open handshake fails to serialize.
    pub fn encode(&self) -> Result<String, CodecError> {
        Ok(match self {
            Self::Open(handshake) => format!("0{}", serde_json::to_string(handshake)?),
            Self::Close => "1".to_owned(),
            Self::Ping(data) => format!("2{data}"),
            Self::Pong(data) => format!("3{data}"),
            Self::Message(data) => format!("4{data}"),
            Self::Upgrade => "5".to_owned(),
            Self::Noop => "6".to_owned(),
        })
    }

    /// Decode one WebSocket text message.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] for empty input, an unknown type digit, a
    /// base64 binary message, or a malformed open handshake.
    pub fn decode(text: &str) -> Result<Self, CodecError> {
        let mut chars = text.chars();
        let kind = chars.next().ok_or(CodecError::Empty)?;
        let rest = chars.as_str();
        Ok(match kind {
            '0' => Self::Open(serde_json::from_str(rest)?),
            '1' => Self::Close,
            '2' => Self::Ping(rest.to_owned()),
            '3' => Self::Pong(rest.to_owned()),
            '4' => Self::Message(rest.to_owned()),
            '5' => Self::Upgrade,
            '6' => Self::Noop,
            'b' => return Err(CodecError::Unsupported),
            other => return Err(CodecError::UnknownPacketType(other)),
        })
    }
}

/// Socket.IO packet carried inside an Engine.IO `message`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketPacket {
    Connect { namespace: String, data: Option<Value> },
    Disconnect { namespace: String },
    Event { namespace: String, id: Option<u64>, name: String, args: Vec<Value> },
    Ack { namespace: String, id: u64, args: Vec<Value> },
    ConnectError { namespace: String, data: Option<Value> },
}

impl SocketPacket {
    /// `CONNECT` to the default namespace, optionally carrying auth data.
    #[must_use]
    pub fn connect(auth: Option<Value>) -> Self {
        Self::Connect { namespace: DEFAULT_NAMESPACE.to_owned(), data: auth }
    }

    #[must_use]
    pub fn disconnect() -> Self {
        Self::Disconnect { namespace: DEFAULT_NAMESPACE.to_owned() }
    }

    /// Event on the default namespace with a single payload argument.
    #[must_use]
    pub fn event(name: &str, payload: Value) -> Self {
        Self::Event {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            id: None,
            name: name.to_owned(),
            args: vec![payload],
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            Self::Connect { namespace, .. }
            | Self::Disconnect { namespace }
            | Self::Event { namespace, .. }
            | Self::Ack { namespace, .. }
            | Self::ConnectError { namespace, .. } => namespace,
        }
    }

    /// Serialize to the Socket.IO packet text (without the Engine.IO prefix).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if a payload fails to serialize.
    pub fn encode(&self) -> Result<String, CodecError> {
        let (kind, id, data) = match self {
            Self::Connect { data, .. } => ('0', None, data.clone()),
            Self::Disconnect { .. } => ('1', None, None),
            Self::Event { id, name, args, .. } => {
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(Value::String(name.clone()));
                items.extend(args.iter().cloned());
                ('2', *id, Some(Value::Array(items)))
            }
            Self::Ack { id, args, .. } => ('3', Some(*id), Some(Value::Array(args.clone()))),
            Self::ConnectError { data, .. } => ('4', None, data.clone()),
        };

        let mut out = String::new();
        out.push(kind);
        let namespace = self.namespace();
        if namespace != DEFAULT_NAMESPACE {
            out.push_str(namespace);
            out.push(',');
        }
        if let Some(id) = id {
            out.push_str(&id.to_string());
        }
        if let Some(data) = data {
            out.push_str(&serde_json::to_string(&data)?);
        }
        Ok(out)
    }

    /// Serialize wrapped in an Engine.IO `message` packet, ready to send.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if a payload fails to serialize.
    pub fn to_engine_text(&self) -> Result<String, CodecError> {
        EnginePacket::Message(self.encode()?).encode()
    }

    /// Decode Socket.IO packet text (the payload of an Engine.IO `message`).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] for empty input, unknown or binary packet types,
    /// invalid JSON, or an event whose payload is not `[name, ...args]`.
    pub fn decode(text: &str) -> Result<Self, CodecError> {
        let mut chars = text.chars();
        let kind = chars.next().ok_or(CodecError::Empty)?;
        if matches!(kind, '5' | '6') {
            return Err(CodecError::Unsupported);
        }
        let mut rest = chars.as_str();

        let mut namespace = DEFAULT_NAMESPACE.to_owned();
        if rest.starts_with('/') {
            let (ns, tail) = rest.split_once(',').unwrap_or((rest, ""));
            namespace = ns.to_owned();
            rest = tail;
        }

        let digits = rest.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(rest.len());
        let id = rest[..digits].parse::<u64>().ok();
        rest = &rest[digits..];

        let data = if rest.is_empty() {
            None
        } else {
            Some(serde_json::from_str::<Value>(rest)?)
        };

        Ok(match kind {
            '0' => Self::Connect { namespace, data },
            '1' => Self::Disconnect { namespace },
            '2' => {
                let (name, args) = split_event(data)?;
                Self::Event { namespace, id, name, args }
            }
            '3' => {
                let id = id.ok_or(CodecError::MalformedEvent)?;
                let args = match data {
                    Some(Value::Array(items)) => items,
                    Some(other) => vec![other],
                    None => Vec::new(),
                };
                Self::Ack { namespace, id, args }
            }
            '4' => Self::ConnectError { namespace, data },
            other => return Err(CodecError::UnknownPacketType(other)),
        })
    }
}

fn split_event(data: Option<Value>) -> Result<(String, Vec<Value>), CodecError> {
    let Some(Value::Array(mut items)) = data else {
        return Err(CodecError::MalformedEvent);
    };
    if items.is_empty() {
        return Err(CodecError::MalformedEvent);
    }
    let Value::String(name) = items.remove(0) else {
        return Err(CodecError::MalformedEvent);
    };
    Ok((name, items))
}

/// Human-readable message from a `CONNECT_ERROR` payload.
#[must_use]
pub fn connect_error_message(data: Option<&Value>) -> String {
    match data {
        Some(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("connection refused")
            .to_owned(),
        Some(Value::String(text)) => text.clone(),
        _ => "connection refused".to_owned(),
    }
}
