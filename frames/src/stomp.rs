//! STOMP 1.2 text frames for the topic-based transport.
//!
//! A frame is a command line, `name:value` header lines, a blank line, the
//! body, and a NUL terminator. One WebSocket text message carries one frame;
//! a message holding only end-of-line characters is a heart-beat.
//!
//! Header values are escaped (`\\`, `\n`, `\r`, `\c`) on every frame except
//! `CONNECT` and `CONNECTED`, which the 1.2 protocol leaves raw for
//! compatibility with 1.0 peers.

#[cfg(test)]
#[path = "stomp_test.rs"]
mod stomp_test;

use crate::CodecError;

const NUL: char = '\0';

/// STOMP frame command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Connect,
    Stomp,
    Connected,
    Send,
    Subscribe,
    Unsubscribe,
    Ack,
    Nack,
    Begin,
    Commit,
    Abort,
    Disconnect,
    Message,
    Receipt,
    Error,
}

impl Command {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Stomp => "STOMP",
            Self::Connected => "CONNECTED",
            Self::Send => "SEND",
            Self::Subscribe => "SUBSCRIBE",
            Self::Unsubscribe => "UNSUBSCRIBE",
            Self::Ack => "ACK",
            Self::Nack => "NACK",
            Self::Begin => "BEGIN",
            Self::Commit => "COMMIT",
            Self::Abort => "ABORT",
            Self::Disconnect => "DISCONNECT",
            Self::Message => "MESSAGE",
            Self::Receipt => "RECEIPT",
            Self::Error => "ERROR",
        }
    }

    fn parse(line: &str) -> Result<Self, CodecError> {
        Ok(match line {
            "CONNECT" => Self::Connect,
            "STOMP" => Self::Stomp,
            "CONNECTED" => Self::Connected,
            "SEND" => Self::Send,
            "SUBSCRIBE" => Self::Subscribe,
            "UNSUBSCRIBE" => Self::Unsubscribe,
            "ACK" => Self::Ack,
            "NACK" => Self::Nack,
            "BEGIN" => Self::Begin,
            "COMMIT" => Self::Commit,
            "ABORT" => Self::Abort,
            "DISCONNECT" => Self::Disconnect,
            "MESSAGE" => Self::Message,
            "RECEIPT" => Self::Receipt,
            "ERROR" => Self::Error,
            other => return Err(CodecError::UnknownCommand(other.to_owned())),
        })
    }

    fn escapes_headers(self) -> bool {
        !matches!(self, Self::Connect | Self::Connected)
    }
}

/// One STOMP frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StompFrame {
    pub command: Command,
    /// Headers in wire order. Repeated names are kept; [`StompFrame::get`]
    /// returns the first, as the protocol requires.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl StompFrame {
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self { command, headers: Vec::new(), body: String::new() }
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: String) -> Self {
        self.body = body;
        self
    }

    /// First value of the named header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// `CONNECT` with heart-beats disabled; this client runs no timers.
    #[must_use]
    pub fn connect(host: &str) -> Self {
        Self::new(Command::Connect)
            .header("accept-version", "1.2")
            .header("host", host)
            .header("heart-beat", "0,0")
    }

    #[must_use]
    pub fn subscribe(id: &str, destination: &str) -> Self {
        Self::new(Command::Subscribe)
            .header("id", id)
            .header("destination", destination)
            .header("ack", "auto")
    }

    #[must_use]
    pub fn unsubscribe(id: &str) -> Self {
        Self::new(Command::Unsubscribe).header("id", id)
    }

    #[must_use]
    pub fn send_json(destination: &str, body: String) -> Self {
        let length = body.len().to_string();
        Self::new(Command::Send)
            .header("destination", destination)
            .header("content-type", "application/json")
            .header("content-length", &length)
            .with_body(body)
    }

    #[must_use]
    pub fn disconnect() -> Self {
        Self::new(Command::Disconnect)
    }

    /// Serialize to the text carried in one WebSocket message.
    #[must_use]
    pub fn encode(&self) -> String {
        let escape = self.command.escapes_headers();
        let mut out = String::with_capacity(32 + self.body.len());
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            if escape {
                out.push_str(&escape_header(name));
                out.push(':');
                out.push_str(&escape_header(value));
            } else {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
            }
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push(NUL);
        out
    }
}

/// Decode one WebSocket message into a frame.
///
/// Returns `Ok(None)` for heart-beats (messages made only of EOLs).
///
/// # Errors
///
/// Returns [`CodecError`] for unknown commands, malformed headers, a missing
/// header terminator, or a body shorter than its `content-length`.
pub fn decode(text: &str) -> Result<Option<StompFrame>, CodecError> {
    let text = text.trim_start_matches(['\r', '\n']);
    if text.is_empty() || text.starts_with(NUL) {
        return Ok(None);
    }

    let (head, rest) = split_head(text).ok_or(CodecError::MissingHeaderTerminator)?;
    let mut lines = head.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));
    let command = Command::parse(lines.next().unwrap_or_default())?;
    let unescape = command.escapes_headers();

    let mut headers = Vec::new();
    for line in lines {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| CodecError::MalformedHeader(line.to_owned()))?;
        if unescape {
            headers.push((unescape_header(name)?, unescape_header(value)?));
        } else {
            headers.push((name.to_owned(), value.to_owned()));
        }
    }

    let mut frame = StompFrame { command, headers, body: String::new() };
    let declared = frame
        .get("content-length")
        .and_then(|value| value.trim().parse::<usize>().ok());
    frame.body = match declared {
        Some(expected) => rest
            .get(..expected)
            .ok_or(CodecError::TruncatedBody { expected, actual: rest.len() })?
            .to_owned(),
        None => rest.split(NUL).next().unwrap_or_default().to_owned(),
    };
    Ok(Some(frame))
}

fn split_head(text: &str) -> Option<(&str, &str)> {
    let lf = text.find("\n\n").map(|at| (at, 2));
    let crlf = text.find("\r\n\r\n").map(|at| (at, 4));
    let (at, len) = match (lf, crlf) {
        (Some(a), Some(b)) => {
            if a.0 <= b.0 {
                a
            } else {
                b
            }
        }
        (Some(found), None) | (None, Some(found)) => found,
        (None, None) => {
            // A frame with no headers and no body may end right at the NUL.
            let head = text.split(NUL).next()?;
            let head = head.strip_suffix('\n').unwrap_or(head);
            return (!head.contains('\n') && text.contains(NUL)).then_some((head, ""));
        }
    };
    Some((&text[..at], &text[at + len..]))
}

fn escape_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
    out
}

fn unescape_header(raw: &str) -> Result<String, CodecError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            _ => return Err(CodecError::MalformedHeader(raw.to_owned())),
        }
    }
    Ok(out)
}
