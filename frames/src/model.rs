//! Blueprint data model and JSON payloads exchanged with the backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! A blueprint is an author-owned, named, ordered list of integer points. The
//! same payload shapes are posted over REST and pushed over both realtime
//! transports, so they are defined once here.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One vertex on the drawing surface, in integer pixels from the top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Error returned when parsing a point from its `x,y` text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid point `{0}`; expected `x,y`")]
pub struct ParsePointError(String);

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or_else(|| ParsePointError(s.to_owned()))?;
        let x = x.trim().parse().map_err(|_| ParsePointError(s.to_owned()))?;
        let y = y.trim().parse().map_err(|_| ParsePointError(s.to_owned()))?;
        Ok(Self { x, y })
    }
}

/// Error returned when an (author, name) pair cannot identify a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("author must not be empty")]
    EmptyAuthor,
    #[error("blueprint name must not be empty")]
    EmptyName,
    #[error("`{0}` must not contain `/`")]
    Slash(String),
}

/// Validated composite key of a blueprint.
///
/// Both parts are trimmed. The key is immutable once a blueprint exists, so
/// every derived channel name (room, topic, REST path) comes from here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlueprintKey {
    pub author: String,
    pub name: String,
}

impl BlueprintKey {
    /// Build a key from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when either part is blank or contains a path separator.
    pub fn new(author: &str, name: &str) -> Result<Self, KeyError> {
        let author = author.trim();
        let name = name.trim();
        if author.is_empty() {
            return Err(KeyError::EmptyAuthor);
        }
        if name.is_empty() {
            return Err(KeyError::EmptyName);
        }
        for part in [author, name] {
            if part.contains('/') {
                return Err(KeyError::Slash(part.to_owned()));
            }
        }
        Ok(Self { author: author.to_owned(), name: name.to_owned() })
    }

    /// Socket.IO room identifier: `blueprints.<author>.<name>`.
    #[must_use]
    pub fn room(&self) -> String {
        format!("blueprints.{}.{}", self.author, self.name)
    }

    /// STOMP subscription destination: `/topic/blueprints.<author>.<name>`.
    #[must_use]
    pub fn topic(&self) -> String {
        format!("/topic/{}", self.room())
    }
}

impl fmt::Display for BlueprintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.name)
    }
}

/// A full blueprint as returned by `GET /api/blueprints/{author}/{name}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub author: String,
    pub name: String,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl Blueprint {
    #[must_use]
    pub fn empty(key: &BlueprintKey) -> Self {
        Self { author: key.author.clone(), name: key.name.clone(), points: Vec::new() }
    }
}

/// One entry of `GET /api/blueprints/{author}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintSummary {
    pub name: String,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl BlueprintSummary {
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}

/// Body of `POST /api/blueprints`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBlueprint {
    pub author: String,
    pub name: String,
    pub points: Vec<Point>,
}

/// Body of `PUT /api/blueprints/{author}/{name}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsUpdate {
    pub points: Vec<Point>,
}

/// Body of `POST /api/auth/register` and `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Profile of the signed-in user. Unknown server fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

/// Successful auth response: `{token, user}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Error payload returned by both backends: `{error}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// STOMP publish body sent to `/app/draw`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawEvent {
    pub author: String,
    pub name: String,
    pub point: Point,
}

/// Socket.IO `draw-event` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDrawEvent {
    pub room: String,
    pub author: String,
    pub name: String,
    pub point: Point,
}

/// Replacement point sequence pushed by either transport.
///
/// The topic-based backend may omit `author`/`name` because the topic already
/// scopes them; callers fill the gaps from the active key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintUpdate {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl BlueprintUpdate {
    /// Resolve into a full blueprint, defaulting missing identity to `key`.
    #[must_use]
    pub fn into_blueprint(self, key: &BlueprintKey) -> Blueprint {
        Blueprint {
            author: self.author.unwrap_or_else(|| key.author.clone()),
            name: self.name.unwrap_or_else(|| key.name.clone()),
            points: self.points,
        }
    }
}

/// Socket.IO `blueprints-list-update` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUpdate {
    pub author: String,
}
