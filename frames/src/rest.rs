//! REST contract shared by the browser and native HTTP clients.
//!
//! ERROR HANDLING
//! ==============
//! Every non-2xx response is folded into [`ApiError`] by [`classify_status`].
//! 401/403 become [`ApiError::Auth`], whose display text is the
//! machine-checkable `AUTH_ERROR` marker callers translate into a forced logout.

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::model::{BlueprintKey, ErrorBody};

pub const AUTH_REGISTER: &str = "/api/auth/register";
pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_VERIFY: &str = "/api/auth/verify";
pub const BLUEPRINTS: &str = "/api/blueprints";

/// Marker carried by authorization failures.
pub const AUTH_ERROR: &str = "AUTH_ERROR";

/// Everything except the characters `encodeURIComponent` leaves alone.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// `GET /api/blueprints/{author}`.
#[must_use]
pub fn author_path(author: &str) -> String {
    format!("{BLUEPRINTS}/{}", segment(author))
}

/// `/api/blueprints/{author}/{name}` for GET, PUT and DELETE.
#[must_use]
pub fn blueprint_path(key: &BlueprintKey) -> String {
    format!("{BLUEPRINTS}/{}/{}", segment(&key.author), segment(&key.name))
}

/// Join a base URL and an absolute API path without doubling slashes.
#[must_use]
pub fn url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// `Authorization` header value for a bearer token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// The REST operation a response belongs to; selects the fallback message
/// shown when the server gives no `{error}` body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    Verify,
    List,
    Fetch,
    Create,
    Save,
    Delete,
}

impl Operation {
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Register => "Registration failed",
            Self::Login => "Login failed",
            Self::Verify => "Token verification failed",
            Self::List => "Failed to fetch blueprints",
            Self::Fetch => "Failed to fetch blueprint",
            Self::Create => "Failed to create blueprint",
            Self::Save => "Failed to save blueprint",
            Self::Delete => "Failed to delete blueprint",
        }
    }

    /// Whether 401/403 on this operation means "session no longer valid".
    ///
    /// Login and register answer bad credentials with 401, which is a
    /// rejected form submission rather than an expired session.
    #[must_use]
    pub fn is_authenticated(self) -> bool {
        !matches!(self, Self::Register | Self::Login)
    }
}

/// Normalized failure of a REST call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend refused the bearer credential (401/403).
    #[error("AUTH_ERROR")]
    Auth { status: u16 },
    /// The backend answered with another non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The request was refused locally before being sent.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// True for the `AUTH_ERROR` signal that must force a logout.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Text suitable for a user-facing message line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth { .. } => "Session expired, please sign in again".to_owned(),
            other => other.to_string(),
        }
    }
}

/// Whether an HTTP status counts as success.
///
/// `DELETE` answers either 200 or 204; every other 2xx is success too.
#[must_use]
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Fold a non-success status and its optional body text into an [`ApiError`].
#[must_use]
pub fn classify_status(op: Operation, status: u16, body: Option<&str>) -> ApiError {
    if op.is_authenticated() && matches!(status, 401 | 403) {
        return ApiError::Auth { status };
    }
    let message = body
        .and_then(|text| serde_json::from_str::<ErrorBody>(text).ok())
        .map(|body| body.error)
        .filter(|error| !error.trim().is_empty())
        .unwrap_or_else(|| op.fallback_message().to_owned());
    ApiError::Rejected { status, message }
}
