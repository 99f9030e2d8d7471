//! REST API helpers for the blueprint backends.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning [`ApiError::Network`] since these endpoints
//! are only reachable from the browser bundle.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Status folding is shared with the
//! CLI through [`frames::rest::classify_status`], so a 401/403 surfaces as the
//! same `AUTH_ERROR` signal on both clients.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use frames::rest::{self, ApiError, Operation};
use frames::{AuthSession, Blueprint, BlueprintKey, BlueprintSummary, Credentials, NewBlueprint, Point, PointsUpdate};
#[cfg(any(test, feature = "csr"))]
use serde::de::DeserializeOwned;

#[cfg(feature = "csr")]
const LOG_TARGET: &str = "blueprints::api";

/// Turn a status and body into a decoded payload or a classified error.
#[cfg(any(test, feature = "csr"))]
fn interpret<T: DeserializeOwned>(op: Operation, status: u16, body: &str) -> Result<T, ApiError> {
    if !rest::is_success(status) {
        return Err(rest::classify_status(op, status, Some(body)));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Like [`interpret`] for endpoints whose success body is ignored.
#[cfg(any(test, feature = "csr"))]
fn interpret_empty(op: Operation, status: u16, body: &str) -> Result<(), ApiError> {
    if rest::is_success(status) {
        Ok(())
    } else {
        Err(rest::classify_status(op, status, Some(body)))
    }
}

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials { username: username.trim().to_owned(), password: password.to_owned() }
}

fn new_blueprint(key: &BlueprintKey, points: &[Point]) -> NewBlueprint {
    NewBlueprint { author: key.author.clone(), name: key.name.clone(), points: points.to_vec() }
}

#[cfg(feature = "csr")]
async fn dispatch(op: Operation, request: gloo_net::http::Request) -> Result<(u16, String), ApiError> {
    let resp = request.send().await.map_err(|e| {
        log::warn!(target: LOG_TARGET, "{op:?} request failed: {e}");
        ApiError::Network(e.to_string())
    })?;
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    if !rest::is_success(status) {
        log::warn!(target: LOG_TARGET, "{op:?} answered {status}");
    }
    Ok((status, body))
}

#[cfg(feature = "csr")]
fn authorized(builder: gloo_net::http::RequestBuilder, token: Option<&str>) -> gloo_net::http::RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &rest::bearer(token)),
        None => builder,
    }
}

#[cfg(feature = "csr")]
fn build_error(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

#[cfg(not(feature = "csr"))]
fn unavailable<T>() -> Result<T, ApiError> {
    Err(ApiError::Network("not available outside the browser".to_owned()))
}

/// Register a new account via `POST /api/auth/register`.
///
/// # Errors
///
/// Returns the classified failure; a taken username surfaces as
/// [`ApiError::Rejected`] with the server's message.
pub async fn register(base: &str, username: &str, password: &str) -> Result<AuthSession, ApiError> {
    #[cfg(feature = "csr")]
    {
        let request = gloo_net::http::Request::post(&rest::url(base, rest::AUTH_REGISTER))
            .json(&credentials(username, password))
            .map_err(build_error)?;
        let (status, body) = dispatch(Operation::Register, request).await?;
        interpret(Operation::Register, status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, credentials(username, password));
        unavailable()
    }
}

/// Sign in via `POST /api/auth/login`.
///
/// # Errors
///
/// Wrong credentials come back as [`ApiError::Rejected`]; nothing is persisted.
pub async fn login(base: &str, username: &str, password: &str) -> Result<AuthSession, ApiError> {
    #[cfg(feature = "csr")]
    {
        let request = gloo_net::http::Request::post(&rest::url(base, rest::AUTH_LOGIN))
            .json(&credentials(username, password))
            .map_err(build_error)?;
        let (status, body) = dispatch(Operation::Login, request).await?;
        interpret(Operation::Login, status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, credentials(username, password));
        unavailable()
    }
}

/// Check a stored token with `GET /api/auth/verify`.
///
/// # Errors
///
/// [`ApiError::Auth`] when the token is no longer accepted.
pub async fn verify_token(base: &str, token: &str) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let request = authorized(gloo_net::http::Request::get(&rest::url(base, rest::AUTH_VERIFY)), Some(token))
            .build()
            .map_err(build_error)?;
        let (status, body) = dispatch(Operation::Verify, request).await?;
        interpret_empty(Operation::Verify, status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, token);
        unavailable()
    }
}

/// List an author's blueprints with `GET /api/blueprints/{author}`.
///
/// # Errors
///
/// Returns the classified failure.
pub async fn list_blueprints(base: &str, token: Option<&str>, author: &str) -> Result<Vec<BlueprintSummary>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = rest::url(base, &rest::author_path(author));
        let request = authorized(gloo_net::http::Request::get(&url), token).build().map_err(build_error)?;
        let (status, body) = dispatch(Operation::List, request).await?;
        interpret(Operation::List, status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, token, author);
        unavailable()
    }
}

/// Fetch one blueprint with `GET /api/blueprints/{author}/{name}`.
///
/// # Errors
///
/// Returns the classified failure.
pub async fn fetch_blueprint(base: &str, token: Option<&str>, key: &BlueprintKey) -> Result<Blueprint, ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = rest::url(base, &rest::blueprint_path(key));
        let request = authorized(gloo_net::http::Request::get(&url), token).build().map_err(build_error)?;
        let (status, body) = dispatch(Operation::Fetch, request).await?;
        interpret(Operation::Fetch, status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, token, key);
        unavailable()
    }
}

/// Create a blueprint with `POST /api/blueprints`.
///
/// # Errors
///
/// A duplicate name is rejected by the server and surfaces as
/// [`ApiError::Rejected`].
pub async fn create_blueprint(
    base: &str,
    token: Option<&str>,
    key: &BlueprintKey,
    points: &[Point],
) -> Result<Blueprint, ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = rest::url(base, rest::BLUEPRINTS);
        let request = authorized(gloo_net::http::Request::post(&url), token)
            .json(&new_blueprint(key, points))
            .map_err(build_error)?;
        let (status, body) = dispatch(Operation::Create, request).await?;
        interpret(Operation::Create, status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, token, new_blueprint(key, points));
        unavailable()
    }
}

/// Replace a blueprint's points with `PUT /api/blueprints/{author}/{name}`.
///
/// # Errors
///
/// Returns the classified failure.
pub async fn save_blueprint(
    base: &str,
    token: Option<&str>,
    key: &BlueprintKey,
    points: &[Point],
) -> Result<Blueprint, ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = rest::url(base, &rest::blueprint_path(key));
        let request = authorized(gloo_net::http::Request::put(&url), token)
            .json(&PointsUpdate { points: points.to_vec() })
            .map_err(build_error)?;
        let (status, body) = dispatch(Operation::Save, request).await?;
        interpret(Operation::Save, status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, token, key, PointsUpdate { points: points.to_vec() });
        unavailable()
    }
}

/// Delete a blueprint with `DELETE /api/blueprints/{author}/{name}`.
///
/// # Errors
///
/// Returns the classified failure.
pub async fn delete_blueprint(base: &str, token: Option<&str>, key: &BlueprintKey) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = rest::url(base, &rest::blueprint_path(key));
        let request = authorized(gloo_net::http::Request::delete(&url), token).build().map_err(build_error)?;
        let (status, body) = dispatch(Operation::Delete, request).await?;
        interpret_empty(Operation::Delete, status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, token, key);
        unavailable()
    }
}
