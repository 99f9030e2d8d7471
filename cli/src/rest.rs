//! Native REST client for both blueprint backends.
//!
//! Shares path building and status classification with the browser through
//! `frames::rest`, so both clients report the same `ApiError`s.

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use frames::rest::{self, ApiError, Operation};
use frames::{AuthSession, Blueprint, BlueprintKey, BlueprintSummary, Credentials, NewBlueprint, Point, PointsUpdate};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

pub(crate) struct RestClient {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

/// Decode a success body, or classify the failure.
fn decode<T: DeserializeOwned>(op: Operation, status: u16, body: &str) -> Result<T, ApiError> {
    if !rest::is_success(status) {
        return Err(rest::classify_status(op, status, Some(body)));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn expect_success(op: Operation, status: u16, body: &str) -> Result<(), ApiError> {
    if rest::is_success(status) {
        Ok(())
    } else {
        Err(rest::classify_status(op, status, Some(body)))
    }
}

impl RestClient {
    pub(crate) fn new(base: &str, token: Option<String>) -> Self {
        Self { http: reqwest::Client::new(), base: base.to_owned(), token }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, rest::url(&self.base, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, op: Operation, request: RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::debug!(?op, status, "response received");
        Ok((status, body))
    }

    pub(crate) async fn register(&self, username: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = Credentials { username: username.to_owned(), password: password.to_owned() };
        let (status, text) = self
            .execute(Operation::Register, self.request(Method::POST, rest::AUTH_REGISTER).json(&body))
            .await?;
        decode(Operation::Register, status, &text)
    }

    pub(crate) async fn login(&self, username: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = Credentials { username: username.to_owned(), password: password.to_owned() };
        let (status, text) = self
            .execute(Operation::Login, self.request(Method::POST, rest::AUTH_LOGIN).json(&body))
            .await?;
        decode(Operation::Login, status, &text)
    }

    pub(crate) async fn verify(&self) -> Result<(), ApiError> {
        let (status, text) = self.execute(Operation::Verify, self.request(Method::GET, rest::AUTH_VERIFY)).await?;
        expect_success(Operation::Verify, status, &text)
    }

    pub(crate) async fn list(&self, author: &str) -> Result<Vec<BlueprintSummary>, ApiError> {
        let request = self.request(Method::GET, &rest::author_path(author));
        let (status, text) = self.execute(Operation::List, request).await?;
        decode(Operation::List, status, &text)
    }

    pub(crate) async fn fetch(&self, key: &BlueprintKey) -> Result<Blueprint, ApiError> {
        let request = self.request(Method::GET, &rest::blueprint_path(key));
        let (status, text) = self.execute(Operation::Fetch, request).await?;
        decode(Operation::Fetch, status, &text)
    }

    pub(crate) async fn create(&self, key: &BlueprintKey, points: &[Point]) -> Result<Blueprint, ApiError> {
        let body = NewBlueprint { author: key.author.clone(), name: key.name.clone(), points: points.to_vec() };
        let request = self.request(Method::POST, rest::BLUEPRINTS).json(&body);
        let (status, text) = self.execute(Operation::Create, request).await?;
        decode(Operation::Create, status, &text)
    }

    pub(crate) async fn save(&self, key: &BlueprintKey, points: &[Point]) -> Result<Blueprint, ApiError> {
        let body = PointsUpdate { points: points.to_vec() };
        let request = self.request(Method::PUT, &rest::blueprint_path(key)).json(&body);
        let (status, text) = self.execute(Operation::Save, request).await?;
        decode(Operation::Save, status, &text)
    }

    pub(crate) async fn delete(&self, key: &BlueprintKey) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &rest::blueprint_path(key));
        let (status, text) = self.execute(Operation::Delete, request).await?;
        expect_success(Operation::Delete, status, &text)
    }
}
