//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The single owner of the bearer token. Components read it from context;
//! writes go through [`SessionState::establish`] and [`SessionState::clear`],
//! which keep the persisted credentials in step with memory.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use frames::rest::ApiError;
use frames::{AuthSession, User};

use crate::util::credentials::{self, CredentialStore};

/// Who is signed in, plus auth-form progress.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
    /// True while a login or register request is in flight.
    pub loading: bool,
    /// True while a restored token is being checked with the server.
    pub verifying: bool,
    /// Message for the auth form.
    pub error: Option<String>,
}

impl SessionState {
    /// Restore from `store`; signed out unless both token and user are stored.
    pub fn hydrate(store: &impl CredentialStore) -> Self {
        match credentials::load(store) {
            Some(session) => Self {
                token: Some(session.token),
                user: Some(session.user),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Mark an auth request as started.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Record a rejected login or register. Stored credentials are untouched.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Adopt and persist a successful login or register.
    pub fn establish(&mut self, store: &impl CredentialStore, session: AuthSession) {
        credentials::save(store, &session);
        self.token = Some(session.token);
        self.user = Some(session.user);
        self.loading = false;
        self.verifying = false;
        self.error = None;
    }

    /// Sign out and remove both persisted keys.
    pub fn clear(&mut self, store: &impl CredentialStore) {
        credentials::erase(store);
        *self = Self::default();
    }

    /// Sign out if `err` is the `AUTH_ERROR` signal. Returns whether it was.
    pub fn expire_on(&mut self, store: &impl CredentialStore, err: &ApiError) -> bool {
        if err.is_auth_error() {
            log::info!("session rejected by server; signing out");
            self.clear(store);
            true
        } else {
            false
        }
    }
}
