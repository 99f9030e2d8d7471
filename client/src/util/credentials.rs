//! Persisted login credentials.
//!
//! The token and the signed-in user are stored under two `localStorage` keys
//! and always written and removed together. Only `state::session` touches
//! this module.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use frames::{AuthSession, User};

pub const TOKEN_KEY: &str = "jwt_token";
pub const USER_KEY: &str = "user";

/// String key/value store holding the credentials.
pub trait CredentialStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`; a no-op outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl CredentialStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(key, value).is_err() {
                    log::warn!("localStorage write failed for `{key}`");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Restore a stored session. Both keys must be present and the user must
/// parse; anything less counts as signed out.
pub fn load(store: &impl CredentialStore) -> Option<AuthSession> {
    let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
    let raw = store.get(USER_KEY)?;
    let user = serde_json::from_str::<User>(&raw).ok()?;
    Some(AuthSession { token, user })
}

pub fn save(store: &impl CredentialStore, session: &AuthSession) {
    let Ok(user) = serde_json::to_string(&session.user) else {
        return;
    };
    store.set(TOKEN_KEY, &session.token);
    store.set(USER_KEY, &user);
}

pub fn erase(store: &impl CredentialStore) {
    store.remove(TOKEN_KEY);
    store.remove(USER_KEY);
}
