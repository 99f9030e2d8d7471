use std::cell::RefCell;
use std::collections::HashMap;

use super::*;

#[derive(Default)]
struct MemoryStorage(RefCell<HashMap<String, String>>);

impl CredentialStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

fn session() -> AuthSession {
    AuthSession { token: "t-1".to_owned(), user: User { username: "juan".to_owned() } }
}

#[test]
fn save_then_load_restores_session() {
    let store = MemoryStorage::default();
    save(&store, &session());
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("t-1"));
    assert_eq!(load(&store), Some(session()));
}

#[test]
fn token_without_user_is_not_restored() {
    let store = MemoryStorage::default();
    store.set(TOKEN_KEY, "t-1");
    assert_eq!(load(&store), None);
}

#[test]
fn user_without_token_is_not_restored() {
    let store = MemoryStorage::default();
    store.set(USER_KEY, r#"{"username":"juan"}"#);
    assert_eq!(load(&store), None);
}

#[test]
fn corrupt_user_is_not_restored() {
    let store = MemoryStorage::default();
    store.set(TOKEN_KEY, "t-1");
    store.set(USER_KEY, "not json");
    assert_eq!(load(&store), None);
}

#[test]
fn erase_removes_both_keys() {
    let store = MemoryStorage::default();
    save(&store, &session());
    erase(&store);
    assert!(store.get(TOKEN_KEY).is_none());
    assert!(store.get(USER_KEY).is_none());
}

#[cfg(not(feature = "csr"))]
#[test]
fn browser_storage_is_inert_natively() {
    let store = BrowserStorage;
    store.set(TOKEN_KEY, "t-1");
    assert!(store.get(TOKEN_KEY).is_none());
}
