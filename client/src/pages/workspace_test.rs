use frames::User;
use realtime::TransportKind;

use super::*;

fn signed_in() -> SessionState {
    SessionState {
        token: Some("t-1".to_owned()),
        user: Some(User { username: "juan".to_owned() }),
        ..SessionState::default()
    }
}

#[test]
fn not_found_opens_empty_blueprint() {
    assert!(is_missing(&ApiError::Rejected { status: 404, message: "Blueprint not found".to_owned() }));
    assert!(!is_missing(&ApiError::Rejected { status: 500, message: "boom".to_owned() }));
    assert!(!is_missing(&ApiError::Auth { status: 403 }));
}

#[test]
fn link_config_follows_selection() {
    let mut workspace = WorkspaceState::default();
    workspace.set_transport(TransportKind::Topic);
    let config = link_config(&workspace, &signed_in()).expect("config");
    assert_eq!(config.kind, TransportKind::Topic);
    assert_eq!(config.key.topic(), "/topic/blueprints.juan.plano-1");
    assert_eq!(config.token.as_deref(), Some("t-1"));
}

#[test]
fn link_config_needs_an_author() {
    let mut workspace = WorkspaceState::default();
    workspace.set_author("");
    assert!(link_config(&workspace, &signed_in()).is_none());
}
