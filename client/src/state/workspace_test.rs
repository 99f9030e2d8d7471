use super::*;

#[test]
fn defaults_match_first_run_view() {
    let state = WorkspaceState::default();
    assert_eq!(state.transport, TransportKind::Room);
    assert_eq!(state.author, "juan");
    assert_eq!(state.name, "plano-1");
    assert_eq!(state.key().expect("valid").room(), "blueprints.juan.plano-1");
}

#[test]
fn rest_base_follows_transport() {
    let endpoints = Endpoints::default();
    let mut state = WorkspaceState::default();
    assert_eq!(state.rest_base(&endpoints), "http://localhost:3001");
    state.set_transport(TransportKind::Topic);
    assert_eq!(state.rest_base(&endpoints), "http://localhost:8080");
}

#[test]
fn unchanged_values_do_not_bump() {
    let mut state = WorkspaceState::default();
    let before = state.tag();
    assert!(!state.set_author("juan"));
    assert!(!state.select("plano-1"));
    assert!(!state.set_transport(TransportKind::Room));
    assert_eq!(state.tag(), before);
}

#[test]
fn deleting_last_fallback_blueprint_reopens_it() {
    let mut state = WorkspaceState::default();
    let tag = state.tag();
    assert!(state.select_after_delete("plano-1", "plano-1"));
    assert_eq!(state.name, "plano-1");
    assert!(!state.accepts_blueprint(tag));
    assert!(state.accepts_list(tag));
}

#[test]
fn delete_moves_to_next_blueprint() {
    let mut state = WorkspaceState::default();
    state.select("casa");
    let tag = state.tag();
    assert!(state.select_after_delete("casa", "plano-1"));
    assert_eq!(state.name, "plano-1");
    assert!(!state.accepts_blueprint(tag));
}

#[test]
fn delete_of_another_blueprint_keeps_selection() {
    let mut state = WorkspaceState::default();
    let tag = state.tag();
    assert!(!state.select_after_delete("casa", "plano-1"));
    assert_eq!(state.tag(), tag);
}

#[test]
fn selecting_blueprint_keeps_list_results() {
    let mut state = WorkspaceState::default();
    let tag = state.tag();
    assert!(state.select("casa"));
    assert!(!state.accepts_blueprint(tag));
    assert!(state.accepts_list(tag));
}

#[test]
fn author_change_invalidates_everything() {
    let mut state = WorkspaceState::default();
    let tag = state.tag();
    assert!(state.set_author("ana"));
    assert!(!state.accepts_blueprint(tag));
    assert!(!state.accepts_list(tag));
    assert!(state.accepts_list(state.tag()));
}

#[test]
fn transport_change_invalidates_everything() {
    let mut state = WorkspaceState::default();
    let tag = state.tag();
    state.set_transport(TransportKind::Topic);
    assert!(!state.accepts_blueprint(tag));
    assert!(!state.accepts_list(tag));
}

#[test]
fn blank_author_has_no_key() {
    let mut state = WorkspaceState::default();
    state.set_author("  ");
    assert_eq!(state.key(), Err(KeyError::EmptyAuthor));
}
