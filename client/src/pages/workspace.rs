//! Workspace page: the single screen of the app.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the effects that keep data in step with the selection:
//!
//! - the author's list is fetched when transport, author, or session
//!   changes, and whenever a list refresh is requested;
//! - the selected blueprint is fetched and the realtime link reconnected when
//!   transport, author, or name changes;
//! - signing out tears the link down.
//!
//! Every fetch is tagged with the `ViewTag` it was issued under and dropped
//! if the selection moved on before it returned.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use frames::rest::ApiError;
use leptos::prelude::*;
use realtime::{Endpoints, LinkConfig};

use crate::components::auth_modal::AuthModal;
use crate::components::blueprint_actions::BlueprintActions;
use crate::components::blueprint_list::BlueprintList;
use crate::components::drawing_surface::DrawingSurface;
use crate::components::toolbar::Toolbar;
use crate::net::realtime_client::RealtimeSender;
use crate::state::blueprints::{BlueprintsState, ListRefresh};
use crate::state::board::BoardState;
use crate::state::session::SessionState;
use crate::state::workspace::WorkspaceState;

/// A missing blueprint opens empty: drawing on it and saving creates it.
fn is_missing(err: &ApiError) -> bool {
    matches!(err, ApiError::Rejected { status: 404, .. })
}

/// Link settings for the current selection, if it names a valid blueprint.
fn link_config(workspace: &WorkspaceState, session: &SessionState) -> Option<LinkConfig> {
    LinkConfig::new(workspace.transport, &workspace.author, &workspace.name, session.token.clone())
        .map_err(|err| log::debug!("no realtime link: {err}"))
        .ok()
}

#[component]
pub fn WorkspacePage() -> impl IntoView {
    let endpoints = StoredValue::new(expect_context::<Endpoints>());
    let session = expect_context::<RwSignal<SessionState>>();
    let workspace = expect_context::<RwSignal<WorkspaceState>>();
    let blueprints = expect_context::<RwSignal<BlueprintsState>>();
    let board = expect_context::<RwSignal<BoardState>>();
    let refresh = expect_context::<RwSignal<ListRefresh>>();
    let sender = expect_context::<RwSignal<RealtimeSender>>();

    // Narrow the reactive inputs so unrelated field changes do not refetch.
    let token = Memo::new(move |_| session.with(|s| if s.is_authenticated() { s.token.clone() } else { None }));
    let list_source = Memo::new(move |_| workspace.with(|w| (w.transport, w.author.clone(), w.list_generation)));
    let selection = Memo::new(move |_| workspace.with(|w| w.generation));

    // List: transport, author, session, refresh requests.
    Effect::new(move || {
        let (transport, author, _) = list_source.get();
        let token = token.get();
        refresh.track();

        let Some(token) = token else {
            blueprints.set(BlueprintsState::default());
            return;
        };
        if author.trim().is_empty() {
            blueprints.set(BlueprintsState::default());
            return;
        }
        let tag = workspace.with_untracked(WorkspaceState::tag);
        let base = endpoints.with_value(|e| e.rest_base(transport).to_owned());
        blueprints.update(|b| {
            b.loading = true;
            b.error = None;
        });

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::list_blueprints(&base, Some(&token), author.trim()).await;
            if !workspace.with_untracked(|w| w.accepts_list(tag)) {
                log::debug!(target: "blueprints::api", "stale list for {author} dropped");
                return;
            }
            match result {
                Ok(items) => blueprints.update(|b| {
                    b.items = items;
                    b.loading = false;
                }),
                Err(err) => {
                    blueprints.update(|b| {
                        b.items.clear();
                        b.loading = false;
                        b.error = Some(err.user_message());
                    });
                    if err.is_auth_error() {
                        session.update(|s| {
                            s.expire_on(&crate::util::credentials::BrowserStorage, &err);
                        });
                    }
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (tag, base, token);
        }
    });

    // Blueprint + realtime link: transport, author, name, session.
    Effect::new(move || {
        let generation = selection.get();
        let signed_in = token.with(Option::is_some);

        if !signed_in {
            sender.with_untracked(RealtimeSender::disconnect);
            board.update(BoardState::reset);
            return;
        }
        let Some(config) = workspace.with_untracked(|w| session.with_untracked(|s| link_config(w, s))) else {
            sender.with_untracked(RealtimeSender::disconnect);
            board.update(BoardState::reset);
            return;
        };
        log::debug!("selection generation {generation}: opening {}", config.key);

        let key = config.key.clone();
        let token = config.token.clone();
        let base = endpoints.with_value(|e| e.rest_base(config.kind).to_owned());
        let tag = workspace.with_untracked(WorkspaceState::tag);
        board.update(|b| b.open(&key));
        sender.with_untracked(|s| s.connect(config));

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::fetch_blueprint(&base, token.as_deref(), &key).await;
            if !workspace.with_untracked(|w| w.accepts_blueprint(tag)) {
                log::debug!(target: "blueprints::api", "stale fetch for {key} dropped");
                return;
            }
            match result {
                Ok(blueprint) => {
                    board.update(|b| {
                        b.replace(blueprint);
                    });
                }
                Err(err) if is_missing(&err) => {
                    board.update(|b| {
                        b.replace(frames::Blueprint::empty(&key));
                    });
                }
                Err(err) => {
                    board.update(|b| b.fail(err.user_message()));
                    if err.is_auth_error() {
                        session.update(|s| {
                            s.expire_on(&crate::util::credentials::BrowserStorage, &err);
                        });
                    }
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (base, token, tag);
        }
    });

    view! {
        <div class="workspace">
            <Toolbar/>
            <Show when=move || !session.with(SessionState::is_authenticated)>
                <AuthModal/>
            </Show>
            <main class="workspace__main">
                <aside class="workspace__sidebar">
                    <BlueprintList/>
                    <BlueprintActions/>
                </aside>
                <DrawingSurface/>
            </main>
            <footer class="workspace__footer">
                <p>{move || format!("Transporte: {}", workspace.with(|w| w.transport.label()))}</p>
                <p>"Tip: abre 2 pestañas y dibuja alternando para ver la colaboración en tiempo real."</p>
            </footer>
        </div>
    }
}
