//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::net::realtime_client::spawn_realtime_client;
use crate::pages::workspace::WorkspacePage;
use crate::state::blueprints::{BlueprintsState, ListRefresh};
use crate::state::board::BoardState;
use crate::state::session::SessionState;
use crate::state::workspace::WorkspaceState;
use crate::util::credentials::BrowserStorage;

/// Root application component.
///
/// Provides all shared state contexts, starts the realtime task, and checks a
/// restored session token with the server once at start-up.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let endpoints = crate::config::endpoints();
    let session = RwSignal::new(SessionState::hydrate(&BrowserStorage));
    let workspace = RwSignal::new(WorkspaceState::default());
    let blueprints = RwSignal::new(BlueprintsState::default());
    let board = RwSignal::new(BoardState::default());
    let refresh = RwSignal::new(ListRefresh::default());
    let sender = RwSignal::new(spawn_realtime_client(endpoints.clone(), board, refresh));

    provide_context(endpoints.clone());
    provide_context(session);
    provide_context(workspace);
    provide_context(blueprints);
    provide_context(board);
    provide_context(refresh);
    provide_context(sender);

    if let Some(token) = session.with_untracked(|s| s.token.clone()) {
        let base = workspace.with_untracked(|w| w.rest_base(&endpoints).to_owned());
        session.update(|s| s.verifying = true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::verify_token(&base, &token).await {
                Ok(()) => session.update(|s| s.verifying = false),
                Err(err) => {
                    if !err.is_auth_error() {
                        log::warn!(target: "blueprints::api", "token check failed, keeping session: {err}");
                    }
                    session.update(|s| {
                        s.verifying = false;
                        s.expire_on(&BrowserStorage, &err);
                    });
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (base, token);
            session.update(|s| s.verifying = false);
        }
    }

    view! {
        <Title text="BluePrints RT – Socket.IO vs STOMP"/>
        <WorkspacePage/>
    }
}
