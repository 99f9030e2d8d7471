//! Top bar: transport and author selection, blueprint picker, connection
//! indicator, and the signed-in user with logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every control here writes `WorkspaceState`; the workspace page reacts to
//! those changes by reloading data and reconnecting the realtime link.

#[cfg(test)]
#[path = "toolbar_test.rs"]
mod toolbar_test;

use leptos::prelude::*;
use realtime::TransportKind;

use crate::components::connection_status::ConnectionIndicator;
use crate::state::blueprints::BlueprintsState;
use crate::state::session::SessionState;
use crate::state::workspace::WorkspaceState;
use crate::util::credentials::BrowserStorage;

/// Names offered by the picker: the listed blueprints, plus the selected one
/// when it is not listed yet.
fn picker_names(listed: &BlueprintsState, selected: &str) -> Vec<String> {
    let mut names: Vec<String> = listed.items.iter().map(|item| item.name.clone()).collect();
    if !selected.is_empty() && !listed.contains(selected) {
        names.insert(0, selected.to_owned());
    }
    names
}

#[component]
pub fn Toolbar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let workspace = expect_context::<RwSignal<WorkspaceState>>();
    let blueprints = expect_context::<RwSignal<BlueprintsState>>();

    let on_transport = move |ev| {
        match event_target_value(&ev).parse::<TransportKind>() {
            Ok(kind) => workspace.update(|w| {
                w.set_transport(kind);
            }),
            Err(err) => log::warn!("{err}"),
        }
    };

    let on_author = move |ev| {
        let author = event_target_value(&ev).trim().to_owned();
        workspace.update(|w| {
            w.set_author(&author);
        });
    };

    let on_pick = move |ev| {
        let name = event_target_value(&ev);
        workspace.update(|w| {
            w.select(&name);
        });
    };

    let on_logout = move |_| {
        session.update(|s| s.clear(&BrowserStorage));
    };

    let names = move || blueprints.with(|list| workspace.with(|w| picker_names(list, &w.name)));

    view! {
        <header class="toolbar">
            <h1 class="toolbar__title">"BluePrints RT – Socket.IO vs STOMP"</h1>

            <label class="toolbar__field">
                "Tecnología:"
                <select
                    prop:value=move || workspace.with(|w| w.transport.as_str())
                    on:change=on_transport
                >
                    {TransportKind::ALL
                        .iter()
                        .map(|kind| view! { <option value=kind.as_str()>{kind.label()}</option> })
                        .collect_view()}
                </select>
            </label>

            <input
                class="toolbar__author"
                placeholder="autor"
                prop:value=move || workspace.with(|w| w.author.clone())
                on:change=on_author
            />

            <select
                class="toolbar__picker"
                prop:value=move || workspace.with(|w| w.name.clone())
                on:change=on_pick
            >
                <For each=names key=Clone::clone let:name>
                    <option value=name.clone()>{name.clone()}</option>
                </For>
            </select>

            <ConnectionIndicator/>

            <span class="toolbar__spacer"></span>

            <Show when=move || session.with(SessionState::is_authenticated)>
                <span class="toolbar__self">
                    {move || session.with(|s| s.username().unwrap_or_default().to_owned())}
                </span>
                <button class="btn toolbar__logout" on:click=on_logout title="Cerrar sesión">
                    "Salir"
                </button>
            </Show>
        </header>
    }
}
