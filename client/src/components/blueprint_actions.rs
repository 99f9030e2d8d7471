//! Create, save and delete controls for blueprints.
//!
//! ERROR HANDLING
//! ==============
//! Outcomes are reported with native alerts. An `AUTH_ERROR` signs the user
//! out instead of alerting.

#[cfg(test)]
#[path = "blueprint_actions_test.rs"]
mod blueprint_actions_test;

#[cfg(any(test, feature = "csr"))]
use frames::rest::ApiError;
use frames::BlueprintKey;
use leptos::prelude::*;
use realtime::Endpoints;

use crate::state::blueprints::BlueprintsState;
use crate::state::board::BoardState;
use crate::state::session::SessionState;
use crate::state::workspace::WorkspaceState;
use crate::util::dialog;

pub const EMPTY_NAME_MESSAGE: &str = "Por favor ingresa un nombre para el plano";
pub const DUPLICATE_NAME_MESSAGE: &str = "Ya existe un plano con ese nombre";

/// Trimmed name for a new blueprint, refused when blank or already listed.
pub fn validate_new_name(raw: &str, listed: &BlueprintsState) -> Result<String, &'static str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(EMPTY_NAME_MESSAGE);
    }
    if listed.contains(name) {
        return Err(DUPLICATE_NAME_MESSAGE);
    }
    Ok(name.to_owned())
}

pub fn delete_prompt(name: &str) -> String {
    format!("¿Estás seguro de eliminar el plano \"{name}\"?")
}

/// Alert text for a failed action: the fallback, plus the server's reason
/// when it gave one.
#[cfg(any(test, feature = "csr"))]
pub(crate) fn failure_text(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Rejected { message, .. } | ApiError::Validation(message) => format!("{fallback}: {message}"),
        _ => fallback.to_owned(),
    }
}

/// Sign out on `AUTH_ERROR`, otherwise alert.
#[cfg(feature = "csr")]
pub(crate) fn report_failure(session: RwSignal<SessionState>, err: &ApiError, fallback: &str) {
    log::warn!(target: "blueprints::api", "{fallback}: {err}");
    if err.is_auth_error() {
        session.update(|s| {
            s.expire_on(&crate::util::credentials::BrowserStorage, err);
        });
    } else {
        dialog::alert(&failure_text(err, fallback));
    }
}

#[component]
pub fn BlueprintActions() -> impl IntoView {
    let endpoints = StoredValue::new(expect_context::<Endpoints>());
    let session = expect_context::<RwSignal<SessionState>>();
    let workspace = expect_context::<RwSignal<WorkspaceState>>();
    let blueprints = expect_context::<RwSignal<BlueprintsState>>();
    let board = expect_context::<RwSignal<BoardState>>();
    let refresh = expect_context::<RwSignal<crate::state::blueprints::ListRefresh>>();
    let new_name = RwSignal::new(String::new());

    let target = move || {
        let base = workspace.with_untracked(|w| endpoints.with_value(|e| w.rest_base(e).to_owned()));
        let token = session.with_untracked(|s| s.token.clone());
        (base, token)
    };

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if blueprints.with_untracked(|b| b.create_pending) {
            return;
        }
        let name = match blueprints.with_untracked(|b| validate_new_name(&new_name.get_untracked(), b)) {
            Ok(name) => name,
            Err(message) => {
                dialog::alert(message);
                return;
            }
        };
        let key = match workspace.with_untracked(|w| BlueprintKey::new(&w.author, &name)) {
            Ok(key) => key,
            Err(err) => {
                dialog::alert(&err.to_string());
                return;
            }
        };
        let (base, token) = target();
        blueprints.update(|b| b.create_pending = true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::create_blueprint(&base, token.as_deref(), &key, &[]).await;
            blueprints.update(|b| b.create_pending = false);
            match result {
                Ok(created) => {
                    new_name.set(String::new());
                    refresh.update(crate::state::blueprints::ListRefresh::bump);
                    workspace.update(|w| {
                        w.select(&created.name);
                    });
                }
                Err(err) => report_failure(session, &err, "Error al crear el plano"),
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (base, token, key, refresh);
            blueprints.update(|b| b.create_pending = false);
        }
    };

    let on_save = move |_| {
        let Ok(key) = workspace.with_untracked(WorkspaceState::key) else {
            return;
        };
        let points = board.with_untracked(|b| b.points().to_vec());
        let (base, token) = target();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::save_blueprint(&base, token.as_deref(), &key, &points).await {
                Ok(_) => {
                    dialog::alert("Plano guardado exitosamente");
                    refresh.update(crate::state::blueprints::ListRefresh::bump);
                }
                Err(err) => report_failure(session, &err, "Error al guardar el plano"),
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (base, token, key, points);
        }
    };

    let on_delete = move |_| {
        let Ok(key) = workspace.with_untracked(WorkspaceState::key) else {
            return;
        };
        if !dialog::confirm(&delete_prompt(&key.name)) {
            return;
        }
        let (base, token) = target();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_blueprint(&base, token.as_deref(), &key).await {
                Ok(()) => {
                    dialog::alert("Plano eliminado exitosamente");
                    let next = blueprints.with_untracked(|b| {
                        crate::state::blueprints::next_selection_after_delete(&b.items, &key.name)
                    });
                    refresh.update(crate::state::blueprints::ListRefresh::bump);
                    workspace.update(|w| {
                        w.select_after_delete(&key.name, &next);
                    });
                }
                Err(err) => report_failure(session, &err, "Error al eliminar el plano"),
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (base, token, key);
        }
    };

    let creating = move || blueprints.with(|b| b.create_pending);

    view! {
        <section class="blueprint-actions">
            <h3>"Crear Plano"</h3>
            <form class="blueprint-actions__create" on:submit=on_create>
                <input
                    type="text"
                    placeholder="Nombre del plano"
                    prop:value=move || new_name.get()
                    on:input=move |ev| new_name.set(event_target_value(&ev))
                    disabled=creating
                />
                <button class="btn" type="submit" disabled=creating>
                    {move || if creating() { "⏳ Creando..." } else { "➕ Crear" }}
                </button>
            </form>

            <h3>"Acciones"</h3>
            <div class="blueprint-actions__buttons">
                <button class="btn btn--save" on:click=on_save>
                    "💾 Guardar"
                </button>
                <button class="btn btn--danger" on:click=on_delete>
                    "🗑️ Eliminar"
                </button>
            </div>
        </section>
    }
}
