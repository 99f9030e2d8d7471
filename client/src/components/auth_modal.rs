//! Login / register modal shown while signed out.

#[cfg(test)]
#[path = "auth_modal_test.rs"]
mod auth_modal_test;

use leptos::prelude::*;
use realtime::Endpoints;

use crate::state::session::SessionState;
use crate::state::workspace::WorkspaceState;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "🔐 Iniciar Sesión",
            Self::Register => "📝 Registro",
        }
    }

    pub fn submit_label(self, busy: bool) -> &'static str {
        match (busy, self) {
            (true, _) => "⏳ Procesando...",
            (false, Self::Login) => "🔓 Entrar",
            (false, Self::Register) => "✨ Registrarse",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Login => "¿No tienes cuenta? Regístrate aquí",
            Self::Register => "¿Ya tienes cuenta? Inicia sesión",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

/// Local checks before a request is sent.
pub fn validate_credentials(mode: AuthMode, username: &str, password: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() || password.is_empty() {
        return Err("Usuario y contraseña son obligatorios");
    }
    if mode == AuthMode::Register && password.chars().count() < MIN_PASSWORD_LEN {
        return Err("La contraseña debe tener al menos 6 caracteres");
    }
    Ok(())
}

#[component]
pub fn AuthModal() -> impl IntoView {
    let endpoints = StoredValue::new(expect_context::<Endpoints>());
    let session = expect_context::<RwSignal<SessionState>>();
    let workspace = expect_context::<RwSignal<WorkspaceState>>();

    let mode = RwSignal::new(AuthMode::default());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.with_untracked(|s| s.loading) {
            return;
        }
        let current = mode.get_untracked();
        let user = username.get_untracked();
        let pass = password.get_untracked();
        if let Err(message) = validate_credentials(current, &user, &pass) {
            session.update(|s| s.error = Some(message.to_owned()));
            return;
        }
        let base = workspace.with_untracked(|w| endpoints.with_value(|e| w.rest_base(e).to_owned()));
        session.update(SessionState::begin);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = match current {
                AuthMode::Login => crate::net::api::login(&base, &user, &pass).await,
                AuthMode::Register => crate::net::api::register(&base, &user, &pass).await,
            };
            match result {
                Ok(auth) => {
                    log::info!("signed in as {}", auth.user.username);
                    password.set(String::new());
                    session.update(|s| s.establish(&crate::util::credentials::BrowserStorage, auth));
                }
                Err(err) => session.update(|s| s.fail(err.user_message())),
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (base, user, pass);
            session.update(|s| s.fail("not available outside the browser".to_owned()));
        }
    };

    let busy = move || session.with(|s| s.loading);

    view! {
        <div class="auth-modal__backdrop">
            <div class="auth-modal">
                <h2>{move || mode.get().title()}</h2>
                <form class="auth-modal__form" on:submit=on_submit>
                    <label>
                        "Usuario"
                        <input
                            type="text"
                            placeholder="tu_usuario"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                            disabled=busy
                        />
                    </label>
                    <label>
                        "Contraseña"
                        <input
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=busy
                        />
                    </label>
                    <Show when=move || mode.get() == AuthMode::Register>
                        <small class="auth-modal__hint">"Mínimo 6 caracteres"</small>
                    </Show>
                    <Show when=move || session.with(|s| s.error.is_some())>
                        <p class="auth-modal__error">{move || session.with(|s| s.error.clone().unwrap_or_default())}</p>
                    </Show>
                    <button class="btn auth-modal__submit" type="submit" disabled=busy>
                        {move || mode.get().submit_label(busy())}
                    </button>
                </form>
                <button
                    class="auth-modal__toggle"
                    type="button"
                    disabled=busy
                    on:click=move |_| {
                        mode.update(|m| *m = m.toggled());
                        session.update(|s| s.error = None);
                    }
                >
                    {move || mode.get().toggle_label()}
                </button>
            </div>
        </div>
    }
}
