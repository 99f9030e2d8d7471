//! Realtime connection indicator.

#[cfg(test)]
#[path = "connection_status_test.rs"]
mod connection_status_test;

use leptos::prelude::*;
use realtime::ConnectionStatus;

use crate::state::board::BoardState;

pub fn status_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "● Conectado",
        ConnectionStatus::Connecting => "⏳ Conectando...",
        ConnectionStatus::Disconnected => "○ Desconectado",
        ConnectionStatus::Error => "⚠️ Error",
    }
}

pub fn status_color(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "#10b981",
        ConnectionStatus::Connecting => "#f59e0b",
        ConnectionStatus::Disconnected => "#6b7280",
        ConnectionStatus::Error => "#ef4444",
    }
}

/// Label and color for the current link status; hovering shows the last
/// handshake failure.
#[component]
pub fn ConnectionIndicator() -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();
    let status = move || board.with(|b| b.connection_status);

    view! {
        <span
            class="connection-indicator"
            style:color=move || status_color(status())
            title=move || board.with(|b| b.realtime_error.clone().unwrap_or_default())
        >
            {move || status_label(status())}
        </span>
    }
}
