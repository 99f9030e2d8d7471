//! Canvas host for the open blueprint.
//!
//! SYSTEM CONTEXT
//! ==============
//! Redraws through `canvas::render` whenever the board's points change.
//! Clicks append a point locally and publish it on the realtime link.

use canvas::consts::{SURFACE_HEIGHT, SURFACE_WIDTH};
use leptos::prelude::*;

use crate::net::realtime_client::RealtimeSender;
use crate::state::board::BoardState;

#[cfg(feature = "csr")]
fn redraw(canvas: &web_sys::HtmlCanvasElement, points: &[frames::Point]) {
    use wasm_bindgen::JsCast;

    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<web_sys::CanvasRenderingContext2d>().ok());
    let Some(ctx) = ctx else {
        log::warn!(target: "blueprints::canvas", "2d context unavailable");
        return;
    };
    if let Err(err) = canvas::render::draw(&ctx, points) {
        log::warn!(target: "blueprints::canvas", "draw failed: {err:?}");
    }
}

#[component]
pub fn DrawingSurface() -> impl IntoView {
    let board = expect_context::<RwSignal<BoardState>>();
    let sender = expect_context::<RwSignal<RealtimeSender>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    #[cfg(feature = "csr")]
    Effect::new(move || {
        let points = board.with(|b| b.points().to_vec());
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        redraw(&canvas, &points);
    });

    let on_click = move |ev: leptos::ev::MouseEvent| {
        #[cfg(feature = "csr")]
        {
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            let rect = canvas.get_bounding_client_rect();
            let point = canvas::scene::point_from_click(
                f64::from(ev.client_x()),
                f64::from(ev.client_y()),
                rect.left(),
                rect.top(),
            );
            let mut added = false;
            board.update(|b| added = b.add_point(point));
            if added {
                sender.with_untracked(|s| s.send_point(point));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (ev, sender);
        }
    };

    let name = move || board.with(|b| b.blueprint.as_ref().map(|bp| bp.name.clone()).unwrap_or_default());
    let count = move || board.with(|b| b.points().len());

    view! {
        <section class="drawing-surface">
            <div class="drawing-surface__header">
                <h3>{move || format!("Plano actual: {}", name())}</h3>
                <span>{move || format!("Total de puntos: {}", count())}</span>
            </div>
            <Show when=move || board.with(|b| b.error.is_some())>
                <p class="drawing-surface__error">{move || board.with(|b| b.error.clone().unwrap_or_default())}</p>
            </Show>
            <canvas
                class="drawing-surface__canvas"
                node_ref=canvas_ref
                width=SURFACE_WIDTH.to_string()
                height=SURFACE_HEIGHT.to_string()
                on:click=on_click
            ></canvas>
            <p class="drawing-surface__hint">"Haz clic en el canvas para agregar puntos"</p>
        </section>
    }
}
