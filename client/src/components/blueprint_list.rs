//! Sidebar list of the selected author's blueprints.

#[cfg(test)]
#[path = "blueprint_list_test.rs"]
mod blueprint_list_test;

use frames::BlueprintSummary;
use leptos::prelude::*;

use crate::state::blueprints::BlueprintsState;
use crate::state::workspace::WorkspaceState;

fn points_label(summary: &BlueprintSummary) -> String {
    format!("({} pts)", summary.point_count())
}

fn total_label(total: usize) -> String {
    format!("Total: {total} plano(s)")
}

#[component]
pub fn BlueprintList() -> impl IntoView {
    let workspace = expect_context::<RwSignal<WorkspaceState>>();
    let blueprints = expect_context::<RwSignal<BlueprintsState>>();

    let items = move || blueprints.with(|b| b.items.clone());

    view! {
        <section class="blueprint-list">
            <h3>{move || workspace.with(|w| format!("Planos de {}", w.author))}</h3>

            <Show when=move || blueprints.with(|b| b.loading)>
                <p class="blueprint-list__loading">"Cargando..."</p>
            </Show>
            <Show when=move || blueprints.with(|b| b.error.is_some())>
                <p class="blueprint-list__error">
                    {move || blueprints.with(|b| b.error.clone().unwrap_or_default())}
                </p>
            </Show>

            <Show
                when=move || blueprints.with(|b| !b.items.is_empty())
                fallback=|| view! { <p class="blueprint-list__empty">"No hay planos disponibles"</p> }
            >
                <ul>
                    <For each=items key=|item| item.name.clone() let:item>
                        {
                            let name = item.name.clone();
                            let active_name = name.clone();
                            let is_active = move || workspace.with(|w| w.name == active_name);
                            view! {
                                <li
                                    class="blueprint-list__item"
                                    class:blueprint-list__item--active=is_active
                                    on:click=move |_| {
                                        workspace.update(|w| {
                                            w.select(&name);
                                        });
                                    }
                                >
                                    <span>{item.name.clone()}</span>
                                    " "
                                    <span class="blueprint-list__count">{points_label(&item)}</span>
                                </li>
                            }
                        }
                    </For>
                </ul>
            </Show>

            <p class="blueprint-list__total">{move || blueprints.with(|b| total_label(b.total()))}</p>
        </section>
    }
}
