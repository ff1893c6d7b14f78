//! Button that recreates the team's frontend container.

use leptos::prelude::*;

use crate::components::challenges_page::ActionMessage;
use crate::state::action::ActionStatus;

#[component]
pub fn ResetFrontend() -> impl IntoView {
    let status = RwSignal::new(ActionStatus::default());

    let on_reset = move |_| {
        if !status.try_update(ActionStatus::begin).unwrap_or(false) {
            return;
        }
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::reset_frontend().await;
            status.update(|s| s.finish(&result, "Frontend reset"));
        });
    };

    view! {
        <div class="reset-frontend">
            <button class="btn reset-frontend__button" on:click=on_reset disabled=move || status.get().busy>
                {move || if status.get().busy { "Resetting…" } else { "Reset frontend" }}
            </button>
            <ActionMessage status=status/>
        </div>
    }
}
