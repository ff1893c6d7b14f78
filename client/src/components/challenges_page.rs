//! Challenge browser: challenges grouped by category, each with its
//! description, a flag form and instance controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! The grouped list comes from the mount element's `data-challenges` seed and
//! stays fixed for the life of the page. The `/challengesFrontend` stream only
//! refreshes the per-team rows, which drive the solved badges and the raw
//! live list at the bottom.

#[cfg(test)]
#[path = "challenges_page_test.rs"]
mod challenges_page_test;

use feed::{Challenge, ChallengeBrowserView, FeedEndpoint};
use leptos::prelude::*;

use crate::components::connection_dot::ConnectionDot;
use crate::components::flag_checker::FlagChecker;
use crate::net::feed_client::spawn_feed;
use crate::state::action::ActionStatus;
use crate::state::live::LiveState;
use crate::util::format::points_label;
use crate::util::markdown::render_description_html;

fn solves_label(solves: usize) -> String {
    match solves {
        0 => "No solves yet".to_owned(),
        1 => "1 team solved".to_owned(),
        n => format!("{n} teams solved"),
    }
}

#[component]
pub fn ChallengesPage(seed: Vec<Challenge>) -> impl IntoView {
    let live = RwSignal::new(LiveState::new(ChallengeBrowserView::with_seed(seed)));
    let handle = spawn_feed(FeedEndpoint::ChallengesFrontend, live);
    on_cleanup(move || handle.stop());

    let status = Signal::derive(move || live.get().connection_status);
    let groups = move || {
        live.with_untracked(|s| {
            s.view
                .challenges
                .iter()
                .map(|(category, challenges)| (category.to_owned(), challenges.to_vec()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="challenges">
            <div class="challenges__header">
                <ConnectionDot status=status/>
            </div>
            <Show
                when=move || live.with(|s| !s.view.challenges.is_empty())
                fallback=|| view! { <div class="challenges__empty">"No challenges available"</div> }
            >
                {groups()
                    .into_iter()
                    .map(|(category, challenges)| {
                        view! {
                            <section class="challenges__category">
                                <h3 class="challenges__category-title">{category}</h3>
                                <div class="challenges__grid">
                                    {challenges
                                        .into_iter()
                                        .map(|challenge| view! { <ChallengeCard challenge=challenge live=live/> })
                                        .collect_view()}
                                </div>
                            </section>
                        }
                    })
                    .collect_view()}
            </Show>
            <details class="challenges__live">
                <summary>"Live challenge data"</summary>
                <ul>
                    {move || {
                        live.get()
                            .view
                            .challenges_from_amigo
                            .into_iter()
                            .map(|row| {
                                view! {
                                    <li>
                                        {row.challenge.tag}
                                        " · "
                                        {if row.is_user_completed { "solved" } else { "open" }}
                                        " · "
                                        {solves_label(row.teams_completed.len())}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </details>
        </div>
    }
}

#[component]
fn ChallengeCard(challenge: Challenge, live: RwSignal<LiveState<ChallengeBrowserView>>) -> impl IntoView {
    let tag = StoredValue::new(challenge.tag.clone());
    let description = render_description_html(&challenge.description);
    let reset = RwSignal::new(ActionStatus::default());
    let toggle = RwSignal::new(ActionStatus::default());

    let completed = move || live.with(|s| s.view.is_completed(&tag.get_value()));
    let solves = move || live.with(|s| s.view.solves_for(&tag.get_value()));

    let on_reset = move |_| {
        if !reset.try_update(ActionStatus::begin).unwrap_or(false) {
            return;
        }
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::reset_challenge(&tag.get_value()).await;
            reset.update(|s| s.finish(&result, "Challenge reset"));
        });
    };
    let on_toggle = move |_| {
        if !toggle.try_update(ActionStatus::begin).unwrap_or(false) {
            return;
        }
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::toggle_challenge(&tag.get_value()).await;
            toggle.update(|s| s.finish(&result, "Challenge started/stopped"));
        });
    };

    view! {
        <article class="challenge-card" class:challenge-card--solved=completed>
            <header class="challenge-card__header">
                <h4 class="challenge-card__name">{challenge.name}</h4>
                <span class="challenge-card__points">{points_label(challenge.points)}</span>
            </header>
            <div class="challenge-card__solves">{move || solves_label(solves())}</div>
            <div class="challenge-card__description" inner_html=description></div>
            <FlagChecker tag=Some(challenge.tag)/>
            <div class="challenge-card__actions">
                <button class="btn" on:click=on_reset disabled=move || reset.get().busy>
                    "Reset"
                </button>
                <button class="btn" on:click=on_toggle disabled=move || toggle.get().busy>
                    "Start/Stop"
                </button>
            </div>
            <ActionMessage status=reset/>
            <ActionMessage status=toggle/>
        </article>
    }
}

#[component]
pub fn ActionMessage(status: RwSignal<ActionStatus>) -> impl IntoView {
    view! {
        <Show when=move || status.get().message.is_some()>
            <p class="action-message" class:action-message--error=move || status.get().is_error>
                {move || status.get().message.unwrap_or_default()}
            </p>
        </Show>
    }
}
