//! Live scoreboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Subscribes to `/scores` and renders the team ranking in server order, with
//! one column per challenge showing when each team solved it.

#[cfg(test)]
#[path = "scoreboard_test.rs"]
mod scoreboard_test;

use feed::{FeedEndpoint, ScoreboardView};
use leptos::prelude::*;

use crate::components::connection_dot::ConnectionDot;
use crate::net::feed_client::spawn_feed;
use crate::state::live::LiveState;
use crate::util::format::{points_label, short_timestamp};

/// One rendered ranking row.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ScoreRow {
    rank: usize,
    name: String,
    points: u32,
    is_user: bool,
    /// Solve time per challenge column, `None` when unsolved.
    cells: Vec<Option<String>>,
}

fn score_rows(view: &ScoreboardView) -> Vec<ScoreRow> {
    view.teams
        .iter()
        .enumerate()
        .map(|(i, team)| ScoreRow {
            rank: i + 1,
            name: team.name.clone(),
            points: team.points,
            is_user: team.is_user,
            cells: (0..view.challenges.len())
                .map(|c| team.completion_at(c).map(short_timestamp))
                .collect(),
        })
        .collect()
}

#[component]
pub fn Scoreboard() -> impl IntoView {
    let live = RwSignal::new(LiveState::new(ScoreboardView::default()));
    let handle = spawn_feed(FeedEndpoint::Scores, live);
    on_cleanup(move || handle.stop());

    let status = Signal::derive(move || live.get().connection_status);
    let challenges = move || live.get().view.challenges;
    let rows = move || score_rows(&live.get().view);

    view! {
        <div class="scoreboard">
            <div class="scoreboard__header">
                <h2 class="scoreboard__title">"Scoreboard"</h2>
                <ConnectionDot status=status/>
            </div>
            <Show
                when=move || !live.get().view.teams.is_empty()
                fallback=|| view! { <div class="scoreboard__empty">"No teams yet"</div> }
            >
                <table class="scoreboard__table">
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"Team"</th>
                            <th>"Points"</th>
                            {move || {
                                challenges()
                                    .into_iter()
                                    .map(|c| view! { <th class="scoreboard__challenge" title=c.name.clone()>{c.tag}</th> })
                                    .collect_view()
                            }}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows()
                                .into_iter()
                                .map(|row| {
                                    view! {
                                        <tr class="scoreboard__row" class:scoreboard__row--own=row.is_user>
                                            <td>{row.rank}</td>
                                            <td>{row.name}</td>
                                            <td>{points_label(row.points)}</td>
                                            {row
                                                .cells
                                                .into_iter()
                                                .map(|cell| match cell {
                                                    Some(at) => {
                                                        view! { <td class="scoreboard__cell scoreboard__cell--solved" title=at>"✓"</td> }
                                                            .into_any()
                                                    }
                                                    None => view! { <td class="scoreboard__cell"></td> }.into_any(),
                                                })
                                                .collect_view()}
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}
