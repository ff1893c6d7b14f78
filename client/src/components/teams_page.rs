//! The viewer's own team: rank, points and per-challenge progress.
//!
//! Fed by the same `/scores` stream as the scoreboard; the own team is the
//! one the server flags with `is_user`.

#[cfg(test)]
#[path = "teams_page_test.rs"]
mod teams_page_test;

use feed::{FeedEndpoint, ScoreboardView};
use leptos::prelude::*;

use crate::components::connection_dot::ConnectionDot;
use crate::net::feed_client::spawn_feed;
use crate::state::live::LiveState;
use crate::util::format::{points_label, short_timestamp, solved_label};

#[derive(Clone, Debug, PartialEq, Eq)]
struct ProgressEntry {
    name: String,
    category: String,
    points: u32,
    solved_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TeamProgress {
    name: String,
    rank: usize,
    of: usize,
    points: u32,
    solved: usize,
    entries: Vec<ProgressEntry>,
}

fn team_progress(view: &ScoreboardView) -> Option<TeamProgress> {
    let team = view.own_team()?;
    let rank = view.rank_of(&team.id)?;
    let entries = view
        .challenges
        .iter()
        .enumerate()
        .map(|(i, c)| ProgressEntry {
            name: c.name.clone(),
            category: c.category.clone(),
            points: c.points,
            solved_at: team.completion_at(i).map(short_timestamp),
        })
        .collect::<Vec<_>>();
    Some(TeamProgress {
        name: team.name.clone(),
        rank,
        of: view.teams.len(),
        points: team.points,
        solved: entries.iter().filter(|e| e.solved_at.is_some()).count(),
        entries,
    })
}

#[component]
pub fn TeamsPage() -> impl IntoView {
    let live = RwSignal::new(LiveState::new(ScoreboardView::default()));
    let handle = spawn_feed(FeedEndpoint::Scores, live);
    on_cleanup(move || handle.stop());

    let status = Signal::derive(move || live.get().connection_status);
    let progress = Memo::new(move |_| team_progress(&live.get().view));

    view! {
        <div class="team-page">
            <div class="team-page__header">
                <ConnectionDot status=status/>
            </div>
            {move || match progress.get() {
                None => view! { <div class="team-page__empty">"Waiting for team data…"</div> }.into_any(),
                Some(p) => {
                    let total = p.entries.len();
                    view! {
                        <h2 class="team-page__name">{p.name}</h2>
                        <div class="team-page__summary">
                            <span>{format!("Rank {} of {}", p.rank, p.of)}</span>
                            <span>{points_label(p.points)}</span>
                            <span>{solved_label(p.solved, total)}</span>
                        </div>
                        <ul class="team-page__challenges">
                            {p
                                .entries
                                .into_iter()
                                .map(|e| {
                                    let solved = e.solved_at.is_some();
                                    view! {
                                        <li class="team-page__challenge" class:team-page__challenge--solved=solved>
                                            <span class="team-page__challenge-name">{e.name}</span>
                                            <span class="team-page__challenge-category">{e.category}</span>
                                            <span class="team-page__challenge-points">{points_label(e.points)}</span>
                                            <span class="team-page__challenge-time">{e.solved_at.unwrap_or_default()}</span>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
