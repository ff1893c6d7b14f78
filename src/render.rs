//! Plain-text tables for the watched views.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use feed::{ChallengeBrowserView, ScoreboardView};

/// A view that can be printed after each change.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ScoreboardView {
    fn render(&self) -> String {
        let width = self.teams.iter().map(|t| t.name.len()).max().unwrap_or(4).max(4);
        let total = self.challenges.len();
        let mut out = format!("{:>3}  {:<width$}  {:>6}  solved\n", "#", "team", "points");
        for (i, team) in self.teams.iter().enumerate() {
            let marker = if team.is_user { " *" } else { "" };
            out.push_str(&format!(
                "{:>3}  {:<width$}  {:>6}  {}/{}{}\n",
                i + 1,
                team.name,
                team.points,
                team.solved_count(),
                total,
                marker,
            ));
        }
        out
    }
}

impl Render for ChallengeBrowserView {
    fn render(&self) -> String {
        let width = self
            .challenges_from_amigo
            .iter()
            .map(|r| r.challenge.tag.len())
            .max()
            .unwrap_or(3)
            .max(3);
        let mut out = format!("{:<width$}  {:>6}  {:<6}  solves\n", "tag", "points", "status");
        for row in &self.challenges_from_amigo {
            let status = if row.is_user_completed { "solved" } else { "open" };
            out.push_str(&format!(
                "{:<width$}  {:>6}  {:<6}  {}\n",
                row.challenge.tag,
                row.challenge.points,
                status,
                row.teams_completed.len(),
            ));
        }
        out
    }
}
