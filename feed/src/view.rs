//! View-local state and the merge rules for incoming messages.
//!
//! DESIGN
//! ======
//! Each message replaces one slice of a view wholesale. Nothing accumulates
//! across messages of the same kind, so the rendered state is always a pure
//! function of the last message seen per discriminator.

use crate::codec::{self, CodecError};
use crate::message::{Challenge, ChallengeRow, StreamEvent, StreamMessage, Team};

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

/// A state slice owned by one mounted view.
pub trait ViewState {
    /// Apply one message. Returns `true` when a slice was replaced and the
    /// view should rerender.
    fn apply(&mut self, message: &StreamMessage) -> bool;
}

/// What happened while applying one frame to a view.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Discriminators of the messages that replaced a slice, in wire order.
    pub applied: Vec<&'static str>,
    /// Discriminators this crate does not know.
    pub unknown: Vec<String>,
    /// Segments that failed to decode.
    pub errors: Vec<CodecError>,
}

impl FrameReport {
    /// Whether the view should rerender.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Decode a text frame and apply its segments to `view` in order.
///
/// A segment that fails to decode is recorded and skipped; the remaining
/// segments are still applied. Unknown discriminators leave the view as is.
pub fn apply_frame<V: ViewState + ?Sized>(view: &mut V, text: &str) -> FrameReport {
    apply_decoded(view, codec::decode_frame(text))
}

/// Same as [`apply_frame`] for a binary frame, decoded as lossy UTF-8.
pub fn apply_binary_frame<V: ViewState + ?Sized>(view: &mut V, bytes: &[u8]) -> FrameReport {
    apply_decoded(view, codec::decode_binary_frame(bytes))
}

fn apply_decoded<V: ViewState + ?Sized>(
    view: &mut V,
    decoded: Vec<Result<StreamEvent, CodecError>>,
) -> FrameReport {
    let mut report = FrameReport::default();
    for event in decoded {
        match event {
            Ok(StreamEvent::Message(message)) => {
                if view.apply(&message) {
                    report.applied.push(message.kind());
                }
            }
            Ok(StreamEvent::Unknown(kind)) => report.unknown.push(kind),
            Err(err) => report.errors.push(err),
        }
    }
    report
}

/// Scoreboard and teams page state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreboardView {
    pub teams: Vec<Team>,
    pub challenges: Vec<Challenge>,
}

impl ViewState for ScoreboardView {
    fn apply(&mut self, message: &StreamMessage) -> bool {
        match message {
            StreamMessage::Teams(teams) => {
                self.teams.clone_from(teams);
                true
            }
            StreamMessage::Challenges(challenges) => {
                self.challenges.clone_from(challenges);
                true
            }
            StreamMessage::ChallengesFrontend(_) => false,
        }
    }
}

impl ScoreboardView {
    /// 1-based rank of the team with `team_id`, in server order.
    #[must_use]
    pub fn rank_of(&self, team_id: &str) -> Option<usize> {
        self.teams.iter().position(|t| t.id == team_id).map(|i| i + 1)
    }

    /// The viewer's own team, if the server marked one.
    #[must_use]
    pub fn own_team(&self) -> Option<&Team> {
        self.teams.iter().find(|t| t.is_user)
    }
}

/// Challenges grouped by category.
///
/// Groups appear in first-seen order and keep arrival order inside each group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryGroups {
    groups: Vec<(String, Vec<Challenge>)>,
}

impl CategoryGroups {
    #[must_use]
    pub fn from_challenges(challenges: impl IntoIterator<Item = Challenge>) -> Self {
        let mut groups: Vec<(String, Vec<Challenge>)> = Vec::new();
        for challenge in challenges {
            if let Some((_, items)) = groups.iter_mut().find(|(c, _)| *c == challenge.category) {
                items.push(challenge);
            } else {
                groups.push((challenge.category.clone(), vec![challenge]));
            }
        }
        Self { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Challenge])> {
        self.groups.iter().map(|(c, items)| (c.as_str(), items.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Challenge browser state.
///
/// `challenges` is seeded once when the view is created and is not touched by
/// the stream; the stream only replaces `challenges_from_amigo`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChallengeBrowserView {
    pub challenges: CategoryGroups,
    pub challenges_from_amigo: Vec<ChallengeRow>,
}

impl ChallengeBrowserView {
    #[must_use]
    pub fn with_seed(seed: Vec<Challenge>) -> Self {
        Self {
            challenges: CategoryGroups::from_challenges(seed),
            challenges_from_amigo: Vec::new(),
        }
    }

    /// Whether the viewer's team solved `tag`, according to the live rows.
    #[must_use]
    pub fn is_completed(&self, tag: &str) -> bool {
        self.challenges_from_amigo
            .iter()
            .any(|row| row.challenge.tag == tag && row.is_user_completed)
    }

    /// Number of teams that solved `tag`, according to the live rows.
    #[must_use]
    pub fn solves_for(&self, tag: &str) -> usize {
        self.challenges_from_amigo
            .iter()
            .find(|row| row.challenge.tag == tag)
            .map_or(0, |row| row.teams_completed.len())
    }
}

impl ViewState for ChallengeBrowserView {
    fn apply(&mut self, message: &StreamMessage) -> bool {
        match message {
            StreamMessage::ChallengesFrontend(rows) => {
                self.challenges_from_amigo.clone_from(rows);
                true
            }
            StreamMessage::Teams(_) | StreamMessage::Challenges(_) => false,
        }
    }
}
