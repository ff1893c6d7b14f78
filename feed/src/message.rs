//! Messages carried on the live feed.
//!
//! Every segment on the wire is an envelope `{"msg": <discriminator>,
//! "values": <payload>}`. The discriminator selects one of the
//! [`StreamMessage`] variants; anything else surfaces as
//! [`StreamEvent::Unknown`] so newer servers can add message kinds without
//! breaking older clients.

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

/// A team row on the scoreboard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub points: u32,
    /// Completion timestamps (RFC 3339), index-aligned with the scoreboard's
    /// challenge list. `None` means not solved.
    #[serde(default, deserialize_with = "null_as_default")]
    pub completions: Vec<Option<String>>,
    /// Set by the server on the row that belongs to the viewer's own team.
    #[serde(default)]
    pub is_user: bool,
}

impl Team {
    /// Number of solved challenges.
    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.completions.iter().filter(|c| c.is_some()).count()
    }

    /// Completion timestamp for the challenge at `index`, if solved.
    #[must_use]
    pub fn completion_at(&self, index: usize) -> Option<&str> {
        self.completions.get(index).and_then(Option::as_deref)
    }
}

/// A challenge definition. `tag` is the unique key.
///
/// Older servers serialise the flag config without JSON tags, so the
/// capitalised Go field names are accepted as aliases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    #[serde(alias = "Tag")]
    pub tag: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Points")]
    pub points: u32,
    #[serde(default, alias = "Category")]
    pub category: String,
    #[serde(default, alias = "Description")]
    pub description: String,
}

/// Per-challenge row pushed on `challengesFrontend`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRow {
    pub challenge: Challenge,
    #[serde(default)]
    pub is_user_completed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams_completed: Vec<TeamCompletion>,
}

/// A team that has solved a given challenge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCompletion {
    pub team_name: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// A recognised stream message.
///
/// Serialises to the wire envelope. Decoding goes through
/// [`crate::codec::decode_segment`], which validates the discriminator before
/// the payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "msg", content = "values")]
pub enum StreamMessage {
    #[serde(rename = "teams")]
    Teams(Vec<Team>),
    #[serde(rename = "challenges")]
    Challenges(Vec<Challenge>),
    #[serde(rename = "challengesFrontend")]
    ChallengesFrontend(Vec<ChallengeRow>),
}

impl StreamMessage {
    pub const TEAMS: &'static str = "teams";
    pub const CHALLENGES: &'static str = "challenges";
    pub const CHALLENGES_FRONTEND: &'static str = "challengesFrontend";

    /// Wire discriminator of this message.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Teams(_) => Self::TEAMS,
            Self::Challenges(_) => Self::CHALLENGES,
            Self::ChallengesFrontend(_) => Self::CHALLENGES_FRONTEND,
        }
    }
}

/// Result of decoding one well-formed segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamEvent {
    Message(StreamMessage),
    /// Envelope with a discriminator this client does not know.
    Unknown(String),
}

/// Go encodes nil slices as `null`; treat that the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
