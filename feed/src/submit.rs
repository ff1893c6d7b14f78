//! Flag submission contract.
//!
//! `POST /flags/verify` takes `{tag, flag}` and answers `{"error": ...}` or
//! `{"status": "ok"}`. The same reply shape is used by the team management
//! endpoints, so [`ActionReply`] is shared with [`crate::api`].
//!
//! Submissions are serialised per challenge tag: while a request for a tag is
//! in flight a second one for the same tag is rejected before it is sent, so
//! replies can never land out of order on the same form.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "submit_test.rs"]
mod submit_test;

pub const VERIFY_PATH: &str = "/flags/verify";

/// Shown when a flag is accepted.
pub const SUCCESS_MESSAGE: &str = "Correct flag, well done!";

/// Shown when the server could not be reached or answered garbage.
pub const NETWORK_ERROR_MESSAGE: &str = "Could not reach the server, please try again";

/// Request body for `POST /flags/verify`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyRequest {
    pub tag: String,
    pub flag: String,
}

impl VerifyRequest {
    /// Build a request from raw form input. The flag is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::EmptyFlag`] when the flag is blank.
    pub fn new(tag: &str, flag: &str) -> Result<Self, SubmitError> {
        let flag = flag.trim();
        if flag.is_empty() {
            return Err(SubmitError::EmptyFlag);
        }
        Ok(Self { tag: tag.to_owned(), flag: flag.to_owned() })
    }
}

/// Reply body shared by every JSON action endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ActionReply {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ActionReply {
    /// Classify the reply. An `error` field wins over `status`.
    #[must_use]
    pub fn outcome(&self) -> SubmitOutcome {
        if let Some(error) = &self.error {
            return SubmitOutcome::Rejected(error.clone());
        }
        if self.status.as_deref() == Some("ok") {
            return SubmitOutcome::Accepted;
        }
        SubmitOutcome::Ignored
    }
}

/// Server verdict for one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(String),
    /// Neither `error` nor `status: ok`; nothing is shown.
    Ignored,
}

/// Local or transport failure of a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("flag is empty")]
    EmptyFlag,
    #[error("a submission for `{0}` is already in flight")]
    InFlight(String),
    #[error("network error: {0}")]
    Network(String),
}

impl SubmitError {
    /// Text to show under the form.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyFlag => "Please enter a flag",
            Self::InFlight(_) => "Your previous submission is still being checked",
            Self::Network(_) => NETWORK_ERROR_MESSAGE,
        }
    }
}

/// Tracks which challenge tags have a submission in flight.
#[derive(Clone, Debug, Default)]
pub struct SubmissionGuard {
    in_flight: HashSet<String>,
}

impl SubmissionGuard {
    /// Mark `tag` as in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InFlight`] when `tag` is already in flight.
    pub fn try_begin(&mut self, tag: &str) -> Result<(), SubmitError> {
        if !self.in_flight.insert(tag.to_owned()) {
            return Err(SubmitError::InFlight(tag.to_owned()));
        }
        Ok(())
    }

    /// Release `tag` once its reply (or failure) has been handled.
    pub fn finish(&mut self, tag: &str) {
        self.in_flight.remove(tag);
    }
}

/// Form state for one flag checker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagForm {
    pub input: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl FlagForm {
    /// Clear both messages before a new submission.
    pub fn begin(&mut self) {
        self.error = None;
        self.success = None;
    }

    /// Apply the server verdict.
    pub fn apply_outcome(&mut self, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Rejected(message) => {
                self.error = Some(message.clone());
            }
            SubmitOutcome::Accepted => {
                self.success = Some(SUCCESS_MESSAGE.to_owned());
                self.input.clear();
            }
            SubmitOutcome::Ignored => {}
        }
    }

    /// Apply a local or transport failure. The input is left as typed.
    pub fn apply_error(&mut self, error: &SubmitError) {
        self.error = Some(error.user_message().to_owned());
    }
}
