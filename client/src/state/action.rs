//! Status of the one-shot team-management buttons.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reset and start/stop buttons on challenge cards, plus the reset-frontend
//! root, each own one `ActionStatus`. It keeps the button disabled while the
//! request runs and holds the message shown under it afterwards.

#[cfg(test)]
#[path = "action_test.rs"]
mod action_test;

use feed::{SubmitError, SubmitOutcome};

/// State of a one-shot action button (reset, start/stop).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionStatus {
    pub busy: bool,
    pub message: Option<String>,
    pub is_error: bool,
}

impl ActionStatus {
    /// Mark the action as running. Returns `false` if it already is.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.message = None;
        self.is_error = false;
        true
    }

    /// Record the reply. `done` is shown when the server accepts.
    pub fn finish(&mut self, result: &Result<SubmitOutcome, SubmitError>, done: &str) {
        self.busy = false;
        match result {
            Ok(SubmitOutcome::Accepted) => {
                self.message = Some(done.to_owned());
                self.is_error = false;
            }
            Ok(SubmitOutcome::Rejected(error)) => {
                self.message = Some(error.clone());
                self.is_error = true;
            }
            Ok(SubmitOutcome::Ignored) => {
                self.message = None;
                self.is_error = false;
            }
            Err(e) => {
                self.message = Some(e.user_message().to_owned());
                self.is_error = true;
            }
        }
    }
}
