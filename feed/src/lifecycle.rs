//! Connection lifecycle for a live feed.
//!
//! The transport loop (browser or native) owns the socket and the timer; this
//! machine owns the decisions. Every transport event is fed in and the
//! machine answers with the single [`FeedAction`] to perform next:
//!
//! ```text
//! Disconnected --start--> Connecting --open--> Connected
//!       ^                    |   ^                |
//!       |                  close  timer         close
//!       |                    v   |                |
//!       |               ReconnectScheduled <------+
//!       |
//!   (any) --stop--> Stopped
//! ```
//!
//! Reconnects use a fixed delay with no growth and no cap. `Stopped` is
//! terminal: once a view is torn down no further connection is attempted.

use std::time::Duration;

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

/// Delay before re-opening a closed feed.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(3000);

/// Error returned by [`stream_url`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("page URL has no http(s) scheme: {0}")]
    UnsupportedScheme(String),
    #[error("page URL has no host: {0}")]
    MissingHost(String),
}

/// Stream endpoints served by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedEndpoint {
    /// Teams and challenges for the scoreboard and teams pages.
    Scores,
    /// Per-challenge rows for the challenge browser.
    ChallengesFrontend,
}

impl FeedEndpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Scores => "/scores",
            Self::ChallengesFrontend => "/challengesFrontend",
        }
    }
}

/// Derive the WebSocket URL for `endpoint` from the current page URL.
///
/// `http` maps to `ws` and `https` to `wss`; the host is kept and the path,
/// query and fragment are replaced by the endpoint path.
///
/// # Errors
///
/// Returns [`FeedError`] when the page URL is not http(s) or has no host.
pub fn stream_url(page_url: &str, endpoint: FeedEndpoint) -> Result<String, FeedError> {
    let (scheme, rest) = if let Some(rest) = page_url.strip_prefix("https://") {
        ("wss", rest)
    } else if let Some(rest) = page_url.strip_prefix("http://") {
        ("ws", rest)
    } else {
        return Err(FeedError::UnsupportedScheme(page_url.to_owned()));
    };

    let host = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    if host.is_empty() {
        return Err(FeedError::MissingHost(page_url.to_owned()));
    }

    Ok(format!("{scheme}://{host}{}", endpoint.path()))
}

/// Coarse connection status for indicators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Lifecycle phase of a [`FeedMachine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedPhase {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    ReconnectScheduled,
    Stopped,
}

/// What the transport loop must do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedAction {
    /// Open a connection to `url`.
    Open(String),
    /// Arm exactly one timer; call [`FeedMachine::on_reconnect_timer`] when it fires.
    ScheduleReconnect { url: String, delay: Duration },
    /// Nothing to do.
    None,
}

/// Explicit reconnect state machine for one feed.
#[derive(Clone, Debug)]
pub struct FeedMachine {
    url: String,
    phase: FeedPhase,
    reconnect_delay: Duration,
    attempts: u32,
}

impl FeedMachine {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_reconnect_delay(url, RECONNECT_DELAY)
    }

    #[must_use]
    pub fn with_reconnect_delay(url: impl Into<String>, reconnect_delay: Duration) -> Self {
        Self {
            url: url.into(),
            phase: FeedPhase::Disconnected,
            reconnect_delay,
            attempts: 0,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// Number of connection attempts made so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.phase == FeedPhase::Stopped
    }

    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        match self.phase {
            FeedPhase::Connecting => ConnectionStatus::Connecting,
            FeedPhase::Connected => ConnectionStatus::Connected,
            FeedPhase::Disconnected | FeedPhase::ReconnectScheduled | FeedPhase::Stopped => {
                ConnectionStatus::Disconnected
            }
        }
    }

    /// Begin the first connection.
    pub fn start(&mut self) -> FeedAction {
        if self.phase != FeedPhase::Disconnected {
            return FeedAction::None;
        }
        self.open()
    }

    /// The transport finished its handshake.
    pub fn on_open(&mut self) {
        if self.phase == FeedPhase::Connecting {
            self.phase = FeedPhase::Connected;
        }
    }

    /// The connection closed or failed to open.
    ///
    /// Schedules one reconnect; repeated close notifications for the same
    /// connection do not schedule more.
    pub fn on_close(&mut self) -> FeedAction {
        match self.phase {
            FeedPhase::Connecting | FeedPhase::Connected => {
                self.phase = FeedPhase::ReconnectScheduled;
                FeedAction::ScheduleReconnect {
                    url: self.url.clone(),
                    delay: self.reconnect_delay,
                }
            }
            FeedPhase::Disconnected | FeedPhase::ReconnectScheduled | FeedPhase::Stopped => {
                FeedAction::None
            }
        }
    }

    /// The reconnect timer fired.
    pub fn on_reconnect_timer(&mut self) -> FeedAction {
        if self.phase != FeedPhase::ReconnectScheduled {
            return FeedAction::None;
        }
        self.open()
    }

    /// Tear the feed down. Idempotent; no action is produced afterwards.
    pub fn stop(&mut self) {
        self.phase = FeedPhase::Stopped;
    }

    fn open(&mut self) -> FeedAction {
        self.phase = FeedPhase::Connecting;
        self.attempts = self.attempts.saturating_add(1);
        FeedAction::Open(self.url.clone())
    }
}
