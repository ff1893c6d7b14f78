//! Live-view state fed by a websocket stream.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each live root (scoreboard, teams page, challenge browser) owns one
//! `LiveState` signal. The feed client is its only writer: it applies
//! frames to `view` through `feed::apply_frame` and mirrors the machine's
//! phase into `connection_status` for the status dot.

#[cfg(test)]
#[path = "live_test.rs"]
mod live_test;

use feed::ConnectionStatus;

/// A feed-backed view plus the status of the connection feeding it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveState<V> {
    pub view: V,
    pub connection_status: ConnectionStatus,
}

impl<V> LiveState<V> {
    pub fn new(view: V) -> Self {
        Self { view, connection_status: ConnectionStatus::Disconnected }
    }
}
