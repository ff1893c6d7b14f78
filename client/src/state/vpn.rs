//! VPN dropdown model.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backs both VPN dropdown roots. Opening the menu triggers a status refresh;
//! the loaded slots drive the list and the usage count on the toggle.

#[cfg(test)]
#[path = "vpn_test.rs"]
mod vpn_test;

use feed::api::VpnConnection;

/// VPN dropdown state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VpnState {
    pub open: bool,
    pub loading: bool,
    pub connections: Vec<VpnConnection>,
    pub error: Option<String>,
}

impl VpnState {
    /// Toggle the dropdown. Returns `true` when it was opened and the
    /// connection list should be refreshed.
    pub fn toggle_open(&mut self) -> bool {
        self.open = !self.open;
        if self.open {
            self.loading = true;
            self.error = None;
        }
        self.open
    }

    /// Store the result of a status refresh. A failed refresh keeps the last
    /// known list.
    pub fn set_loaded(&mut self, result: Result<Vec<VpnConnection>, String>) {
        self.loading = false;
        match result {
            Ok(connections) => {
                self.connections = connections;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    #[must_use]
    pub fn used_count(&self) -> usize {
        self.connections.iter().filter(|c| c.is_used()).count()
    }
}
