//! Team management REST contract.
//!
//! All endpoints are JSON `POST`s authenticated by the `session` cookie and
//! answer with an [`ActionReply`](crate::submit::ActionReply) unless noted.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

/// Cookie carrying the team session token.
pub const SESSION_COOKIE: &str = "session";

pub const RESET_CHALLENGE_PATH: &str = "/reset/challenge";
pub const MANAGE_CHALLENGE_PATH: &str = "/manage/challenge";
pub const RESET_FRONTEND_PATH: &str = "/reset/frontend";
pub const VPN_STATUS_PATH: &str = "/vpn/status";
pub const VPN_DOWNLOAD_PATH: &str = "/vpn/download";
pub const LAB_INFO_PATH: &str = "/get/labsubnet";

/// Body for the per-challenge actions (reset, start/stop).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagRequest {
    pub tag: String,
}

/// One VPN connection slot of a team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnConnection {
    #[serde(rename = "vpnConnID")]
    pub conn_id: String,
    #[serde(default)]
    pub status: String,
}

impl VpnConnection {
    /// Whether a peer is currently connected with this config.
    #[must_use]
    pub fn is_used(&self) -> bool {
        self.status == "USED"
    }

    /// Download file name, e.g. `conn_2.conf` for `conn_2`.
    #[must_use]
    pub fn config_file_name(&self) -> Option<String> {
        vpn_config_file_name(&self.conn_id)
    }
}

/// Map a connection id (`conn_<n>`) to its config file name.
#[must_use]
pub fn vpn_config_file_name(conn_id: &str) -> Option<String> {
    let (_, index) = conn_id.split_once('_')?;
    let index: u8 = index.parse().ok()?;
    Some(format!("conn_{index}.conf"))
}

/// Body for `POST /vpn/download`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VpnDownloadRequest {
    #[serde(rename = "vpnConnID")]
    pub conn_id: String,
}

/// Reply of `POST /get/labsubnet`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabInfo {
    #[serde(rename = "isVPN", default)]
    pub is_vpn: i32,
    #[serde(default)]
    pub lab_subnet: String,
}

impl LabInfo {
    /// Events run in browser-only (0), VPN-only (1) or mixed (2) mode.
    #[must_use]
    pub fn vpn_enabled(&self) -> bool {
        self.is_vpn != 0
    }
}
