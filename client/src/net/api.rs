//! REST helpers for flag verification and team management.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, authenticated by the
//! browser's `session` cookie. Native builds get stubs that report the
//! endpoint as unavailable.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result`; transport failures and unparseable replies
//! become [`SubmitError::Network`] so widgets can show one generic message.
//! Reply bodies are parsed whatever the HTTP status, since the server answers
//! rejections with `400` plus an `{"error": ...}` body.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use feed::api::{LabInfo, VpnConnection};
use feed::{SubmitError, SubmitOutcome};
#[cfg(any(test, feature = "csr"))]
use feed::ActionReply;

#[cfg(any(test, feature = "csr"))]
thread_local! {
    static SUBMISSIONS: std::cell::RefCell<feed::SubmissionGuard> =
        std::cell::RefCell::new(feed::SubmissionGuard::default());
}

/// Claim on one in-flight submission. The tag is released when the claim is
/// dropped, including when the request future is abandoned mid-flight.
#[cfg(any(test, feature = "csr"))]
struct InFlight {
    tag: String,
}

#[cfg(any(test, feature = "csr"))]
impl InFlight {
    fn claim(tag: &str) -> Result<Self, SubmitError> {
        SUBMISSIONS.with(|guard| guard.borrow_mut().try_begin(tag))?;
        Ok(Self { tag: tag.to_owned() })
    }
}

#[cfg(any(test, feature = "csr"))]
impl Drop for InFlight {
    fn drop(&mut self) {
        SUBMISSIONS.with(|guard| guard.borrow_mut().finish(&self.tag));
    }
}

#[cfg(any(test, feature = "csr"))]
fn classify_reply(body: &str) -> Result<SubmitOutcome, SubmitError> {
    serde_json::from_str::<ActionReply>(body)
        .map(|reply| reply.outcome())
        .map_err(|e| SubmitError::Network(format!("unexpected reply: {e}")))
}

#[cfg(any(test, feature = "csr"))]
fn request_failed_message(path: &str, status: u16) -> String {
    format!("{path} failed: {status}")
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> SubmitError {
    SubmitError::Network("not available outside the browser".to_owned())
}

#[cfg(feature = "csr")]
async fn post_json<B: serde::Serialize>(path: &str, body: &B) -> Result<gloo_net::http::Response, SubmitError> {
    gloo_net::http::Request::post(path)
        .json(body)
        .map_err(|e| SubmitError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| SubmitError::Network(e.to_string()))
}

#[cfg(feature = "csr")]
async fn post_action<B: serde::Serialize>(path: &str, body: &B) -> Result<SubmitOutcome, SubmitError> {
    let resp = post_json(path, body).await?;
    let text = resp.text().await.map_err(|e| SubmitError::Network(e.to_string()))?;
    classify_reply(&text)
}

/// Verify a flag for challenge `tag` via `POST /flags/verify`.
///
/// Only one submission per tag may be in flight at a time.
///
/// # Errors
///
/// Returns [`SubmitError::EmptyFlag`] for blank input,
/// [`SubmitError::InFlight`] while a previous submission for `tag` is pending,
/// and [`SubmitError::Network`] when the server cannot be reached.
pub async fn submit_flag(tag: &str, flag: &str) -> Result<SubmitOutcome, SubmitError> {
    let request = feed::VerifyRequest::new(tag, flag)?;
    #[cfg(feature = "csr")]
    {
        let _claim = InFlight::claim(tag)?;
        post_action(feed::submit::VERIFY_PATH, &request).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = request;
        Err(unavailable())
    }
}

/// Reset a challenge instance via `POST /reset/challenge`.
///
/// # Errors
///
/// Returns [`SubmitError::Network`] when the server cannot be reached.
pub async fn reset_challenge(tag: &str) -> Result<SubmitOutcome, SubmitError> {
    #[cfg(feature = "csr")]
    {
        let body = feed::api::TagRequest { tag: tag.to_owned() };
        post_action(feed::api::RESET_CHALLENGE_PATH, &body).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = tag;
        Err(unavailable())
    }
}

/// Start or stop a challenge instance via `POST /manage/challenge`.
///
/// # Errors
///
/// Returns [`SubmitError::Network`] when the server cannot be reached.
pub async fn toggle_challenge(tag: &str) -> Result<SubmitOutcome, SubmitError> {
    #[cfg(feature = "csr")]
    {
        let body = feed::api::TagRequest { tag: tag.to_owned() };
        post_action(feed::api::MANAGE_CHALLENGE_PATH, &body).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = tag;
        Err(unavailable())
    }
}

/// Recreate the team's frontend container via `POST /reset/frontend`.
///
/// # Errors
///
/// Returns [`SubmitError::Network`] when the server cannot be reached.
pub async fn reset_frontend() -> Result<SubmitOutcome, SubmitError> {
    #[cfg(feature = "csr")]
    {
        post_action(feed::api::RESET_FRONTEND_PATH, &serde_json::json!({})).await
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(unavailable())
    }
}

/// Fetch the team's VPN connection slots via `POST /vpn/status`.
///
/// # Errors
///
/// Returns an error string if the request fails or the reply is not a list.
pub async fn vpn_status() -> Result<Vec<VpnConnection>, String> {
    #[cfg(feature = "csr")]
    {
        let path = feed::api::VPN_STATUS_PATH;
        let resp = post_json(path, &serde_json::json!({})).await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message(path, resp.status()));
        }
        resp.json::<Vec<VpnConnection>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(unavailable().to_string())
    }
}

/// Download the WireGuard config for `conn_id` via `POST /vpn/download`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server refuses.
pub async fn vpn_download(conn_id: &str) -> Result<String, String> {
    #[cfg(feature = "csr")]
    {
        let path = feed::api::VPN_DOWNLOAD_PATH;
        let body = feed::api::VpnDownloadRequest { conn_id: conn_id.to_owned() };
        let resp = post_json(path, &body).await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message(path, resp.status()));
        }
        resp.text().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = conn_id;
        Err(unavailable().to_string())
    }
}

/// Fetch the lab network details via `POST /get/labsubnet`.
///
/// # Errors
///
/// Returns an error string if the request fails or the reply is malformed.
pub async fn lab_info() -> Result<LabInfo, String> {
    #[cfg(feature = "csr")]
    {
        let path = feed::api::LAB_INFO_PATH;
        let resp = post_json(path, &serde_json::json!({})).await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message(path, resp.status()));
        }
        resp.json::<LabInfo>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(unavailable().to_string())
    }
}
