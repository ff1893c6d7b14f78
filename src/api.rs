//! HTTP client for the platform's JSON endpoints.
//!
//! Every call is a `POST` authenticated by the `session` cookie. Action
//! endpoints answer rejections with HTTP 400 and an `{"error": ...}` body, so
//! their replies are classified from the body whatever the status code.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use feed::api::{
    LAB_INFO_PATH, LabInfo, MANAGE_CHALLENGE_PATH, RESET_CHALLENGE_PATH, RESET_FRONTEND_PATH,
    SESSION_COOKIE, TagRequest, VPN_DOWNLOAD_PATH, VPN_STATUS_PATH, VpnConnection,
    VpnDownloadRequest,
};
use feed::submit::VERIFY_PATH;
use feed::{ActionReply, SubmitOutcome, VerifyRequest};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::CliError;

/// `Cookie` header value for a session token.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}")
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`, sending `session` as a cookie when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the session token is not a valid header value or
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str, session: Option<&str>) -> Result<Self, CliError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = session {
            let value = HeaderValue::from_str(&session_cookie(token))
                .map_err(|e| CliError::InvalidHeader(e.to_string()))?;
            headers.insert(COOKIE, value);
        }
        let client = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response, CliError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "POST");
        Ok(self.client.post(url).json(body).send().await?)
    }

    async fn post_action<B: Serialize>(&self, path: &str, body: &B) -> Result<SubmitOutcome, CliError> {
        let response = self.post(path, body).await?;
        let status = response.status();
        let text = response.text().await?;
        let reply = serde_json::from_str::<ActionReply>(&text)?;
        let outcome = reply.outcome();
        tracing::debug!(path, status = status.as_u16(), ?outcome, "action reply");
        Ok(outcome)
    }

    async fn post_for<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, CliError> {
        let response = self.post(path, &Value::Object(Map::new())).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CliError::Status { path, status: status.as_u16() });
        }
        Ok(response.json::<T>().await?)
    }

    /// `POST /flags/verify`.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank flag, a transport failure or an
    /// unparseable reply.
    pub async fn submit_flag(&self, tag: &str, flag: &str) -> Result<SubmitOutcome, CliError> {
        let request = VerifyRequest::new(tag, flag)?;
        self.post_action(VERIFY_PATH, &request).await
    }

    /// `POST /reset/challenge`.
    ///
    /// # Errors
    ///
    /// Returns an error for a transport failure or an unparseable reply.
    pub async fn reset_challenge(&self, tag: &str) -> Result<SubmitOutcome, CliError> {
        self.post_action(RESET_CHALLENGE_PATH, &TagRequest { tag: tag.to_owned() }).await
    }

    /// `POST /manage/challenge`.
    ///
    /// # Errors
    ///
    /// Returns an error for a transport failure or an unparseable reply.
    pub async fn toggle_challenge(&self, tag: &str) -> Result<SubmitOutcome, CliError> {
        self.post_action(MANAGE_CHALLENGE_PATH, &TagRequest { tag: tag.to_owned() }).await
    }

    /// `POST /reset/frontend`.
    ///
    /// # Errors
    ///
    /// Returns an error for a transport failure or an unparseable reply.
    pub async fn reset_frontend(&self) -> Result<SubmitOutcome, CliError> {
        self.post_action(RESET_FRONTEND_PATH, &Value::Object(Map::new())).await
    }

    /// `POST /vpn/status`.
    ///
    /// # Errors
    ///
    /// Returns an error for a transport failure, a non-2xx status or a
    /// malformed reply.
    pub async fn vpn_status(&self) -> Result<Vec<VpnConnection>, CliError> {
        self.post_for(VPN_STATUS_PATH).await
    }

    /// `POST /vpn/download`; returns the WireGuard config text.
    ///
    /// # Errors
    ///
    /// Returns an error for a transport failure or a non-2xx status.
    pub async fn vpn_download(&self, conn_id: &str) -> Result<String, CliError> {
        let body = VpnDownloadRequest { conn_id: conn_id.to_owned() };
        let response = self.post(VPN_DOWNLOAD_PATH, &body).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CliError::Status {
                path: VPN_DOWNLOAD_PATH,
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    /// `POST /get/labsubnet`.
    ///
    /// # Errors
    ///
    /// Returns an error for a transport failure, a non-2xx status or a
    /// malformed reply.
    pub async fn lab_info(&self) -> Result<LabInfo, CliError> {
        self.post_for(LAB_INFO_PATH).await
    }
}
