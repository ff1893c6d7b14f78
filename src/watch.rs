//! Native live-feed loop.
//!
//! Mirrors the browser client: a [`FeedMachine`] decides when to open, when
//! to wait and when to give up; this module owns the socket and the timer.
//! Frames are applied to a view and the view is handed to a callback after
//! every change.
//!
//! ERROR HANDLING
//! ==============
//! Connect and transport failures are logged and fed to the machine as a
//! close, which schedules one reconnect after the fixed delay. Malformed
//! segments are logged and skipped.

#[cfg(test)]
#[path = "watch_test.rs"]
mod watch_test;

use std::time::Duration;

use feed::{FeedAction, FeedMachine, FrameReport, ViewState};
use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::COOKIE;

use crate::api::session_cookie;
use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub session: Option<String>,
    pub reconnect_delay: Duration,
    /// Return after the first change instead of watching forever.
    pub once: bool,
}

/// How one connection ended.
enum Flow {
    Closed,
    Done,
}

/// Log what a frame did to the view. Returns whether any slice was replaced.
fn log_report(report: &FrameReport) -> bool {
    for error in &report.errors {
        tracing::warn!(%error, "dropping malformed feed segment");
    }
    for kind in &report.unknown {
        tracing::debug!(%kind, "ignoring feed message");
    }
    if report.changed() {
        tracing::debug!(kinds = ?report.applied, "feed frame applied");
    }
    report.changed()
}

fn stream_request(url: &str, session: Option<&str>) -> Result<Request, CliError> {
    let mut request = url.into_client_request()?;
    if let Some(token) = session {
        let value = HeaderValue::from_str(&session_cookie(token))
            .map_err(|e| CliError::InvalidHeader(e.to_string()))?;
        request.headers_mut().insert(COOKIE, value);
    }
    Ok(request)
}

/// Resolve once `stop` carries `true`. A dropped sender never resolves.
async fn stopped(stop: &mut watch::Receiver<bool>) {
    loop {
        if *stop.borrow_and_update() {
            return;
        }
        if stop.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Watch the feed at `url` until `stop` fires (or after the first change with
/// `once`). Returns the last view state.
///
/// # Errors
///
/// Returns an error only for a malformed session token; connection failures
/// are retried.
pub async fn run_watch<V, F>(
    url: String,
    options: WatchOptions,
    mut stop: watch::Receiver<bool>,
    mut on_change: F,
) -> Result<V, CliError>
where
    V: ViewState + Default,
    F: FnMut(&V),
{
    let mut machine = FeedMachine::with_reconnect_delay(url, options.reconnect_delay);
    let mut view = V::default();
    let mut action = machine.start();

    loop {
        match action {
            FeedAction::Open(url) => {
                let request = stream_request(&url, options.session.as_deref())?;
                let result = tokio::select! {
                    result = connect_and_run(request, &mut machine, &mut view, &mut on_change, options.once) => Some(result),
                    () = stopped(&mut stop) => None,
                };
                match result {
                    None => {
                        machine.stop();
                        tracing::info!(%url, "feed stopped");
                        return Ok(view);
                    }
                    Some(Ok(Flow::Done)) => {
                        machine.stop();
                        return Ok(view);
                    }
                    Some(Ok(Flow::Closed)) => tracing::info!(%url, "feed closed"),
                    Some(Err(error)) => tracing::warn!(%url, %error, "feed connection failed"),
                }
                action = machine.on_close();
            }
            FeedAction::ScheduleReconnect { url, delay } => {
                let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                tracing::info!(%url, delay_ms, "feed reconnect scheduled");
                let fired = tokio::select! {
                    () = tokio::time::sleep(delay) => true,
                    () = stopped(&mut stop) => false,
                };
                if !fired {
                    machine.stop();
                    tracing::info!(%url, "feed stopped");
                    return Ok(view);
                }
                action = machine.on_reconnect_timer();
            }
            FeedAction::None => return Ok(view),
        }
    }
}

async fn connect_and_run<V, F>(
    request: Request,
    machine: &mut FeedMachine,
    view: &mut V,
    on_change: &mut F,
    once: bool,
) -> Result<Flow, CliError>
where
    V: ViewState,
    F: FnMut(&V),
{
    let (mut stream, _) = connect_async(request).await?;
    machine.on_open();
    tracing::info!(url = machine.url(), attempt = machine.attempts(), "feed connected");

    while let Some(message) = stream.next().await {
        let report = match message? {
            Message::Text(text) => feed::apply_frame(view, text.as_str()),
            Message::Binary(bytes) => feed::apply_binary_frame(view, &bytes),
            Message::Close(_) => break,
            _ => continue,
        };
        if log_report(&report) {
            on_change(view);
            if once {
                return Ok(Flow::Done);
            }
        }
    }
    Ok(Flow::Closed)
}
