//! Reconnecting websocket client for the live feeds.
//!
//! `spawn_feed` derives the stream URL from the page location, then drives a
//! [`feed::FeedMachine`] as a local async task: open, apply frames to a
//! [`LiveState`] signal until the socket closes, wait the fixed reconnect
//! delay, open again. The task runs until its [`FeedHandle`] is stopped.
//!
//! All websocket logic is gated behind `#[cfg(feature = "csr")]` since it
//! requires a browser environment.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures are logged and handed to the machine as a close, which
//! schedules exactly one reconnect. Malformed segments are logged per segment
//! and never interrupt the socket.

#[cfg(test)]
#[path = "feed_client_test.rs"]
mod feed_client_test;

use feed::{FeedEndpoint, ViewState};
use leptos::prelude::RwSignal;

use crate::state::live::LiveState;

/// Cancels a running feed task.
#[derive(Clone, Debug, Default)]
pub struct FeedHandle {
    #[cfg(feature = "csr")]
    abort: Option<futures::future::AbortHandle>,
}

impl FeedHandle {
    /// Stop the feed. The socket is dropped and no reconnect is scheduled.
    /// Idempotent.
    pub fn stop(&self) {
        #[cfg(feature = "csr")]
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }
}

/// Start the live feed for `endpoint`, applying frames to `state`.
pub fn spawn_feed<V>(endpoint: FeedEndpoint, state: RwSignal<LiveState<V>>) -> FeedHandle
where
    V: ViewState + Send + Sync + 'static,
{
    #[cfg(feature = "csr")]
    {
        let page = web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default();
        let url = match feed::stream_url(&page, endpoint) {
            Ok(url) => url,
            Err(e) => {
                leptos::logging::warn!("feed {}: {e}", endpoint.path());
                return FeedHandle::default();
            }
        };

        let (task, abort) = futures::future::abortable(feed_loop(url, state));
        leptos::task::spawn_local(async move {
            let _ = task.await;
        });
        FeedHandle { abort: Some(abort) }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (endpoint, state);
        FeedHandle::default()
    }
}

#[cfg(feature = "csr")]
fn publish_status<V>(state: RwSignal<LiveState<V>>, machine: &feed::FeedMachine)
where
    V: ViewState + Send + Sync + 'static,
{
    use leptos::prelude::Update;

    let status = machine.status();
    state.maybe_update(|s| {
        if s.connection_status == status {
            return false;
        }
        s.connection_status = status;
        true
    });
}

/// Main connection loop, driven by the feed machine.
#[cfg(feature = "csr")]
async fn feed_loop<V>(url: String, state: RwSignal<LiveState<V>>)
where
    V: ViewState + Send + Sync + 'static,
{
    use feed::{FeedAction, FeedMachine};

    let mut machine = FeedMachine::new(url);
    let mut action = machine.start();

    loop {
        publish_status(state, &machine);
        match action {
            FeedAction::Open(url) => {
                match connect_and_run(&url, &mut machine, state).await {
                    Ok(()) => leptos::logging::log!("feed {url} closed"),
                    Err(e) => leptos::logging::warn!("feed {url} error: {e}"),
                }
                action = machine.on_close();
            }
            FeedAction::ScheduleReconnect { url, delay } => {
                leptos::logging::log!("feed {url}: reconnecting in {}ms", delay.as_millis());
                gloo_timers::future::sleep(delay).await;
                action = machine.on_reconnect_timer();
            }
            FeedAction::None => break,
        }
    }
}

/// Connect to the websocket and apply frames until it closes.
#[cfg(feature = "csr")]
async fn connect_and_run<V>(
    url: &str,
    machine: &mut feed::FeedMachine,
    state: RwSignal<LiveState<V>>,
) -> Result<(), String>
where
    V: ViewState + Send + Sync + 'static,
{
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let mut ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    machine.on_open();
    publish_status(state, machine);

    while let Some(msg) = ws.next().await {
        match msg.map_err(|e| e.to_string())? {
            Message::Text(text) => apply_to_view(state, |view| feed::apply_frame(view, &text)),
            Message::Bytes(bytes) => apply_to_view(state, |view| feed::apply_binary_frame(view, &bytes)),
        }
    }
    Ok(())
}

/// Run `apply` against the view, rerendering only when a slice changed.
#[cfg(feature = "csr")]
fn apply_to_view<V>(state: RwSignal<LiveState<V>>, apply: impl FnOnce(&mut V) -> feed::FrameReport)
where
    V: ViewState + Send + Sync + 'static,
{
    use leptos::prelude::Update;

    let mut report = feed::FrameReport::default();
    state.maybe_update(|s| {
        report = apply(&mut s.view);
        report.changed()
    });
    for err in &report.errors {
        leptos::logging::warn!("dropping malformed feed segment: {err}");
    }
    for kind in &report.unknown {
        leptos::logging::log!("ignoring feed message `{kind}`");
    }
}
