use super::*;
use feed::{RECONNECT_DELAY, ScoreboardView};
use futures_util::SinkExt;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request as HandshakeRequest, Response};

const TWO_MESSAGE_FRAME: &str = concat!(
    r#"{"msg":"teams","values":[]}"#,
    "\n",
    r#"{"msg":"challenges","values":[{"tag":"a","name":"A","points":5,"category":"c","description":"d"}]}"#
);

#[derive(Debug, Clone)]
struct Accepted {
    at: Instant,
    path: String,
    cookie: Option<String>,
}

type AcceptLog = Arc<Mutex<Vec<Accepted>>>;

/// Websocket server that sends one text frame per connection, then closes.
async fn spawn_feed_server(frames: Vec<String>) -> (String, AcceptLog) {
    spawn_feed_server_with(frames.into_iter().map(Message::text).collect()).await
}

async fn spawn_feed_server_with(frames: Vec<Message>) -> (String, AcceptLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("feed server should bind");
    let addr = listener.local_addr().expect("feed server should have an address");
    let log = AcceptLog::default();
    let server_log = log.clone();

    tokio::spawn(async move {
        let mut index = 0_usize;
        while let Ok((socket, _)) = listener.accept().await {
            let mut seen = None;
            let callback = |req: &HandshakeRequest, resp: Response| -> Result<Response, ErrorResponse> {
                let cookie = req
                    .headers()
                    .get("cookie")
                    .and_then(|v| v.to_str().ok())
                    .map(ToOwned::to_owned);
                seen = Some((req.uri().path().to_owned(), cookie));
                Ok(resp)
            };
            let Ok(mut ws) = tokio_tungstenite::accept_hdr_async(socket, callback).await else {
                continue;
            };
            if let Some((path, cookie)) = seen {
                server_log
                    .lock()
                    .expect("accept log should lock")
                    .push(Accepted { at: Instant::now(), path, cookie });
            }
            if let Some(frame) = frames.get(index.min(frames.len().saturating_sub(1))) {
                let _ = ws.send(frame.clone()).await;
            }
            let _ = ws.close(None).await;
            index += 1;
        }
    });

    (format!("http://{addr}"), log)
}

fn options(once: bool) -> WatchOptions {
    WatchOptions {
        session: Some("abc".to_owned()),
        reconnect_delay: RECONNECT_DELAY,
        once,
    }
}

fn teams_frame(points: u32) -> String {
    format!(r#"{{"msg":"teams","values":[{{"id":"t1","name":"Red","points":{points}}}]}}"#)
}

#[test]
fn log_report_signals_change_only_for_applied_messages() {
    let mut view = ScoreboardView::default();
    assert!(log_report(&feed::apply_frame(&mut view, TWO_MESSAGE_FRAME)));
    assert!(!log_report(&feed::apply_frame(&mut view, r#"{"msg":"scoreboard","values":[]}"#)));
    assert!(!log_report(&feed::apply_frame(&mut view, "{\"msg\":")));
    assert_eq!(view.challenges.len(), 1);
}

#[tokio::test]
async fn binary_frames_are_applied() {
    let frame = Message::binary(TWO_MESSAGE_FRAME.as_bytes().to_vec());
    let (base_url, _log) = spawn_feed_server_with(vec![frame]).await;
    let url = feed::stream_url(&base_url, feed::FeedEndpoint::Scores).unwrap();
    let (_stop_tx, stop_rx) = watch::channel(false);

    let view: ScoreboardView = run_watch(url, options(true), stop_rx, |_| {}).await.unwrap();
    assert_eq!(view.challenges[0].tag, "a");
}

#[test]
fn stream_request_carries_session_cookie() {
    let request = stream_request("ws://127.0.0.1:8080/scores", Some("abc")).unwrap();
    assert_eq!(request.uri().path(), "/scores");
    assert_eq!(
        request.headers().get("cookie").and_then(|v| v.to_str().ok()),
        Some("session=abc")
    );
}

#[test]
fn stream_request_without_session_has_no_cookie() {
    let request = stream_request("ws://127.0.0.1:8080/scores", None).unwrap();
    assert!(request.headers().get("cookie").is_none());
}

#[tokio::test]
async fn once_returns_after_first_change() {
    let (base_url, log) = spawn_feed_server(vec![TWO_MESSAGE_FRAME.to_owned()]).await;
    let url = feed::stream_url(&base_url, feed::FeedEndpoint::Scores).unwrap();
    let (_stop_tx, stop_rx) = watch::channel(false);

    let mut changes = 0;
    let view: ScoreboardView = run_watch(url, options(true), stop_rx, |_| changes += 1)
        .await
        .unwrap();

    assert_eq!(changes, 1);
    assert_eq!(view.challenges.len(), 1);
    let accepted = log.lock().unwrap().clone();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].path, "/scores");
    assert_eq!(accepted[0].cookie.as_deref(), Some("session=abc"));
}

#[tokio::test(start_paused = true)]
async fn reconnects_to_same_url_after_fixed_delay() {
    let (base_url, log) = spawn_feed_server(vec![teams_frame(10), teams_frame(20)]).await;
    let url = feed::stream_url(&base_url, feed::FeedEndpoint::Scores).unwrap();
    let (stop_tx, stop_rx) = watch::channel(false);

    let mut points = Vec::new();
    let view: ScoreboardView = run_watch(url, options(false), stop_rx, |v: &ScoreboardView| {
        points.push(v.teams[0].points);
        if points.len() == 2 {
            let _ = stop_tx.send(true);
        }
    })
    .await
    .unwrap();

    assert_eq!(points, vec![10, 20]);
    assert_eq!(view.teams[0].points, 20);

    let accepted = log.lock().unwrap().clone();
    assert_eq!(accepted.len(), 2);
    assert!(accepted.iter().all(|a| a.path == "/scores"));
    assert!(accepted[1].at - accepted[0].at >= RECONNECT_DELAY);
}

#[tokio::test]
async fn stop_before_start_returns_empty_view() {
    let (base_url, _log) = spawn_feed_server(vec![TWO_MESSAGE_FRAME.to_owned()]).await;
    let url = feed::stream_url(&base_url, feed::FeedEndpoint::Scores).unwrap();
    let (stop_tx, stop_rx) = watch::channel(false);
    stop_tx.send(true).unwrap();

    let view: ScoreboardView = run_watch(url, options(false), stop_rx, |_| {}).await.unwrap();
    assert_eq!(view, ScoreboardView::default());
}
