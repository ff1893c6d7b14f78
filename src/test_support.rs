//! Mock platform server for tests.

use axum::Router;

/// Serve `app` on an ephemeral local port and return its `http://` base URL.
pub async fn spawn_mock(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("mock server should bind");
    let addr = listener.local_addr().expect("mock server should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server failed");
    });
    format!("http://{addr}")
}
