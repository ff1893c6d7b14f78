//! Error type for the `amigo` binary.

/// Errors surfaced by the command-line companion.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] feed::FeedError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(String),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Submit(#[from] feed::SubmitError),
    #[error("server rejected {path}: {message}")]
    Rejected { path: &'static str, message: String },
    #[error("{path} returned HTTP {status}")]
    Status { path: &'static str, status: u16 },
    #[error("unknown VPN connection id `{0}`")]
    UnknownConnection(String),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<tokio_tungstenite::tungstenite::Error> for CliError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WsConnect(Box::new(error))
    }
}
