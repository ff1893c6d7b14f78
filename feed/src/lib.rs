//! Shared live-feed model for the amigo front-end.
//!
//! This crate owns the wire schema streamed on `/scores` and
//! `/challengesFrontend`, the newline-delimited frame codec, the view-state
//! merger, the reconnect state machine, and the REST contract used for flag
//! submission and team management. It is used by both the browser `client`
//! and the native `amigo` binary, so it carries no transport of its own.

pub mod api;
pub mod codec;
pub mod lifecycle;
pub mod message;
pub mod submit;
pub mod theme;
pub mod view;

pub use codec::{CodecError, decode_binary_frame, decode_frame, decode_segment};
pub use lifecycle::{
    ConnectionStatus, FeedAction, FeedEndpoint, FeedError, FeedMachine, FeedPhase,
    RECONNECT_DELAY, stream_url,
};
pub use message::{Challenge, ChallengeRow, StreamEvent, StreamMessage, Team, TeamCompletion};
pub use submit::{ActionReply, FlagForm, SubmissionGuard, SubmitError, SubmitOutcome, VerifyRequest};
pub use theme::{AppContext, Theme};
pub use view::{
    CategoryGroups, ChallengeBrowserView, FrameReport, ScoreboardView, ViewState, apply_binary_frame,
    apply_frame,
};
