//! Newline-delimited JSON codec for stream frames.
//!
//! A single transport frame may batch several envelopes joined by `\n`. Each
//! segment is decoded on its own so one malformed segment never prevents the
//! others from being applied.

use serde::Deserialize;
use serde_json::Value;

use crate::message::{StreamEvent, StreamMessage};

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

/// Separator between envelopes inside one frame.
pub const SEGMENT_SEPARATOR: char = '\n';

/// Error returned by [`decode_segment`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The segment is not JSON, or lacks a string `msg` field.
    #[error("malformed stream envelope: {0}")]
    Envelope(#[source] serde_json::Error),
    /// The discriminator is known but `values` has the wrong shape.
    #[error("invalid values for `{msg}`: {source}")]
    Schema {
        msg: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct Envelope {
    msg: String,
    #[serde(default)]
    values: Value,
}

/// Iterate the non-empty, trimmed segments of a frame in wire order.
pub fn split_frame(text: &str) -> impl Iterator<Item = &str> {
    text.split(SEGMENT_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Decode one segment into a stream event.
///
/// # Errors
///
/// Returns [`CodecError::Envelope`] when the segment is not an envelope and
/// [`CodecError::Schema`] when a known message carries malformed values.
pub fn decode_segment(segment: &str) -> Result<StreamEvent, CodecError> {
    let envelope: Envelope = serde_json::from_str(segment).map_err(CodecError::Envelope)?;
    let message = match envelope.msg.as_str() {
        StreamMessage::TEAMS => StreamMessage::Teams(values(StreamMessage::TEAMS, envelope.values)?),
        StreamMessage::CHALLENGES => {
            StreamMessage::Challenges(values(StreamMessage::CHALLENGES, envelope.values)?)
        }
        StreamMessage::CHALLENGES_FRONTEND => StreamMessage::ChallengesFrontend(values(
            StreamMessage::CHALLENGES_FRONTEND,
            envelope.values,
        )?),
        _ => return Ok(StreamEvent::Unknown(envelope.msg)),
    };
    Ok(StreamEvent::Message(message))
}

fn values<T>(msg: &'static str, values: Value) -> Result<T, CodecError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(values).map_err(|source| CodecError::Schema { msg, source })
}

/// Decode every segment of a frame, preserving order.
#[must_use]
pub fn decode_frame(text: &str) -> Vec<Result<StreamEvent, CodecError>> {
    split_frame(text).map(decode_segment).collect()
}

/// Decode a binary frame. Invalid UTF-8 is replaced rather than rejected so
/// that the valid segments around it still decode.
#[must_use]
pub fn decode_binary_frame(bytes: &[u8]) -> Vec<Result<StreamEvent, CodecError>> {
    decode_frame(&String::from_utf8_lossy(bytes))
}
