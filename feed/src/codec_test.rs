use super::*;
use crate::message::Challenge;

fn sample_challenge() -> Challenge {
    Challenge {
        tag: "a".to_owned(),
        name: "A".to_owned(),
        points: 5,
        category: "c".to_owned(),
        description: "d".to_owned(),
    }
}

#[test]
fn split_frame_skips_blank_segments_and_trims() {
    let parts: Vec<_> = split_frame("  one \n\n two\r\n").collect();
    assert_eq!(parts, vec!["one", "two"]);
}

#[test]
fn decode_frame_keeps_wire_order_for_batched_messages() {
    let frame = concat!(
        r#"{"msg":"teams","values":[]}"#,
        "\n",
        r#"{"msg":"challenges","values":[{"tag":"a","name":"A","points":5,"category":"c","description":"d"}]}"#
    );
    let decoded: Vec<_> = decode_frame(frame)
        .into_iter()
        .map(|r| r.expect("segment should decode"))
        .collect();
    assert_eq!(
        decoded,
        vec![
            StreamEvent::Message(StreamMessage::Teams(Vec::new())),
            StreamEvent::Message(StreamMessage::Challenges(vec![sample_challenge()])),
        ]
    );
}

#[test]
fn decode_segment_reports_unknown_discriminator() {
    let event = decode_segment(r#"{"msg":"scoreboard","values":{}}"#).expect("envelope");
    assert_eq!(event, StreamEvent::Unknown("scoreboard".to_owned()));
}

#[test]
fn decode_segment_rejects_non_json() {
    let err = decode_segment("{not json").expect_err("should fail");
    assert!(matches!(err, CodecError::Envelope(_)));
}

#[test]
fn decode_segment_rejects_missing_discriminator() {
    let err = decode_segment(r#"{"values":[]}"#).expect_err("should fail");
    assert!(matches!(err, CodecError::Envelope(_)));
}

#[test]
fn decode_segment_quarantines_bad_values_for_known_message() {
    let err = decode_segment(r#"{"msg":"teams","values":{"id":1}}"#).expect_err("should fail");
    assert!(matches!(err, CodecError::Schema { msg: "teams", .. }));
}

#[test]
fn malformed_segment_does_not_hide_later_segments() {
    let frame = "garbage\n{\"msg\":\"teams\",\"values\":[]}";
    let decoded = decode_frame(frame);
    assert_eq!(decoded.len(), 2);
    assert!(decoded[0].is_err());
    assert_eq!(
        decoded[1].as_ref().expect("second segment"),
        &StreamEvent::Message(StreamMessage::Teams(Vec::new()))
    );
}

#[test]
fn decode_binary_frame_tolerates_invalid_utf8() {
    let mut bytes = b"\xff\xfe\n".to_vec();
    bytes.extend_from_slice(br#"{"msg":"teams","values":[]}"#);
    let decoded = decode_binary_frame(&bytes);
    assert_eq!(decoded.len(), 2);
    assert!(decoded[0].is_err());
    assert!(decoded[1].is_ok());
}
