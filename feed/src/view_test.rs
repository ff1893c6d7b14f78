use super::*;
use crate::message::TeamCompletion;

fn challenge(tag: &str, category: &str) -> Challenge {
    Challenge {
        tag: tag.to_owned(),
        name: tag.to_uppercase(),
        points: 5,
        category: category.to_owned(),
        description: String::new(),
    }
}

fn team(id: &str, points: u32) -> Team {
    Team {
        id: id.to_owned(),
        name: format!("team-{id}"),
        points,
        completions: Vec::new(),
        is_user: false,
    }
}

// =============================================================
// ScoreboardView
// =============================================================

#[test]
fn scoreboard_replaces_teams_and_challenges_in_order() {
    let mut view = ScoreboardView::default();
    assert!(view.apply(&StreamMessage::Teams(Vec::new())));
    assert!(view.apply(&StreamMessage::Challenges(vec![challenge("a", "c")])));
    assert!(view.teams.is_empty());
    assert_eq!(view.challenges, vec![challenge("a", "c")]);
}

#[test]
fn scoreboard_replace_does_not_accumulate() {
    let mut view = ScoreboardView::default();
    view.apply(&StreamMessage::Teams(vec![team("1", 10), team("2", 5)]));
    view.apply(&StreamMessage::Teams(vec![team("3", 1)]));
    assert_eq!(view.teams, vec![team("3", 1)]);
}

#[test]
fn scoreboard_apply_is_idempotent() {
    let msg = StreamMessage::Teams(vec![team("1", 10)]);
    let mut once = ScoreboardView::default();
    once.apply(&msg);
    let mut twice = ScoreboardView::default();
    twice.apply(&msg);
    twice.apply(&msg);
    assert_eq!(once, twice);
}

#[test]
fn scoreboard_state_is_last_message_per_kind() {
    let messages = [
        StreamMessage::Challenges(vec![challenge("a", "x")]),
        StreamMessage::Teams(vec![team("1", 1)]),
        StreamMessage::Challenges(vec![challenge("b", "y")]),
        StreamMessage::ChallengesFrontend(Vec::new()),
    ];
    let mut view = ScoreboardView::default();
    for msg in &messages {
        view.apply(msg);
    }
    assert_eq!(
        view,
        ScoreboardView {
            teams: vec![team("1", 1)],
            challenges: vec![challenge("b", "y")],
        }
    );
}

#[test]
fn scoreboard_ignores_challenges_frontend() {
    let mut view = ScoreboardView::default();
    assert!(!view.apply(&StreamMessage::ChallengesFrontend(Vec::new())));
    assert_eq!(view, ScoreboardView::default());
}

#[test]
fn scoreboard_keeps_server_order_for_rank() {
    let mut view = ScoreboardView::default();
    let mut own = team("b", 3);
    own.is_user = true;
    view.apply(&StreamMessage::Teams(vec![team("a", 9), own]));
    assert_eq!(view.rank_of("a"), Some(1));
    assert_eq!(view.rank_of("b"), Some(2));
    assert_eq!(view.rank_of("z"), None);
    assert_eq!(view.own_team().map(|t| t.id.as_str()), Some("b"));
}

// =============================================================
// CategoryGroups
// =============================================================

#[test]
fn category_groups_keep_first_seen_order() {
    let groups = CategoryGroups::from_challenges(vec![
        challenge("a", "Web"),
        challenge("b", "Crypto"),
        challenge("c", "Web"),
    ]);
    let listed: Vec<(&str, Vec<&str>)> = groups
        .iter()
        .map(|(category, items)| (category, items.iter().map(|c| c.tag.as_str()).collect()))
        .collect();
    assert_eq!(listed, vec![("Web", vec!["a", "c"]), ("Crypto", vec!["b"])]);
}

#[test]
fn category_groups_empty_by_default() {
    assert!(CategoryGroups::default().is_empty());
}

// =============================================================
// ChallengeBrowserView
// =============================================================

#[test]
fn challenge_browser_stream_only_replaces_flat_rows() {
    let mut view = ChallengeBrowserView::with_seed(vec![challenge("seed", "Web")]);
    let row = ChallengeRow {
        challenge: challenge("live", "Crypto"),
        is_user_completed: true,
        teams_completed: vec![TeamCompletion {
            team_name: "Red".to_owned(),
            completed_at: Some("2020-01-01T00:00:00Z".to_owned()),
        }],
    };
    assert!(view.apply(&StreamMessage::ChallengesFrontend(vec![row.clone()])));
    assert_eq!(view.challenges_from_amigo, vec![row]);
    assert_eq!(view.challenges.iter().map(|(c, _)| c).collect::<Vec<_>>(), vec!["Web"]);
    assert!(view.is_completed("live"));
    assert!(!view.is_completed("seed"));
    assert_eq!(view.solves_for("live"), 1);
    assert_eq!(view.solves_for("seed"), 0);
}

#[test]
fn challenge_browser_ignores_scoreboard_messages() {
    let mut view = ChallengeBrowserView::default();
    assert!(!view.apply(&StreamMessage::Challenges(vec![challenge("a", "c")])));
    assert!(!view.apply(&StreamMessage::Teams(Vec::new())));
    assert_eq!(view, ChallengeBrowserView::default());
}

// =============================================================
// apply_frame
// =============================================================

const TWO_MESSAGE_FRAME: &str = concat!(
    r#"{"msg":"teams","values":[]}"#,
    "\n",
    r#"{"msg":"challenges","values":[{"tag":"a","name":"A","points":5,"category":"c","description":"d"}]}"#
);

#[test]
fn apply_frame_processes_batched_messages_in_order() {
    let mut view = ScoreboardView::default();
    let report = apply_frame(&mut view, TWO_MESSAGE_FRAME);
    assert_eq!(report.applied, vec!["teams", "challenges"]);
    assert!(report.changed());
    assert!(view.teams.is_empty());
    assert_eq!(view.challenges.len(), 1);
    assert_eq!(view.challenges[0].tag, "a");
    assert_eq!(view.challenges[0].points, 5);
}

#[test]
fn apply_frame_skips_malformed_segment_and_keeps_going() {
    let mut view = ScoreboardView::default();
    let frame = format!("{{broken\n{TWO_MESSAGE_FRAME}");
    let report = apply_frame(&mut view, &frame);
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(report.errors[0], CodecError::Envelope(_)));
    assert_eq!(report.applied.len(), 2);
    assert_eq!(view.challenges.len(), 1);
}

#[test]
fn apply_frame_records_schema_errors() {
    let mut view = ScoreboardView::default();
    let report = apply_frame(&mut view, r#"{"msg":"teams","values":{"id":1}}"#);
    assert!(matches!(report.errors[..], [CodecError::Schema { msg: "teams", .. }]));
    assert!(!report.changed());
}

#[test]
fn later_frames_still_apply_after_a_bad_frame() {
    let mut view = ScoreboardView::default();
    assert!(!apply_frame(&mut view, "not json at all").changed());
    let good = apply_frame(&mut view, r#"{"msg":"teams","values":[{"id":"t1","name":"Red","points":3}]}"#);
    assert!(good.changed());
    assert_eq!(view.teams[0].name, "Red");
}

#[test]
fn apply_frame_reports_unknown_kinds_without_change() {
    let mut view = ScoreboardView::default();
    let report = apply_frame(&mut view, r#"{"msg":"scoreboard","values":[]}"#);
    assert_eq!(report.unknown, vec!["scoreboard".to_owned()]);
    assert!(!report.changed());
    assert_eq!(view, ScoreboardView::default());
}

#[test]
fn apply_frame_does_not_count_messages_the_view_ignores() {
    let mut view = ChallengeBrowserView::default();
    let report = apply_frame(&mut view, TWO_MESSAGE_FRAME);
    assert!(report.applied.is_empty());
    assert!(report.errors.is_empty());
}

#[test]
fn apply_binary_frame_decodes_lossy_utf8() {
    let mut view = ScoreboardView::default();
    let mut bytes = b"\xff\xfe\n".to_vec();
    bytes.extend_from_slice(TWO_MESSAGE_FRAME.as_bytes());
    let report = apply_binary_frame(&mut view, &bytes);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.applied, vec!["teams", "challenges"]);
    assert_eq!(view.challenges[0].tag, "a");
}
