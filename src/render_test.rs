use super::*;
use feed::{Challenge, ChallengeRow, Team, TeamCompletion};

fn challenge(tag: &str, points: u32) -> Challenge {
    Challenge {
        tag: tag.to_owned(),
        name: tag.to_owned(),
        points,
        category: "web".to_owned(),
        description: String::new(),
    }
}

#[test]
fn scoreboard_render_lists_teams_in_order() {
    let view = ScoreboardView {
        teams: vec![
            Team {
                id: "1".to_owned(),
                name: "red".to_owned(),
                points: 30,
                completions: vec![Some("2021-03-04T10:00:00Z".to_owned()), None],
                is_user: false,
            },
            Team {
                id: "2".to_owned(),
                name: "blue".to_owned(),
                points: 10,
                completions: vec![],
                is_user: true,
            },
        ],
        challenges: vec![challenge("a", 10), challenge("b", 20)],
    };
    let lines = view.render().lines().map(str::to_owned).collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("red") && lines[1].contains("1/2"));
    assert!(lines[2].contains("blue") && lines[2].ends_with('*'));
}

#[test]
fn challenge_render_shows_status_and_solves() {
    let view = ChallengeBrowserView {
        challenges_from_amigo: vec![ChallengeRow {
            challenge: challenge("xss-1", 10),
            is_user_completed: true,
            teams_completed: vec![TeamCompletion {
                team_name: "red".to_owned(),
                completed_at: None,
            }],
        }],
        ..ChallengeBrowserView::default()
    };
    let rendered = view.render();
    let row = rendered.lines().nth(1).unwrap();
    assert!(row.starts_with("xss-1"));
    assert!(row.contains("solved"));
    assert!(row.ends_with('1'));
}

#[test]
fn empty_views_render_header_only() {
    assert_eq!(ScoreboardView::default().render().lines().count(), 1);
    assert_eq!(ChallengeBrowserView::default().render().lines().count(), 1);
}
