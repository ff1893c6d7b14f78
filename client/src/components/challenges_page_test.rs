use super::*;

#[test]
fn solves_label_pluralises() {
    assert_eq!(solves_label(0), "No solves yet");
    assert_eq!(solves_label(1), "1 team solved");
    assert_eq!(solves_label(4), "4 teams solved");
}
