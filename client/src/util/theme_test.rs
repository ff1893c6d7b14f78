#![cfg(not(feature = "csr"))]

use super::*;

#[test]
fn read_context_defaults_to_light_outside_browser() {
    assert_eq!(read_context().theme, Theme::Light);
}

#[test]
fn toggle_flips_theme() {
    assert_eq!(toggle(Theme::Light), Theme::Dark);
    assert_eq!(toggle(Theme::Dark), Theme::Light);
}

#[test]
fn apply_is_noop_but_callable() {
    apply(Theme::Light);
    apply(Theme::Dark);
}
