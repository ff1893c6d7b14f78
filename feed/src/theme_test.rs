use super::*;

#[test]
fn from_stored_reads_dark() {
    assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
    assert_eq!(Theme::from_stored(Some(" dark ")), Theme::Dark);
}

#[test]
fn from_stored_falls_back_to_light() {
    assert_eq!(Theme::from_stored(None), Theme::Light);
    assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
    assert_eq!(Theme::from_stored(Some("solarized")), Theme::Light);
}

#[test]
fn as_str_round_trips_through_storage() {
    for theme in [Theme::Light, Theme::Dark] {
        assert_eq!(Theme::from_stored(Some(theme.as_str())), theme);
    }
}

#[test]
fn toggled_flips_theme() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
}

#[test]
fn app_context_is_built_from_storage_value() {
    assert_eq!(AppContext::from_stored_theme(Some("dark")).theme, Theme::Dark);
    assert_eq!(AppContext::default().theme, Theme::Light);
}
