//! Theme preference and the app context built from it.
//!
//! The preference is a plain string in browser local storage. It is read once
//! at startup into an [`AppContext`] handed to every mounted root; nothing
//! else reads storage directly.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// Local storage key holding the theme preference.
pub const STORAGE_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored value. Missing or unrecognised values fall back to light.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Stored value and body class name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Startup context shared by all mounted roots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppContext {
    pub theme: Theme,
}

impl AppContext {
    #[must_use]
    pub fn from_stored_theme(value: Option<&str>) -> Self {
        Self { theme: Theme::from_stored(value) }
    }
}
