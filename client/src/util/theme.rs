//! Theme preference persistence.
//!
//! Reads the stored preference from `localStorage` once at startup and applies
//! it as a class on `<body>`. Toggling writes the new value back. Requires a
//! browser environment; outside of it every call is a no-op.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[cfg(feature = "csr")]
use feed::theme::STORAGE_KEY;
use feed::{AppContext, Theme};

/// Build the app context from the stored theme preference.
pub fn read_context() -> AppContext {
    #[cfg(feature = "csr")]
    {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
        AppContext::from_stored_theme(stored.as_deref())
    }
    #[cfg(not(feature = "csr"))]
    {
        AppContext::default()
    }
}

/// Set the body class for `theme`, removing the other one.
pub fn apply(theme: Theme) {
    #[cfg(feature = "csr")]
    {
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            let class_list = body.class_list();
            let _ = class_list.remove_1(theme.toggled().as_str());
            let _ = class_list.add_1(theme.as_str());
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = theme;
    }
}

/// Flip the theme, apply it and persist it. Returns the new theme.
pub fn toggle(current: Theme) -> Theme {
    let next = current.toggled();
    apply(next);
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(STORAGE_KEY, next.as_str());
        }
    }
    next
}
