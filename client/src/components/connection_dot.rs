//! Live/offline indicator for a feed connection.

#[cfg(test)]
#[path = "connection_dot_test.rs"]
mod connection_dot_test;

use feed::ConnectionStatus;
use leptos::prelude::*;

#[component]
pub fn ConnectionDot(#[prop(into)] status: Signal<ConnectionStatus>) -> impl IntoView {
    view! {
        <span
            class=move || connection_status_class(status.get())
            title=move || connection_status_label(status.get())
        ></span>
    }
}

fn connection_status_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "live-dot live-dot--connected",
        ConnectionStatus::Connecting => "live-dot live-dot--connecting",
        ConnectionStatus::Disconnected => "live-dot live-dot--disconnected",
    }
}

fn connection_status_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "Live",
        ConnectionStatus::Connecting => "Connecting…",
        ConnectionStatus::Disconnected => "Offline, reconnecting",
    }
}
