//! # client
//!
//! Leptos + WASM front-end for the amigo CTF pages.
//!
//! The server renders plain HTML pages; this crate mounts interactive roots
//! into whichever of the known mount elements a page contains (scoreboard,
//! challenge browser, flag checker, teams list, VPN dropdowns, ...). Live
//! views are fed by the reconnecting stream client in [`net::feed_client`].

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount every root present on the page.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    app::mount_all();
}
