//! Networking modules for the REST endpoints and the live feeds.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps the JSON `POST` endpoints (flag verification and team
//! management); `feed_client` runs the reconnecting websocket loop that keeps a
//! live view up to date.

pub mod api;
pub mod feed_client;
