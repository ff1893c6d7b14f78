//! Client-side state modules.
//!
//! DESIGN
//! ======
//! Live views wrap a `feed` view state with its connection status; request
//! driven widgets (VPN, reset buttons) keep their own small models so each
//! mounted root depends only on what it renders.

pub mod action;
pub mod live;
pub mod vpn;
