//! UI components, one per mount point plus shared widgets.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page-level component owns its state signals and, for live pages, the
//! feed handle that keeps them current. Shared pieces (flag form, connection
//! dot) read only what they are given.

pub mod challenges_page;
pub mod connection_dot;
pub mod flag_checker;
pub mod index_page;
pub mod reset_frontend;
pub mod scoreboard;
pub mod teams_page;
pub mod vpn_dropdown;
