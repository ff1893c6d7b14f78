//! Browser glue and small formatting helpers shared by components.

pub mod format;
pub mod markdown;
pub mod theme;
