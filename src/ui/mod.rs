//! UI widgets.

pub mod listing;
pub mod statusline;
pub mod theme;
