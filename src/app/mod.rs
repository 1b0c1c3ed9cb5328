//! Application state and event plumbing.

pub mod du_runtime;
pub mod event;
pub mod handler;
pub mod settings;
pub mod state;
