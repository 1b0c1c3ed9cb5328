//! Core data model: directory entries and the browse column.

pub mod column;
pub mod entry;
