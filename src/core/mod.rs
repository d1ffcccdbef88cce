//! Core module
//!
//! Application data layout, volumes, versions, terminal and analytics.

pub mod analytics;
pub mod layout;
pub mod terminal;
pub mod version;
pub mod volume;
