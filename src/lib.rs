//! kiteutil library root
//!
//! Helpers shared by the container image manager: per-user paths,
//! directory copy/delete, verified downloads, version comparison and
//! link tracking.

pub mod config;
pub mod core;
pub mod util;

pub use config::Config;
