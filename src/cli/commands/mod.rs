//! CLI command implementations

pub mod config;
pub mod contribute;

pub use config::execute as config;
pub use contribute::execute as contribute;
