//! CLI command implementations

pub mod fetch;
pub mod trace;
pub mod version;
