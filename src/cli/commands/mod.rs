//! CLI command modules

pub mod info;
pub mod plugins;
pub mod start;
pub mod validate;
