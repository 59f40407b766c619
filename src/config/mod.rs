//! Configuration management for engine-run

pub mod config;
pub mod engine;
pub mod plugins;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use config::{Config, CONFIG_VERSION};
pub use engine::EngineConfig;
pub use plugins::{descriptor_map, BindingMode, PluginDescriptor};
