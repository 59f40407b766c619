//! Main configuration structure and implementation

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{descriptor_map, BindingMode, EngineConfig, PluginDescriptor};

/// Supported configuration version
pub const CONFIG_VERSION: &str = "1.0";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// How unknown plugin properties are handled
    #[serde(default)]
    pub binding: BindingMode,

    /// Plugins the host provides before configured plugins are registered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seed: Vec<String>,

    /// Configured plugins, in document order
    #[serde(default, with = "descriptor_map")]
    pub plugins: Vec<PluginDescriptor>,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read configuration {:?}: {}", path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        self.engine.validate()?;

        if self.seed.iter().any(|name| name.trim().is_empty()) {
            return Err(anyhow!("Seed plugin class names cannot be empty"));
        }

        for descriptor in &self.plugins {
            descriptor.validate()?;
        }

        Ok(())
    }

    /// Find the descriptor for a class name
    pub fn plugin(&self, class_name: &str) -> Option<&PluginDescriptor> {
        self.plugins
            .iter()
            .find(|descriptor| descriptor.class_name == class_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            engine: EngineConfig::default(),
            binding: BindingMode::default(),
            seed: Vec::new(),
            plugins: Vec::new(),
        }
    }
}
