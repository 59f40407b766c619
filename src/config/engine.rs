//! Engine configuration

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name of the process engine
    #[serde(default = "default_engine_name")]
    pub name: String,
}

fn default_engine_name() -> String {
    "default".to_string()
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("Engine name cannot be empty"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_engine_name(),
        }
    }
}
