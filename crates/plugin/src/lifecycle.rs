//! Engine state visible to plugin lifecycle hooks

use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Mutable engine settings handed to `pre_init` and `post_init`
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineSettings {
    /// Engine name
    pub engine_name: String,

    /// Engine properties written by plugins
    pub properties: BTreeMap<String, Value>,
}

impl EngineSettings {
    pub fn new(engine_name: impl Into<String>) -> Self {
        Self {
            engine_name: engine_name.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// A built engine, visible to `post_engine_build`
#[derive(Debug, Clone, Serialize)]
pub struct ProcessEngine {
    pub name: String,
    pub properties: BTreeMap<String, Value>,
}

impl From<EngineSettings> for ProcessEngine {
    fn from(settings: EngineSettings) -> Self {
        Self {
            name: settings.engine_name,
            properties: settings.properties,
        }
    }
}

/// Lifecycle phase, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    PreInit,
    PostInit,
    PostEngineBuild,
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecyclePhase::PreInit => write!(f, "pre-init"),
            LifecyclePhase::PostInit => write!(f, "post-init"),
            LifecyclePhase::PostEngineBuild => write!(f, "post-engine-build"),
        }
    }
}
