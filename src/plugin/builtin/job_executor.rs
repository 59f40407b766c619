//! Job executor plugin

use anyhow::Result;
use engine_plugin::{convert, BindError, EnginePlugin, EngineSettings, PluginType, ProcessEngine};
use serde_yaml::Value;
use std::any::Any;
use tracing::info;

use super::ABSTRACT_ENGINE_PLUGIN;

/// Configures the engine's job executor
#[derive(Debug, Clone, PartialEq)]
pub struct JobExecutorPlugin {
    pub enabled: bool,
    pub max_jobs_per_acquisition: i64,
    pub lock_time_in_millis: i64,
    pub core_pool_size: i64,
}

impl Default for JobExecutorPlugin {
    fn default() -> Self {
        Self {
            enabled: true,
            max_jobs_per_acquisition: 3,
            lock_time_in_millis: 300_000,
            core_pool_size: 3,
        }
    }
}

const PROPERTIES: &[&str] = &[
    "enabled",
    "maxJobsPerAcquisition",
    "lockTimeInMillis",
    "corePoolSize",
];

fn positive(value: &Value) -> Result<i64, BindError> {
    let number = convert::to_i64(value)?;
    if number <= 0 {
        return Err(BindError::Rejected(format!(
            "expected a positive integer, got {}",
            number
        )));
    }
    Ok(number)
}

impl PluginType for JobExecutorPlugin {
    const CLASS_NAME: &'static str = "engine.plugin.JobExecutorPlugin";
}

impl EnginePlugin for JobExecutorPlugin {
    fn class_name(&self) -> &str {
        Self::CLASS_NAME
    }

    fn supertypes(&self) -> &[&'static str] {
        &[ABSTRACT_ENGINE_PLUGIN]
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), BindError> {
        match name {
            "enabled" => self.enabled = convert::to_bool(value)?,
            "maxJobsPerAcquisition" => self.max_jobs_per_acquisition = positive(value)?,
            "lockTimeInMillis" => self.lock_time_in_millis = positive(value)?,
            "corePoolSize" => self.core_pool_size = positive(value)?,
            _ => return Err(BindError::UnknownProperty),
        }
        Ok(())
    }

    fn property_names(&self) -> &[&'static str] {
        PROPERTIES
    }

    fn pre_init(&mut self, settings: &mut EngineSettings) -> Result<()> {
        settings.set("jobExecutor.enabled", self.enabled);
        settings.set(
            "jobExecutor.maxJobsPerAcquisition",
            self.max_jobs_per_acquisition,
        );
        settings.set("jobExecutor.lockTimeInMillis", self.lock_time_in_millis);
        settings.set("jobExecutor.corePoolSize", self.core_pool_size);
        Ok(())
    }

    fn post_engine_build(&self, engine: &ProcessEngine) -> Result<()> {
        if self.enabled {
            info!(
                "Job executor active for engine {} with {} threads",
                engine.name, self.core_pool_size
            );
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
