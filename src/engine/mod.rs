//! Process engine configuration receiving the registered plugins

use engine_plugin::{EnginePlugin, EngineSettings, LifecyclePhase, ProcessEngine};
use thiserror::Error;
use tracing::{debug, info};

/// Engine build errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("plugin `{plugin}` failed during {phase}")]
    PluginHook {
        plugin: String,
        phase: LifecyclePhase,
        #[source]
        source: anyhow::Error,
    },
}

/// Engine configuration: settings plus the plugins that shape them
#[derive(Debug)]
pub struct EngineConfiguration {
    settings: EngineSettings,
    plugins: Vec<Box<dyn EnginePlugin>>,
}

impl EngineConfiguration {
    pub fn new(engine_name: impl Into<String>) -> Self {
        Self {
            settings: EngineSettings::new(engine_name),
            plugins: Vec::new(),
        }
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn EnginePlugin>) {
        debug!("Adding plugin to engine configuration: {}", plugin.class_name());
        self.plugins.push(plugin);
    }

    pub fn plugins(&self) -> impl Iterator<Item = &dyn EnginePlugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EngineSettings {
        &mut self.settings
    }

    /// Run plugin hooks and build the engine
    ///
    /// Hooks run in plugin order: every `pre_init`, then every `post_init`,
    /// then every `post_engine_build` against the built engine.
    pub fn build_engine(mut self) -> Result<ProcessEngine, EngineError> {
        info!("Building process engine: {}", self.settings.engine_name);

        for plugin in &mut self.plugins {
            plugin
                .pre_init(&mut self.settings)
                .map_err(|source| hook_error(plugin.as_ref(), LifecyclePhase::PreInit, source))?;
        }

        for plugin in &mut self.plugins {
            plugin
                .post_init(&mut self.settings)
                .map_err(|source| hook_error(plugin.as_ref(), LifecyclePhase::PostInit, source))?;
        }

        let engine = ProcessEngine::from(self.settings);

        for plugin in &self.plugins {
            plugin.post_engine_build(&engine).map_err(|source| {
                hook_error(plugin.as_ref(), LifecyclePhase::PostEngineBuild, source)
            })?;
        }

        info!(
            "Process engine {} built with {} properties",
            engine.name,
            engine.properties.len()
        );
        Ok(engine)
    }
}

fn hook_error(
    plugin: &dyn EnginePlugin,
    phase: LifecyclePhase,
    source: anyhow::Error,
) -> EngineError {
    EngineError::PluginHook {
        plugin: plugin.class_name().to_string(),
        phase,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{CompositePlugin, HistoryPlugin, JobExecutorPlugin};
    use serde_yaml::Value;

    #[test]
    fn test_build_engine_runs_plugin_hooks() {
        let mut configuration = EngineConfiguration::new("orders");
        configuration.add_plugin(Box::new(CompositePlugin::new(vec![
            Box::new(JobExecutorPlugin::default()),
            Box::new(HistoryPlugin::default()),
        ])));
        assert_eq!(configuration.plugins().count(), 1);

        let engine = configuration.build_engine().unwrap();
        assert_eq!(engine.name, "orders");
        assert_eq!(
            engine.properties.get("history.level"),
            Some(&Value::String("full".to_string()))
        );
        assert_eq!(
            engine.properties.get("jobExecutor.corePoolSize"),
            Some(&Value::from(3))
        );
    }

    #[test]
    fn test_hook_failure_names_plugin_and_phase() {
        let mut configuration = EngineConfiguration::new("orders");
        configuration.add_plugin(Box::new(HistoryPlugin {
            enforce_history_time_to_live: true,
            ..HistoryPlugin::default()
        }));

        let err = configuration.build_engine().unwrap_err();
        assert_eq!(
            err.to_string(),
            "plugin `engine.plugin.HistoryPlugin` failed during pre-init"
        );
    }

    #[test]
    fn test_settings_written_before_build_are_kept() {
        let mut configuration = EngineConfiguration::new("orders");
        configuration.settings_mut().set("tenant", "acme");

        let engine = configuration.build_engine().unwrap();
        assert_eq!(
            engine.properties.get("tenant"),
            Some(&Value::String("acme".to_string()))
        );
    }
}
