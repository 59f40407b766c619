//! Composite plugin presenting several plugins to the engine as one

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::any::Any;

use crate::{BindError, EngineSettings, EnginePlugin, KnownPlugins, ProcessEngine};

/// Wraps a list of plugins and forwards every lifecycle hook to each of them
/// in list order. The first failing plugin aborts the hook.
#[derive(Debug, Default)]
pub struct CompositePlugin {
    plugins: Vec<Box<dyn EnginePlugin>>,
}

impl CompositePlugin {
    pub const CLASS_NAME: &'static str = "engine.plugin.CompositePlugin";

    pub fn new(plugins: Vec<Box<dyn EnginePlugin>>) -> Self {
        Self { plugins }
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn EnginePlugin>) {
        self.plugins.push(plugin);
    }

    pub fn plugins(&self) -> impl Iterator<Item = &dyn EnginePlugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl From<KnownPlugins> for CompositePlugin {
    fn from(known: KnownPlugins) -> Self {
        Self::new(known.into_inner())
    }
}

impl EnginePlugin for CompositePlugin {
    fn class_name(&self) -> &str {
        Self::CLASS_NAME
    }

    fn set_property(&mut self, _name: &str, _value: &Value) -> Result<(), BindError> {
        Err(BindError::UnknownProperty)
    }

    fn pre_init(&mut self, settings: &mut EngineSettings) -> Result<()> {
        for plugin in &mut self.plugins {
            let class_name = plugin.class_name().to_string();
            plugin
                .pre_init(settings)
                .with_context(|| format!("plugin `{}` failed during pre-init", class_name))?;
        }
        Ok(())
    }

    fn post_init(&mut self, settings: &mut EngineSettings) -> Result<()> {
        for plugin in &mut self.plugins {
            let class_name = plugin.class_name().to_string();
            plugin
                .post_init(settings)
                .with_context(|| format!("plugin `{}` failed during post-init", class_name))?;
        }
        Ok(())
    }

    fn post_engine_build(&self, engine: &ProcessEngine) -> Result<()> {
        for plugin in &self.plugins {
            plugin.post_engine_build(engine).with_context(|| {
                format!(
                    "plugin `{}` failed after engine build",
                    plugin.class_name()
                )
            })?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CounterPlugin;

    #[derive(Debug, Default)]
    struct FailingPlugin;

    impl EnginePlugin for FailingPlugin {
        fn class_name(&self) -> &str {
            "test.FailingPlugin"
        }

        fn set_property(&mut self, _name: &str, _value: &Value) -> Result<(), BindError> {
            Err(BindError::UnknownProperty)
        }

        fn pre_init(&mut self, _settings: &mut EngineSettings) -> Result<()> {
            anyhow::bail!("refusing to start")
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn counter(count: i64, label: &str) -> Box<dyn EnginePlugin> {
        Box::new(CounterPlugin {
            label: Some(label.to_string()),
            count,
            hooks: Vec::new(),
        })
    }

    #[test]
    fn test_hooks_run_in_order() {
        let mut composite = CompositePlugin::new(vec![counter(1, "first"), counter(2, "second")]);
        let mut settings = EngineSettings::new("default");

        composite.pre_init(&mut settings).unwrap();
        composite.post_init(&mut settings).unwrap();

        assert_eq!(
            settings.get("counter.1"),
            Some(&Value::String("first".to_string()))
        );
        assert_eq!(
            settings.get("counter.2"),
            Some(&Value::String("second".to_string()))
        );

        for plugin in composite.plugins() {
            let counter = plugin.downcast_ref::<CounterPlugin>().unwrap();
            assert_eq!(counter.hooks, vec!["pre_init", "post_init"]);
        }
    }

    #[test]
    fn test_first_failure_aborts() {
        let mut composite = CompositePlugin::new(vec![
            counter(1, "first"),
            Box::new(FailingPlugin),
            counter(3, "third"),
        ]);
        let mut settings = EngineSettings::new("default");

        let err = composite.pre_init(&mut settings).unwrap_err();
        assert!(err.to_string().contains("test.FailingPlugin"));
        assert!(settings.get("counter.1").is_some());
        assert!(settings.get("counter.3").is_none());
    }

    #[test]
    fn test_composite_has_no_properties() {
        let mut composite = CompositePlugin::default();
        assert!(composite.is_empty());
        let err = composite
            .set_property("anything", &Value::Null)
            .unwrap_err();
        assert!(err.is_unknown_property());
    }
}
