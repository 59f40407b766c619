//! Configuration tests

use super::*;
use serde_yaml::Value;
use tempfile::NamedTempFile;

const PLUGINS_YAML: &str = r#"
version: "1.0"
engine:
  name: orders
binding: lenient
seed:
  - engine.plugin.JobExecutorPlugin
plugins:
  test.TestFirstPlugin:
    parameterOne: valueOne
    parameterTwo: true
  test.TestSecondPlugin:
    parameterOne: 1.222
    parameterTwo: false
    parameterThree: 123
"#;

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(config.version, parsed.version);
    assert_eq!(parsed.engine.name, "default");
    assert!(parsed.plugins.is_empty());
}

#[test]
fn test_picks_up_all_plugin_configurations() {
    let config = Config::from_yaml(PLUGINS_YAML).unwrap();

    assert_eq!(config.engine.name, "orders");
    assert_eq!(config.binding, BindingMode::Lenient);
    assert_eq!(config.seed, vec!["engine.plugin.JobExecutorPlugin"]);
    assert_eq!(config.plugins.len(), 2);
    assert_eq!(config.plugins[0].class_name, "test.TestFirstPlugin");
    assert_eq!(config.plugins[1].class_name, "test.TestSecondPlugin");

    let first = config.plugin("test.TestFirstPlugin").unwrap();
    assert_eq!(first.properties.len(), 2);
    assert_eq!(
        first.property("parameterOne"),
        Some(&Value::String("valueOne".to_string()))
    );
    assert_eq!(first.property("parameterTwo"), Some(&Value::Bool(true)));

    let second = config.plugin("test.TestSecondPlugin").unwrap();
    assert_eq!(second.properties.len(), 3);
    assert_eq!(second.property("parameterOne"), Some(&Value::from(1.222)));
    assert_eq!(second.property("parameterTwo"), Some(&Value::Bool(false)));
    assert_eq!(second.property("parameterThree"), Some(&Value::from(123)));
}

#[test]
fn test_config_from_file() {
    let mut config = Config::default();
    config.plugins.push(
        PluginDescriptor::new("engine.plugin.HistoryPlugin")
            .with_property("historyLevel", "audit")
            .with_property("enforceHistoryTimeToLive", false),
    );
    config
        .plugins
        .push(PluginDescriptor::new("engine.plugin.JobExecutorPlugin"));

    let temp_file = NamedTempFile::new().unwrap();
    config.save_to_file(temp_file.path()).unwrap();

    let loaded = Config::from_file(temp_file.path()).unwrap();
    assert_eq!(loaded.version, config.version);
    assert_eq!(loaded.plugins, config.plugins);
}

#[test]
fn test_missing_file_names_path() {
    let err = Config::from_file(std::path::Path::new("/nonexistent/engine-run.yaml")).unwrap_err();
    assert!(err.to_string().contains("engine-run.yaml"));
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.version = "2.0".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.engine.name = " ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.plugins.push(PluginDescriptor::new(""));
    assert!(config.validate().is_err());
}

#[test]
fn test_duplicate_plugin_entries_are_rejected() {
    let yaml = r#"
version: "1.0"
plugins:
  a.Plugin: {}
  a.Plugin: {}
"#;
    assert!(Config::from_yaml(yaml).is_err());
}
