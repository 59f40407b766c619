//! Plugin descriptors and property binding settings

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// How unknown property names are treated during binding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingMode {
    /// Unknown properties are a configuration error
    #[default]
    Strict,

    /// Unknown properties are skipped
    Lenient,
}

/// A configured plugin: its class name and the properties to apply to it
#[derive(Debug, Clone, PartialEq)]
pub struct PluginDescriptor {
    /// Class name the plugin type is registered under
    pub class_name: String,

    /// Property values in document order
    pub properties: Vec<(String, Value)>,
}

impl PluginDescriptor {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            properties: Vec::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Build a descriptor from one entry of the `plugins` mapping
    pub fn from_entry(key: Value, value: Value) -> Result<Self> {
        let class_name = match key {
            Value::String(name) => name,
            other => {
                return Err(anyhow!(
                    "Plugin class name must be a string, found {}",
                    engine_plugin::convert::describe(&other)
                ))
            }
        };

        let properties = match value {
            Value::Null => Vec::new(),
            Value::Mapping(mapping) => {
                let mut properties = Vec::with_capacity(mapping.len());
                for (name, value) in mapping {
                    match name {
                        Value::String(name) => properties.push((name, value)),
                        other => {
                            return Err(anyhow!(
                                "Property names of plugin `{}` must be strings, found {}",
                                class_name,
                                engine_plugin::convert::describe(&other)
                            ))
                        }
                    }
                }
                properties
            }
            other => {
                return Err(anyhow!(
                    "Properties of plugin `{}` must be a mapping, found {}",
                    class_name,
                    engine_plugin::convert::describe(&other)
                ))
            }
        };

        Ok(Self {
            class_name,
            properties,
        })
    }

    fn to_entry(&self) -> (Value, Value) {
        let mut mapping = Mapping::new();
        for (name, value) in &self.properties {
            mapping.insert(Value::String(name.clone()), value.clone());
        }
        (Value::String(self.class_name.clone()), Value::Mapping(mapping))
    }

    pub fn validate(&self) -> Result<()> {
        if self.class_name.trim().is_empty() {
            return Err(anyhow!("Plugin class name cannot be empty"));
        }

        if self.properties.iter().any(|(name, _)| name.trim().is_empty()) {
            return Err(anyhow!(
                "Plugin `{}` has an empty property name",
                self.class_name
            ));
        }

        Ok(())
    }
}

/// Serde adapter storing descriptors as an ordered `class name -> properties` mapping
pub mod descriptor_map {
    use super::PluginDescriptor;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_yaml::Mapping;

    pub fn serialize<S: Serializer>(
        descriptors: &[PluginDescriptor],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mapping: Mapping = descriptors.iter().map(PluginDescriptor::to_entry).collect();
        mapping.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<PluginDescriptor>, D::Error> {
        let mapping = Option::<Mapping>::deserialize(deserializer)?.unwrap_or_default();
        mapping
            .into_iter()
            .map(|(key, value)| PluginDescriptor::from_entry(key, value))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| D::Error::custom(format!("{:#}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_entry_keeps_order() {
        let value: Value = serde_yaml::from_str("{ b: 1, a: two, c: true }").unwrap();
        let descriptor =
            PluginDescriptor::from_entry(Value::String("x.Plugin".to_string()), value).unwrap();

        let names: Vec<_> = descriptor.properties.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(descriptor.property("c"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_null_properties_are_empty() {
        let descriptor =
            PluginDescriptor::from_entry(Value::String("x.Plugin".to_string()), Value::Null)
                .unwrap();
        assert!(descriptor.properties.is_empty());
    }

    #[test]
    fn test_non_mapping_properties_are_rejected() {
        let err = PluginDescriptor::from_entry(
            Value::String("x.Plugin".to_string()),
            Value::String("oops".to_string()),
        )
        .unwrap_err();
        assert!(err.to_string().contains("x.Plugin"));
    }

    #[test]
    fn test_binding_mode_names() {
        let mode: BindingMode = serde_yaml::from_str("lenient").unwrap();
        assert_eq!(mode, BindingMode::Lenient);
        assert_eq!(BindingMode::default(), BindingMode::Strict);
    }
}
