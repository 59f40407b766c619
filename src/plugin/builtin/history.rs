//! History plugin

use anyhow::{anyhow, Result};
use engine_plugin::{convert, BindError, EnginePlugin, EngineSettings, PluginType};
use serde_yaml::Value;
use std::any::Any;
use std::fmt;
use std::str::FromStr;

use super::ABSTRACT_ENGINE_PLUGIN;

/// Amount of history the engine records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryLevel {
    None,
    Activity,
    Audit,
    #[default]
    Full,
}

impl FromStr for HistoryLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(HistoryLevel::None),
            "activity" => Ok(HistoryLevel::Activity),
            "audit" => Ok(HistoryLevel::Audit),
            "full" => Ok(HistoryLevel::Full),
            other => Err(format!("unknown history level: {}", other)),
        }
    }
}

impl fmt::Display for HistoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryLevel::None => write!(f, "none"),
            HistoryLevel::Activity => write!(f, "activity"),
            HistoryLevel::Audit => write!(f, "audit"),
            HistoryLevel::Full => write!(f, "full"),
        }
    }
}

/// Configures history recording and its time to live
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryPlugin {
    pub history_level: HistoryLevel,
    pub history_time_to_live: Option<String>,
    pub enforce_history_time_to_live: bool,
}

const PROPERTIES: &[&str] = &[
    "historyLevel",
    "historyTimeToLive",
    "enforceHistoryTimeToLive",
];

impl PluginType for HistoryPlugin {
    const CLASS_NAME: &'static str = "engine.plugin.HistoryPlugin";
}

impl EnginePlugin for HistoryPlugin {
    fn class_name(&self) -> &str {
        Self::CLASS_NAME
    }

    fn supertypes(&self) -> &[&'static str] {
        &[ABSTRACT_ENGINE_PLUGIN]
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), BindError> {
        match name {
            "historyLevel" => self.history_level = convert::to_enum(value, "history level")?,
            "historyTimeToLive" => {
                self.history_time_to_live = match value {
                    Value::Null => None,
                    other => Some(convert::to_string(other)?),
                }
            }
            "enforceHistoryTimeToLive" => {
                self.enforce_history_time_to_live = convert::to_bool(value)?
            }
            _ => return Err(BindError::UnknownProperty),
        }
        Ok(())
    }

    fn property_names(&self) -> &[&'static str] {
        PROPERTIES
    }

    fn pre_init(&mut self, settings: &mut EngineSettings) -> Result<()> {
        if self.enforce_history_time_to_live
            && self.history_level != HistoryLevel::None
            && self.history_time_to_live.is_none()
        {
            return Err(anyhow!(
                "historyTimeToLive must be set when enforceHistoryTimeToLive is enabled"
            ));
        }

        settings.set("history.level", self.history_level.to_string());
        if let Some(ttl) = &self.history_time_to_live {
            settings.set("history.timeToLive", ttl.as_str());
        }
        settings.set(
            "history.enforceTimeToLive",
            self.enforce_history_time_to_live,
        );
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
