//! Error types for plugin resolution and property binding

use thiserror::Error;

/// Boxed error returned by plugin factories
pub type FactoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A plugin class name could not be turned into a plugin instance
#[derive(Debug, Error)]
#[error("failed to resolve plugin `{class_name}`")]
pub struct PluginResolutionError {
    /// Class name as written in the configuration
    pub class_name: String,

    /// Why resolution failed
    #[source]
    pub cause: ResolutionCause,
}

impl PluginResolutionError {
    pub fn new(class_name: impl Into<String>, cause: ResolutionCause) -> Self {
        Self {
            class_name: class_name.into(),
            cause,
        }
    }
}

/// Underlying cause of a [`PluginResolutionError`]
#[derive(Debug, Error)]
pub enum ResolutionCause {
    /// The catalog has no type under this name
    #[error("class not found in plugin catalog")]
    ClassNotFound,

    /// The name resolves to a type that is not an engine plugin
    #[error("type is not an engine plugin")]
    NotAPlugin,

    /// The name resolves to an abstract plugin type and no instance exists yet
    #[error("type is abstract and has no existing instance")]
    NotInstantiable,

    /// The factory returned an instance of an unrelated type
    #[error("factory produced `{produced}`, which is not an instance of the requested type")]
    TypeMismatch { produced: String },

    /// The factory itself failed
    #[error("construction failed: {0}")]
    ConstructionFailed(#[source] FactoryError),
}

/// Failure reported by [`crate::EnginePlugin::set_property`]
#[derive(Debug, Error)]
pub enum BindError {
    /// The plugin has no writable property with this name
    #[error("no writable property with this name")]
    UnknownProperty,

    /// The value cannot be converted to the declared property type
    #[error("cannot convert {found} to {expected}")]
    Conversion { expected: &'static str, found: String },

    /// The plugin accepted the type but refused the value
    #[error("value rejected: {0}")]
    Rejected(String),
}

impl BindError {
    pub fn is_unknown_property(&self) -> bool {
        matches!(self, BindError::UnknownProperty)
    }
}

/// A configured property could not be applied to a plugin instance
#[derive(Debug, Error)]
#[error("failed to bind property `{property}` on plugin `{class_name}`")]
pub struct PropertyBindingError {
    /// Class name of the target instance
    pub class_name: String,

    /// Offending property name
    pub property: String,

    #[source]
    pub cause: BindError,
}
