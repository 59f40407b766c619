//! Common plugin infrastructure for engine-run
//!
//! Engine plugins are ordinary Rust types behind the [`EnginePlugin`] trait.
//! A [`PluginCatalog`] maps configured class names to factories, and each
//! plugin binds its own properties through [`EnginePlugin::set_property`].

use anyhow::Result;
use serde_yaml::Value;
use std::any::Any;
use std::fmt::Debug;
use std::marker::PhantomData;

pub mod catalog;
pub mod composite;
pub mod convert;
pub mod error;
pub mod known;
pub mod lifecycle;

pub use catalog::{PluginCatalog, Resolved, TypeDefinition};
pub use composite::CompositePlugin;
pub use error::{
    BindError, FactoryError, PluginResolutionError, PropertyBindingError, ResolutionCause,
};
pub use known::KnownPlugins;
pub use lifecycle::{EngineSettings, LifecyclePhase, ProcessEngine};

/// Plugin trait that all engine plugins must implement
pub trait EnginePlugin: Any + Debug + Send + Sync {
    /// Class name this plugin is registered under
    fn class_name(&self) -> &str;

    /// Names of abstract plugin types this plugin extends
    fn supertypes(&self) -> &[&'static str] {
        &[]
    }

    /// Whether this instance is of the named type or one of its subtypes
    fn is_instance_of(&self, class_name: &str) -> bool {
        self.class_name() == class_name || self.supertypes().iter().any(|s| *s == class_name)
    }

    /// Assign a single configured property
    ///
    /// Names match case-sensitively. Implementations convert the value to the
    /// property's type with the [`convert`] helpers and return
    /// [`BindError::UnknownProperty`] for names they do not declare.
    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), BindError>;

    /// Writable property names, for listings
    fn property_names(&self) -> &[&'static str] {
        &[]
    }

    /// Called before the engine configuration is initialized
    fn pre_init(&mut self, _settings: &mut EngineSettings) -> Result<()> {
        Ok(())
    }

    /// Called after the engine configuration is initialized
    fn post_init(&mut self, _settings: &mut EngineSettings) -> Result<()> {
        Ok(())
    }

    /// Called once the engine has been built
    fn post_engine_build(&self, _engine: &ProcessEngine) -> Result<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;
}

impl dyn EnginePlugin {
    /// Downcast to a concrete plugin type
    pub fn downcast_ref<T: EnginePlugin>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// A plugin type with a fixed class name and a default constructor
pub trait PluginType: EnginePlugin + Default {
    const CLASS_NAME: &'static str;
}

/// Plugin factory trait for creating plugins
pub trait PluginFactory: Send + Sync {
    /// Class name of the plugins this factory creates
    fn class_name(&self) -> &str;

    /// Create a new default-constructed plugin instance
    fn create(&self) -> Result<Box<dyn EnginePlugin>>;
}

/// Factory for any [`PluginType`], using its `Default` implementation
pub struct DefaultFactory<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: PluginType> DefaultFactory<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: PluginType> Default for DefaultFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PluginType> PluginFactory for DefaultFactory<T> {
    fn class_name(&self) -> &str {
        T::CLASS_NAME
    }

    fn create(&self) -> Result<Box<dyn EnginePlugin>> {
        Ok(Box::new(T::default()))
    }
}

/// Factory backed by a closure
pub struct FnFactory<F> {
    class_name: String,
    constructor: F,
}

impl<F> FnFactory<F>
where
    F: Fn() -> Result<Box<dyn EnginePlugin>> + Send + Sync,
{
    pub fn new(class_name: impl Into<String>, constructor: F) -> Self {
        Self {
            class_name: class_name.into(),
            constructor,
        }
    }
}

impl<F> PluginFactory for FnFactory<F>
where
    F: Fn() -> Result<Box<dyn EnginePlugin>> + Send + Sync,
{
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn create(&self) -> Result<Box<dyn EnginePlugin>> {
        (self.constructor)()
    }
}
