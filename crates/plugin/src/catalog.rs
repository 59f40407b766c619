//! Plugin catalog mapping class names to type definitions

use std::collections::HashMap;

use tracing::debug;

use crate::error::{PluginResolutionError, ResolutionCause};
use crate::{DefaultFactory, PluginFactory, PluginType};

/// What a class name resolves to
pub enum TypeDefinition {
    /// A concrete plugin type with a factory
    Plugin(Box<dyn PluginFactory>),

    /// A plugin supertype that can be matched but not constructed
    Abstract,

    /// A known type that does not implement the plugin capability
    Foreign,
}

impl std::fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeDefinition::Plugin(factory) => {
                f.debug_tuple("Plugin").field(&factory.class_name()).finish()
            }
            TypeDefinition::Abstract => write!(f, "Abstract"),
            TypeDefinition::Foreign => write!(f, "Foreign"),
        }
    }
}

/// A class name that resolved to a plugin type
#[derive(Clone, Copy)]
pub enum Resolved<'a> {
    Concrete(&'a dyn PluginFactory),
    Abstract,
}

/// Plugin catalog, the set of loadable types keyed by class name
#[derive(Debug, Default)]
pub struct PluginCatalog {
    types: HashMap<String, TypeDefinition>,
}

impl PluginCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin factory under its class name
    pub fn register_factory(&mut self, factory: Box<dyn PluginFactory>) {
        let class_name = factory.class_name().to_string();
        debug!("Registering plugin factory: {}", class_name);
        self.types
            .insert(class_name, TypeDefinition::Plugin(factory));
    }

    /// Register a plugin type constructed through `Default`
    pub fn register_type<T: PluginType>(&mut self) {
        self.register_factory(Box::new(DefaultFactory::<T>::new()));
    }

    /// Register an abstract plugin supertype
    pub fn register_abstract(&mut self, class_name: impl Into<String>) {
        self.types
            .insert(class_name.into(), TypeDefinition::Abstract);
    }

    /// Register a name that is loadable but is not a plugin
    pub fn register_foreign(&mut self, class_name: impl Into<String>) {
        self.types.insert(class_name.into(), TypeDefinition::Foreign);
    }

    pub fn get(&self, class_name: &str) -> Option<&TypeDefinition> {
        self.types.get(class_name)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.types.contains_key(class_name)
    }

    /// Resolve a class name to a plugin type
    pub fn resolve(&self, class_name: &str) -> Result<Resolved<'_>, PluginResolutionError> {
        match self.types.get(class_name) {
            Some(TypeDefinition::Plugin(factory)) => Ok(Resolved::Concrete(factory.as_ref())),
            Some(TypeDefinition::Abstract) => Ok(Resolved::Abstract),
            Some(TypeDefinition::Foreign) => Err(PluginResolutionError::new(
                class_name,
                ResolutionCause::NotAPlugin,
            )),
            None => Err(PluginResolutionError::new(
                class_name,
                ResolutionCause::ClassNotFound,
            )),
        }
    }

    /// Class names of concrete plugin types, sorted
    pub fn plugin_class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .types
            .iter()
            .filter(|(_, def)| matches!(def, TypeDefinition::Plugin(_)))
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// All registered class names, sorted
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(|name| name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CounterPlugin;

    fn catalog() -> PluginCatalog {
        let mut catalog = PluginCatalog::new();
        catalog.register_type::<CounterPlugin>();
        catalog.register_abstract("test.AbstractPlugin");
        catalog.register_foreign("test.NotAPlugin");
        catalog
    }

    #[test]
    fn test_resolve_concrete() {
        let catalog = catalog();
        match catalog.resolve("test.CounterPlugin").unwrap() {
            Resolved::Concrete(factory) => assert_eq!(factory.class_name(), "test.CounterPlugin"),
            Resolved::Abstract => panic!("expected a concrete type"),
        }
    }

    #[test]
    fn test_resolve_abstract() {
        let catalog = catalog();
        assert!(matches!(
            catalog.resolve("test.AbstractPlugin").unwrap(),
            Resolved::Abstract
        ));
    }

    #[test]
    fn test_resolve_errors() {
        let catalog = catalog();

        let err = catalog.resolve("test.Missing").err().unwrap();
        assert_eq!(err.class_name, "test.Missing");
        assert!(matches!(err.cause, ResolutionCause::ClassNotFound));

        let err = catalog.resolve("test.NotAPlugin").err().unwrap();
        assert!(matches!(err.cause, ResolutionCause::NotAPlugin));
    }

    #[test]
    fn test_class_name_listings() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.plugin_class_names(), vec!["test.CounterPlugin"]);
        assert_eq!(
            catalog.class_names(),
            vec!["test.AbstractPlugin", "test.CounterPlugin", "test.NotAPlugin"]
        );
    }
}
