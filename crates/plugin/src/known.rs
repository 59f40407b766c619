//! The ordered list of plugin instances known to the engine

use std::ops::{Index, IndexMut};

use crate::EnginePlugin;

/// Known plugin instances, in registration order
///
/// Holds at most one instance per concrete type once registration has run.
#[derive(Debug, Default)]
pub struct KnownPlugins {
    plugins: Vec<Box<dyn EnginePlugin>>,
}

impl KnownPlugins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first instance of the named type or one of its subtypes
    pub fn position_of(&self, class_name: &str) -> Option<usize> {
        self.plugins
            .iter()
            .position(|plugin| plugin.is_instance_of(class_name))
    }

    pub fn find(&self, class_name: &str) -> Option<&dyn EnginePlugin> {
        self.position_of(class_name).map(|index| self.plugins[index].as_ref())
    }

    /// Append an instance, returning its index
    pub fn push(&mut self, plugin: Box<dyn EnginePlugin>) -> usize {
        self.plugins.push(plugin);
        self.plugins.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&dyn EnginePlugin> {
        self.plugins.get(index).map(|plugin| plugin.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn EnginePlugin + 'static)> {
        self.plugins.get_mut(index).map(|plugin| plugin.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn EnginePlugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    pub fn class_names(&self) -> Vec<&str> {
        self.iter().map(|plugin| plugin.class_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn into_inner(self) -> Vec<Box<dyn EnginePlugin>> {
        self.plugins
    }
}

impl Index<usize> for KnownPlugins {
    type Output = dyn EnginePlugin;

    fn index(&self, index: usize) -> &Self::Output {
        self.plugins[index].as_ref()
    }
}

impl IndexMut<usize> for KnownPlugins {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.plugins[index].as_mut()
    }
}

impl From<Vec<Box<dyn EnginePlugin>>> for KnownPlugins {
    fn from(plugins: Vec<Box<dyn EnginePlugin>>) -> Self {
        Self { plugins }
    }
}

impl FromIterator<Box<dyn EnginePlugin>> for KnownPlugins {
    fn from_iter<I: IntoIterator<Item = Box<dyn EnginePlugin>>>(iter: I) -> Self {
        Self {
            plugins: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CounterPlugin;

    #[test]
    fn test_position_matches_subtypes() {
        let mut known = KnownPlugins::new();
        assert!(known.position_of("test.CounterPlugin").is_none());

        let index = known.push(Box::new(CounterPlugin::default()));
        assert_eq!(index, 0);
        assert_eq!(known.position_of("test.CounterPlugin"), Some(0));
        assert_eq!(known.position_of("test.AbstractPlugin"), Some(0));
        assert!(known.find("test.Other").is_none());
    }

    #[test]
    fn test_class_names_keep_order() {
        let known: KnownPlugins = vec![
            Box::new(CounterPlugin::default()) as Box<dyn EnginePlugin>,
            Box::new(CounterPlugin::default()),
        ]
        .into();

        assert_eq!(known.len(), 2);
        assert_eq!(
            known.class_names(),
            vec!["test.CounterPlugin", "test.CounterPlugin"]
        );
    }
}
