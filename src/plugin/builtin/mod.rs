//! Built-in engine plugins

use engine_plugin::PluginCatalog;

pub mod history;
pub mod job_executor;


pub use history::{HistoryLevel, HistoryPlugin};
pub use job_executor::JobExecutorPlugin;

/// Abstract supertype of every built-in plugin
pub const ABSTRACT_ENGINE_PLUGIN: &str = "engine.plugin.AbstractEnginePlugin";

/// Built-in plugin loader
pub struct BuiltinPluginLoader;

impl BuiltinPluginLoader {
    /// Register the built-in plugin types with a catalog
    pub fn load_builtin_plugins(catalog: &mut PluginCatalog) {
        catalog.register_abstract(ABSTRACT_ENGINE_PLUGIN);
        catalog.register_type::<JobExecutorPlugin>();
        catalog.register_type::<HistoryPlugin>();
    }

    /// A catalog holding only the built-in plugin types
    pub fn builtin_catalog() -> PluginCatalog {
        let mut catalog = PluginCatalog::new();
        Self::load_builtin_plugins(&mut catalog);
        catalog
    }
}
