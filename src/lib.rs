//! Engine Run Library
//!
//! Registers process engine plugins named in a YAML run configuration,
//! merging them with plugins the host already provides, and hands the result
//! to the engine configuration as a single composite plugin.

pub mod cli;
pub mod config;
pub mod engine;
pub mod plugin;

pub use config::{BindingMode, Config, PluginDescriptor};
pub use engine::{EngineConfiguration, EngineError};
pub use plugin::{
    BuiltinPluginLoader, CompositePlugin, KnownPlugins, PluginCatalog, PluginRegistrar,
    Registration, RegistrationFailure, RegistrationReport,
};

use engine_plugin::{PluginResolutionError, ProcessEngine, Resolved};
use serde::Serialize;
use tracing::{error, info, warn};

/// Main application context that coordinates all components
pub struct EngineRun {
    config: Config,
    catalog: PluginCatalog,
}

impl EngineRun {
    /// Create a new instance with the built-in plugin catalog
    pub fn new(config: Config) -> Self {
        Self::with_catalog(config, BuiltinPluginLoader::builtin_catalog())
    }

    /// Create a new instance with a caller-provided catalog
    pub fn with_catalog(config: Config, catalog: PluginCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &PluginCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut PluginCatalog {
        &mut self.catalog
    }

    /// Registrar using the configured binding mode
    pub fn registrar(&self) -> PluginRegistrar<'_> {
        PluginRegistrar::new(&self.catalog).with_mode(self.config.binding)
    }

    /// Instantiate the host-provided plugins listed under `seed`
    pub fn seed_plugins(&self) -> Result<KnownPlugins, PluginResolutionError> {
        let registrar = self.registrar();
        let mut known = KnownPlugins::new();

        for class_name in &self.config.seed {
            if let Err(e) = registrar.resolve_or_create(&mut known, class_name) {
                error!(
                    "Failed to seed process engine plugin {}: {}",
                    class_name,
                    plugin::registrar::error_chain(&e)
                );
                return Err(e);
            }
        }

        Ok(known)
    }

    /// Register the configured plugins on top of `known`
    pub fn register_plugins(
        &self,
        known: KnownPlugins,
    ) -> Result<Registration, RegistrationFailure> {
        info!(
            "Registering {} configured process engine plugins",
            self.config.plugins.len()
        );
        self.registrar().register_all(known, &self.config.plugins)
    }

    /// Seed, register and wrap all plugins into an engine configuration
    pub fn engine_configuration(
        &self,
    ) -> EngineRunResult<(EngineConfiguration, RegistrationReport)> {
        let known = self.seed_plugins()?;
        let Registration { plugins, report } = self.register_plugins(known)?;

        let mut configuration = EngineConfiguration::new(self.config.engine.name.clone());
        configuration.add_plugin(Box::new(CompositePlugin::from(plugins)));

        Ok((configuration, report))
    }

    /// Register plugins and build the engine
    pub fn start(&self) -> EngineRunResult<StartSummary> {
        let (configuration, report) = self.engine_configuration()?;
        let engine = configuration.build_engine()?;

        info!("Process engine {} started", engine.name);
        Ok(StartSummary { engine, report })
    }

    /// Describe the plugin types in the catalog
    pub fn plugin_info(&self) -> Vec<PluginInfo> {
        self.catalog
            .class_names()
            .into_iter()
            .map(|class_name| {
                let (kind, properties, supertypes) = match self.catalog.resolve(class_name) {
                    Ok(Resolved::Concrete(factory)) => match factory.create() {
                        Ok(plugin) => (
                            PluginKind::Plugin,
                            plugin.property_names().iter().map(|s| s.to_string()).collect(),
                            plugin.supertypes().iter().map(|s| s.to_string()).collect(),
                        ),
                        Err(e) => {
                            warn!("Failed to construct plugin {}: {:#}", class_name, e);
                            (PluginKind::Broken, Vec::new(), Vec::new())
                        }
                    },
                    Ok(Resolved::Abstract) => (PluginKind::Abstract, Vec::new(), Vec::new()),
                    Err(_) => (PluginKind::Foreign, Vec::new(), Vec::new()),
                };

                PluginInfo {
                    class_name: class_name.to_string(),
                    kind,
                    properties,
                    supertypes,
                }
            })
            .collect()
    }
}

/// Engine and registration report produced by [`EngineRun::start`]
#[derive(Debug, Serialize)]
pub struct StartSummary {
    pub engine: ProcessEngine,
    pub report: RegistrationReport,
}

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    Plugin,
    /// Plugin whose factory fails to construct an instance
    Broken,
    Abstract,
    Foreign,
}

/// Catalog entry description
#[derive(Debug, Clone, Serialize)]
pub struct PluginInfo {
    pub class_name: String,
    pub kind: PluginKind,
    pub properties: Vec<String>,
    pub supertypes: Vec<String>,
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum EngineRunError {
    #[error("Plugin seeding failed")]
    Resolution(#[from] PluginResolutionError),

    #[error("Plugin registration failed")]
    Registration(#[from] RegistrationFailure),

    #[error("Engine build failed")]
    Engine(#[from] EngineError),
}

/// Result type for the main application
pub type EngineRunResult<T> = Result<T, EngineRunError>;
