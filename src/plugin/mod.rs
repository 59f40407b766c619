//! Plugin registration for the process engine

pub mod builtin;
pub mod registrar;

pub use builtin::{BuiltinPluginLoader, HistoryLevel, HistoryPlugin, JobExecutorPlugin};
pub use registrar::{
    BindingSummary, Outcome, PluginRegistrar, RegisteredPlugin, Registration, RegistrationError,
    RegistrationFailure, RegistrationReport, Resolution,
};

pub use engine_plugin::{
    CompositePlugin, EnginePlugin, KnownPlugins, PluginCatalog, PluginFactory, PluginType,
};
