//! Plugin registrar: resolves configured plugins, deduplicates them against
//! known instances and binds their properties

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use engine_plugin::{
    EnginePlugin, KnownPlugins, PluginCatalog, PluginResolutionError, PropertyBindingError,
    ResolutionCause, Resolved,
};

use crate::config::{BindingMode, PluginDescriptor};


/// Whether resolution reused a known instance or created one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Reused,
    Created,
}

/// A resolved instance in the known-plugins list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Index into the known-plugins list
    pub index: usize,
    pub outcome: Outcome,
}

/// Property names handled by a single `populate` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindingSummary {
    pub applied: Vec<String>,

    /// Unknown names skipped in lenient mode
    pub skipped: Vec<String>,
}

/// Report entry for one registered descriptor
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredPlugin {
    /// Class name from the descriptor
    pub class_name: String,

    /// Class name of the instance the properties were bound to
    pub instance_class_name: String,

    pub outcome: Outcome,

    #[serde(flatten)]
    pub binding: BindingSummary,

    pub registered_at: DateTime<Utc>,
}

/// Per-descriptor outcomes of a registration run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrationReport {
    pub plugins: Vec<RegisteredPlugin>,
}

impl RegistrationReport {
    pub fn created(&self) -> usize {
        self.count(Outcome::Created)
    }

    pub fn reused(&self) -> usize {
        self.count(Outcome::Reused)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.plugins
            .iter()
            .filter(|plugin| plugin.outcome == outcome)
            .count()
    }
}

/// Result of a successful registration run
#[derive(Debug)]
pub struct Registration {
    pub plugins: KnownPlugins,
    pub report: RegistrationReport,
}

/// Failure of a single descriptor
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Resolution(#[from] PluginResolutionError),

    #[error(transparent)]
    Binding(#[from] PropertyBindingError),
}

/// A registration run aborted at `class_name`
///
/// `plugins` holds the known-plugins list as it stood when the run stopped:
/// descriptors before the failing one have been applied and are not rolled back.
#[derive(Debug, Error)]
#[error("registration of plugin `{class_name}` failed")]
pub struct RegistrationFailure {
    pub class_name: String,

    #[source]
    pub error: RegistrationError,

    pub plugins: KnownPlugins,
}

/// Registers configured plugins against a catalog of plugin types
#[derive(Debug, Clone, Copy)]
pub struct PluginRegistrar<'a> {
    catalog: &'a PluginCatalog,
    mode: BindingMode,
}

impl<'a> PluginRegistrar<'a> {
    /// Create a registrar with strict property binding
    pub fn new(catalog: &'a PluginCatalog) -> Self {
        Self {
            catalog,
            mode: BindingMode::Strict,
        }
    }

    pub fn with_mode(mut self, mode: BindingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> BindingMode {
        self.mode
    }

    /// Find an instance of `class_name` in `known`, creating and appending one
    /// if none exists
    ///
    /// An existing instance of the type or of any subtype is returned as is.
    pub fn resolve_or_create(
        &self,
        known: &mut KnownPlugins,
        class_name: &str,
    ) -> Result<Resolution, PluginResolutionError> {
        let resolved = self.catalog.resolve(class_name)?;

        if let Some(index) = known.position_of(class_name) {
            debug!("Reusing known instance of plugin: {}", class_name);
            return Ok(Resolution {
                index,
                outcome: Outcome::Reused,
            });
        }

        let factory = match resolved {
            Resolved::Concrete(factory) => factory,
            Resolved::Abstract => {
                return Err(PluginResolutionError::new(
                    class_name,
                    ResolutionCause::NotInstantiable,
                ))
            }
        };

        let plugin = factory.create().map_err(|e| {
            PluginResolutionError::new(class_name, ResolutionCause::ConstructionFailed(e.into()))
        })?;

        if !plugin.is_instance_of(class_name) {
            return Err(PluginResolutionError::new(
                class_name,
                ResolutionCause::TypeMismatch {
                    produced: plugin.class_name().to_string(),
                },
            ));
        }

        debug!("Created new instance of plugin: {}", class_name);
        Ok(Resolution {
            index: known.push(plugin),
            outcome: Outcome::Created,
        })
    }

    /// Apply every property to `plugin`, in order
    ///
    /// Each property is either applied, skipped as unknown in lenient mode, or
    /// reported as an error naming it.
    pub fn populate(
        &self,
        plugin: &mut dyn EnginePlugin,
        properties: &[(String, Value)],
    ) -> Result<BindingSummary, PropertyBindingError> {
        let mut summary = BindingSummary::default();

        for (name, value) in properties {
            match plugin.set_property(name, value) {
                Ok(()) => summary.applied.push(name.clone()),
                Err(cause) if cause.is_unknown_property() && self.mode == BindingMode::Lenient => {
                    debug!(
                        "Skipping unknown property `{}` of plugin {}",
                        name,
                        plugin.class_name()
                    );
                    summary.skipped.push(name.clone());
                }
                Err(cause) => {
                    return Err(PropertyBindingError {
                        class_name: plugin.class_name().to_string(),
                        property: name.clone(),
                        cause,
                    })
                }
            }
        }

        Ok(summary)
    }

    /// Register every descriptor in order, taking ownership of the
    /// known-plugins list and returning it once all descriptors are applied
    ///
    /// The first failing descriptor aborts the run.
    pub fn register_all(
        &self,
        mut known: KnownPlugins,
        descriptors: &[PluginDescriptor],
    ) -> Result<Registration, RegistrationFailure> {
        let mut report = RegistrationReport::default();

        for descriptor in descriptors {
            match self.register(&mut known, descriptor) {
                Ok(entry) => {
                    info!("Process engine plugin registered: {}", descriptor.class_name);
                    report.plugins.push(entry);
                }
                Err(error) => {
                    error!(
                        "Failed to register process engine plugin {}: {}",
                        descriptor.class_name,
                        error_chain(&error)
                    );
                    return Err(RegistrationFailure {
                        class_name: descriptor.class_name.clone(),
                        error,
                        plugins: known,
                    });
                }
            }
        }

        Ok(Registration {
            plugins: known,
            report,
        })
    }

    fn register(
        &self,
        known: &mut KnownPlugins,
        descriptor: &PluginDescriptor,
    ) -> Result<RegisteredPlugin, RegistrationError> {
        let resolution = self.resolve_or_create(known, &descriptor.class_name)?;

        let plugin = &mut known[resolution.index];
        let binding = self.populate(plugin, &descriptor.properties)?;

        Ok(RegisteredPlugin {
            class_name: descriptor.class_name.clone(),
            instance_class_name: plugin.class_name().to_string(),
            outcome: resolution.outcome,
            binding,
            registered_at: Utc::now(),
        })
    }
}

/// Render an error and its sources on one line
pub(crate) fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
