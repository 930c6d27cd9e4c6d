//! Caller-facing session.
//!
//! A [`Session`] owns one store and shares an immutable registry. Callers
//! supply elementary inputs, then request outputs. Sessions never share
//! payloads; run concurrent jobs in separate sessions over the same
//! `Arc<Registry>`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, instrument};

use sedna_config::ArtifactId;
use sedna_pipeline::ArtifactClass;
use sedna_registry::{Registry, RegistryError};
use sedna_store::Store;

use crate::error::RuntimeError;
use crate::resolver::Resolver;

/// Inputs and outputs of one mode, for external tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeDescription {
  pub mode: String,
  pub required_inputs: Vec<ArtifactId>,
  pub produced_outputs: Vec<ArtifactId>,
}

/// One resolution session: a shared registry and a private store.
pub struct Session<P> {
  registry: Arc<Registry<P>>,
  store: Store<P>,
}

impl<P> Session<P> {
  /// Create a session with an empty store.
  pub fn new(registry: Arc<Registry<P>>) -> Self {
    let store = Store::new(registry.pipeline().artifacts().cloned());
    Self { registry, store }
  }

  pub fn registry(&self) -> &Registry<P> {
    &self.registry
  }

  /// Supply an elementary input. Each input can be supplied once.
  pub fn supply(&mut self, artifact: impl Into<ArtifactId>, payload: P) -> Result<(), RuntimeError> {
    let artifact = artifact.into();

    match self.registry.pipeline().class(artifact.as_str()) {
      None => {
        return Err(RuntimeError::Registry(RegistryError::UnknownArtifact {
          artifact,
        }));
      }
      Some(ArtifactClass::Input) => {}
      Some(_) => return Err(RuntimeError::NotAnInput { artifact }),
    }

    self.store.set(artifact.as_str(), Arc::new(payload))?;
    debug!(artifact = %artifact, "input_supplied");
    Ok(())
  }

  /// Resolve an artifact without treating a missing input as an error.
  pub fn resolve(&mut self, artifact: &str) -> Result<Option<Arc<P>>, RuntimeError> {
    Resolver::new(&self.registry, &mut self.store).resolve(artifact)
  }

  /// Resolve an artifact, failing if an elementary input it needs is missing.
  #[instrument(name = "session_request", skip(self), fields(pipeline = %self.registry.pipeline().name()))]
  pub fn request(&mut self, artifact: &str) -> Result<Arc<P>, RuntimeError> {
    let result = match self.resolve(artifact) {
      Ok(Some(payload)) => Ok(payload),
      Ok(None) => Err(RuntimeError::MissingInput {
        artifact: ArtifactId::from(artifact),
      }),
      Err(e) => Err(e),
    };

    match &result {
      Ok(_) => info!(artifact = %artifact, "request_completed"),
      Err(e) => error!(artifact = %artifact, error = %e, "request_failed"),
    }

    result
  }

  /// Request every output of a mode, in declared order.
  #[instrument(name = "session_request_mode", skip(self))]
  pub fn request_mode(&mut self, mode: &str) -> Result<Vec<(ArtifactId, Arc<P>)>, RuntimeError> {
    let registry = Arc::clone(&self.registry);
    let outputs: Vec<&ArtifactId> = registry
      .pipeline()
      .mode(mode)
      .ok_or_else(|| RuntimeError::UnknownMode {
        mode: mode.to_string(),
      })?
      .produced_outputs()
      .collect();

    let mut produced = Vec::with_capacity(outputs.len());
    for output in outputs {
      let payload = self.request(output.as_str())?;
      produced.push((output.clone(), payload));
    }

    info!(mode = %mode, outputs = produced.len(), "mode_completed");
    Ok(produced)
  }

  /// Inputs and outputs declared by a mode.
  pub fn describe_mode(&self, mode: &str) -> Result<ModeDescription, RuntimeError> {
    let found = self
      .registry
      .pipeline()
      .mode(mode)
      .ok_or_else(|| RuntimeError::UnknownMode {
        mode: mode.to_string(),
      })?;

    Ok(ModeDescription {
      mode: found.name().to_string(),
      required_inputs: found.required_inputs().cloned().collect(),
      produced_outputs: found.produced_outputs().cloned().collect(),
    })
  }

  /// Whether an artifact holds a payload in this session.
  pub fn is_available(&self, artifact: &str) -> bool {
    self.store.is_set(artifact)
  }

  /// Artifacts holding a payload, in declared order.
  pub fn available(&self) -> impl Iterator<Item = &ArtifactId> + '_ {
    self.store.available()
  }
}
