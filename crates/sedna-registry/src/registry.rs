use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sedna_config::ArtifactId;
use sedna_pipeline::{ArtifactClass, Pipeline, SlotSpec};
use tracing::debug;

use crate::error::RegistryError;
use crate::function::{Bindings, ProcessingFunction};

/// What the registry knows about one artifact.
pub enum Entry<'a, P> {
  /// An elementary input: must be supplied, cannot be derived.
  Leaf,
  /// A derived artifact: its slots and the function computing it.
  Derived {
    slots: &'a SlotSpec,
    function: &'a ProcessingFunction<P>,
  },
}

/// Immutable map from artifact to [`Entry`].
pub struct Registry<P> {
  pipeline: Pipeline,
  functions: HashMap<ArtifactId, ProcessingFunction<P>>,
}

impl<P> Registry<P> {
  /// Start binding processing functions to a locked pipeline.
  pub fn builder(pipeline: Pipeline) -> RegistryBuilder<P> {
    RegistryBuilder {
      pipeline,
      functions: Vec::new(),
    }
  }

  /// Look up an artifact.
  pub fn lookup(&self, artifact: &str) -> Result<Entry<'_, P>, RegistryError> {
    let unknown = || RegistryError::UnknownArtifact {
      artifact: ArtifactId::from(artifact),
    };

    match self.pipeline.class(artifact).ok_or_else(unknown)? {
      ArtifactClass::Input => Ok(Entry::Leaf),
      ArtifactClass::Intermediate | ArtifactClass::Output => {
        // Both are guaranteed by build().
        let slots = self.pipeline.slots(artifact).ok_or_else(unknown)?;
        let function = self.functions.get(artifact).ok_or_else(unknown)?;
        Ok(Entry::Derived { slots, function })
      }
    }
  }

  /// The locked pipeline behind this registry.
  pub fn pipeline(&self) -> &Pipeline {
    &self.pipeline
  }
}

impl<P> fmt::Debug for Registry<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registry")
      .field("pipeline", &self.pipeline.name())
      .field("functions", &self.functions.len())
      .finish()
  }
}

/// Builder binding processing functions to derived artifacts.
///
/// ```ignore
/// let registry = Registry::builder(pipeline)
///   .derive("Intermediate_X", |b| Ok(*b.payload("in")? + 1))
///   .derive("EOut_Y", |b| Ok(*b.payload("x")? * 2))
///   .build()?;
/// ```
pub struct RegistryBuilder<P> {
  pipeline: Pipeline,
  functions: Vec<(ArtifactId, ProcessingFunction<P>)>,
}

impl<P> RegistryBuilder<P> {
  /// Bind the processing function of a derived artifact.
  pub fn derive<F>(mut self, artifact: impl Into<ArtifactId>, function: F) -> Self
  where
    F: Fn(&Bindings<P>) -> anyhow::Result<P> + Send + Sync + 'static,
  {
    self.functions.push((artifact.into(), Arc::new(function)));
    self
  }

  /// Check the bindings and build the registry.
  ///
  /// Every intermediate and output needs exactly one function; inputs and
  /// unknown ids need none.
  pub fn build(self) -> Result<Registry<P>, RegistryError> {
    let RegistryBuilder {
      pipeline,
      functions: bound,
    } = self;

    let mut functions = HashMap::with_capacity(bound.len());
    for (artifact, function) in bound {
      match pipeline.class(artifact.as_str()) {
        None => return Err(RegistryError::UnknownArtifact { artifact }),
        Some(ArtifactClass::Input) => return Err(RegistryError::FunctionForInput { artifact }),
        Some(_) => {}
      }
      if functions.contains_key(&artifact) {
        return Err(RegistryError::DuplicateFunction { artifact });
      }
      functions.insert(artifact, function);
    }

    for artifact in pipeline.artifacts() {
      let derived = pipeline
        .class(artifact.as_str())
        .is_some_and(ArtifactClass::is_derived);
      if derived && !functions.contains_key(artifact) {
        return Err(RegistryError::MissingFunction {
          artifact: artifact.clone(),
        });
      }
    }

    debug!(
      pipeline = %pipeline.name(),
      functions = functions.len(),
      "registry_built"
    );

    Ok(Registry {
      pipeline,
      functions,
    })
  }
}
