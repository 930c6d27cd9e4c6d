use sedna_config::ArtifactId;
use thiserror::Error;

/// Errors that can occur while building or querying a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
  /// The artifact is not part of the pipeline.
  #[error("unknown artifact: {artifact}")]
  UnknownArtifact { artifact: ArtifactId },

  /// An intermediate or output has no processing function.
  #[error("no processing function bound for derived artifact '{artifact}'")]
  MissingFunction { artifact: ArtifactId },

  /// Elementary inputs are supplied, never derived.
  #[error("processing function bound to elementary input '{artifact}'")]
  FunctionForInput { artifact: ArtifactId },

  #[error("processing function bound more than once for '{artifact}'")]
  DuplicateFunction { artifact: ArtifactId },
}
