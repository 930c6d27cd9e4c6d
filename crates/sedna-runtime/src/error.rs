//! Runtime error types.

use std::fmt;

use sedna_config::ArtifactId;
use sedna_registry::RegistryError;
use sedna_store::StoreError;

/// One step of a dependency chain: a slot of an artifact being derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFrame {
  pub artifact: ArtifactId,
  pub slot: String,
}

impl fmt::Display for SlotFrame {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}[{}]", self.artifact, self.slot)
  }
}

/// Errors that can occur during resolution.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
  /// Double supply, double derivation or an unknown artifact in the store.
  #[error(transparent)]
  Store(#[from] StoreError),

  #[error(transparent)]
  Registry(#[from] RegistryError),

  /// No candidate of a slot is available.
  ///
  /// `chain` runs from the requested artifact down to the slot that could
  /// not be bound; `missing` lists that slot's candidates, all of them
  /// elementary inputs that were never supplied.
  #[error(
    "cannot derive '{}': {} has none of [{}]",
    chain_root(.chain),
    format_chain(.chain),
    format_ids(.missing, ", ")
  )]
  Unsatisfiable {
    chain: Vec<SlotFrame>,
    missing: Vec<ArtifactId>,
  },

  /// An artifact depends on itself.
  #[error("dependency cycle: {}", format_ids(.path, " -> "))]
  CycleDetected { path: Vec<ArtifactId> },

  /// A requested elementary input was never supplied.
  #[error("missing elementary input: {artifact}")]
  MissingInput { artifact: ArtifactId },

  /// Only elementary inputs can be supplied.
  #[error("'{artifact}' is not an elementary input and cannot be supplied")]
  NotAnInput { artifact: ArtifactId },

  #[error("unknown mode: {mode}")]
  UnknownMode { mode: String },

  /// Error raised by a processing function, passed through untouched.
  #[error(transparent)]
  Processing(anyhow::Error),
}

fn chain_root(chain: &[SlotFrame]) -> &str {
  chain
    .first()
    .map(|frame| frame.artifact.as_str())
    .unwrap_or_default()
}

fn format_chain(chain: &[SlotFrame]) -> String {
  chain
    .iter()
    .map(SlotFrame::to_string)
    .collect::<Vec<_>>()
    .join(" <- ")
}

fn format_ids(ids: &[ArtifactId], separator: &str) -> String {
  ids
    .iter()
    .map(ArtifactId::as_str)
    .collect::<Vec<_>>()
    .join(separator)
}
