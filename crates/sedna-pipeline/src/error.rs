use sedna_config::ArtifactId;
use thiserror::Error;

use crate::pipeline::ArtifactClass;

/// Errors that can occur while validating a pipeline declaration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
  /// The same id appears twice across the input, intermediate and output lists.
  #[error("duplicate artifact id: {artifact}")]
  DuplicateArtifact { artifact: ArtifactId },

  /// A derivation, slot or mode references an id that is not declared.
  #[error("unknown artifact '{artifact}' referenced by {referenced_by}")]
  UnknownArtifact {
    artifact: ArtifactId,
    referenced_by: String,
  },

  /// Elementary inputs are never derived.
  #[error("elementary input '{artifact}' must not declare slots")]
  InputHasSlots { artifact: ArtifactId },

  /// Intermediates and outputs need at least one slot.
  #[error("derived artifact '{artifact}' declares no slots")]
  MissingSlots { artifact: ArtifactId },

  /// A slot with nothing that could satisfy it.
  #[error("slot '{slot}' of '{artifact}' has no candidates")]
  EmptySlot { artifact: ArtifactId, slot: String },

  #[error("candidate '{candidate}' listed twice in slot '{slot}' of '{artifact}'")]
  DuplicateCandidate {
    artifact: ArtifactId,
    slot: String,
    candidate: ArtifactId,
  },

  /// Cycle detected in the candidate graph.
  #[error("cycle detected: {}", format_path(.path))]
  CycleDetected { path: Vec<ArtifactId> },

  #[error("duplicate mode name: {mode}")]
  DuplicateMode { mode: String },

  /// A mode input that is not an elementary input, or a mode output that is
  /// not an elementary output.
  #[error("mode '{mode}' lists '{artifact}' as {expected:?}, but it is {actual:?}")]
  ModeArtifactClass {
    mode: String,
    artifact: ArtifactId,
    expected: ArtifactClass,
    actual: ArtifactClass,
  },

  /// Two inputs/outputs of one mode share an external identifier.
  #[error("mode '{mode}' uses option id '{option_id}' more than once")]
  DuplicateOptionId { mode: String, option_id: String },

  /// Two outputs of one mode would be written to the same file.
  #[error("mode '{mode}' uses file suffix '{file_suffix}' more than once")]
  DuplicateFileSuffix { mode: String, file_suffix: String },

  #[error("mode '{mode}' lists artifact '{artifact}' more than once")]
  DuplicateModeArtifact { mode: String, artifact: ArtifactId },

  /// A mode output that cannot be derived from the mode's own inputs.
  #[error("mode '{mode}' cannot derive output '{artifact}' from its inputs")]
  ModeUnsatisfiable { mode: String, artifact: ArtifactId },
}

fn format_path(path: &[ArtifactId]) -> String {
  path
    .iter()
    .map(ArtifactId::as_str)
    .collect::<Vec<_>>()
    .join(" -> ")
}
