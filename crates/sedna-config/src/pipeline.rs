use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactId;
use crate::mode::ModeDef;

/// Ordered slots of one derived artifact: slot name -> ordered candidates.
///
/// Order is significant on both levels. Slots are bound in declared order and
/// the first available candidate of a slot wins.
pub type SlotsDef = IndexMap<String, Vec<ArtifactId>>;

/// A full pipeline declaration.
///
/// # Example
///
/// ```json
/// {
///   "name": "demo",
///   "inputs": ["EIn_A", "EIn_B"],
///   "intermediates": ["Intermediate_X"],
///   "outputs": ["EOut_Y"],
///   "derivations": {
///     "Intermediate_X": { "in": ["EIn_A", "EIn_B"] },
///     "EOut_Y": { "x": ["Intermediate_X"] }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDef {
  pub name: String,

  /// Elementary inputs, supplied from outside.
  #[serde(default)]
  pub inputs: Vec<ArtifactId>,

  /// Internal artifacts, derived and never requested externally.
  #[serde(default)]
  pub intermediates: Vec<ArtifactId>,

  /// Elementary outputs, derived and requested externally.
  #[serde(default)]
  pub outputs: Vec<ArtifactId>,

  /// Slot declarations for every intermediate and output.
  #[serde(default)]
  pub derivations: IndexMap<ArtifactId, SlotsDef>,

  #[serde(default)]
  pub modes: Vec<ModeDef>,
}
