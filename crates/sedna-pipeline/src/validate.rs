//! Validation of pipeline declarations.
//!
//! [`validate`] turns a [`PipelineDef`] into a locked [`Pipeline`]. It runs
//! once, at construction, and every failure is fatal.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::{info, warn};

use sedna_config::{ArtifactId, ModeDef, PipelineDef, SlotsDef};

use crate::error::ValidationError;
use crate::graph::Graph;
use crate::mode::Mode;
use crate::pipeline::{ArtifactClass, Pipeline, SlotSpec};

/// Validate a pipeline declaration into a locked pipeline.
///
/// This process:
/// 1. Checks that artifact ids are unique across all three classes
/// 2. Checks slot declarations (known candidates, no empty slots)
/// 3. Checks the candidate graph for cycles
/// 4. Checks every mode for consistency and derivability
pub fn validate(def: PipelineDef) -> Result<Pipeline, ValidationError> {
  let PipelineDef {
    name,
    inputs,
    intermediates,
    outputs,
    derivations,
    modes,
  } = def;

  let classes = collect_classes(inputs, intermediates, outputs)?;
  let slots = collect_slots(&classes, derivations)?;

  let graph = Graph::new(classes.keys(), &slots);
  if let Some(path) = graph.find_cycle() {
    return Err(ValidationError::CycleDetected { path });
  }

  let mut pipeline = Pipeline {
    name,
    classes,
    slots,
    modes: IndexMap::new(),
    graph,
  };

  for mode_def in modes {
    let mode = validate_mode(&pipeline, mode_def)?;
    if pipeline.modes.contains_key(mode.name()) {
      return Err(ValidationError::DuplicateMode {
        mode: mode.name().to_string(),
      });
    }
    pipeline.modes.insert(mode.name().to_string(), mode);
  }

  for input in pipeline.artifacts_of(ArtifactClass::Input) {
    if pipeline.graph.downstream(input.as_str()).is_empty() {
      warn!(pipeline = %pipeline.name, artifact = %input, "unused_input");
    }
  }

  info!(
    pipeline = %pipeline.name,
    artifacts = pipeline.classes.len(),
    modes = pipeline.modes.len(),
    "pipeline_validated"
  );

  Ok(pipeline)
}

/// Assign every id its class, rejecting duplicates across the three lists.
fn collect_classes(
  inputs: Vec<ArtifactId>,
  intermediates: Vec<ArtifactId>,
  outputs: Vec<ArtifactId>,
) -> Result<IndexMap<ArtifactId, ArtifactClass>, ValidationError> {
  let mut classes = IndexMap::new();

  let declared = inputs
    .into_iter()
    .map(|id| (id, ArtifactClass::Input))
    .chain(
      intermediates
        .into_iter()
        .map(|id| (id, ArtifactClass::Intermediate)),
    )
    .chain(outputs.into_iter().map(|id| (id, ArtifactClass::Output)));

  for (artifact, class) in declared {
    if classes.contains_key(&artifact) {
      return Err(ValidationError::DuplicateArtifact { artifact });
    }
    classes.insert(artifact, class);
  }

  Ok(classes)
}

/// Validate slot declarations and check every derived artifact has one.
fn collect_slots(
  classes: &IndexMap<ArtifactId, ArtifactClass>,
  derivations: IndexMap<ArtifactId, SlotsDef>,
) -> Result<HashMap<ArtifactId, SlotSpec>, ValidationError> {
  let mut slots = HashMap::new();

  for (artifact, slot_defs) in derivations {
    match classes.get(&artifact) {
      None => {
        return Err(ValidationError::UnknownArtifact {
          artifact,
          referenced_by: "derivations".to_string(),
        });
      }
      Some(ArtifactClass::Input) => {
        return Err(ValidationError::InputHasSlots { artifact });
      }
      Some(_) => {}
    }

    if slot_defs.is_empty() {
      return Err(ValidationError::MissingSlots { artifact });
    }

    for (slot, candidates) in &slot_defs {
      if candidates.is_empty() {
        return Err(ValidationError::EmptySlot {
          artifact,
          slot: slot.clone(),
        });
      }

      let mut seen = HashSet::new();
      for candidate in candidates {
        if !classes.contains_key(candidate) {
          return Err(ValidationError::UnknownArtifact {
            artifact: candidate.clone(),
            referenced_by: format!("slot '{}' of '{}'", slot, artifact),
          });
        }
        if !seen.insert(candidate) {
          return Err(ValidationError::DuplicateCandidate {
            artifact,
            slot: slot.clone(),
            candidate: candidate.clone(),
          });
        }
      }
    }

    slots.insert(artifact, SlotSpec::new(slot_defs));
  }

  for (artifact, class) in classes {
    if class.is_derived() && !slots.contains_key(artifact) {
      return Err(ValidationError::MissingSlots {
        artifact: artifact.clone(),
      });
    }
  }

  Ok(slots)
}

/// Validate one mode against the (mode-less) pipeline.
fn validate_mode(pipeline: &Pipeline, def: ModeDef) -> Result<Mode, ValidationError> {
  let mut option_ids = HashSet::new();
  let mut artifacts = HashSet::new();

  let declared = def
    .inputs
    .iter()
    .map(|input| (&input.option_id, &input.artifact, ArtifactClass::Input))
    .chain(
      def
        .outputs
        .iter()
        .map(|output| (&output.option_id, &output.artifact, ArtifactClass::Output)),
    );

  for (option_id, artifact, expected) in declared {
    if !option_ids.insert(option_id) {
      return Err(ValidationError::DuplicateOptionId {
        mode: def.name.clone(),
        option_id: option_id.clone(),
      });
    }
    if !artifacts.insert(artifact) {
      return Err(ValidationError::DuplicateModeArtifact {
        mode: def.name.clone(),
        artifact: artifact.clone(),
      });
    }

    let Some(actual) = pipeline.class(artifact.as_str()) else {
      return Err(ValidationError::UnknownArtifact {
        artifact: artifact.clone(),
        referenced_by: format!("mode '{}'", def.name),
      });
    };
    if actual != expected {
      return Err(ValidationError::ModeArtifactClass {
        mode: def.name.clone(),
        artifact: artifact.clone(),
        expected,
        actual,
      });
    }
  }

  let mut file_suffixes = HashSet::new();
  for suffix in def.outputs.iter().filter_map(|output| output.file_suffix.as_deref()) {
    if !file_suffixes.insert(suffix) {
      return Err(ValidationError::DuplicateFileSuffix {
        mode: def.name.clone(),
        file_suffix: suffix.to_string(),
      });
    }
  }

  let supplied: HashSet<ArtifactId> = def
    .inputs
    .iter()
    .map(|input| input.artifact.clone())
    .collect();
  for output in &def.outputs {
    if !pipeline.is_derivable(output.artifact.as_str(), &supplied) {
      return Err(ValidationError::ModeUnsatisfiable {
        mode: def.name.clone(),
        artifact: output.artifact.clone(),
      });
    }
  }

  Ok(Mode::from_def(def))
}
