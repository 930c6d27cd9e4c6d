use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use sedna_config::{ArtifactId, SlotsDef};

use crate::graph::Graph;
use crate::mode::Mode;

/// The class an artifact belongs to, decided by pipeline membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactClass {
  /// Supplied from outside, never derived.
  Input,
  /// Derived, used only between inputs and outputs.
  Intermediate,
  /// Derived, requested from outside.
  Output,
}

impl ArtifactClass {
  /// Whether artifacts of this class have a processing function.
  pub fn is_derived(self) -> bool {
    !matches!(self, ArtifactClass::Input)
  }
}

/// Ordered slots of one derived artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSpec {
  slots: SlotsDef,
}

impl SlotSpec {
  pub(crate) fn new(slots: SlotsDef) -> Self {
    Self { slots }
  }

  /// Slots in declared order, each with its candidates in priority order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[ArtifactId])> + '_ {
    self
      .slots
      .iter()
      .map(|(name, candidates)| (name.as_str(), candidates.as_slice()))
  }

  /// Candidates of one slot, if the slot exists.
  pub fn candidates(&self, slot: &str) -> Option<&[ArtifactId]> {
    self.slots.get(slot).map(Vec::as_slice)
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }
}

/// A locked pipeline: validated artifact classes, slots and modes.
///
/// Built by [`validate`](crate::validate). Immutable afterwards.
#[derive(Debug, Clone)]
pub struct Pipeline {
  pub(crate) name: String,
  /// Every known artifact in declared order (inputs, intermediates, outputs).
  pub(crate) classes: IndexMap<ArtifactId, ArtifactClass>,
  pub(crate) slots: HashMap<ArtifactId, SlotSpec>,
  pub(crate) modes: IndexMap<String, Mode>,
  pub(crate) graph: Graph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
  Available,
  /// An elementary input that is not supplied.
  Missing,
  /// Resolution would fail with an unsatisfied slot.
  Blocked,
}

impl Pipeline {
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Class of an artifact, or `None` for an unknown id.
  pub fn class(&self, artifact: &str) -> Option<ArtifactClass> {
    self.classes.get(artifact).copied()
  }

  pub fn contains(&self, artifact: &str) -> bool {
    self.classes.contains_key(artifact)
  }

  /// All known artifacts in declared order.
  pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactId> + '_ {
    self.classes.keys()
  }

  /// Artifacts of one class in declared order.
  pub fn artifacts_of(&self, class: ArtifactClass) -> impl Iterator<Item = &ArtifactId> + '_ {
    self
      .classes
      .iter()
      .filter(move |(_, c)| **c == class)
      .map(|(id, _)| id)
  }

  /// Slots of a derived artifact. `None` for elementary inputs and unknown ids.
  pub fn slots(&self, artifact: &str) -> Option<&SlotSpec> {
    self.slots.get(artifact)
  }

  pub fn mode(&self, name: &str) -> Option<&Mode> {
    self.modes.get(name)
  }

  /// Modes in declared order.
  pub fn modes(&self) -> impl Iterator<Item = &Mode> + '_ {
    self.modes.values()
  }

  pub fn graph(&self) -> &Graph {
    &self.graph
  }

  /// Whether `artifact` would resolve if exactly the `supplied` inputs were
  /// present.
  ///
  /// Mirrors the resolver's greedy selection: a slot commits to its first
  /// candidate that is not a missing input, so a derived candidate that is
  /// itself blocked blocks the slot even if a later candidate would work.
  pub fn is_derivable(&self, artifact: &str, supplied: &HashSet<ArtifactId>) -> bool {
    let Some((artifact, _)) = self.classes.get_key_value(artifact) else {
      return false;
    };
    let mut memo = HashMap::new();
    self.reach(artifact, supplied, &mut memo) == Reach::Available
  }

  fn reach<'a>(
    &'a self,
    artifact: &'a ArtifactId,
    supplied: &HashSet<ArtifactId>,
    memo: &mut HashMap<&'a ArtifactId, Reach>,
  ) -> Reach {
    if let Some(reach) = memo.get(artifact) {
      return *reach;
    }

    let reach = match self.slots.get(artifact) {
      None if supplied.contains(artifact) => Reach::Available,
      None => Reach::Missing,
      Some(spec) => {
        let mut reach = Reach::Available;
        'slots: for (_, candidates) in spec.iter() {
          for candidate in candidates {
            match self.reach(candidate, supplied, memo) {
              Reach::Available => continue 'slots,
              Reach::Missing => {}
              Reach::Blocked => {
                reach = Reach::Blocked;
                break 'slots;
              }
            }
          }
          reach = Reach::Blocked;
          break;
        }
        reach
      }
    };

    memo.insert(artifact, reach);
    reach
  }
}
