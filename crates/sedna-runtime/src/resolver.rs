//! Recursive, memoized artifact resolution.
//!
//! Resolution of an artifact:
//! 1. Return the stored payload if there is one.
//! 2. Return `None` for an elementary input that was not supplied.
//! 3. Otherwise bind every slot, in declared order, to the first candidate
//!    that resolves to a payload, invoke the processing function and store
//!    the result.
//!
//! Slot selection is greedy and never backtracks: once a slot is bound the
//! choice stands even if a later slot cannot be bound, and an error raised
//! while resolving a candidate ends the search instead of falling through to
//! the next candidate.

use std::sync::Arc;

use sedna_config::ArtifactId;
use sedna_pipeline::SlotSpec;
use sedna_registry::{Bindings, Entry, ProcessingFunction, Registry};
use sedna_store::Store;
use tracing::{debug, info, warn};

use crate::error::{RuntimeError, SlotFrame};

/// Resolves artifacts of one registry into one store.
pub struct Resolver<'a, P> {
  registry: &'a Registry<P>,
  store: &'a mut Store<P>,
  /// Artifacts currently being derived, outermost first.
  resolving: Vec<ArtifactId>,
}

impl<'a, P> Resolver<'a, P> {
  pub fn new(registry: &'a Registry<P>, store: &'a mut Store<P>) -> Self {
    Self {
      registry,
      store,
      resolving: Vec::new(),
    }
  }

  /// Resolve an artifact, deriving and caching its ancestors as needed.
  ///
  /// `Ok(None)` means the artifact is an elementary input that has not been
  /// supplied. Whether that is fatal is up to the caller.
  pub fn resolve(&mut self, artifact: &str) -> Result<Option<Arc<P>>, RuntimeError> {
    if let Some(payload) = self.store.get(artifact)? {
      debug!(artifact = %artifact, "cache_hit");
      return Ok(Some(payload));
    }

    let registry = self.registry;
    let (slots, function) = match registry.lookup(artifact)? {
      Entry::Leaf => {
        debug!(artifact = %artifact, "input_not_supplied");
        return Ok(None);
      }
      Entry::Derived { slots, function } => (slots, function),
    };

    if let Some(start) = self.resolving.iter().position(|id| id.as_str() == artifact) {
      let mut path = self.resolving[start..].to_vec();
      path.push(ArtifactId::from(artifact));
      return Err(RuntimeError::CycleDetected { path });
    }

    self.resolving.push(ArtifactId::from(artifact));
    let derived = self.derive(artifact, slots, function);
    self.resolving.pop();

    derived.map(Some)
  }

  fn derive(
    &mut self,
    artifact: &str,
    slots: &SlotSpec,
    function: &ProcessingFunction<P>,
  ) -> Result<Arc<P>, RuntimeError> {
    let mut bindings = Bindings::new();

    for (slot, candidates) in slots.iter() {
      let (candidate, payload) = self.bind_slot(artifact, slot, candidates)?;
      debug!(artifact = %artifact, slot = %slot, candidate = %candidate, "slot_bound");
      bindings.bind(slot, candidate.clone(), payload);
    }

    let payload = function(&bindings).map_err(|e| {
      debug!(artifact = %artifact, error = %e, "processing_failed");
      RuntimeError::Processing(e)
    })?;
    let payload = Arc::new(payload);

    self.store.set(artifact, payload.clone())?;
    info!(artifact = %artifact, slots = bindings.len(), "artifact_derived");

    Ok(payload)
  }

  /// Find the first candidate of a slot that resolves to a payload.
  fn bind_slot<'c>(
    &mut self,
    artifact: &str,
    slot: &str,
    candidates: &'c [ArtifactId],
  ) -> Result<(&'c ArtifactId, Arc<P>), RuntimeError> {
    let frame = || SlotFrame {
      artifact: ArtifactId::from(artifact),
      slot: slot.to_string(),
    };

    for candidate in candidates {
      match self.resolve(candidate.as_str()) {
        Ok(Some(payload)) => return Ok((candidate, payload)),
        Ok(None) => {}
        Err(RuntimeError::Unsatisfiable { mut chain, missing }) => {
          chain.insert(0, frame());
          return Err(RuntimeError::Unsatisfiable { chain, missing });
        }
        Err(e) => return Err(e),
      }
    }

    warn!(artifact = %artifact, slot = %slot, "slot_unsatisfied");
    Err(RuntimeError::Unsatisfiable {
      chain: vec![frame()],
      missing: candidates.to_vec(),
    })
  }
}
