//! Sedna Store
//!
//! This crate provides the per-session payload store. The [`Store`] holds one
//! slot per known artifact, each written at most once:
//! - elementary inputs are written by the caller before resolution
//! - derived artifacts are written by the resolver the first time they are
//!   derived, and act as the cache for the rest of the session
//!
//! Payloads are kept behind an [`Arc`] so every reader of an artifact sees the
//! identical value.

use std::sync::Arc;

use indexmap::IndexMap;
use sedna_config::ArtifactId;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
  /// The artifact is not part of the pipeline.
  #[error("unknown artifact: {0}")]
  UnknownArtifact(ArtifactId),

  /// A payload already exists for the artifact.
  #[error("artifact already set: {0}")]
  AlreadySet(ArtifactId),
}

/// Single-assignment payload store for one session.
#[derive(Debug)]
pub struct Store<P> {
  slots: IndexMap<ArtifactId, Option<Arc<P>>>,
}

impl<P> Store<P> {
  /// Create an empty store with one unset slot per known artifact.
  pub fn new(artifacts: impl IntoIterator<Item = ArtifactId>) -> Self {
    Self {
      slots: artifacts.into_iter().map(|id| (id, None)).collect(),
    }
  }

  /// Get the payload of an artifact.
  ///
  /// Returns `Ok(None)` if the artifact is known but not yet set.
  pub fn get(&self, artifact: &str) -> Result<Option<Arc<P>>, StoreError> {
    self
      .slots
      .get(artifact)
      .cloned()
      .ok_or_else(|| StoreError::UnknownArtifact(ArtifactId::from(artifact)))
  }

  /// Set the payload of an artifact.
  ///
  /// Fails if the artifact is unknown or already set. An existing payload is
  /// never replaced.
  pub fn set(&mut self, artifact: &str, payload: Arc<P>) -> Result<(), StoreError> {
    let (_, id, slot) = self
      .slots
      .get_full_mut(artifact)
      .ok_or_else(|| StoreError::UnknownArtifact(ArtifactId::from(artifact)))?;

    if slot.is_some() {
      return Err(StoreError::AlreadySet(id.clone()));
    }

    *slot = Some(payload);
    Ok(())
  }

  /// Whether a payload exists for the artifact. Unknown artifacts are unset.
  pub fn is_set(&self, artifact: &str) -> bool {
    matches!(self.slots.get(artifact), Some(Some(_)))
  }

  /// Artifacts holding a payload, in declared order.
  pub fn available(&self) -> impl Iterator<Item = &ArtifactId> + '_ {
    self
      .slots
      .iter()
      .filter(|(_, slot)| slot.is_some())
      .map(|(id, _)| id)
  }

  /// Number of known artifacts.
  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_store() -> Store<i32> {
    Store::new(["a", "b", "c"].into_iter().map(ArtifactId::from))
  }

  #[test]
  fn test_new_store_is_unset() {
    let store = make_store();
    assert_eq!(store.len(), 3);
    assert_eq!(store.get("a").unwrap(), None);
    assert!(!store.is_set("a"));
    assert_eq!(store.available().count(), 0);
  }

  #[test]
  fn test_set_then_get_returns_same_payload() {
    let mut store = make_store();
    let payload = Arc::new(42);
    store.set("b", payload.clone()).unwrap();

    let stored = store.get("b").unwrap().unwrap();
    assert!(Arc::ptr_eq(&stored, &payload));
    assert!(store.is_set("b"));
  }

  #[test]
  fn test_set_twice_keeps_first_value() {
    let mut store = make_store();
    store.set("a", Arc::new(1)).unwrap();

    let result = store.set("a", Arc::new(2));
    assert_eq!(result, Err(StoreError::AlreadySet(ArtifactId::from("a"))));
    assert_eq!(*store.get("a").unwrap().unwrap(), 1);
  }

  #[test]
  fn test_unknown_artifact() {
    let mut store = make_store();
    assert_eq!(
      store.get("z"),
      Err(StoreError::UnknownArtifact(ArtifactId::from("z")))
    );
    assert!(matches!(
      store.set("z", Arc::new(0)),
      Err(StoreError::UnknownArtifact(_))
    ));
    assert!(!store.is_set("z"));
  }

  #[test]
  fn test_available_in_declared_order() {
    let mut store = make_store();
    store.set("c", Arc::new(3)).unwrap();
    store.set("a", Arc::new(1)).unwrap();

    let ids: Vec<&str> = store.available().map(ArtifactId::as_str).collect();
    assert_eq!(ids, ["a", "c"]);
  }
}
