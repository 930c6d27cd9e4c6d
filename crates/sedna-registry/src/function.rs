use std::sync::Arc;

use anyhow::anyhow;
use indexmap::IndexMap;
use sedna_config::ArtifactId;

/// A pure function deriving one payload from bound slot values.
///
/// Any error returned is handed to the caller of the resolution as is.
pub type ProcessingFunction<P> = Arc<dyn Fn(&Bindings<P>) -> anyhow::Result<P> + Send + Sync>;

/// The artifact chosen for a slot and its payload.
#[derive(Debug)]
pub struct Binding<P> {
  pub artifact: ArtifactId,
  pub payload: Arc<P>,
}

impl<P> Clone for Binding<P> {
  fn clone(&self) -> Self {
    Self {
      artifact: self.artifact.clone(),
      payload: self.payload.clone(),
    }
  }
}

/// Slot name -> binding, in slot declaration order.
#[derive(Debug)]
pub struct Bindings<P> {
  slots: IndexMap<String, Binding<P>>,
}

impl<P> Bindings<P> {
  pub fn new() -> Self {
    Self {
      slots: IndexMap::new(),
    }
  }

  /// Bind a slot. A slot is bound once; binding it again replaces nothing
  /// and returns `false`.
  pub fn bind(&mut self, slot: impl Into<String>, artifact: ArtifactId, payload: Arc<P>) -> bool {
    let slot = slot.into();
    if self.slots.contains_key(&slot) {
      return false;
    }
    self.slots.insert(slot, Binding { artifact, payload });
    true
  }

  pub fn get(&self, slot: &str) -> Option<&Binding<P>> {
    self.slots.get(slot)
  }

  /// Payload bound to a slot, or an error naming the slot.
  pub fn payload(&self, slot: &str) -> anyhow::Result<&P> {
    self
      .slots
      .get(slot)
      .map(|binding| binding.payload.as_ref())
      .ok_or_else(|| anyhow!("slot '{}' is not bound", slot))
  }

  /// Artifact chosen for a slot.
  pub fn source(&self, slot: &str) -> Option<&ArtifactId> {
    self.slots.get(slot).map(|binding| &binding.artifact)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding<P>)> + '_ {
    self
      .slots
      .iter()
      .map(|(slot, binding)| (slot.as_str(), binding))
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }
}

impl<P> Default for Bindings<P> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_bind_keeps_first_binding() {
    let mut bindings = Bindings::new();
    assert!(bindings.bind("sci", ArtifactId::from("v2"), Arc::new(2)));
    assert!(!bindings.bind("sci", ArtifactId::from("v1"), Arc::new(1)));

    assert_eq!(*bindings.payload("sci").unwrap(), 2);
    assert_eq!(bindings.source("sci").map(ArtifactId::as_str), Some("v2"));
    assert_eq!(bindings.len(), 1);
  }

  #[test]
  fn test_payload_of_unbound_slot() {
    let bindings: Bindings<i32> = Bindings::new();
    let err = bindings.payload("hk").unwrap_err();
    assert_eq!(err.to_string(), "slot 'hk' is not bound");
    assert!(bindings.source("hk").is_none());
  }

  #[test]
  fn test_iter_in_bind_order() {
    let mut bindings = Bindings::new();
    bindings.bind("b", ArtifactId::from("y"), Arc::new(()));
    bindings.bind("a", ArtifactId::from("x"), Arc::new(()));

    let slots: Vec<&str> = bindings.iter().map(|(slot, _)| slot).collect();
    assert_eq!(slots, ["b", "a"]);
  }
}
