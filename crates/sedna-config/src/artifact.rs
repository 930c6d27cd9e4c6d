use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier naming one kind of process data, e.g. "L1R_LFR_CWF_E".
///
/// The class of an artifact (input, intermediate, output) is decided by the
/// pipeline declaration, never by the id itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ArtifactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ArtifactId {
  fn from(id: &str) -> Self {
    Self(id.to_string())
  }
}

impl From<String> for ArtifactId {
  fn from(id: String) -> Self {
    Self(id)
  }
}

impl AsRef<str> for ArtifactId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// Lets maps keyed by ArtifactId be queried with a plain &str.
impl Borrow<str> for ArtifactId {
  fn borrow(&self) -> &str {
    &self.0
  }
}
