use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactId;

/// A named bundle of elementary outputs and the elementary inputs they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDef {
  /// Mode name, e.g. "LFR-CWF-E"
  pub name: String,

  /// Free-text description shown by external tooling.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub purpose: String,

  #[serde(default)]
  pub inputs: Vec<ModeInputDef>,

  #[serde(default)]
  pub outputs: Vec<ModeOutputDef>,
}

/// An elementary input required by a mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeInputDef {
  /// Externally visible identifier, e.g. the CLI option "in_sci".
  /// Must be unique across all inputs and outputs of the mode.
  pub option_id: String,

  pub artifact: ArtifactId,
}

/// An elementary output produced by a mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeOutputDef {
  /// Externally visible identifier, e.g. the CLI option "out_sci".
  pub option_id: String,

  pub artifact: ArtifactId,

  /// Optional file-name suffix used by external writers, e.g. "_cdag".
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file_suffix: Option<String>,
}
