//! Serializable description of a pipeline's modes for external tooling.
//!
//! The descriptor is what CLI-surface and manifest generators consume: one
//! entry per mode with the external option ids of its inputs and outputs.
//!
//! # Example
//!
//! ```json
//! {
//!   "pipeline": "demo",
//!   "modes": [{
//!     "name": "M1",
//!     "inputs": [{ "option_id": "in_sci", "artifact": "EIn_A" }],
//!     "outputs": [{ "option_id": "out_sci", "artifact": "EOut_Y", "sources": ["in_sci"] }]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use sedna_config::ArtifactId;

use crate::mode::Mode;
use crate::pipeline::Pipeline;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
  pub pipeline: String,
  pub modes: Vec<ModeDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDescriptor {
  pub name: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub purpose: String,
  pub inputs: Vec<InputDescriptor>,
  pub outputs: Vec<OutputDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDescriptor {
  pub option_id: String,
  pub artifact: ArtifactId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDescriptor {
  pub option_id: String,
  pub artifact: ArtifactId,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub file_suffix: Option<String>,
  /// Option ids of the mode inputs this output may be derived from.
  pub sources: Vec<String>,
}

impl Pipeline {
  /// Describe every mode, in declared order.
  pub fn descriptor(&self) -> Descriptor {
    Descriptor {
      pipeline: self.name.clone(),
      modes: self.modes().map(|mode| self.describe(mode)).collect(),
    }
  }

  /// Describe a single mode.
  pub fn describe(&self, mode: &Mode) -> ModeDescriptor {
    let outputs = mode
      .outputs()
      .iter()
      .map(|output| {
        let ancestors = self.graph.ancestors(output.artifact.as_str());
        let sources = mode
          .inputs()
          .iter()
          .filter(|input| ancestors.contains(&input.artifact))
          .map(|input| input.option_id.clone())
          .collect();

        OutputDescriptor {
          option_id: output.option_id.clone(),
          artifact: output.artifact.clone(),
          file_suffix: output.file_suffix.clone(),
          sources,
        }
      })
      .collect();

    ModeDescriptor {
      name: mode.name().to_string(),
      purpose: mode.purpose().to_string(),
      inputs: mode
        .inputs()
        .iter()
        .map(|input| InputDescriptor {
          option_id: input.option_id.clone(),
          artifact: input.artifact.clone(),
        })
        .collect(),
      outputs,
    }
  }
}
