use serde::Serialize;

use sedna_config::{ArtifactId, ModeDef, ModeInputDef, ModeOutputDef};

/// A validated mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mode {
  name: String,
  purpose: String,
  inputs: Vec<ModeInputDef>,
  outputs: Vec<ModeOutputDef>,
}

impl Mode {
  pub(crate) fn from_def(def: ModeDef) -> Self {
    Self {
      name: def.name,
      purpose: def.purpose,
      inputs: def.inputs,
      outputs: def.outputs,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn purpose(&self) -> &str {
    &self.purpose
  }

  pub fn inputs(&self) -> &[ModeInputDef] {
    &self.inputs
  }

  pub fn outputs(&self) -> &[ModeOutputDef] {
    &self.outputs
  }

  /// Elementary inputs the mode needs, in declared order.
  pub fn required_inputs(&self) -> impl Iterator<Item = &ArtifactId> + '_ {
    self.inputs.iter().map(|input| &input.artifact)
  }

  /// Elementary outputs the mode produces, in declared order.
  pub fn produced_outputs(&self) -> impl Iterator<Item = &ArtifactId> + '_ {
    self.outputs.iter().map(|output| &output.artifact)
  }
}
