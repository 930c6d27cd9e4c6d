//! Mode validation and descriptor generation against a small two-mode pipeline.

use std::collections::HashSet;

use sedna_config::{ArtifactId, PipelineDef};
use sedna_pipeline::{ArtifactClass, ValidationError, validate};
use serde_json::json;

/// Science data in two format versions plus housekeeping, two output levels.
fn base_def() -> serde_json::Value {
  json!({
    "name": "lfr",
    "inputs": ["L1R_SCI_V2", "L1R_SCI_V1", "L1R_HK", "BIAS_CURRENT"],
    "intermediates": ["SCI_DEMUX"],
    "outputs": ["L2_E", "L2_V"],
    "derivations": {
      "SCI_DEMUX": {
        "sci": ["L1R_SCI_V2", "L1R_SCI_V1"],
        "hk": ["L1R_HK"]
      },
      "L2_E": { "demux": ["SCI_DEMUX"] },
      "L2_V": { "demux": ["SCI_DEMUX"], "bias": ["BIAS_CURRENT"] }
    },
    "modes": [
      {
        "name": "LFR-E",
        "purpose": "Electric field",
        "inputs": [
          { "option_id": "in_sci", "artifact": "L1R_SCI_V2" },
          { "option_id": "in_hk", "artifact": "L1R_HK" }
        ],
        "outputs": [
          { "option_id": "out_e", "artifact": "L2_E", "file_suffix": "_e" }
        ]
      },
      {
        "name": "LFR-V",
        "inputs": [
          { "option_id": "in_sci", "artifact": "L1R_SCI_V1" },
          { "option_id": "in_hk", "artifact": "L1R_HK" },
          { "option_id": "in_cur", "artifact": "BIAS_CURRENT" }
        ],
        "outputs": [
          { "option_id": "out_v", "artifact": "L2_V" }
        ]
      }
    ]
  })
}

fn parse(value: serde_json::Value) -> PipelineDef {
  serde_json::from_value(value).expect("valid pipeline definition")
}

#[test]
fn test_validate_two_mode_pipeline() {
  let pipeline = validate(parse(base_def())).unwrap();

  assert_eq!(pipeline.name(), "lfr");
  let modes: Vec<&str> = pipeline.modes().map(|m| m.name()).collect();
  assert_eq!(modes, ["LFR-E", "LFR-V"]);

  let mode = pipeline.mode("LFR-V").unwrap();
  let inputs: Vec<&str> = mode.required_inputs().map(ArtifactId::as_str).collect();
  assert_eq!(inputs, ["L1R_SCI_V1", "L1R_HK", "BIAS_CURRENT"]);
  let outputs: Vec<&str> = mode.produced_outputs().map(ArtifactId::as_str).collect();
  assert_eq!(outputs, ["L2_V"]);

  let derived: Vec<&str> = pipeline
    .artifacts_of(ArtifactClass::Output)
    .map(ArtifactId::as_str)
    .collect();
  assert_eq!(derived, ["L2_E", "L2_V"]);
}

#[test]
fn test_is_derivable_follows_alternatives() {
  let pipeline = validate(parse(base_def())).unwrap();

  let supplied: HashSet<ArtifactId> = ["L1R_SCI_V1", "L1R_HK"]
    .into_iter()
    .map(ArtifactId::from)
    .collect();
  assert!(pipeline.is_derivable("L2_E", &supplied));
  assert!(!pipeline.is_derivable("L2_V", &supplied));
  assert!(!pipeline.is_derivable("unknown", &supplied));
}

#[test]
fn test_duplicate_option_id_in_mode() {
  let mut def = base_def();
  def["modes"][0]["outputs"][0]["option_id"] = json!("in_hk");

  let result = validate(parse(def));
  assert_eq!(
    result.unwrap_err(),
    ValidationError::DuplicateOptionId {
      mode: "LFR-E".to_string(),
      option_id: "in_hk".to_string(),
    }
  );
}

#[test]
fn test_duplicate_file_suffix_in_mode() {
  let mut def = base_def();
  def["modes"][1]["outputs"] = json!([
    { "option_id": "out_e", "artifact": "L2_E", "file_suffix": "_l2" },
    { "option_id": "out_v", "artifact": "L2_V", "file_suffix": "_l2" }
  ]);

  let result = validate(parse(def));
  assert_eq!(
    result.unwrap_err(),
    ValidationError::DuplicateFileSuffix {
      mode: "LFR-V".to_string(),
      file_suffix: "_l2".to_string(),
    }
  );
}

#[test]
fn test_outputs_without_file_suffix_do_not_collide() {
  let mut def = base_def();
  def["modes"][1]["outputs"] = json!([
    { "option_id": "out_e", "artifact": "L2_E" },
    { "option_id": "out_v", "artifact": "L2_V" }
  ]);

  assert!(validate(parse(def)).is_ok());
}

#[test]
fn test_is_derivable_commits_to_first_derived_candidate() {
  let pipeline = validate(parse(json!({
    "name": "greedy",
    "inputs": ["A", "C"],
    "intermediates": ["M"],
    "outputs": ["W"],
    "derivations": {
      "M": { "a": ["A"] },
      "W": { "src": ["M", "C"] }
    }
  })))
  .unwrap();

  let only_c: HashSet<ArtifactId> = [ArtifactId::from("C")].into_iter().collect();
  assert!(!pipeline.is_derivable("W", &only_c));

  let only_a: HashSet<ArtifactId> = [ArtifactId::from("A")].into_iter().collect();
  assert!(pipeline.is_derivable("W", &only_a));
}

#[test]
fn test_duplicate_mode_name() {
  let mut def = base_def();
  def["modes"][1]["name"] = json!("LFR-E");

  let result = validate(parse(def));
  assert!(matches!(result, Err(ValidationError::DuplicateMode { .. })));
}

#[test]
fn test_mode_output_must_be_elementary_output() {
  let mut def = base_def();
  def["modes"][0]["outputs"][0]["artifact"] = json!("SCI_DEMUX");

  let result = validate(parse(def));
  assert!(matches!(
    result,
    Err(ValidationError::ModeArtifactClass {
      expected: ArtifactClass::Output,
      actual: ArtifactClass::Intermediate,
      ..
    })
  ));
}

#[test]
fn test_mode_artifact_listed_twice() {
  let mut def = base_def();
  def["modes"][0]["inputs"][1]["artifact"] = json!("L1R_SCI_V2");

  let result = validate(parse(def));
  assert!(matches!(
    result,
    Err(ValidationError::DuplicateModeArtifact { .. })
  ));
}

#[test]
fn test_mode_missing_required_input() {
  let mut def = base_def();
  // LFR-V without the bias current cannot derive L2_V.
  def["modes"][1]["inputs"]
    .as_array_mut()
    .unwrap()
    .truncate(2);

  let result = validate(parse(def));
  assert_eq!(
    result.unwrap_err(),
    ValidationError::ModeUnsatisfiable {
      mode: "LFR-V".to_string(),
      artifact: ArtifactId::from("L2_V"),
    }
  );
}

#[test]
fn test_descriptor_lists_sources() {
  let pipeline = validate(parse(base_def())).unwrap();
  let descriptor = pipeline.descriptor();

  assert_eq!(descriptor.pipeline, "lfr");
  assert_eq!(descriptor.modes.len(), 2);

  let e = &descriptor.modes[0];
  assert_eq!(e.purpose, "Electric field");
  assert_eq!(e.outputs[0].sources, ["in_sci", "in_hk"]);
  assert_eq!(e.outputs[0].file_suffix.as_deref(), Some("_e"));

  let v = &descriptor.modes[1];
  assert_eq!(v.outputs[0].sources, ["in_sci", "in_hk", "in_cur"]);

  let value = serde_json::to_value(&descriptor).unwrap();
  assert_eq!(value["modes"][1]["outputs"][0]["option_id"], "out_v");
  assert!(value["modes"][1].get("purpose").is_none());
}
