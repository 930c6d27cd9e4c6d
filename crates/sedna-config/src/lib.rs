//! Sedna Config
//!
//! This crate contains the serializable pipeline configuration types for Sedna.
//! These types represent a pipeline declaration before it is validated and
//! locked by `sedna-pipeline`.
//!
//! A pipeline declaration lists:
//! - the artifact ids of each class (elementary inputs, intermediates, outputs)
//! - for every derived artifact, its ordered slots and the ordered candidate
//!   artifacts that may satisfy each slot
//! - the modes: named bundles of elementary outputs and the inputs they need
//!
//! Processing functions are not part of the configuration. They are bound in
//! code when a registry is built from the locked pipeline.

mod artifact;
mod mode;
mod pipeline;

pub use artifact::ArtifactId;
pub use mode::{ModeDef, ModeInputDef, ModeOutputDef};
pub use pipeline::{PipelineDef, SlotsDef};
