//! Sedna Pipeline
//!
//! This crate provides the "locked" pipeline representation for Sedna.
//! A locked pipeline is the validated form of a [`PipelineDef`] that the
//! registry and resolver can rely on.
//!
//! Key differences from `sedna-config`:
//! - Every artifact id is unique and belongs to exactly one class
//! - Every slot candidate refers to a known artifact
//! - The candidate graph is acyclic
//! - Every mode is internally consistent and derivable from its own inputs
//!
//! [`PipelineDef`]: sedna_config::PipelineDef

mod descriptor;
mod error;
mod graph;
mod mode;
mod pipeline;
mod validate;

pub use descriptor::{Descriptor, InputDescriptor, ModeDescriptor, OutputDescriptor};
pub use error::ValidationError;
pub use graph::Graph;
pub use mode::Mode;
pub use pipeline::{ArtifactClass, Pipeline, SlotSpec};
pub use validate::validate;
