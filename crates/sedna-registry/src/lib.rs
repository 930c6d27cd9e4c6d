//! Sedna Registry
//!
//! The registry pairs a locked [`Pipeline`](sedna_pipeline::Pipeline) with the
//! processing functions that derive its intermediates and outputs. Lookup of
//! an artifact yields either [`Entry::Leaf`] (an elementary input, which must
//! be supplied) or [`Entry::Derived`] (its slots and function).
//!
//! The registry is immutable once built and can be shared across sessions.

mod error;
mod function;
mod registry;

pub use error::RegistryError;
pub use function::{Binding, Bindings, ProcessingFunction};
pub use registry::{Entry, Registry, RegistryBuilder};
