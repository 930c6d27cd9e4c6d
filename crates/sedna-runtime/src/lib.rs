//! Sedna Runtime
//!
//! This crate resolves requested artifacts against a [`Registry`]. The
//! [`Resolver`] walks slot declarations backward from a requested artifact,
//! derives every missing ancestor bottom-up and caches each result in the
//! session's store, so every processing function runs at most once per
//! session.
//!
//! [`Session`] is the caller-facing entry point: `supply` elementary inputs,
//! then `request` outputs.
//!
//! [`Registry`]: sedna_registry::Registry

mod error;
mod resolver;
mod session;

pub use error::{RuntimeError, SlotFrame};
pub use resolver::Resolver;
pub use session::{ModeDescription, Session};
