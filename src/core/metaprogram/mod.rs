// src/core/metaprogram/mod.rs
//! Reconstruction of the instantiation call tree
//!
//! The builder consumes decoded begin/end events and produces an immutable
//! [`Metaprogram`]: an arena of closed frames plus the ids of the top-level
//! instantiations.

mod frame;
mod builder;
mod metaprogram;

pub use frame::{FrameId, SourceLocation};
pub use builder::build;
pub use metaprogram::Metaprogram;
