// src/core/mod.rs
mod engine;

// Trace decoding: names, locations, raw events
mod trace;

// Call tree reconstruction
mod metaprogram;

// Tree rendering and word wrapping
mod display;

pub use trace::DecodeOptions;
pub use metaprogram::Metaprogram;
pub use display::render;

// Export the main engine
pub use engine::{Engine, TraceRequest};
