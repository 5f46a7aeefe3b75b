// src/core/trace/mod.rs
//! Decoding of templight-style instantiation traces
//!
//! A trace is a flat list of begin/end events plus a name table in which
//! names refer to each other through placeholders. This module turns the
//! serialized form into typed [`DecodedEvent`]s ready for the metaprogram
//! builder.

mod format;
mod kind;
mod names;
mod locations;
mod decoder;

pub use format::{DictionaryEntry, RawSourceLocation, TemplateName, Trace, TraceCollection, TraceEntry};
pub use kind::InstantiationKind;
pub use decoder::{DecodedEvent, DecodeOptions, TraceDecoder};
