// src/core/display/mod.rs
//! Terminal presentation of a metaprogram's call graph

mod call_graph;
mod renderer;
mod wrap;

pub use call_graph::{flatten, CallGraphNode};
pub use renderer::render;
