// src/core/metaprogram/metaprogram.rs
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::core::display::{self, CallGraphNode};
use crate::core::trace::{DecodeOptions, InstantiationKind, Trace, TraceCollection, TraceDecoder};
use crate::error::Result;
use super::builder::build;
use super::frame::{Frame, FrameId};

/// The reconstructed instantiation tree of one evaluation.
///
/// The evaluated expression itself is not an instantiation: it is shown as a
/// synthesized root labelled `root_name` that owns `roots` as its children.
#[derive(Debug, Clone, Serialize)]
pub struct Metaprogram {
    root_name: String,
    evaluation_result: String,
    frames: Vec<Frame>,
    roots: Vec<FrameId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaprogramStats {
    pub total_frames: usize,
    pub root_frames: usize,
    pub leaf_frames: usize,
    /// Deepest frame, counting the roots as depth 1
    pub max_depth: usize,
    pub frames_by_kind: BTreeMap<InstantiationKind, usize>,
}

impl Metaprogram {
    pub(crate) fn new(
        root_name: String,
        evaluation_result: String,
        frames: Vec<Frame>,
        roots: Vec<FrameId>,
    ) -> Self {
        Self {
            root_name,
            evaluation_result,
            frames,
            roots,
        }
    }

    /// Decode a trace and build its metaprogram
    pub fn from_trace(
        trace: &Trace,
        options: DecodeOptions,
        full_mode: bool,
        root_name: &str,
        evaluation_result: &str,
    ) -> Result<Self> {
        let events = TraceDecoder::new(trace, options).decode()?;
        let metaprogram = build(events, full_mode, root_name, evaluation_result)?;
        info!(
            "Reconstructed {} instantiations from {} trace entries",
            metaprogram.len(),
            trace.entries.len()
        );
        Ok(metaprogram)
    }

    /// Parse a serialized trace collection holding exactly one trace
    pub fn from_trace_json(
        content: &str,
        options: DecodeOptions,
        full_mode: bool,
        root_name: &str,
        evaluation_result: &str,
    ) -> Result<Self> {
        let trace = TraceCollection::from_json(content)?.into_single_trace()?;
        Self::from_trace(&trace, options, full_mode, root_name, evaluation_result)
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn evaluation_result(&self) -> &str {
        &self.evaluation_result
    }

    pub fn roots(&self) -> &[FrameId] {
        &self.roots
    }

    pub fn frame(&self, id: FrameId) -> &Frame {
        &self.frames[id.0]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Pre-order listing of the tree, starting with the synthesized root
    pub fn call_graph(&self) -> Vec<CallGraphNode<'_>> {
        display::flatten(self)
    }

    pub fn get_statistics(&self) -> MetaprogramStats {
        let mut frames_by_kind = BTreeMap::new();
        for frame in &self.frames {
            *frames_by_kind.entry(frame.kind).or_insert(0) += 1;
        }

        let mut max_depth = 0;
        let mut pending: Vec<(FrameId, usize)> = self.roots.iter().map(|id| (*id, 1)).collect();
        while let Some((id, depth)) = pending.pop() {
            max_depth = max_depth.max(depth);
            pending.extend(self.frame(id).children().iter().map(|child| (*child, depth + 1)));
        }

        MetaprogramStats {
            total_frames: self.frames.len(),
            root_frames: self.roots.len(),
            leaf_frames: self.frames.iter().filter(|frame| frame.is_leaf()).count(),
            max_depth,
            frames_by_kind,
        }
    }
}
