// src/core/display/call_graph.rs
use crate::core::metaprogram::{FrameId, Metaprogram};
use crate::core::trace::InstantiationKind;

/// One line's worth of the call graph in pre-order, with enough shape
/// information (depth, number of children) to draw tree connectors
#[derive(Debug, Clone, PartialEq)]
pub struct CallGraphNode<'a> {
    pub name: &'a str,
    /// `None` only for the synthesized evaluation-result root
    pub kind: Option<InstantiationKind>,
    pub depth: usize,
    pub children: usize,
}

impl<'a> CallGraphNode<'a> {
    pub fn root(name: &'a str, children: usize) -> Self {
        Self {
            name,
            kind: None,
            depth: 0,
            children,
        }
    }

    pub fn new(name: &'a str, kind: InstantiationKind, depth: usize, children: usize) -> Self {
        Self {
            name,
            kind: Some(kind),
            depth,
            children,
        }
    }

    /// The node's text without any tree decoration
    pub fn content(&self) -> String {
        match self.kind {
            Some(kind) => format!("{} ({})", self.name, kind.display_name()),
            None => self.name.to_string(),
        }
    }
}

/// List the synthesized root and every frame below it in depth-first pre-order
pub fn flatten(metaprogram: &Metaprogram) -> Vec<CallGraphNode<'_>> {
    let mut nodes = Vec::with_capacity(metaprogram.len() + 1);
    nodes.push(CallGraphNode::root(
        metaprogram.root_name(),
        metaprogram.roots().len(),
    ));

    let mut pending: Vec<(FrameId, usize)> = metaprogram
        .roots()
        .iter()
        .rev()
        .map(|id| (*id, 1))
        .collect();

    while let Some((id, depth)) = pending.pop() {
        let frame = metaprogram.frame(id);
        nodes.push(CallGraphNode {
            name: &frame.name,
            kind: Some(frame.kind),
            depth,
            children: frame.children().len(),
        });
        pending.extend(frame.children().iter().rev().map(|child| (*child, depth + 1)));
    }

    nodes
}
