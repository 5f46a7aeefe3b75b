// src/core/metaprogram/builder.rs
use tracing::{debug, warn};

use crate::core::trace::{DecodedEvent, InstantiationKind};
use crate::error::{MetatraceError, Result};
use super::frame::{Frame, FrameId, SourceLocation};
use super::metaprogram::Metaprogram;

/// A frame whose end event has not been seen yet
#[derive(Debug)]
struct OpenFrame {
    name: String,
    kind: InstantiationKind,
    location: SourceLocation,
    children: Vec<FrameId>,
}

/// Rebuilds the instantiation tree from a begin/end event stream.
///
/// Open frames live on a stack; a frame only moves into the arena once it
/// is closed, so every child id is allocated before its parent's.
pub struct MetaprogramBuilder {
    full_mode: bool,
    root_name: String,
    evaluation_result: String,
    frames: Vec<Frame>,
    roots: Vec<FrameId>,
    stack: Vec<OpenFrame>,
    /// Number of events handled so far, used to report the offending entry
    events_seen: usize,
    elided: usize,
}

impl MetaprogramBuilder {
    pub fn new(
        full_mode: bool,
        root_name: impl Into<String>,
        evaluation_result: impl Into<String>,
    ) -> Self {
        Self {
            full_mode,
            root_name: root_name.into(),
            evaluation_result: evaluation_result.into(),
            frames: Vec::new(),
            roots: Vec::new(),
            stack: Vec::new(),
            events_seen: 0,
            elided: 0,
        }
    }

    pub fn handle_event(&mut self, event: DecodedEvent) -> Result<()> {
        match event {
            DecodedEvent::Begin { kind, name, location } => {
                self.handle_begin(kind, name, location);
                Ok(())
            }
            DecodedEvent::End => self.handle_end(),
        }
    }

    pub fn handle_begin(&mut self, kind: InstantiationKind, name: String, location: SourceLocation) {
        self.events_seen += 1;
        self.stack.push(OpenFrame {
            name,
            kind,
            location,
            children: Vec::new(),
        });
    }

    pub fn handle_end(&mut self) -> Result<()> {
        let entry = self.events_seen;
        self.events_seen += 1;

        let closed = self.stack.pop().ok_or(MetatraceError::UnbalancedTrace {
            entry: Some(entry),
            open_frames: 0,
        })?;

        if !self.full_mode && closed.kind.is_bookkeeping() && closed.children.is_empty() {
            self.elided += 1;
            return Ok(());
        }

        let id = FrameId(self.frames.len());
        self.frames.push(Frame {
            name: closed.name,
            kind: closed.kind,
            location: closed.location,
            children: closed.children,
        });

        match self.stack.last_mut() {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }

        Ok(())
    }

    pub fn finish(self) -> Result<Metaprogram> {
        if !self.stack.is_empty() {
            warn!("Trace ended with {} unterminated frame(s)", self.stack.len());
            return Err(MetatraceError::UnbalancedTrace {
                entry: None,
                open_frames: self.stack.len(),
            });
        }

        debug!(
            "Built metaprogram with {} frames ({} roots, {} elided)",
            self.frames.len(),
            self.roots.len(),
            self.elided
        );

        Ok(Metaprogram::new(
            self.root_name,
            self.evaluation_result,
            self.frames,
            self.roots,
        ))
    }
}

/// Feed a whole decoded event stream through a fresh builder
pub fn build<I>(
    events: I,
    full_mode: bool,
    root_name: &str,
    evaluation_result: &str,
) -> Result<Metaprogram>
where
    I: IntoIterator<Item = DecodedEvent>,
{
    let mut builder = MetaprogramBuilder::new(full_mode, root_name, evaluation_result);
    for event in events {
        builder.handle_event(event)?;
    }
    builder.finish()
}
