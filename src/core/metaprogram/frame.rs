use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::core::trace::InstantiationKind;

/// Index of a closed frame inside a metaprogram's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FrameId(pub(crate) usize);

/// Where an instantiation happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    file: Arc<str>,
    pub line: u32,
    /// Serialized as `NO_COLUMN` when the trace did not report one
    #[serde(serialize_with = "serialize_column")]
    column: Option<u32>,
}

impl SourceLocation {
    pub const NO_COLUMN: i64 = -1;

    pub fn new(file: Arc<str>, line: u32, column: Option<u32>) -> Self {
        Self { file, line, column }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn column(&self) -> Option<u32> {
        self.column
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column() {
            Some(column) => write!(f, "{}:{}:{}", self.file, self.line, column),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

fn serialize_column<S: Serializer>(column: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(column.map_or(SourceLocation::NO_COLUMN, i64::from))
}

/// One reconstructed instantiation together with the ids of its nested instantiations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub name: String,
    pub kind: InstantiationKind,
    pub location: SourceLocation,
    pub(crate) children: Vec<FrameId>,
}

impl Frame {
    /// Children in the order they were discovered in the trace
    pub fn children(&self) -> &[FrameId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
