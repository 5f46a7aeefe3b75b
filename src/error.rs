use std::fmt;

use thiserror::Error;

/// Main error type for metatrace operations
#[derive(Error, Debug)]
pub enum MetatraceError {
    #[error("Malformed trace entry {index}: {problem}")]
    MalformedEvent { index: usize, problem: EventProblem },

    #[error("Trace entry {index} has an unknown instantiation kind: {code}")]
    UnknownKind { index: usize, code: i32 },

    #[error("Name resolution failed{}: {source}", at_entry(.entry))]
    NameResolution {
        entry: Option<usize>,
        #[source]
        source: NameResolutionError,
    },

    #[error("Unbalanced trace{}: {}", at_entry(.entry), unbalanced_reason(.open_frames))]
    UnbalancedTrace { entry: Option<usize>, open_frames: usize },

    #[error("Trace format error: {0}")]
    TraceFormat(#[from] serde_json::Error),

    #[error("Trace format error: {0}")]
    TraceLayout(String),

    #[error("Trace entry {index} references file id {file_id} that was never named")]
    UnknownFileId { index: usize, file_id: u32 },

    #[error("Trace entry {index} uses a compressed name, which cannot be decoded")]
    UnsupportedName { index: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a raw trace entry could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventProblem {
    BothBeginAndEnd,
    NeitherBeginNorEnd,
    EmptyName,
}

impl fmt::Display for EventProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EventProblem::BothBeginAndEnd => "entry has both a begin and an end payload",
            EventProblem::NeitherBeginNorEnd => "entry has neither a begin nor an end payload",
            EventProblem::EmptyName => "template name has no name, dict_id or compressed_name",
        };
        f.write_str(text)
    }
}

/// Failures of dictionary-compressed name resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameResolutionError {
    #[error("dictionary id {id} is out of range (table has {table_size} entries)")]
    OutOfRange { id: u32, table_size: usize },

    #[error("dictionary entry {id} has no marker id for placeholder {placeholder}")]
    MissingMarker { id: u32, placeholder: usize },

    #[error("dictionary entry {id} refers back to itself")]
    Cycle { id: u32 },
}

fn at_entry(entry: &Option<usize>) -> String {
    match entry {
        Some(index) => format!(" at entry {}", index),
        None => String::new(),
    }
}

fn unbalanced_reason(open_frames: &usize) -> String {
    if *open_frames == 0 {
        "end event without a matching begin".to_string()
    } else {
        format!("{} frame(s) still open at the end of the trace", open_frames)
    }
}

pub type Result<T> = std::result::Result<T, MetatraceError>;
