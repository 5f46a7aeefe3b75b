// src/core/trace/format.rs
use serde::{Deserialize, Serialize};

use crate::error::{MetatraceError, Result};

/// A serialized trace file. Holds exactly one trace in practice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceCollection {
    #[serde(default)]
    pub traces: Vec<Trace>,
}

/// One compilation's instantiation events plus its shared name table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub entries: Vec<TraceEntry>,
    /// Dictionary of compressed names referenced by `TemplateName::dict_id`
    #[serde(default)]
    pub names: Vec<DictionaryEntry>,
}

/// A single raw event; exactly one of `begin` and `end` must be present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<Begin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<End>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Begin {
    /// External instantiation kind code
    pub kind: i32,
    pub name: TemplateName,
    pub location: RawSourceLocation,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct End {}

/// The three ways a trace can name an instantiated entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dict_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSourceLocation {
    pub file_id: u32,
    /// Only sent the first time a file id appears
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

/// A name containing `'\0'` placeholders, each filled by the next marker id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub marked_name: String,
    #[serde(default)]
    pub marker_ids: Vec<u32>,
}

impl TraceCollection {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Unwrap the single trace a trace file is expected to carry
    pub fn into_single_trace(mut self) -> Result<Trace> {
        if self.traces.len() != 1 {
            return Err(MetatraceError::TraceLayout(format!(
                "expected exactly one trace in the trace file, found {}",
                self.traces.len()
            )));
        }
        Ok(self.traces.remove(0))
    }
}

impl TraceEntry {
    pub fn begin(kind: i32, name: TemplateName, location: RawSourceLocation) -> Self {
        Self {
            begin: Some(Begin { kind, name, location }),
            end: None,
        }
    }

    pub fn end() -> Self {
        Self {
            begin: None,
            end: Some(End {}),
        }
    }
}

impl TemplateName {
    pub fn literal(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn dictionary(dict_id: u32) -> Self {
        Self {
            dict_id: Some(dict_id),
            ..Self::default()
        }
    }
}

impl DictionaryEntry {
    pub fn new(marked_name: impl Into<String>, marker_ids: Vec<u32>) -> Self {
        Self {
            marked_name: marked_name.into(),
            marker_ids,
        }
    }
}
