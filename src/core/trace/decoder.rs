// src/core/trace/decoder.rs
use tracing::debug;

use crate::core::metaprogram::SourceLocation;
use crate::error::{EventProblem, MetatraceError, Result};
use super::format::{RawSourceLocation, TemplateName, Trace, TraceEntry};
use super::kind::InstantiationKind;
use super::locations::LocationInterner;
use super::names::{NameResolver, COMPRESSED_NAME_PLACEHOLDER};

/// A trace entry after kind mapping, name resolution and location interning
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEvent {
    Begin {
        kind: InstantiationKind,
        name: String,
        location: SourceLocation,
    },
    End,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Turn the degraded outputs (compressed names, unnamed file ids) into errors
    pub strict: bool,
}

/// Walks a trace's entries in order and produces typed events
pub struct TraceDecoder<'a> {
    entries: &'a [TraceEntry],
    names: NameResolver<'a>,
    locations: LocationInterner,
    options: DecodeOptions,
}

impl<'a> TraceDecoder<'a> {
    pub fn new(trace: &'a Trace, options: DecodeOptions) -> Self {
        Self {
            entries: &trace.entries,
            names: NameResolver::new(&trace.names),
            locations: LocationInterner::new(),
            options,
        }
    }

    /// Decode every entry, stopping at the first failure
    pub fn decode(&mut self) -> Result<Vec<DecodedEvent>> {
        let entries = self.entries;
        let events = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.decode_entry(index, entry))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Decoded {} trace entries ({} names, {} files)",
            events.len(),
            self.names.table_size(),
            self.locations.len()
        );

        Ok(events)
    }

    pub fn decode_entry(&mut self, index: usize, entry: &TraceEntry) -> Result<DecodedEvent> {
        match (&entry.begin, &entry.end) {
            (Some(_), Some(_)) => Err(MetatraceError::MalformedEvent {
                index,
                problem: EventProblem::BothBeginAndEnd,
            }),
            (None, None) => Err(MetatraceError::MalformedEvent {
                index,
                problem: EventProblem::NeitherBeginNorEnd,
            }),
            (None, Some(_)) => Ok(DecodedEvent::End),
            (Some(begin), None) => {
                let kind = InstantiationKind::from_code(begin.kind).ok_or(
                    MetatraceError::UnknownKind {
                        index,
                        code: begin.kind,
                    },
                )?;
                let name = self.resolve_template_name(index, &begin.name)?;
                let location = self.resolve_location(index, &begin.location)?;

                Ok(DecodedEvent::Begin { kind, name, location })
            }
        }
    }

    /// Literal names win, then dictionary ids, then the compressed-name placeholder
    pub fn resolve_template_name(&mut self, index: usize, name: &TemplateName) -> Result<String> {
        if let Some(literal) = &name.name {
            return Ok(literal.clone());
        }

        if let Some(dict_id) = name.dict_id {
            return self
                .names
                .resolve(dict_id)
                .map_err(|source| MetatraceError::NameResolution {
                    entry: Some(index),
                    source,
                });
        }

        if name.compressed_name.is_none() {
            return Err(MetatraceError::MalformedEvent {
                index,
                problem: EventProblem::EmptyName,
            });
        }

        if self.options.strict {
            return Err(MetatraceError::UnsupportedName { index });
        }

        Ok(COMPRESSED_NAME_PLACEHOLDER.to_string())
    }

    fn resolve_location(&mut self, index: usize, raw: &RawSourceLocation) -> Result<SourceLocation> {
        if self.options.strict && raw.file_name.is_none() && !self.locations.knows(raw.file_id) {
            return Err(MetatraceError::UnknownFileId {
                index,
                file_id: raw.file_id,
            });
        }

        Ok(self.locations.intern(
            raw.file_id,
            raw.file_name.as_deref(),
            raw.line,
            raw.column,
        ))
    }
}
