// src/core/trace/names.rs
use std::collections::{HashMap, HashSet};

use crate::error::NameResolutionError;
use super::format::DictionaryEntry;

/// Character in a marked name that stands for the next marker id
pub const PLACEHOLDER: char = '\0';

/// Returned for names the trace only carries in compressed form
pub const COMPRESSED_NAME_PLACEHOLDER: &str = "?????";

/// Expands dictionary-compressed names against a trace's name table
pub struct NameResolver<'a> {
    table: &'a [DictionaryEntry],
    /// Already expanded entries, keyed by dictionary id
    resolved: HashMap<u32, String>,
}

impl<'a> NameResolver<'a> {
    pub fn new(table: &'a [DictionaryEntry]) -> Self {
        Self {
            table,
            resolved: HashMap::new(),
        }
    }

    pub fn table_size(&self) -> usize {
        self.table.len()
    }

    /// Resolve a dictionary id into a flat string.
    ///
    /// Runs on an explicit stack, so arbitrarily deep acyclic names resolve the
    /// same way whatever was cached before. An id that refers back to itself,
    /// directly or through other entries, fails with `Cycle`.
    pub fn resolve(&mut self, id: u32) -> Result<String, NameResolutionError> {
        let table = self.table;
        // ids whose expansion has started but not finished: the current path
        let mut in_progress: HashSet<u32> = HashSet::new();
        // (id, markers expanded)
        let mut pending: Vec<(u32, bool)> = vec![(id, false)];

        while let Some((current, expanded)) = pending.pop() {
            if expanded {
                let name = self.assemble(current)?;
                in_progress.remove(&current);
                self.resolved.insert(current, name);
                continue;
            }

            if self.resolved.contains_key(&current) {
                continue;
            }
            if in_progress.contains(&current) {
                return Err(NameResolutionError::Cycle { id: current });
            }

            let entry = Self::entry(table, current)?;
            let placeholders = placeholder_count(entry);
            if placeholders > entry.marker_ids.len() {
                return Err(NameResolutionError::MissingMarker {
                    id: current,
                    placeholder: entry.marker_ids.len(),
                });
            }

            in_progress.insert(current);
            pending.push((current, true));
            pending.extend(
                entry.marker_ids[..placeholders]
                    .iter()
                    .rev()
                    .filter(|marker| !self.resolved.contains_key(*marker))
                    .map(|marker| (*marker, false)),
            );
        }

        self.resolved
            .get(&id)
            .cloned()
            .ok_or(NameResolutionError::Cycle { id })
    }

    fn entry(table: &[DictionaryEntry], id: u32) -> Result<&DictionaryEntry, NameResolutionError> {
        table.get(id as usize).ok_or(NameResolutionError::OutOfRange {
            id,
            table_size: table.len(),
        })
    }

    /// Splice the already resolved markers of `id` into its marked name
    fn assemble(&self, id: u32) -> Result<String, NameResolutionError> {
        let entry = Self::entry(self.table, id)?;
        let mut markers = entry.marker_ids.iter();
        let mut name = String::with_capacity(entry.marked_name.len());

        for (placeholder, part) in entry.marked_name.split(PLACEHOLDER).enumerate() {
            if placeholder > 0 {
                let marker = markers
                    .next()
                    .ok_or(NameResolutionError::MissingMarker { id, placeholder: placeholder - 1 })?;
                let expanded = self
                    .resolved
                    .get(marker)
                    .ok_or(NameResolutionError::Cycle { id: *marker })?;
                name.push_str(expanded);
            }
            name.push_str(part);
        }

        Ok(name)
    }
}

fn placeholder_count(entry: &DictionaryEntry) -> usize {
    entry.marked_name.matches(PLACEHOLDER).count()
}
