use std::collections::HashMap;
use std::sync::Arc;

use crate::core::metaprogram::SourceLocation;

/// Remembers file names by id; traces only send a name the first time an id is used
#[derive(Debug)]
pub struct LocationInterner {
    files: HashMap<u32, Arc<str>>,
    empty: Arc<str>,
}

impl Default for LocationInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationInterner {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            empty: Arc::from(""),
        }
    }

    /// Whether a path has been recorded for `file_id`
    pub fn knows(&self, file_id: u32) -> bool {
        self.files.contains_key(&file_id)
    }

    /// Build a location, recording `file_name` for `file_id` when it is present.
    /// An id that was never named resolves to the empty path.
    pub fn intern(
        &mut self,
        file_id: u32,
        file_name: Option<&str>,
        line: u32,
        column: Option<u32>,
    ) -> SourceLocation {
        let file = match file_name {
            Some(name) => {
                let path: Arc<str> = match self.files.get(&file_id) {
                    Some(existing) if existing.as_ref() == name => existing.clone(),
                    _ => Arc::from(name),
                };
                self.files.insert(file_id, path.clone());
                path
            }
            None => self
                .files
                .get(&file_id)
                .cloned()
                .unwrap_or_else(|| self.empty.clone()),
        };

        SourceLocation::new(file, line, column)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_reused_for_later_references() {
        let mut interner = LocationInterner::new();
        let first = interner.intern(1, Some("fib.hpp"), 10, Some(4));
        let second = interner.intern(1, None, 20, None);

        assert_eq!(first.file(), "fib.hpp");
        assert_eq!(second.file(), "fib.hpp");
        assert!(std::ptr::eq(first.file(), second.file()));
        assert_eq!(second.line, 20);
        assert_eq!(second.column(), None);
        assert_eq!(first.column(), Some(4));
    }

    #[test]
    fn test_last_write_wins() {
        let mut interner = LocationInterner::new();
        interner.intern(2, Some("old.hpp"), 1, None);
        interner.intern(2, Some("new.hpp"), 1, None);

        assert_eq!(interner.intern(2, None, 3, None).file(), "new.hpp");
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_unknown_id_falls_back_to_empty_path() {
        let mut interner = LocationInterner::new();
        let location = interner.intern(42, None, 7, Some(1));

        assert_eq!(location.file(), "");
        assert!(!interner.knows(42));
        assert_eq!(location.line, 7);
    }
}
