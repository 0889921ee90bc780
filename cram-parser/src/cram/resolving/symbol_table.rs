//! Symbol table
//!
//! The cross-file registry of topic ids, filled during the resolver's
//! first pass. Lookup is by exact, case-sensitive topic id. The map is
//! only ever probed, never iterated: every ordering the compiler emits
//! comes from walking the documents in input order, so the table's
//! internal layout cannot leak into the output.

use crate::cram::ast::range::Range;
use std::collections::HashMap;

/// Where a topic id was declared.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    pub file_id: String,
    pub location: Range,
    pub synthesized: bool,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a topic id. On a collision the existing entry is returned
    /// untouched so the caller can report both declaration sites.
    pub fn insert(&mut self, topic_id: &str, entry: SymbolEntry) -> Result<(), SymbolEntry> {
        match self.entries.get(topic_id) {
            Some(existing) => Err(existing.clone()),
            None => {
                self.entries.insert(topic_id.to_string(), entry);
                Ok(())
            }
        }
    }

    pub fn contains(&self, topic_id: &str) -> bool {
        self.entries.contains_key(topic_id)
    }

    pub fn lookup(&self, topic_id: &str) -> Option<&SymbolEntry> {
        self.entries.get(topic_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file_id: &str) -> SymbolEntry {
        SymbolEntry {
            file_id: file_id.to_string(),
            location: Range::default(),
            synthesized: false,
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = SymbolTable::new();
        table.insert("alpha", entry("a.cram")).unwrap();
        assert!(table.contains("alpha"));
        assert_eq!(table.lookup("alpha").unwrap().file_id, "a.cram");
        assert!(!table.contains("Alpha"));
    }

    #[test]
    fn test_collision_returns_first_entry() {
        let mut table = SymbolTable::new();
        table.insert("alpha", entry("a.cram")).unwrap();
        let existing = table.insert("alpha", entry("b.cram")).unwrap_err();
        assert_eq!(existing.file_id, "a.cram");
        assert_eq!(table.len(), 1);
    }
}
