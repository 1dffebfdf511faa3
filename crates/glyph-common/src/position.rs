//! Source positions and a shared path intern table.
//!
//! `SourcePosition { line, character, file }` (1-based line, 0-based
//! character) interns the file path so a position is `Copy` and cheap to
//! carry on every token and AST node.

use std::fmt;
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

/// Interned source file path. Equality/hash are by index, not by string
/// content, so comparisons stay cheap even with thousands of positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// Append-only file path interner. Repeated inserts of the same path return
/// the same `FileId` (the string-intern pool named in the concurrency model
/// is append-only: this is that pool, specialised to source paths).
#[derive(Default)]
pub struct FileTable {
    inner: Mutex<FileTableInner>,
}

#[derive(Default)]
struct FileTableInner {
    paths: Vec<Arc<str>>,
    lookup: FxHashMap<Arc<str>, FileId>,
}

impl FileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, path: &str) -> FileId {
        let mut inner = self.inner.lock().expect("file table poisoned");
        if let Some(id) = inner.lookup.get(path) {
            return *id;
        }
        let id = FileId(inner.paths.len() as u32);
        let arc: Arc<str> = Arc::from(path);
        inner.paths.push(arc.clone());
        inner.lookup.insert(arc, id);
        id
    }

    pub fn path(&self, id: FileId) -> Arc<str> {
        let inner = self.inner.lock().expect("file table poisoned");
        inner.paths[id.0 as usize].clone()
    }
}

/// A 1-based line, 0-based column position within a named source file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
    pub file: FileId,
}

impl SourcePosition {
    pub fn new(line: u32, character: u32, file: FileId) -> Self {
        SourcePosition { line, character, file }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} col {}", self.line, self.character)
    }
}

/// Byte-offset line index, built once per source file, used to turn a byte
/// offset produced while lexing/parsing into a `(line, character)` pair.
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        LineIndex { line_starts }
    }

    /// Returns `(line, character)`, both matching `SourcePosition`'s
    /// convention: 1-based line, 0-based character.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let col = offset - self.line_starts[line_idx];
        (line_idx as u32 + 1, col)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_table_interns_repeats() {
        let table = FileTable::new();
        let a = table.intern("header.glyph");
        let b = table.intern("header.glyph");
        assert_eq!(a, b);
        let c = table.intern("other.glyph");
        assert_ne!(a, c);
    }

    #[test]
    fn line_index_tracks_multiple_lines() {
        let idx = LineIndex::new("abc\ndef\nghi");
        assert_eq!(idx.line_col(0), (1, 0));
        assert_eq!(idx.line_col(4), (2, 0));
        assert_eq!(idx.line_col(9), (3, 1));
        assert_eq!(idx.line_count(), 3);
    }

    #[test]
    fn line_index_newline_at_offset_belongs_to_previous_line() {
        let idx = LineIndex::new("ab\ncd");
        assert_eq!(idx.line_col(2), (1, 2));
        assert_eq!(idx.line_col(3), (2, 0));
    }
}
