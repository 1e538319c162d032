//! Comment map
//!
//! Comments and blank lines are never part of the parsed value tree. They
//! live here, keyed by their line index in the full normalized document, and
//! get their keys shifted whenever a mutation grows the serialized value.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Matches a comment line (`// ...`) or a blank line
static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(//|$)").unwrap());

/// Returns true for lines that carry no structured content.
pub fn is_comment_line(line: &str) -> bool {
    COMMENT_LINE.is_match(line)
}

/// Position-indexed store of comment and blank lines.
///
/// Keys are unique line indices in the assembled document; iteration is in
/// ascending key order, which reassembly and position translation rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
    entries: BTreeMap<usize, String>,
}

impl CommentMap {
    /// Create an empty comment map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a comment line at a document position.
    pub fn insert(&mut self, line: usize, text: String) {
        self.entries.insert(line, text);
    }

    /// Get the comment stored at a document position, if any.
    pub fn get(&self, line: usize) -> Option<&str> {
        self.entries.get(&line).map(String::as_str)
    }

    /// Number of stored comment lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no comments are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Translate a content-line index into the position that line occupies
    /// in the assembled document.
    ///
    /// Walks comment keys in ascending order, making room for every comment
    /// emitted at or before the running position. This is the exact inverse
    /// of the reassembly walk.
    pub fn document_position(&self, content_line: usize) -> usize {
        let mut pos = content_line;
        for &key in self.entries.keys() {
            if key <= pos {
                pos += 1;
            } else {
                break;
            }
        }
        pos
    }

    /// Shift every comment stored after `start_pos` down by `delta` lines.
    ///
    /// Comments at or before `start_pos` keep their key: they annotate
    /// content that did not move. Comments past it slide to make room for
    /// the lines a mutation inserted.
    pub fn shift_after(&mut self, start_pos: usize, delta: usize) {
        if delta == 0 {
            return;
        }
        let mut shifted = BTreeMap::new();
        for (line, comment) in std::mem::take(&mut self.entries) {
            if line <= start_pos {
                shifted.insert(line, comment);
            } else {
                shifted.insert(line + delta, comment);
            }
        }
        self.entries = shifted;
    }
}
