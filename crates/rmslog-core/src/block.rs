//! Job block domain types
//!
//! A [`Block`] is one `<pre>`-delimited job record extracted from an RMS
//! log, carrying its position in the reference document and the metadata
//! parsed out of its text.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

// ─────────────────────────────────────────────────────────────────────────────
// Level
// ─────────────────────────────────────────────────────────────────────────────

/// Nesting depth of a block in the surrounding markup.
///
/// `Unknown` ranks below every known depth, so blocks whose depth could not
/// be inferred never become parents of blocks with a known depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    #[default]
    Unknown,
    Depth(usize),
}

impl Level {
    /// The known depth, if any
    pub fn depth(self) -> Option<usize> {
        match self {
            Level::Unknown => None,
            Level::Depth(d) => Some(d),
        }
    }
}

impl From<Option<usize>> for Level {
    fn from(depth: Option<usize>) -> Self {
        depth.map_or(Level::Unknown, Level::Depth)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Unknown => write!(f, "N/A"),
            Level::Depth(d) => write!(f, "{}", d),
        }
    }
}

/// Levels serialize as a plain number, `null` when unknown.
impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.depth().serialize(serializer)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block
// ─────────────────────────────────────────────────────────────────────────────

/// A job record extracted from a log document
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Markup depth at the start of the record
    pub level: Level,

    /// First non-blank line of the normalized content (may be empty)
    pub title: String,

    /// Tag-stripped, entity-decoded, whitespace-normalized body
    pub content: String,

    /// Byte offset of the opening `<pre` in the reference document
    pub start: usize,

    /// Byte offset just past the region in the reference document
    pub end: usize,

    /// Elapsed seconds, `Some(0.0)` for skipped or deactivated jobs
    pub elapsed: Option<f64>,

    /// Project realization (run) number
    pub realization: Option<u32>,

    /// Zero-based line of the title in the reference document
    pub title_line: Option<usize>,
}

/// Display classification of a block, derived from its title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Note,
    Skipped,
    Deactivated,
    Job,
}

static NOTE_TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^note\b").expect("Note title regex pattern is valid"));

impl Block {
    /// Classify the block by its title
    pub fn kind(&self) -> BlockKind {
        let title = self.title.trim();
        let lower = title.to_lowercase();
        if NOTE_TITLE_PATTERN.is_match(title) {
            BlockKind::Note
        } else if lower.ends_with("skipped") {
            BlockKind::Skipped
        } else if lower.ends_with("deactivated") {
            BlockKind::Deactivated
        } else {
            BlockKind::Job
        }
    }

    /// Byte length of the region in the reference document
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Block {
        Block {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_level_ranks_lowest() {
        assert!(Level::Unknown < Level::Depth(0));
        assert!(Level::Depth(0) < Level::Depth(3));
        assert_eq!(Level::from(None), Level::Unknown);
        assert_eq!(Level::from(Some(2)), Level::Depth(2));
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Unknown.to_string(), "N/A");
        assert_eq!(Level::Depth(4).to_string(), "4");
    }

    #[test]
    fn test_block_kind_from_title() {
        assert_eq!(titled("Note: check inputs").kind(), BlockKind::Note);
        assert_eq!(titled("NOTE").kind(), BlockKind::Note);
        assert_eq!(titled("Notebook export").kind(), BlockKind::Job);
        assert_eq!(titled("Run grid - skipped").kind(), BlockKind::Skipped);
        assert_eq!(titled("Run grid - DEACTIVATED").kind(), BlockKind::Deactivated);
        assert_eq!(titled("Create horizons").kind(), BlockKind::Job);
    }

    #[test]
    fn test_block_serializes_camel_case() {
        let block = Block {
            level: Level::Depth(1),
            title: "Job".to_string(),
            start: 3,
            end: 20,
            title_line: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["titleLine"], 2);
        assert!(json["elapsed"].is_null());
    }

    #[test]
    fn test_unknown_level_serializes_as_null() {
        let json = serde_json::to_value(Block::default()).unwrap();
        assert!(json["level"].is_null());
    }
}
