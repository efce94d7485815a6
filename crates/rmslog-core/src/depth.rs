//! Approximate markup depth at an offset
//!
//! This is a tag counter, not an HTML parser: comments, CDATA and
//! mismatched tags are not treated specially, and stray closing tags never
//! push the depth below zero.

use regex::Regex;
use std::sync::LazyLock;

/// `<name ...>`, `</name>` and `<name .../>` shapes.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/)?([A-Za-z0-9_-]+)(?:\s[^>]*)?/?>").expect("Tag regex pattern is valid")
});

/// Elements that never take a closing tag
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Count unmatched open tags that start strictly before `offset`.
///
/// Returns `None` when `offset` lies beyond the end of `markup`.
///
/// # Examples
///
/// ```
/// use rmslog_core::depth::infer_depth;
///
/// let html = "<div><div><pre>X</pre></div></div>";
/// assert_eq!(infer_depth(html, html.find("<pre>").unwrap()), Some(2));
/// ```
pub fn infer_depth(markup: &str, offset: usize) -> Option<usize> {
    if offset > markup.len() {
        return None;
    }

    let mut depth: usize = 0;
    for caps in TAG_PATTERN.captures_iter(markup) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() >= offset {
            break;
        }

        if caps.get(1).is_some() {
            depth = depth.saturating_sub(1);
            continue;
        }

        let name = caps[2].to_ascii_lowercase();
        let self_closing = whole.as_str().ends_with("/>");
        if !self_closing && !VOID_TAGS.contains(&name.as_str()) {
            depth += 1;
        }
    }

    Some(depth)
}

/// Resumable form of [`infer_depth`] for offsets visited in increasing order.
///
/// Keeps the running depth and where the last counted tag ended, so a
/// document is scanned once however many offsets are queried. Querying an
/// offset below the previous one restarts from the beginning.
#[derive(Debug, Clone)]
pub struct DepthScanner<'a> {
    markup: &'a str,
    depth: usize,
    /// End of the last tag counted
    resume: usize,
    last_offset: usize,
}

impl<'a> DepthScanner<'a> {
    pub fn new(markup: &'a str) -> Self {
        Self {
            markup,
            depth: 0,
            resume: 0,
            last_offset: 0,
        }
    }

    /// Same result as `infer_depth(markup, offset)`.
    pub fn depth_at(&mut self, offset: usize) -> Option<usize> {
        if offset > self.markup.len() {
            return None;
        }
        if offset < self.last_offset {
            *self = Self::new(self.markup);
        }
        self.last_offset = offset;

        let markup = self.markup;
        let base = self.resume;
        for caps in TAG_PATTERN.captures_iter(&markup[base..]) {
            let Some(whole) = caps.get(0) else { continue };
            if base + whole.start() >= offset {
                break;
            }
            self.resume = base + whole.end();

            if caps.get(1).is_some() {
                self.depth = self.depth.saturating_sub(1);
                continue;
            }

            let name = caps[2].to_ascii_lowercase();
            let self_closing = whole.as_str().ends_with("/>");
            if !self_closing && !VOID_TAGS.contains(&name.as_str()) {
                self.depth += 1;
            }
        }

        Some(self.depth)
    }
}
