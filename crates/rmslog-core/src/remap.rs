//! Mapping scanned block positions back into the original document
//!
//! Blocks are scanned in preprocessed text, but navigation needs offsets in
//! the document the user actually has open. The mapping is a best-effort
//! search: the raw inner text of each block is looked up in the original,
//! starting where the previous block ended. Content that repeats earlier
//! in the document is only located correctly because of that moving
//! cursor; content that cannot be found is reported as `None` and the
//! caller keeps the scanned offsets.

const OPEN_DELIMITER: &str = "<pre";
const CLOSE_DELIMITER: &str = "</pre>";

/// Location of a block in the original document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remapped {
    pub start: usize,
    pub end: usize,
    pub title_line: Option<usize>,
}

/// Cursor-based locator over the original document
#[derive(Debug)]
pub struct Remapper<'a> {
    original: &'a str,
    /// ASCII-lowercased copy used for delimiter searches (same byte offsets)
    folded: String,
    cursor: usize,
    lines: LineCounter<'a>,
}

impl<'a> Remapper<'a> {
    pub fn new(original: &'a str) -> Self {
        Self {
            original,
            folded: original.to_ascii_lowercase(),
            cursor: 0,
            lines: LineCounter::new(original),
        }
    }

    /// Locate the block whose raw inner text is `inner`.
    ///
    /// On success the cursor moves past the located region so repeated
    /// content maps to successive occurrences.
    pub fn locate(&mut self, inner: &str) -> Option<Remapped> {
        if inner.is_empty() {
            return None;
        }

        let found = self.cursor + self.original.get(self.cursor..)?.find(inner)?;
        let after = found + inner.len();

        let Some(pre_start) = self.folded[..found].rfind(OPEN_DELIMITER) else {
            // Not inside a <pre>: use the text's own span
            self.cursor = after;
            return Some(Remapped {
                start: found,
                end: after,
                title_line: self.lines.first_nonblank_line(found, after),
            });
        };

        // Both delimiters only count when they start before the next '>'
        let rest = &self.folded[after..];
        let (end, inner_end) = match rest.find('>') {
            Some(gt) => {
                let head = &rest[..=gt];
                match (head.find(CLOSE_DELIMITER), head.find(OPEN_DELIMITER)) {
                    (Some(close), _) => (after + close + CLOSE_DELIMITER.len(), after + close),
                    (None, Some(open)) => (after + open, after),
                    (None, None) => (after, after),
                }
            }
            None => (after, after),
        };

        let inner_start = self.folded[pre_start..]
            .find('>')
            .map_or(pre_start, |i| pre_start + i + 1);

        self.cursor = end;
        Some(Remapped {
            start: pre_start,
            end,
            title_line: self.lines.first_nonblank_line(inner_start, inner_end),
        })
    }
}

/// Running newline count for offsets visited in increasing order.
///
/// Going backwards restarts the count from the top of the document.
#[derive(Debug, Clone)]
pub struct LineCounter<'a> {
    doc: &'a str,
    pos: usize,
    lines: usize,
}

impl<'a> LineCounter<'a> {
    pub fn new(doc: &'a str) -> Self {
        Self {
            doc,
            pos: 0,
            lines: 0,
        }
    }

    /// Zero-based line containing byte `offset`
    pub fn line_at(&mut self, offset: usize) -> Option<usize> {
        if offset < self.pos {
            self.pos = 0;
            self.lines = 0;
        }
        let chunk = self.doc.get(self.pos..offset)?;
        self.lines += chunk.bytes().filter(|&b| b == b'\n').count();
        self.pos = offset;
        Some(self.lines)
    }

    /// Zero-based line number of the first non-blank line in `doc[start..end]`.
    pub fn first_nonblank_line(&mut self, start: usize, end: usize) -> Option<usize> {
        if end <= start {
            return None;
        }
        let inner = self.doc.get(start..end)?;
        let offset = inner.split('\n').position(|line| !line.trim().is_empty())?;
        Some(self.line_at(start)? + offset)
    }
}
