//! Job block extraction from RMS log documents
//!
//! Scans a log document for `<pre>`-delimited job records and turns each
//! into a [`Block`]: normalized text, title, realization number, elapsed
//! time found after the record, markup depth and source position.
//!
//! Extraction never fails. Malformed markup, missing durations or blocks
//! that cannot be located in the original document only leave the affected
//! field empty on that one block.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

use crate::block::{Block, Level};
use crate::depth::DepthScanner;
use crate::duration::parse_duration;
use crate::entities::decode_entities;
use crate::remap::{LineCounter, Remapper};

/// Default number of characters searched for a duration after a block
pub const DEFAULT_DURATION_WINDOW: usize = 400;

// ─────────────────────────────────────────────────────────────────────────────
// Patterns
// ─────────────────────────────────────────────────────────────────────────────

/// A whole `<pre ...>...</pre>` region, inner text in group 1.
static REGION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<pre\b[^>]*>(.*?)</pre>").expect("Region regex pattern is valid")
});

static OPEN_DELIMITER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<pre\b").expect("Open delimiter regex pattern is valid")
});

/// `- for project realization 3`
static REALIZATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*-\s*for\s+project\s+realization\s*(\d+)\b")
        .expect("Realization regex pattern is valid")
});

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Tag strip regex pattern is valid"));

static SPACE_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t ]+").expect("Space run regex pattern is valid"));

/// Titles of jobs that did not run
static ZERO_ELAPSED_TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)-\s*(?:skipped|deactivated)\s*$")
        .expect("Skipped title regex pattern is valid")
});

static LABELLED_DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:elapsed|elapsed time|elapse|took|duration)[:\s]*([0-9]+:[0-5][0-9]:[0-5][0-9]\.[0-9]+)",
    )
    .expect("Labelled duration regex pattern is valid")
});

static BARE_DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+:[0-5][0-9]:[0-5][0-9]\.[0-9]+)")
        .expect("Bare duration regex pattern is valid")
});

// ─────────────────────────────────────────────────────────────────────────────
// Extractor
// ─────────────────────────────────────────────────────────────────────────────

/// Tunables for block extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Characters after a block's closing tag searched for its duration
    pub duration_window: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            duration_window: DEFAULT_DURATION_WINDOW,
        }
    }
}

/// Extracts job blocks from a log document
#[derive(Debug, Clone, Default)]
pub struct BlockExtractor {
    config: ExtractConfig,
}

impl BlockExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ExtractConfig {
        self.config
    }

    /// Extract all job blocks from `scanned`.
    ///
    /// When `original` is given and differs from `scanned` (because
    /// `scanned` was preprocessed), block offsets and title lines refer to
    /// `original`; otherwise they refer to `scanned`.
    pub fn extract(&self, scanned: &str, original: Option<&str>) -> Vec<Block> {
        let original = original.filter(|original| *original != scanned);
        let reference_len = original.map_or(scanned.len(), str::len);
        let mut remapper = original.map(Remapper::new);
        let mut depths = DepthScanner::new(scanned);
        let mut scanned_lines = LineCounter::new(scanned);

        let mut blocks = Vec::new();
        let mut last_start = 0;
        let mut fallbacks = 0;

        for caps in REGION_PATTERN.captures_iter(scanned) {
            let (Some(region), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            let record = normalize_record(inner.as_str());

            let elapsed = if ZERO_ELAPSED_TITLE_PATTERN.is_match(&record.title) {
                Some(0.0)
            } else {
                self.find_elapsed(scanned, region.end())
            };

            let level = Level::from(depths.depth_at(region.start()));

            let located = remapper
                .as_mut()
                .and_then(|remapper| remapper.locate(inner.as_str()));
            let (start, end, title_line) = match located {
                Some(loc) => (loc.start, loc.end, loc.title_line),
                None => {
                    if remapper.is_some() {
                        fallbacks += 1;
                        trace!(
                            "Block {:?} not found in original document, keeping scanned offsets",
                            record.title
                        );
                    }
                    (
                        region.start(),
                        region.end(),
                        scanned_lines.first_nonblank_line(inner.start(), inner.end()),
                    )
                }
            };

            // Keep offsets ordered and inside the reference document
            let start = start.clamp(last_start, reference_len);
            let end = end.clamp(start, reference_len);
            last_start = start;

            blocks.push(Block {
                level,
                title: record.title,
                content: record.content,
                start,
                end,
                elapsed,
                realization: record.realization,
                title_line,
            });
        }

        debug!(
            "Extracted {} job blocks ({} kept scanned offsets)",
            blocks.len(),
            fallbacks
        );
        blocks
    }

    /// Look for a duration in the text following a block.
    ///
    /// The window stops at the next `<pre` so a block never picks up the
    /// duration of the one after it. Labelled durations win over bare ones.
    fn find_elapsed(&self, scanned: &str, search_start: usize) -> Option<f64> {
        let rest = scanned.get(search_start..)?;
        let limit = rest
            .char_indices()
            .nth(self.config.duration_window)
            .map_or(rest.len(), |(i, _)| i);
        let limit = OPEN_DELIMITER_PATTERN
            .find(&rest[..limit])
            .map_or(limit, |m| m.start());
        let window = &rest[..limit];

        let caps = LABELLED_DURATION_PATTERN
            .captures(window)
            .or_else(|| BARE_DURATION_PATTERN.captures(window))?;
        parse_duration(caps.get(1)?.as_str())
    }
}

/// Extract job blocks with the default configuration.
pub fn parse_job_blocks(scanned: &str, original: Option<&str>) -> Vec<Block> {
    BlockExtractor::default().extract(scanned, original)
}

// ─────────────────────────────────────────────────────────────────────────────
// Text normalization
// ─────────────────────────────────────────────────────────────────────────────

/// Normalized text of one record
#[derive(Debug, Clone, PartialEq, Eq)]
struct NormalizedRecord {
    content: String,
    title: String,
    realization: Option<u32>,
}

fn normalize_record(inner: &str) -> NormalizedRecord {
    let mut text = inner.replace('\r', "");

    let mut realization = None;
    if let Some(caps) = REALIZATION_PATTERN.captures(&text) {
        realization = caps[1].parse::<u32>().ok();
        text = REALIZATION_PATTERN.replace_all(&text, "").into_owned();
    }

    let stripped = TAG_PATTERN.replace_all(&text, "");
    let decoded = decode_entities(&stripped);

    let lines: Vec<String> = decoded
        .split('\n')
        .map(|line| SPACE_RUN_PATTERN.replace_all(line, " ").trim_end().to_string())
        .collect();

    let content = match lines.iter().position(|l| !l.trim().is_empty()) {
        Some(first) => {
            let last = lines
                .iter()
                .rposition(|l| !l.trim().is_empty())
                .unwrap_or(first);
            lines[first..=last].join("\n")
        }
        None => String::new(),
    };

    let title = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
        .to_string();

    NormalizedRecord {
        content,
        title,
        realization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::infer_depth;
    use crate::preprocess::preprocess;
    use std::time::{Duration, Instant};

    // ─────────────────────────────────────────────────────────────────────────
    // Normalization
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_normalize_strips_tags_and_entities() {
        let record = normalize_record("\r\n\n  <b>Create   grid</b>\t&amp; zones  \r\n  detail\r\n\n");
        assert_eq!(record.title, "Create grid & zones");
        assert_eq!(record.content, " Create grid & zones\n detail");
        assert_eq!(record.realization, None);
    }

    #[test]
    fn test_normalize_extracts_realization() {
        let record = normalize_record("Load wells - for project realization 3\nbody");
        assert_eq!(record.realization, Some(3));
        assert_eq!(record.title, "Load wells");
        assert!(!record.content.contains("realization"));
    }

    #[test]
    fn test_normalize_removes_every_realization_annotation() {
        let record =
            normalize_record("A - For Project Realization 2\nB - for project realization 7");
        assert_eq!(record.realization, Some(2));
        assert_eq!(record.content, "A\nB");
    }

    #[test]
    fn test_normalize_blank_record() {
        let record = normalize_record("  \n<br>\n ");
        assert_eq!(record.title, "");
        assert_eq!(record.content, "");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Extraction
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_no_regions_yields_no_blocks() {
        assert!(parse_job_blocks("<html><body>nothing</body></html>", None).is_empty());
        assert!(parse_job_blocks("", None).is_empty());
    }

    #[test]
    fn test_extracts_title_level_and_offsets() {
        let html = "<html>\n<div>\n<pre>\nCreate grid\nmore\n</pre>\n</div>\n</html>";
        let blocks = parse_job_blocks(html, None);
        assert_eq!(blocks.len(), 1);

        let block = &blocks[0];
        assert_eq!(block.title, "Create grid");
        assert_eq!(block.content, "Create grid\nmore");
        assert_eq!(block.level, Level::Depth(2));
        assert_eq!(&html[block.start..block.end], "<pre>\nCreate grid\nmore\n</pre>");
        assert_eq!(block.title_line, Some(3));
    }

    #[test]
    fn test_labelled_duration_wins_over_bare() {
        let html = "<pre>Job</pre>at 10:00:00.0 Elapsed time: 0:00:02.5";
        let blocks = parse_job_blocks(html, None);
        assert_eq!(blocks[0].elapsed, Some(2.5));
    }

    #[test]
    fn test_bare_duration_found() {
        let html = "<pre>Job</pre><p>0:01:00.25</p>";
        assert_eq!(parse_job_blocks(html, None)[0].elapsed, Some(60.25));
    }

    #[test]
    fn test_duration_window_stops_at_next_block() {
        let html = "<pre>First</pre>\n<pre>Second</pre>\nElapsed: 0:00:03.0";
        let blocks = parse_job_blocks(html, None);
        assert_eq!(blocks[0].elapsed, None);
        assert_eq!(blocks[1].elapsed, Some(3.0));
    }

    #[test]
    fn test_duration_window_is_bounded() {
        let padding = "x".repeat(DEFAULT_DURATION_WINDOW);
        let html = format!("<pre>Job</pre>{}Elapsed: 0:00:03.0", padding);
        assert_eq!(parse_job_blocks(&html, None)[0].elapsed, None);

        let wide = BlockExtractor::new(ExtractConfig {
            duration_window: DEFAULT_DURATION_WINDOW + 50,
        });
        assert_eq!(wide.extract(&html, None)[0].elapsed, Some(3.0));
    }

    #[test]
    fn test_malformed_duration_is_none() {
        let html = "<pre>Job</pre>Elapsed: 1:2:3.4";
        assert_eq!(parse_job_blocks(html, None)[0].elapsed, None);
    }

    #[test]
    fn test_skipped_and_deactivated_titles_are_zero() {
        let html = "<pre>Job A - skipped</pre>Elapsed: 0:00:09.0\
                    <pre>Job B - DEACTIVATED  </pre>Elapsed: 0:00:09.0\
                    <pre>Job C -Skipped</pre>";
        let blocks = parse_job_blocks(html, None);
        assert_eq!(blocks.len(), 3);
        for block in &blocks {
            assert_eq!(block.elapsed, Some(0.0), "{}", block.title);
        }
    }

    #[test]
    fn test_uppercase_delimiters_and_attributes() {
        let html = "<PRE class=\"job\">Job</PRE>";
        let blocks = parse_job_blocks(html, None);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Job");
    }

    #[test]
    fn test_blocks_ordered_and_within_bounds() {
        let html = "<div><pre>a</pre><div><pre>b</pre></div></div></p></p><pre>c</pre>";
        let blocks = parse_job_blocks(html, None);
        assert_eq!(blocks.len(), 3);
        for pair in blocks.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
        for block in &blocks {
            assert!(block.start <= block.end && block.end <= html.len());
        }
        let levels: Vec<Level> = blocks.iter().map(|b| b.level).collect();
        assert_eq!(levels, vec![Level::Depth(1), Level::Depth(2), Level::Depth(0)]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Remapping
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_offsets_remapped_to_original() {
        let original = "<body>\n<pre>Load - deactivated\n<pre>\nRun\n</pre>\n</body>";
        let scanned = preprocess(original);
        let blocks = parse_job_blocks(&scanned, Some(original));
        assert_eq!(blocks.len(), 2);

        let deactivated = &blocks[0];
        assert_eq!(deactivated.elapsed, Some(0.0));
        assert_eq!(
            &original[deactivated.start..deactivated.end],
            "<pre>Load - deactivated\n"
        );
        assert_eq!(deactivated.title_line, Some(1));

        let run = &blocks[1];
        assert_eq!(&original[run.start..run.end], "<pre>\nRun\n</pre>");
        assert_eq!(run.title_line, Some(3));
    }

    #[test]
    fn test_identical_original_is_not_remapped() {
        let html = "<pre>Job</pre>";
        assert_eq!(
            parse_job_blocks(html, Some(html)),
            parse_job_blocks(html, None)
        );
    }

    #[test]
    fn test_unlocatable_block_keeps_scanned_offsets_clamped() {
        let scanned = "<pre>only in scanned text</pre>";
        let original = "<pre>other</pre>";
        let blocks = parse_job_blocks(scanned, Some(original));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start, 0);
        assert_eq!(blocks[0].end, original.len());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Large documents
    // ─────────────────────────────────────────────────────────────────────────

    /// `count` jobs in alternately nested divs, every 25th one deactivated
    /// and left unterminated
    fn workflow_log(count: usize) -> String {
        let mut html = String::from("<html><body>\n");
        for i in 0..count {
            if i % 25 == 0 {
                html.push_str(&format!("<div><pre>Step {} - deactivated\n</div>\n", i));
            } else if i % 2 == 0 {
                html.push_str(&format!(
                    "<div><pre>\nStep {} - for project realization {}\n</pre>\
                     <p>Elapsed time: 0:00:01.5</p></div>\n",
                    i,
                    i % 3
                ));
            } else {
                html.push_str(&format!(
                    "<div><div><pre>\nStep {}\n</pre></div><p>Elapsed: 0:00:02.0</p></div>\n",
                    i
                ));
            }
        }
        html.push_str("</body></html>\n");
        html
    }

    #[test]
    fn test_levels_match_full_depth_scan() {
        let html = workflow_log(200);
        let scanned = preprocess(&html);
        let blocks = parse_job_blocks(&scanned, Some(html.as_str()));

        let starts: Vec<usize> = REGION_PATTERN
            .find_iter(&scanned)
            .map(|m| m.start())
            .collect();
        assert_eq!(starts.len(), blocks.len());
        for (block, start) in blocks.iter().zip(starts) {
            assert_eq!(block.level, Level::from(infer_depth(&scanned, start)));
        }
    }

    #[test]
    fn test_title_lines_match_full_line_count() {
        let html = workflow_log(120);
        let blocks = parse_job_blocks(&preprocess(&html), Some(html.as_str()));
        for block in &blocks {
            let line = block.title_line.unwrap();
            let text = html.split('\n').nth(line).unwrap();
            assert!(text.contains(&block.title), "{:?} not on line {}", block.title, line);
        }
    }

    #[test]
    fn test_large_document_scales_linearly() {
        let html = workflow_log(8000);
        let started = Instant::now();
        let blocks = parse_job_blocks(&preprocess(&html), Some(html.as_str()));
        let took = started.elapsed();

        assert_eq!(blocks.len(), 8000);
        assert_eq!(blocks[1].level, Level::Depth(4));
        assert!(
            took < Duration::from_secs(10),
            "extracting {} bytes took {:?}",
            html.len(),
            took
        );
    }
}
