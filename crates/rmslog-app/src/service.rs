//! Outline service: documents in, outlines and navigation targets out
//!
//! The service holds only settings. Every call names the document it works
//! on, so there is no notion of an "active" document to keep in sync.

use rmslog_core::prelude::*;
use rmslog_core::{
    build_outline, build_ungrouped_outline, preprocess, Block, BlockExtractor, Node, Outline,
    TitleMatches, ViewMessage,
};
use serde::Serialize;

use crate::config::Settings;
use crate::document::LogDocument;

/// An outline plus the message to show in place of an empty tree
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineView {
    pub outline: Outline,
    pub message: Option<String>,
}

/// Where to move the cursor in the text view of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RevealTarget {
    /// Zero-based line of the block title
    Line { line: usize },
    /// Byte range of the block, when its title line is unknown
    Range { start: usize, end: usize },
}

/// Navigation to a node: a cursor target plus the highlight message for a
/// rendered view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reveal {
    pub target: RevealTarget,
    pub highlight: ViewMessage,
}

/// One entry of a multi-match search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub label: String,
    pub description: String,
    pub reveal: Reveal,
}

/// Outcome of a title search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "result", rename_all = "camelCase")]
pub enum SearchOutcome {
    NoMatches,
    Single(Reveal),
    Multiple(Vec<SearchHit>),
}

/// Builds outlines from log documents according to [`Settings`]
#[derive(Debug, Clone, Default)]
pub struct OutlineService {
    settings: Settings,
    extractor: BlockExtractor,
}

impl OutlineService {
    pub fn new(settings: Settings) -> Self {
        let extractor = BlockExtractor::new(settings.extract_config());
        Self {
            settings,
            extractor,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Flat job block list with offsets into the document text
    pub fn blocks(&self, doc: &LogDocument) -> Vec<Block> {
        if self.settings.parser.preprocess {
            let scanned = preprocess(&doc.text);
            self.extractor.extract(&scanned, Some(&doc.text))
        } else {
            self.extractor.extract(&doc.text, None)
        }
    }

    #[instrument(skip_all, fields(document = %doc.name))]
    pub fn outline(&self, doc: &LogDocument) -> OutlineView {
        let blocks = self.blocks(doc);
        let outline = if self.settings.display.group_by_realization {
            build_outline(blocks)
        } else {
            build_ungrouped_outline(blocks)
        };

        debug!(
            "Built outline: {} blocks, {} top-level nodes",
            outline.block_count(),
            outline.groups().len()
        );

        let message = outline
            .is_empty()
            .then(|| format!("No RMS job blocks found in '{}'.", doc.name));

        OutlineView { outline, message }
    }

    /// Case-insensitive title search over the document's outline
    pub fn search(&self, doc: &LogDocument, query: &str) -> SearchOutcome {
        let view = self.outline(doc);

        match view.outline.search_titles(query) {
            TitleMatches::None => SearchOutcome::NoMatches,
            TitleMatches::Single(node) => SearchOutcome::Single(Self::reveal(node)),
            TitleMatches::Many(nodes) => SearchOutcome::Multiple(
                nodes
                    .into_iter()
                    .map(|node| SearchHit {
                        label: node.label(),
                        description: self.description(node),
                        reveal: Self::reveal(node),
                    })
                    .collect(),
            ),
        }
    }

    /// Navigation for a node: its title line when known, else its range
    pub fn reveal(node: &Node) -> Reveal {
        let block = &node.block;
        let target = match block.title_line {
            Some(line) => RevealTarget::Line { line },
            None => RevealTarget::Range {
                start: block.start,
                end: block.end,
            },
        };
        Reveal {
            target,
            highlight: node.highlight(),
        }
    }

    /// Node description honouring `display.show_elapsed`
    pub fn description(&self, node: &Node) -> String {
        if self.settings.display.show_elapsed {
            node.description()
        } else {
            String::new()
        }
    }
}
