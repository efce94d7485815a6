//! Messages sent to a rendered view of the log document

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// Command for a rendered (webview) view of the log.
///
/// Serialized with a `command` tag, e.g.
/// `{"command":"highlight","start":10,"end":42,"titleLine":3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum ViewMessage {
    /// Scroll to and highlight a block's region
    #[serde(rename_all = "camelCase")]
    Highlight {
        start: usize,
        end: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title_line: Option<usize>,
    },
}

impl ViewMessage {
    pub fn highlight(block: &Block) -> Self {
        Self::Highlight {
            start: block.start,
            end: block.end,
            title_line: block.title_line,
        }
    }
}
