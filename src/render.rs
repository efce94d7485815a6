//! Text and JSON rendering of outlines and search results

use rmslog_app::{OutlineView, RevealTarget, SearchOutcome};
use rmslog_core::prelude::*;
use rmslog_core::{BlockKind, Node};
use serde::Serialize;

/// Render an outline as an indented tree.
///
/// Realization groups sit at the left margin, jobs are bulleted beneath
/// them with a marker for their kind. Title lines are shown one-based.
pub fn render_outline(view: &OutlineView, show_elapsed: bool) -> String {
    if let Some(message) = &view.message {
        return format!("{}\n", message);
    }

    let mut out = String::new();
    for node in view.outline.groups() {
        render_node(&mut out, node, 0, show_elapsed);
    }
    out
}

fn render_node(out: &mut String, node: &Node, depth: usize, show_elapsed: bool) {
    let indent = "  ".repeat(depth);
    let bullet = if node.group { "" } else { kind_bullet(node.block.kind()) };
    out.push_str(&format!("{}{}{}", indent, bullet, node.label()));

    let description = node.description();
    if show_elapsed && !description.is_empty() {
        out.push_str(&format!("  ({})", description));
    }
    if let Some(line) = node.block.title_line {
        out.push_str(&format!("  [line {}]", line + 1));
    }
    out.push('\n');

    for child in &node.children {
        render_node(out, child, depth + 1, show_elapsed);
    }
}

fn kind_bullet(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Job => "- ",
        BlockKind::Note => "* ",
        BlockKind::Skipped => "~ ",
        BlockKind::Deactivated => "x ",
    }
}

/// Human-readable navigation target
pub fn describe_target(target: &RevealTarget) -> String {
    match target {
        RevealTarget::Line { line } => format!("line {}", line + 1),
        RevealTarget::Range { start, end } => format!("bytes {}..{}", start, end),
    }
}

pub fn render_search(query: &str, outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::NoMatches => format!("No matches for '{}'.\n", query),
        SearchOutcome::Single(reveal) => {
            format!("1 match: {}\n", describe_target(&reveal.target))
        }
        SearchOutcome::Multiple(hits) => {
            let mut out = format!("{} matches:\n", hits.len());
            for hit in hits {
                out.push_str(&format!("  {}", hit.label));
                if !hit.description.is_empty() {
                    out.push_str(&format!("  ({})", hit.description));
                }
                out.push_str(&format!("  {}\n", describe_target(&hit.reveal.target)));
            }
            out
        }
    }
}

/// Pretty-printed JSON with a trailing newline
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
