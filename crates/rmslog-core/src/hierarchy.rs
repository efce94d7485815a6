//! Building the job outline from a flat block list
//!
//! Three passes, each consuming the output of the previous one:
//!
//! 1. [`assemble`] nests blocks by level using a stack of open ancestors
//! 2. [`group_by_realization`] wraps the roots in one group per realization
//! 3. [`aggregate`] folds elapsed times bottom-up into every node
//!
//! [`build_outline`] runs all three.

use serde::Serialize;

use crate::block::{Block, Level};
use crate::duration::format_seconds;
use crate::message::ViewMessage;
use crate::outline::Outline;

/// Title of the group holding blocks without a realization number
pub const UNASSIGNED_GROUP_TITLE: &str = "Unassigned";

// ─────────────────────────────────────────────────────────────────────────────
// Node
// ─────────────────────────────────────────────────────────────────────────────

/// A node of the job outline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub block: Block,

    /// Child nodes in source order
    pub children: Vec<Node>,

    /// Elapsed seconds of the whole subtree (the block's own time until
    /// [`aggregate`] has run)
    pub elapsed: Option<f64>,

    /// Synthetic realization group rather than a job from the log
    pub group: bool,
}

impl Node {
    pub fn new(block: Block) -> Self {
        let elapsed = block.elapsed;
        Self {
            block,
            children: Vec::new(),
            elapsed,
            group: false,
        }
    }

    fn realization_group(block: Block, children: Vec<Node>) -> Self {
        Self {
            block,
            children,
            elapsed: None,
            group: true,
        }
    }

    pub fn level(&self) -> Level {
        self.block.level
    }

    /// Whether the node starts expandable in a tree view
    pub fn is_expandable(&self) -> bool {
        !self.children.is_empty()
    }

    /// Tree label: the title, or a placeholder naming the level
    pub fn label(&self) -> String {
        if self.block.title.is_empty() {
            format!("Block (level {})", self.block.level)
        } else {
            self.block.title.clone()
        }
    }

    /// Formatted subtree elapsed time, empty when unknown
    pub fn description(&self) -> String {
        self.elapsed.map(format_seconds).unwrap_or_default()
    }

    /// Message asking a rendered view to scroll to this node's region
    pub fn highlight(&self) -> ViewMessage {
        ViewMessage::highlight(&self.block)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Passes
// ─────────────────────────────────────────────────────────────────────────────

/// Nest blocks by level.
///
/// A block becomes the child of the nearest preceding open block with a
/// strictly lower level. Blocks at the same level are siblings, and a block
/// with an unknown level closes everything before it.
pub fn assemble(blocks: Vec<Block>) -> Vec<Node> {
    let mut roots: Vec<Node> = Vec::new();
    let mut stack: Vec<Node> = Vec::new();

    for block in blocks {
        let level = block.level;
        while stack.last().is_some_and(|top| top.level() >= level) {
            if let Some(done) = stack.pop() {
                attach(&mut stack, &mut roots, done);
            }
        }
        stack.push(Node::new(block));
    }

    while let Some(done) = stack.pop() {
        attach(&mut stack, &mut roots, done);
    }

    roots
}

/// Close a node: it becomes the last child of the new stack top, or a root.
fn attach(stack: &mut [Node], roots: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Wrap roots in one group node per realization number.
///
/// Groups appear in order of first appearance; roots without a realization
/// share the "Unassigned" group.
pub fn group_by_realization(roots: Vec<Node>) -> Vec<Node> {
    let mut buckets: Vec<(Option<u32>, Vec<Node>)> = Vec::new();

    for root in roots {
        let key = root.block.realization;
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(root),
            None => buckets.push((key, vec![root])),
        }
    }

    buckets
        .into_iter()
        .map(|(realization, members)| {
            Node::realization_group(group_block(realization, &members), members)
        })
        .collect()
}

fn group_block(realization: Option<u32>, members: &[Node]) -> Block {
    let title = match realization {
        Some(n) => format!("Realization {}", n),
        None => UNASSIGNED_GROUP_TITLE.to_string(),
    };
    Block {
        level: Level::Unknown,
        title,
        content: String::new(),
        start: members.first().map_or(0, |n| n.block.start),
        end: members.last().map_or(0, |n| n.block.end),
        elapsed: None,
        realization,
        title_line: None,
    }
}

/// Fold elapsed times bottom-up.
///
/// A leaf keeps its own time. A parent with at least one timed descendant
/// gets its own time (or zero) plus the children's totals; otherwise it
/// keeps its own time.
pub fn aggregate(node: Node) -> Node {
    let Node {
        block,
        children,
        group,
        ..
    } = node;

    let children: Vec<Node> = children.into_iter().map(aggregate).collect();
    let own = block.elapsed;

    let mut timed = children.iter().filter_map(|c| c.elapsed).peekable();
    let elapsed = if timed.peek().is_some() {
        Some(own.unwrap_or(0.0) + timed.sum::<f64>())
    } else {
        own
    };

    Node {
        block,
        children,
        elapsed,
        group,
    }
}

/// Build the grouped, aggregated outline from extracted blocks
pub fn build_outline(blocks: Vec<Block>) -> Outline {
    let block_count = blocks.len();
    let groups = group_by_realization(assemble(blocks))
        .into_iter()
        .map(aggregate)
        .collect();
    Outline::new(groups, block_count)
}

/// Build an outline without realization groups (roots only, aggregated)
pub fn build_ungrouped_outline(blocks: Vec<Block>) -> Outline {
    let block_count = blocks.len();
    let roots = assemble(blocks).into_iter().map(aggregate).collect();
    Outline::new(roots, block_count)
}
