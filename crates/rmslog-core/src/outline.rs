//! The assembled outline and its queries

use serde::Serialize;

use crate::hierarchy::Node;

/// Result of a title search
#[derive(Debug, Clone, PartialEq)]
pub enum TitleMatches<'a> {
    None,
    Single(&'a Node),
    /// Several hits in pre-order
    Many(Vec<&'a Node>),
}

/// Forest of top-level nodes (realization groups, or roots when grouping is
/// disabled) built from one document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    groups: Vec<Node>,
    block_count: usize,
}

impl Outline {
    pub fn new(groups: Vec<Node>, block_count: usize) -> Self {
        Self {
            groups,
            block_count,
        }
    }

    pub fn groups(&self) -> &[Node] {
        &self.groups
    }

    /// Number of job blocks extracted from the document
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    pub fn is_empty(&self) -> bool {
        self.block_count == 0
    }

    /// Pre-order traversal over every node, groups included
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.groups.iter().rev().collect(),
        }
    }

    /// Job nodes only, in pre-order
    pub fn jobs(&self) -> impl Iterator<Item = &Node> {
        self.iter().filter(|n| !n.group)
    }

    /// Nodes whose block title contains `query`, ignoring case.
    ///
    /// Untitled blocks never match, whatever placeholder label they show.
    pub fn find_titles(&self, query: &str) -> Vec<&Node> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|n| {
                let title = &n.block.title;
                !title.is_empty() && title.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Title search for quick navigation: a single hit can be revealed
    /// directly, several hits need a choice.
    pub fn search_titles(&self, query: &str) -> TitleMatches<'_> {
        let mut hits = self.find_titles(query);
        match hits.len() {
            0 => TitleMatches::None,
            1 => TitleMatches::Single(hits.remove(0)),
            _ => TitleMatches::Many(hits),
        }
    }

    /// The job node covering exactly `start..end`
    pub fn find_by_range(&self, start: usize, end: usize) -> Option<&Node> {
        self.jobs()
            .find(|n| n.block.start == start && n.block.end == end)
    }

    /// The job node whose title sits on `line`
    pub fn find_by_title_line(&self, line: usize) -> Option<&Node> {
        self.jobs().find(|n| n.block.title_line == Some(line))
    }

    /// Parent of the job node covering exactly `start..end`.
    ///
    /// Roots report their realization group; `None` for unknown ranges and
    /// for roots of an ungrouped outline.
    pub fn parent_of(&self, start: usize, end: usize) -> Option<&Node> {
        self.iter().find(|parent| {
            parent
                .children
                .iter()
                .any(|c| !c.group && c.block.start == start && c.block.end == end)
        })
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over an [`Outline`]
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
