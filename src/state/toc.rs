//! Table of contents for the reader view
//!
//! The outline comes with the rendered content as a nested list. Building
//! the TOC annotates every item with its depth; a missing or empty outline
//! hides the TOC entirely.

use serde::Deserialize;
use std::path::Path;

pub const TOC_HEADING: &str = "Table of Contents";

/// Rendered post as handed to the reader view
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentDocument {
    /// Present for posts; drives the read-count ping
    pub post_uid: Option<String>,
    pub title: String,
    pub body: String,
    pub toc: Option<ContentList>,
}

impl ContentDocument {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContentList {
    #[serde(default)]
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentItem {
    pub label: String,
    #[serde(default)]
    pub nested: Option<ContentList>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
    pub label: String,
    /// 1 at the root, +1 per nesting level
    pub depth: usize,
    pub children: Vec<TocNode>,
}

impl TocNode {
    /// Level tag of this node
    pub fn level_class(&self) -> String {
        format!("toclevel-{}", self.depth)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TocView {
    Hidden,
    Visible {
        heading: &'static str,
        nodes: Vec<TocNode>,
    },
}

impl TocView {
    pub fn is_hidden(&self) -> bool {
        matches!(self, TocView::Hidden)
    }

    /// Every node in document order, depth first
    pub fn flatten(&self) -> Vec<&TocNode> {
        let mut out = Vec::new();
        if let TocView::Visible { nodes, .. } = self {
            for node in nodes {
                collect(node, &mut out);
            }
        }
        out
    }

    /// `toclevel-N` tag of every node in document order
    pub fn level_classes(&self) -> Vec<String> {
        self.flatten().iter().map(|n| n.level_class()).collect()
    }
}

fn collect<'a>(node: &'a TocNode, out: &mut Vec<&'a TocNode>) {
    out.push(node);
    for child in &node.children {
        collect(child, out);
    }
}

fn annotate(list: &ContentList, depth: usize) -> Vec<TocNode> {
    list.items
        .iter()
        .map(|item| TocNode {
            label: item.label.clone(),
            depth,
            children: item
                .nested
                .as_ref()
                .map(|nested| annotate(nested, depth + 1))
                .unwrap_or_default(),
        })
        .collect()
}

/// Build the TOC from the content's root list
pub fn build_toc(root: Option<&ContentList>) -> TocView {
    match root {
        Some(list) if !list.items.is_empty() => TocView::Visible {
            heading: TOC_HEADING,
            nodes: annotate(list, 1),
        },
        _ => TocView::Hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(label: &str, nested: Vec<ContentItem>) -> ContentItem {
        ContentItem {
            label: label.to_string(),
            nested: if nested.is_empty() {
                None
            } else {
                Some(ContentList { items: nested })
            },
        }
    }

    #[test]
    fn test_absent_outline_is_hidden() {
        assert_eq!(build_toc(None), TocView::Hidden);
    }

    #[test]
    fn test_empty_outline_is_hidden() {
        let toc = build_toc(Some(&ContentList::default()));
        assert!(toc.is_hidden());
        assert!(toc.level_classes().is_empty());
    }

    #[test]
    fn test_root_and_nested_levels() {
        let list = ContentList {
            items: vec![item("Intro", vec![item("Background", vec![])])],
        };
        let toc = build_toc(Some(&list));
        match &toc {
            TocView::Visible { heading, nodes } => {
                assert_eq!(*heading, "Table of Contents");
                assert_eq!(nodes[0].depth, 1);
                assert_eq!(nodes[0].children[0].depth, 2);
            }
            TocView::Hidden => panic!("expected a visible toc"),
        }
        assert_eq!(toc.level_classes(), vec!["toclevel-1", "toclevel-2"]);
    }

    #[test]
    fn test_document_order_depth_first() {
        let list = ContentList {
            items: vec![
                item("A", vec![item("A.1", vec![item("A.1.a", vec![])]), item("A.2", vec![])]),
                item("B", vec![]),
            ],
        };
        let toc = build_toc(Some(&list));
        let labels: Vec<_> = toc.flatten().iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "A.1", "A.1.a", "A.2", "B"]);
        assert_eq!(
            toc.level_classes(),
            vec!["toclevel-1", "toclevel-2", "toclevel-3", "toclevel-2", "toclevel-1"]
        );
    }

    #[test]
    fn test_rebuilding_is_identical() {
        let list = ContentList {
            items: vec![item("A", vec![item("B", vec![])])],
        };
        assert_eq!(build_toc(Some(&list)), build_toc(Some(&list)));
    }

    #[test]
    fn test_document_from_json() {
        let json = r#"{
            "post_uid": "p1",
            "title": "Post",
            "toc": {"items": [{"label": "One", "nested": {"items": [{"label": "Two"}]}}]}
        }"#;
        let doc: ContentDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.post_uid.as_deref(), Some("p1"));
        assert_eq!(build_toc(doc.toc.as_ref()).flatten().len(), 2);
    }
}
