//! Trigger scanner.
//!
//! Walks a rendered content tree and replaces trigger substrings in text
//! units with controls. Literal regions (code, math) are skipped by
//! ancestry, and controls are never revisited, so scanning the same tree
//! twice converts nothing the second time.

use showcue_core::config::TriggerConfig;

use crate::error::ScanError;
use crate::markdown;
use crate::patterns::TriggerPatterns;
use crate::tree::{Control, Element, Node};

/// Converts trigger markup into controls.
#[derive(Debug, Clone)]
pub struct Scanner {
    patterns: TriggerPatterns,
}

impl Scanner {
    pub fn new(config: &TriggerConfig) -> Result<Self, ScanError> {
        Ok(Self {
            patterns: TriggerPatterns::new(config)?,
        })
    }

    pub fn patterns(&self) -> &TriggerPatterns {
        &self.patterns
    }

    /// Scan a tree in place. Returns the number of controls created.
    pub fn scan(&self, root: &mut Element) -> usize {
        if root.tag.is_literal() {
            return 0;
        }
        let created = self.scan_children(&mut root.children);
        tracing::debug!(controls = created, "Scan complete");
        created
    }

    /// Render `source` and scan the result: one full render pass.
    pub fn render(&self, source: &str) -> Element {
        let mut doc = markdown::parse(source);
        self.scan(&mut doc);
        doc
    }

    /// Split one text unit around its triggers.
    ///
    /// Returns `None` when the text holds no trigger, so callers can leave
    /// the original node untouched.
    pub fn split_text(&self, text: &str) -> Option<Vec<Node>> {
        if !self.patterns.is_match(text) {
            return None;
        }
        let matches = self.patterns.find_all(text);
        if matches.is_empty() {
            return None;
        }

        let mut pieces = Vec::with_capacity(matches.len() * 2 + 1);
        let mut cursor = 0;
        for m in matches {
            if m.span.start > cursor {
                pieces.push(Node::text(&text[cursor..m.span.start]));
            }
            pieces.push(Node::Control(Control::new(m.kind, m.label())));
            cursor = m.span.end;
        }
        if cursor < text.len() {
            pieces.push(Node::text(&text[cursor..]));
        }
        Some(pieces)
    }

    fn scan_children(&self, children: &mut Vec<Node>) -> usize {
        let mut created = 0;
        let mut i = 0;
        while i < children.len() {
            let replacement = match &mut children[i] {
                Node::Element(el) => {
                    if !el.tag.is_literal() {
                        created += self.scan_children(&mut el.children);
                    }
                    None
                }
                Node::Text { text } => self.split_text(text),
                Node::Control(_) => None,
            };

            match replacement {
                Some(pieces) => {
                    let step = pieces.len();
                    created += pieces
                        .iter()
                        .filter(|n| matches!(n, Node::Control(_)))
                        .count();
                    children.splice(i..i + 1, pieces);
                    i += step;
                }
                None => i += 1,
            }
        }
        created
    }
}
