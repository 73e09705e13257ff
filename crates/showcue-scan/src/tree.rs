//! Rendered content tree.
//!
//! The host produces this tree from source markup; the scanner walks it
//! and substitutes trigger substrings in [`Node::Text`] units with
//! [`Node::Control`] nodes.

use serde::Serialize;
use showcue_core::TriggerKind;

/// A node of rendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Node {
    Element(Element),
    Text { text: String },
    Control(Control),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn element(tag: Tag, children: Vec<Node>) -> Self {
        Node::Element(Element::new(tag, children))
    }
}

/// An element with a tag and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: Tag,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag, children: Vec<Node>) -> Self {
        Self { tag, children }
    }

    /// Empty document root.
    pub fn document() -> Self {
        Self::new(Tag::Document, Vec::new())
    }

    /// All controls below this element, in document order.
    pub fn controls(&self) -> Vec<&Control> {
        let mut out = Vec::new();
        collect_controls(&self.children, &mut out);
        out
    }

    /// Concatenated text of every text unit, with controls rendered as
    /// their labels. Element boundaries add nothing.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_controls<'a>(nodes: &'a [Node], out: &mut Vec<&'a Control>) {
    for node in nodes {
        match node {
            Node::Element(el) => collect_controls(&el.children, out),
            Node::Control(control) => out.push(control),
            Node::Text { .. } => {}
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(el) => collect_text(&el.children, out),
            Node::Control(control) => out.push_str(&control.label),
            Node::Text { text } => out.push_str(text),
        }
    }
}

/// Element kinds produced by the render boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Document,
    Paragraph,
    Heading(u8),
    Emphasis,
    Strong,
    List,
    ListItem,
    BlockQuote,
    CodeSpan,
    CodeBlock { lang: Option<String> },
    Math,
    DisplayMath,
}

impl Tag {
    /// Literal regions: text beneath them is never scanned.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Tag::CodeSpan | Tag::CodeBlock { .. } | Tag::Math | Tag::DisplayMath
        )
    }
}

/// An interactive control generated from a trigger.
///
/// Carries only what the dispatcher needs when the control is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub kind: TriggerKind,
    pub label: String,
}

impl Control {
    pub fn new(kind: TriggerKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}
