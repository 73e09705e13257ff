//! HTML serialization of a scanned content tree.

use showcue_core::config::ColorConfig;

use crate::tree::{Control, Element, Node, Tag};

/// Serialize `root` to HTML, styling controls with `colors`.
pub fn render(root: &Element, colors: &ColorConfig) -> String {
    let mut out = String::new();
    write_children(&root.children, colors, &mut out);
    out
}

/// HTML for a single control.
pub fn render_control(control: &Control, colors: &ColorConfig) -> String {
    format!(
        r#"<button class="showcue-control showcue-{kind}" data-kind="{kind}" data-label="{label}" style="background-color: {color}">{text}</button>"#,
        kind = control.kind,
        label = escape(&control.label),
        color = escape(colors.color_for(control.kind)),
        text = escape(&control.label),
    )
}

fn write_children(nodes: &[Node], colors: &ColorConfig, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text { text } => out.push_str(&escape(text)),
            Node::Control(control) => out.push_str(&render_control(control, colors)),
            Node::Element(el) => write_element(el, colors, out),
        }
    }
}

fn write_element(el: &Element, colors: &ColorConfig, out: &mut String) {
    let (open, close, block) = match &el.tag {
        Tag::Document => (String::new(), String::new(), false),
        Tag::Paragraph => ("<p>".to_string(), "</p>".to_string(), true),
        Tag::Heading(level) => (format!("<h{}>", level), format!("</h{}>", level), true),
        Tag::Emphasis => ("<em>".to_string(), "</em>".to_string(), false),
        Tag::Strong => ("<strong>".to_string(), "</strong>".to_string(), false),
        Tag::List => ("<ul>\n".to_string(), "</ul>".to_string(), true),
        Tag::ListItem => ("<li>".to_string(), "</li>".to_string(), true),
        Tag::BlockQuote => ("<blockquote>\n".to_string(), "</blockquote>".to_string(), true),
        Tag::CodeSpan => ("<code>".to_string(), "</code>".to_string(), false),
        Tag::CodeBlock { lang: Some(lang) } => (
            format!(r#"<pre><code class="language-{}">"#, escape(lang)),
            "</code></pre>".to_string(),
            true,
        ),
        Tag::CodeBlock { lang: None } => {
            ("<pre><code>".to_string(), "</code></pre>".to_string(), true)
        }
        Tag::Math => (
            r#"<span class="math math-inline">"#.to_string(),
            "</span>".to_string(),
            false,
        ),
        Tag::DisplayMath => (
            r#"<div class="math math-display">"#.to_string(),
            "</div>".to_string(),
            true,
        ),
    };

    out.push_str(&open);
    write_children(&el.children, colors, out);
    out.push_str(&close);
    if block {
        out.push('\n');
    }
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
