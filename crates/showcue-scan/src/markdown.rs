//! Minimal markdown renderer producing a content tree.
//!
//! Stands in for the host's rendering pipeline so documents can be scanned
//! from files. It covers what matters for trigger scanning: block
//! structure, code (fenced blocks and inline spans), math (`$$` blocks and
//! inline `$...$`), and emphasis. It is not a CommonMark implementation.

use crate::tree::{Element, Node, Tag};

/// Parse `source` into a document tree.
pub fn parse(source: &str) -> Element {
    let lines: Vec<&str> = source.lines().collect();
    Element::new(Tag::Document, parse_blocks(&lines))
}

fn parse_blocks(lines: &[&str]) -> Vec<Node> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut list_items: Vec<Node> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim_start();

        if let Some(fence) = fence_marker(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list_items, &mut blocks);
            let lang = trimmed[fence.len()..].trim();
            let lang = (!lang.is_empty()).then(|| lang.to_string());
            let (body, next) = collect_until(lines, i + 1, |l| l.trim_start().starts_with(fence));
            blocks.push(Node::element(
                Tag::CodeBlock { lang },
                vec![Node::text(body)],
            ));
            i = next;
            continue;
        }

        if trimmed.trim_end() == "$$" {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list_items, &mut blocks);
            let (body, next) = collect_until(lines, i + 1, |l| l.trim() == "$$");
            blocks.push(Node::element(Tag::DisplayMath, vec![Node::text(body)]));
            i = next;
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list_items, &mut blocks);
            i += 1;
            continue;
        }

        if let Some((level, text)) = heading(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list_items, &mut blocks);
            blocks.push(Node::element(Tag::Heading(level), parse_inline(text)));
            i += 1;
            continue;
        }

        if let Some(item) = list_item(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            list_items.push(Node::element(Tag::ListItem, parse_inline(item)));
            i += 1;
            continue;
        }

        if trimmed.starts_with('>') {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list_items, &mut blocks);
            let mut quoted = Vec::new();
            while i < lines.len() {
                let Some(rest) = lines[i].trim_start().strip_prefix('>') else {
                    break;
                };
                quoted.push(rest.strip_prefix(' ').unwrap_or(rest));
                i += 1;
            }
            blocks.push(Node::element(Tag::BlockQuote, parse_blocks(&quoted)));
            continue;
        }

        flush_list(&mut list_items, &mut blocks);
        paragraph.push(trimmed);
        i += 1;
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    flush_list(&mut list_items, &mut blocks);
    blocks
}

fn fence_marker(line: &str) -> Option<&'static str> {
    if line.starts_with("```") {
        Some("```")
    } else if line.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Join lines from `start` until `is_end` matches. An unclosed block runs
/// to the end of input. Returns the body and the index after the closer.
fn collect_until(lines: &[&str], start: usize, is_end: impl Fn(&str) -> bool) -> (String, usize) {
    let mut body = Vec::new();
    let mut i = start;
    while i < lines.len() {
        if is_end(lines[i]) {
            return (body.join("\n"), i + 1);
        }
        body.push(lines[i]);
        i += 1;
    }
    (body.join("\n"), i)
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if rest.is_empty() {
        return Some((level as u8, ""));
    }
    rest.strip_prefix(' ')
        .map(|text| (level as u8, text.trim_end_matches(|c: char| c == '#' || c == ' ')))
}

fn list_item(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|bullet| line.strip_prefix(bullet))
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Node>) {
    if lines.is_empty() {
        return;
    }
    let text = lines.join("\n");
    lines.clear();
    blocks.push(Node::element(Tag::Paragraph, parse_inline(&text)));
}

fn flush_list(items: &mut Vec<Node>, blocks: &mut Vec<Node>) {
    if items.is_empty() {
        return;
    }
    blocks.push(Node::element(Tag::List, std::mem::take(items)));
}

/// Parse inline markup: code spans, inline math, emphasis, and escapes.
pub fn parse_inline(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        match c {
            '\\' => {
                match rest[1..].chars().next() {
                    Some(next) if next.is_ascii_punctuation() => {
                        buf.push(next);
                        i += 1 + next.len_utf8();
                    }
                    _ => {
                        buf.push('\\');
                        i += 1;
                    }
                }
            }
            '`' => {
                let run = rest.bytes().take_while(|&b| b == b'`').count();
                match code_span(rest, run) {
                    Some((inner, consumed)) => {
                        flush_text(&mut buf, &mut nodes);
                        nodes.push(Node::element(Tag::CodeSpan, vec![Node::text(inner)]));
                        i += consumed;
                    }
                    None => {
                        buf.push_str(&rest[..run]);
                        i += run;
                    }
                }
            }
            '$' => match inline_math(rest) {
                Some((inner, consumed)) => {
                    flush_text(&mut buf, &mut nodes);
                    nodes.push(Node::element(Tag::Math, vec![Node::text(inner)]));
                    i += consumed;
                }
                None => {
                    buf.push('$');
                    i += 1;
                }
            },
            '*' => {
                let (delim, tag) = if rest.starts_with("**") {
                    ("**", Tag::Strong)
                } else {
                    ("*", Tag::Emphasis)
                };
                match emphasis(rest, delim) {
                    Some((inner, consumed)) => {
                        flush_text(&mut buf, &mut nodes);
                        nodes.push(Node::element(tag, parse_inline(inner)));
                        i += consumed;
                    }
                    None => {
                        buf.push_str(delim);
                        i += delim.len();
                    }
                }
            }
            _ => {
                buf.push(c);
                i += c.len_utf8();
            }
        }
    }

    flush_text(&mut buf, &mut nodes);
    nodes
}

fn flush_text(buf: &mut String, nodes: &mut Vec<Node>) {
    if !buf.is_empty() {
        nodes.push(Node::text(std::mem::take(buf)));
    }
}

/// A code span opened by `run` backticks closes at the next run of exactly
/// the same length.
fn code_span(rest: &str, run: usize) -> Option<(&str, usize)> {
    let body = &rest[run..];
    let mut from = 0;
    while let Some(pos) = body[from..].find('`') {
        let start = from + pos;
        let len = body[start..].bytes().take_while(|&b| b == b'`').count();
        if len == run {
            let inner = &body[..start];
            let inner = if inner.len() >= 2
                && inner.starts_with(' ')
                && inner.ends_with(' ')
                && !inner.trim().is_empty()
            {
                &inner[1..inner.len() - 1]
            } else {
                inner
            };
            return Some((inner, run + start + len));
        }
        from = start + len;
    }
    None
}

/// `$x$` with no whitespace just inside either dollar.
fn inline_math(rest: &str) -> Option<(&str, usize)> {
    let body = &rest[1..];
    let first = body.chars().next()?;
    if first == '$' || first.is_whitespace() {
        return None;
    }
    let close = body.find('$')?;
    let inner = &body[..close];
    if inner.ends_with(char::is_whitespace) {
        return None;
    }
    Some((inner, close + 2))
}

fn emphasis<'a>(rest: &'a str, delim: &str) -> Option<(&'a str, usize)> {
    let body = &rest[delim.len()..];
    if body.starts_with(char::is_whitespace) {
        return None;
    }
    let close = body.find(delim)?;
    if close == 0 {
        return None;
    }
    Some((&body[..close], delim.len() * 2 + close))
}
