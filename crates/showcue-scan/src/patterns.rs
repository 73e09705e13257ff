//! Regex-based trigger recognition.
//!
//! Two inline syntaxes are recognized, each independently switchable:
//!
//! - prefix form: `<prefix> [label]` selects a slide
//! - sigil form: `=> |label|` selects a show, `=> [label]` selects a slide
//!
//! Labels stop at the first closing delimiter, so a label cannot contain
//! its own delimiter.

use std::ops::Range;

use regex::Regex;
use showcue_core::config::TriggerConfig;
use showcue_core::TriggerKind;

use crate::error::ScanError;

const SIGIL_PATTERN: &str = r"=>\s*(?:\|(?P<show>[^|]*)\||\[(?P<slide>[^\]]*)\])";

/// A trigger found in one text unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    pub kind: TriggerKind,
    /// Label exactly as written between the delimiters.
    pub raw_label: String,
    /// Byte range of the whole trigger within the text unit.
    pub span: Range<usize>,
}

impl TriggerMatch {
    /// The label with surrounding whitespace removed.
    pub fn label(&self) -> &str {
        self.raw_label.trim()
    }
}

/// The compiled trigger patterns for one configuration.
#[derive(Debug, Clone)]
pub struct TriggerPatterns {
    regex: Regex,
}

impl TriggerPatterns {
    /// Compile the patterns enabled by `config`.
    pub fn new(config: &TriggerConfig) -> Result<Self, ScanError> {
        let mut alternatives = Vec::new();

        if config.syntax.sigil_enabled() {
            alternatives.push(SIGIL_PATTERN.to_string());
        }
        if config.syntax.prefix_enabled() {
            alternatives.push(format!(
                r"{}\s*\[(?P<prefixed>[^\]]*)\]",
                regex::escape(config.effective_prefix())
            ));
        }
        tracing::debug!(
            syntax = %config.syntax,
            prefix = config.effective_prefix(),
            "Compiling trigger patterns"
        );

        let regex = Regex::new(&alternatives.join("|"))?;
        Ok(Self { regex })
    }

    /// All triggers in `text`, left to right, non-overlapping.
    pub fn find_all(&self, text: &str) -> Vec<TriggerMatch> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let (kind, label) = if let Some(m) = caps.name("show") {
                    (TriggerKind::Show, m)
                } else if let Some(m) = caps.name("slide") {
                    (TriggerKind::Slide, m)
                } else {
                    (TriggerKind::Slide, caps.name("prefixed")?)
                };
                Some(TriggerMatch {
                    kind,
                    raw_label: label.as_str().to_string(),
                    span: whole.range(),
                })
            })
            .collect()
    }

    /// Cheap check used before splitting a text unit.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}
