//! Shared value types used by the scanner and the dispatcher.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a trigger asks the presentation software to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Show,
    Slide,
}

impl TriggerKind {
    /// Capitalized name used in user-facing notices.
    pub fn title(&self) -> &'static str {
        match self {
            TriggerKind::Show => "Show",
            TriggerKind::Slide => "Slide",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Show => write!(f, "show"),
            TriggerKind::Slide => write!(f, "slide"),
        }
    }
}

impl std::str::FromStr for TriggerKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show" => Ok(TriggerKind::Show),
            "slide" => Ok(TriggerKind::Slide),
            _ => Err(format!("Unknown trigger kind: {}", s)),
        }
    }
}

/// Which inline trigger syntaxes the scanner recognizes.
///
/// `Prefix` is `<prefix> [label]`, `Sigil` is `=> |label|` / `=> [label]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSyntax {
    #[default]
    Both,
    Prefix,
    Sigil,
}

impl TriggerSyntax {
    pub fn prefix_enabled(&self) -> bool {
        matches!(self, TriggerSyntax::Both | TriggerSyntax::Prefix)
    }

    pub fn sigil_enabled(&self) -> bool {
        matches!(self, TriggerSyntax::Both | TriggerSyntax::Sigil)
    }
}

impl fmt::Display for TriggerSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerSyntax::Both => write!(f, "both"),
            TriggerSyntax::Prefix => write!(f, "prefix"),
            TriggerSyntax::Sigil => write!(f, "sigil"),
        }
    }
}

impl std::str::FromStr for TriggerSyntax {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(TriggerSyntax::Both),
            "prefix" => Ok(TriggerSyntax::Prefix),
            "sigil" => Ok(TriggerSyntax::Sigil),
            _ => Err(format!("Unknown trigger syntax: {}", s)),
        }
    }
}
