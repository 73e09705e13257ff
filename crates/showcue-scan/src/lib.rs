//! Trigger scanning for showcue.
//!
//! Turns inline trigger markup in rendered content into interactive
//! controls. The [`markdown`] module stands in for the host's renderer and
//! [`html`] serializes the scanned tree.

pub mod error;
pub mod html;
pub mod markdown;
pub mod patterns;
pub mod scanner;
pub mod tree;

pub use error::ScanError;
pub use patterns::{TriggerMatch, TriggerPatterns};
pub use scanner::Scanner;
pub use tree::{Control, Element, Node, Tag};
