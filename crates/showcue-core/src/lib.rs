pub mod config;
pub mod error;
pub mod types;

pub use config::ShowcueConfig;
pub use error::{Result, ShowcueError};
pub use types::*;
