//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_workspace, resolve_granularity) and config display
//! - `charts` - Series, forecast and insight views
//! - `ask` - One-shot questions and the interactive chat loop
//! - `prefs` - Chart preference commands
//! - `serve` - Web server command

pub mod ask;
pub mod charts;
pub mod core;
pub mod prefs;
pub mod serve;

// Re-export command functions for main.rs
pub use ask::*;
pub use charts::*;
pub use core::*;
pub use prefs::*;
pub use serve::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
