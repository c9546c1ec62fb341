//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod config;
mod delete;
mod output;
mod scaffold;
mod tree;

pub use config::ConfigReport;
pub use delete::DeleteReport;
pub use output::{Report, TerminalOutput};
pub use scaffold::ScaffoldReport;
pub use tree::{TreeLine, TreeReport};
