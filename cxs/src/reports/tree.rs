//! Tree command report data structures.

use super::output::{Output, Report};

/// Report data from listing a source tree.
#[derive(Debug)]
pub struct TreeReport {
    /// Walked directory, as displayed.
    pub root: String,
    /// Whether the root exists.
    pub exists: bool,
    /// Entries in walk order.
    pub lines: Vec<TreeLine>,
    /// Directories that could not be read, with the reason.
    pub skipped: Vec<String>,
}

/// One entry of the tree.
#[derive(Debug)]
pub struct TreeLine {
    pub depth: usize,
    pub name: String,
    pub is_dir: bool,
    /// Manifest block the file would be listed in.
    pub block: Option<String>,
}

impl Report for TreeReport {
    fn render(&self, out: &mut dyn Output) {
        if !self.exists {
            out.warning(&format!("'{}' does not exist", self.root));
            return;
        }

        out.preformatted(&format!("{}/", self.root.trim_end_matches(['/', '\\'])));
        for line in &self.lines {
            let indent = "  ".repeat(line.depth + 1);
            let text = match (&line.block, line.is_dir) {
                (_, true) => format!("{}{}/", indent, line.name),
                (Some(block), false) => format!("{}{}  [{}]", indent, line.name, block),
                (None, false) => format!("{}{}", indent, line.name),
            };
            out.preformatted(&text);
        }

        for skipped in &self.skipped {
            out.warning(&format!("skipped {}", skipped));
        }
    }
}
