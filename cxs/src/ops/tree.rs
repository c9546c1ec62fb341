//! Tree operation - list the source tree.

use std::path::Path;

use cxscaffold_core::SourceTree;
use cxscaffold_manifest::{BucketRule, ProjectConfig};

use crate::reports::{TreeLine, TreeReport};

/// Walk `root` and describe every entry, tagging files with the manifest
/// block they belong in.
pub fn tree(root: &Path, config: &ProjectConfig) -> TreeReport {
    let mut skipped = Vec::new();
    let lines = SourceTree::new(root)
        .on_skip(|path, err| skipped.push(format!("{}: {}", path.display(), err)))
        .walk()
        .map(|entry| {
            let name = entry.name().into_owned();
            let block = if entry.is_dir() {
                None
            } else {
                block_for(&config.buckets, &name)
            };
            TreeLine {
                depth: entry.depth,
                is_dir: entry.is_dir(),
                name,
                block,
            }
        })
        .collect();

    TreeReport {
        root: root.display().to_string(),
        exists: root.is_dir(),
        lines,
        skipped,
    }
}

fn block_for(rules: &[BucketRule], file_name: &str) -> Option<String> {
    rules
        .iter()
        .find(|rule| rule.matches(file_name))
        .map(|rule| rule.block.clone())
}
