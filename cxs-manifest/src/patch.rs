//! Line-level editing of manifest blocks.
//!
//! A block starts on any line containing `set(<NAME>` and ends on the next
//! line whose trimmed content starts with `)`. Edits work on the raw lines
//! of the file, terminators included, so everything they do not touch comes
//! out byte-for-byte identical.

use std::fmt;

use cxscaffold_core::to_forward_slashes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ManifestToken;

/// First non-blank character of a block's closing line.
pub const BLOCK_CLOSE: char = ')';

/// The literal that opens the block named `block`.
///
/// # Examples
///
/// ```
/// use cxscaffold_manifest::block_start_marker;
///
/// assert_eq!(block_start_marker("ENGINE_SOURCES"), "set(ENGINE_SOURCES");
/// ```
pub fn block_start_marker(block: &str) -> String {
    format!("set({}", block)
}

/// Split text into lines, keeping each line's terminator.
///
/// Concatenating the result gives back the input.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// New entries to append at the end of named blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddEdit {
    tokens_by_block: IndexMap<String, Vec<ManifestToken>>,
}

impl AddEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue tokens for a block, after any already queued for it.
    pub fn with_tokens(
        mut self,
        block: impl Into<String>,
        tokens: impl IntoIterator<Item = ManifestToken>,
    ) -> Self {
        self.tokens_by_block
            .entry(block.into())
            .or_default()
            .extend(tokens);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ManifestToken])> {
        self.tokens_by_block
            .iter()
            .map(|(block, tokens)| (block.as_str(), tokens.as_slice()))
    }

    /// True when no block has anything queued.
    pub fn is_empty(&self) -> bool {
        self.tokens_by_block.values().all(Vec::is_empty)
    }
}

/// How a [`DeleteEdit`] decides that a line refers to a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeleteMatch {
    /// The token appears anywhere in the line.
    ///
    /// Also hits longer tokens that contain this one and mentions in
    /// comments.
    #[default]
    Substring,
    /// The trimmed line is exactly the token.
    WholeLine,
}

impl DeleteMatch {
    /// Name as written in the project config.
    pub fn as_str(self) -> &'static str {
        match self {
            DeleteMatch::Substring => "substring",
            DeleteMatch::WholeLine => "whole-line",
        }
    }
}

/// Entries to remove, wherever they appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteEdit {
    pub tokens: Vec<ManifestToken>,
    pub matching: DeleteMatch,
}

impl DeleteEdit {
    pub fn new(tokens: impl IntoIterator<Item = ManifestToken>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            matching: DeleteMatch::default(),
        }
    }

    pub fn with_match(mut self, matching: DeleteMatch) -> Self {
        self.matching = matching;
        self
    }

    /// Whether `line` refers to one of the tokens. Backslashes in the line
    /// count as forward slashes.
    pub fn matches(&self, line: &str) -> bool {
        let normalized = to_forward_slashes(line);
        match self.matching {
            DeleteMatch::Substring => self
                .tokens
                .iter()
                .any(|token| normalized.contains(token.as_str())),
            DeleteMatch::WholeLine => {
                let trimmed = normalized.trim();
                self.tokens.iter().any(|token| trimmed == token.as_str())
            }
        }
    }
}

/// A single manifest edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Add(AddEdit),
    Delete(DeleteEdit),
}

impl From<AddEdit> for Edit {
    fn from(edit: AddEdit) -> Self {
        Edit::Add(edit)
    }
}

impl From<DeleteEdit> for Edit {
    fn from(edit: DeleteEdit) -> Self {
        Edit::Delete(edit)
    }
}

/// A queued insertion that could not be applied. The manifest is left as it
/// was for that block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchWarning {
    /// No line contains the block's start marker.
    BlockNotFound { block: String },
    /// The block starts but no closing line follows.
    BlockNotClosed { block: String },
}

impl PatchWarning {
    pub fn block(&self) -> &str {
        match self {
            PatchWarning::BlockNotFound { block } | PatchWarning::BlockNotClosed { block } => block,
        }
    }
}

impl fmt::Display for PatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchWarning::BlockNotFound { block } => {
                write!(f, "block '{}' not found", block_start_marker(block))
            }
            PatchWarning::BlockNotClosed { block } => write!(
                f,
                "block '{}' has no closing '{}'",
                block_start_marker(block),
                BLOCK_CLOSE
            ),
        }
    }
}

/// Result of [`apply_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub lines: Vec<String>,
    /// Number of entry lines inserted.
    pub inserted: usize,
    /// Number of lines removed.
    pub removed: usize,
    pub warnings: Vec<PatchWarning>,
}

impl Patched {
    /// The patched manifest as one string.
    pub fn text(&self) -> String {
        self.lines.concat()
    }

    pub fn is_unchanged(&self) -> bool {
        self.inserted == 0 && self.removed == 0
    }
}

/// Apply an edit to the lines of a manifest.
///
/// Lines are expected to carry their terminators, as produced by
/// [`split_lines`].
pub fn apply_edit<S: AsRef<str>>(lines: &[S], edit: &Edit) -> Patched {
    match edit {
        Edit::Add(add) => apply_add(lines, add),
        Edit::Delete(delete) => apply_delete(lines, delete),
    }
}

/// Where the scan stands with respect to one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    /// Start marker not seen yet.
    Pending,
    /// Inside the block, waiting for its closing line.
    Open,
    /// Entries inserted. Terminal: the block is never filled twice.
    Closed,
}

struct BlockScan<'e> {
    block: &'e str,
    marker: String,
    tokens: &'e [ManifestToken],
    state: BlockState,
}

impl<'e> BlockScan<'e> {
    fn new(block: &'e str, tokens: &'e [ManifestToken]) -> Self {
        Self {
            block,
            marker: block_start_marker(block),
            tokens,
            state: BlockState::Pending,
        }
    }

    /// Advance over one line. Returns true when the entries must be emitted
    /// right before this line.
    fn step(&mut self, line: &str) -> bool {
        if self.state == BlockState::Pending && line.contains(&self.marker) {
            self.state = BlockState::Open;
        }
        if self.state == BlockState::Open && line.trim().starts_with(BLOCK_CLOSE) {
            self.state = BlockState::Closed;
            return true;
        }
        false
    }

    fn warning(&self) -> Option<PatchWarning> {
        let block = self.block.to_string();
        match self.state {
            BlockState::Pending => Some(PatchWarning::BlockNotFound { block }),
            BlockState::Open => Some(PatchWarning::BlockNotClosed { block }),
            BlockState::Closed => None,
        }
    }
}

fn line_terminator(line: &str) -> &'static str {
    if line.ends_with("\r\n") { "\r\n" } else { "\n" }
}

fn apply_add<S: AsRef<str>>(lines: &[S], edit: &AddEdit) -> Patched {
    let mut scans: Vec<BlockScan> = edit
        .iter()
        .filter(|(_, tokens)| !tokens.is_empty())
        .map(|(block, tokens)| BlockScan::new(block, tokens))
        .collect();

    let mut out = Vec::with_capacity(lines.len() + edit.iter().map(|(_, t)| t.len()).sum::<usize>());
    let mut inserted = 0;

    for line in lines {
        let line = line.as_ref();
        for scan in &mut scans {
            if scan.step(line) {
                let terminator = line_terminator(line);
                out.extend(
                    scan.tokens
                        .iter()
                        .map(|token| format!("\t{}{}", token, terminator)),
                );
                inserted += scan.tokens.len();
            }
        }
        out.push(line.to_string());
    }

    Patched {
        lines: out,
        inserted,
        removed: 0,
        warnings: scans.iter().filter_map(BlockScan::warning).collect(),
    }
}

fn apply_delete<S: AsRef<str>>(lines: &[S], edit: &DeleteEdit) -> Patched {
    let mut removed = 0;
    let mut out = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.as_ref();
        if edit.matches(line) {
            removed += 1;
        } else {
            out.push(line.to_string());
        }
    }

    Patched {
        lines: out,
        inserted: 0,
        removed,
        warnings: Vec::new(),
    }
}
