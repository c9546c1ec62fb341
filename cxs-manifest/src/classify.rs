//! Sorting file names into manifest buckets by extension.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the default bucket for translation units.
pub const SOURCES: &str = "sources";
/// Name of the default bucket for headers.
pub const HEADERS: &str = "headers";

/// One row of the classification table.
///
/// A file belongs to the first rule listing its extension, and the manifest
/// entries for that rule go into the `set(<block>` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRule {
    pub name: String,
    pub block: String,
    pub extensions: Vec<String>,
}

impl BucketRule {
    pub fn new<I, S>(name: impl Into<String>, block: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            block: block.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// `.c`/`.cpp` into `ENGINE_SOURCES`, `.h`/`.hpp` into `ENGINE_HEADERS`.
    pub fn defaults() -> Vec<BucketRule> {
        vec![
            BucketRule::new(SOURCES, "ENGINE_SOURCES", ["c", "cpp"]),
            BucketRule::new(HEADERS, "ENGINE_HEADERS", ["h", "hpp"]),
        ]
    }

    /// Whether the file name carries one of this rule's extensions.
    /// Extensions may be configured with or without the leading dot.
    pub fn matches(&self, file_name: &str) -> bool {
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        self.extensions
            .iter()
            .any(|e| e.strip_prefix('.').unwrap_or(e) == ext)
    }
}

/// Partitions file names using a table of [`BucketRule`]s.
#[derive(Debug, Clone, Copy)]
pub struct EntryClassifier<'a> {
    rules: &'a [BucketRule],
}

impl<'a> EntryClassifier<'a> {
    pub fn new(rules: &'a [BucketRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a [BucketRule] {
        self.rules
    }

    /// Bucket the given names, keeping input order and duplicates.
    /// Names no rule matches are dropped.
    pub fn classify<I, S>(&self, file_names: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buckets: IndexMap<String, Vec<String>> = self
            .rules
            .iter()
            .map(|rule| (rule.name.clone(), Vec::new()))
            .collect();

        for name in file_names {
            let name = name.as_ref();
            match self.rules.iter().find(|rule| rule.matches(name)) {
                Some(rule) => buckets[rule.name.as_str()].push(name.to_string()),
                None => tracing::debug!(file = name, "file matches no manifest bucket"),
            }
        }

        Classification { buckets }
    }
}

/// Output of [`EntryClassifier::classify`]: every configured bucket, in
/// table order, with the file names that fell into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    buckets: IndexMap<String, Vec<String>>,
}

impl Classification {
    /// Files in the named bucket; empty for unknown buckets.
    pub fn get(&self, bucket: &str) -> &[String] {
        self.buckets.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.buckets
            .iter()
            .map(|(name, files)| (name.as_str(), files.as_slice()))
    }

    /// True when no file landed in any bucket.
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }
}
