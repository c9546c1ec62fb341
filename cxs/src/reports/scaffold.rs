//! Scaffold command report data structures.

use cxscaffold_cpp::ManifestUpdate;

use super::output::{Output, Report};

/// Report data from creating files.
#[derive(Debug)]
pub struct ScaffoldReport {
    /// Created files, as displayed.
    pub files: Vec<String>,
    /// Manifest outcome, `None` when the manifest step failed.
    pub manifest: Option<ManifestUpdate>,
}

impl Report for ScaffoldReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Created");
        for file in &self.files {
            out.added_item(file);
        }

        let Some(update) = &self.manifest else {
            return;
        };
        for warning in &update.warnings {
            out.warning(&format!("{}: {}", update.path.display(), warning));
        }

        if update.inserted == 0 {
            out.preformatted("Manifest unchanged");
            return;
        }

        out.newline();
        out.section(&format!("Listed in {}", update.path.display()));
        for token in &update.tokens {
            out.added_item(token.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use cxscaffold_manifest::{ManifestToken, PatchWarning};

    use super::*;
    use crate::reports::output::RecordedOutput;

    fn render(report: &ScaffoldReport) -> Vec<String> {
        let mut out = RecordedOutput::default();
        report.render(&mut out);
        out.lines
    }

    #[test]
    fn test_files_and_tokens() {
        let report = ScaffoldReport {
            files: vec!["src/Foo.h".to_string(), "src/Foo.cpp".to_string()],
            manifest: Some(ManifestUpdate {
                path: PathBuf::from("CMakeLists.txt"),
                tokens: vec![
                    ManifestToken::new("$SRC", "", "Foo.cpp"),
                    ManifestToken::new("$SRC", "", "Foo.h"),
                ],
                inserted: 2,
                removed: 0,
                warnings: Vec::new(),
            }),
        };

        assert_eq!(
            render(&report),
            vec![
                "Created:",
                "  + src/Foo.h",
                "  + src/Foo.cpp",
                "",
                "Listed in CMakeLists.txt:",
                "  + $SRC/Foo.cpp",
                "  + $SRC/Foo.h",
            ]
        );
    }

    #[test]
    fn test_block_warnings() {
        let report = ScaffoldReport {
            files: vec!["src/Foo.h".to_string()],
            manifest: Some(ManifestUpdate {
                path: PathBuf::from("CMakeLists.txt"),
                tokens: vec![ManifestToken::new("$SRC", "", "Foo.h")],
                inserted: 0,
                removed: 0,
                warnings: vec![PatchWarning::BlockNotFound {
                    block: "ENGINE_HEADERS".to_string(),
                }],
            }),
        };

        assert_eq!(
            render(&report),
            vec![
                "Created:",
                "  + src/Foo.h",
                "warning: CMakeLists.txt: block 'set(ENGINE_HEADERS' not found",
                "Manifest unchanged",
            ]
        );
    }

    #[test]
    fn test_failed_manifest_lists_files_only() {
        let report = ScaffoldReport {
            files: vec!["src/Foo.h".to_string()],
            manifest: None,
        };

        assert_eq!(render(&report), vec!["Created:", "  + src/Foo.h"]);
    }
}
