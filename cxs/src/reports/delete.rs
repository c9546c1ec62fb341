//! Delete command report data structures.

use cxscaffold_cpp::ManifestUpdate;

use super::output::{Output, Report};

/// Report data from deleting a file.
#[derive(Debug)]
pub struct DeleteReport {
    /// Deleted file, as displayed.
    pub file: String,
    /// Manifest outcome, `None` when the manifest step failed.
    pub manifest: Option<ManifestUpdate>,
}

impl Report for DeleteReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Deleted");
        out.removed_item(&self.file);

        let Some(update) = &self.manifest else {
            return;
        };
        if update.removed == 0 {
            out.warning(&format!(
                "no entry in {} referred to the file",
                update.path.display()
            ));
            return;
        }

        out.key_value(
            &format!("Entries removed from {}", update.path.display()),
            &update.removed.to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use cxscaffold_manifest::ManifestToken;

    use super::*;
    use crate::reports::output::RecordedOutput;

    fn update(removed: usize) -> ManifestUpdate {
        ManifestUpdate {
            path: PathBuf::from("CMakeLists.txt"),
            tokens: vec![ManifestToken::new("$SRC", "", "Foo.cpp")],
            inserted: 0,
            removed,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_removed_entries() {
        let mut out = RecordedOutput::default();
        DeleteReport {
            file: "src/Foo.cpp".to_string(),
            manifest: Some(update(1)),
        }
        .render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "Deleted:",
                "  - src/Foo.cpp",
                "Entries removed from CMakeLists.txt: 1",
            ]
        );
    }

    #[test]
    fn test_unlisted_file_warns() {
        let mut out = RecordedOutput::default();
        DeleteReport {
            file: "src/notes.txt".to_string(),
            manifest: Some(update(0)),
        }
        .render(&mut out);

        assert_eq!(
            out.lines.last().map(String::as_str),
            Some("warning: no entry in CMakeLists.txt referred to the file")
        );
    }
}
