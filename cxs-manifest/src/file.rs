use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use cxscaffold_core::write_atomic;

use crate::{Edit, Error, Patched, Result, apply_edit, split_lines};

/// A manifest file on disk with its pending edits.
///
/// The content read by [`ManifestFile::open`] is kept so [`ManifestFile::save`]
/// can notice when another process touched the file in between.
pub struct ManifestFile {
    path: PathBuf,
    original: String,
    content: String,
}

impl ManifestFile {
    /// Read a manifest file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = read(&path)?;

        Ok(Self {
            path,
            original: content.clone(),
            content,
        })
    }

    /// Whether the content differs from what was read.
    pub fn is_modified(&self) -> bool {
        self.content != self.original
    }

    /// Apply an edit to the in-memory content.
    ///
    /// Block warnings are returned in [`Patched::warnings`] for the caller
    /// to surface; they are only logged at debug level here.
    pub fn apply(&mut self, edit: &Edit) -> Patched {
        let patched = apply_edit(&split_lines(&self.content), edit);
        for warning in &patched.warnings {
            tracing::debug!(manifest = %self.path.display(), "{}", warning);
        }
        self.content = patched.text();
        patched
    }

    /// Write the edited content back.
    ///
    /// Fails with [`Error::ManifestChanged`] when the file on disk is no
    /// longer what was read; nothing is written in that case.
    pub fn save(&self) -> Result<()> {
        if !self.is_modified() {
            return Ok(());
        }

        let on_disk = match read(&self.path) {
            Ok(content) => content,
            Err(e) if matches!(*e, Error::ManifestMissing { .. }) => {
                return Err(Box::new(Error::ManifestChanged {
                    path: self.path.clone(),
                }));
            }
            Err(e) => return Err(e),
        };
        if on_disk != self.original {
            return Err(Box::new(Error::ManifestChanged {
                path: self.path.clone(),
            }));
        }

        write_atomic(&self.path, self.content.as_bytes())
            .map_err(|e| Error::io("write", &self.path, e))?;
        tracing::info!(manifest = %self.path.display(), "manifest updated");
        Ok(())
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Box::new(Error::ManifestMissing {
            path: path.to_path_buf(),
        }),
        _ => Error::io("read", path, e),
    })
}

/// Open the manifest, apply one edit and save it.
pub fn edit_manifest(path: impl AsRef<Path>, edit: &Edit) -> Result<Patched> {
    let mut manifest = ManifestFile::open(path)?;
    let patched = manifest.apply(edit);
    manifest.save()?;
    Ok(patched)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{AddEdit, DeleteEdit, ManifestToken};

    const MANIFEST: &str = "set(ENGINE_SOURCES\n)\nset(ENGINE_HEADERS\n)\n";

    fn setup() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CMakeLists.txt");
        fs::write(&path, MANIFEST).unwrap();
        (temp, path)
    }

    fn add_source(file: &str) -> Edit {
        AddEdit::new()
            .with_tokens("ENGINE_SOURCES", [ManifestToken::new("$SRC", "", file)])
            .into()
    }

    #[test]
    fn test_missing_manifest() {
        let temp = TempDir::new().unwrap();
        let err = ManifestFile::open(temp.path().join("CMakeLists.txt"))
            .err()
            .unwrap();
        assert!(matches!(*err, Error::ManifestMissing { .. }));
    }

    #[test]
    fn test_edit_manifest_writes_back() {
        let (_temp, path) = setup();

        let patched = edit_manifest(&path, &add_source("Foo.cpp")).unwrap();

        assert_eq!(patched.inserted, 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "set(ENGINE_SOURCES\n\t$SRC/Foo.cpp\n)\nset(ENGINE_HEADERS\n)\n"
        );
    }

    #[test]
    fn test_edit_then_delete() {
        let (_temp, path) = setup();

        edit_manifest(&path, &add_source("Foo.cpp")).unwrap();
        let edit = DeleteEdit::new([ManifestToken::new("$SRC", "", "Foo.cpp")]).into();
        edit_manifest(&path, &edit).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), MANIFEST);
    }

    #[test]
    fn test_unchanged_manifest_is_not_rewritten() {
        let (_temp, path) = setup();
        let mut manifest = ManifestFile::open(&path).unwrap();
        let edit = AddEdit::new()
            .with_tokens("ENGINE_MISSING", [ManifestToken::new("$SRC", "", "a.cpp")])
            .into();

        let patched = manifest.apply(&edit);
        // Another writer after the read must not matter when there is nothing to write
        fs::write(&path, "changed\n").unwrap();

        assert_eq!(patched.warnings.len(), 1);
        assert!(!manifest.is_modified());
        manifest.save().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "changed\n");
    }

    #[test]
    fn test_concurrent_change_is_detected() {
        let (_temp, path) = setup();
        let mut manifest = ManifestFile::open(&path).unwrap();
        manifest.apply(&add_source("Foo.cpp"));

        fs::write(&path, "set(ENGINE_SOURCES\n\t$SRC/Other.cpp\n)\n").unwrap();

        let err = manifest.save().unwrap_err();
        assert!(matches!(*err, Error::ManifestChanged { .. }));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "set(ENGINE_SOURCES\n\t$SRC/Other.cpp\n)\n"
        );
    }

    #[test]
    fn test_manifest_removed_before_save() {
        let (_temp, path) = setup();
        let mut manifest = ManifestFile::open(&path).unwrap();
        manifest.apply(&add_source("Foo.cpp"));

        fs::remove_file(&path).unwrap();

        let err = manifest.save().unwrap_err();
        assert!(matches!(*err, Error::ManifestChanged { .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_manifest_is_edited_through_the_link() {
        use std::os::unix::fs::symlink;

        let (temp, path) = setup();
        fs::create_dir(temp.path().join("cmake")).unwrap();
        let real = temp.path().join("cmake").join("real.txt");
        fs::rename(&path, &real).unwrap();
        symlink(&real, &path).unwrap();

        edit_manifest(&path, &add_source("Foo.cpp")).unwrap();

        assert!(fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_to_string(&real).unwrap(),
            "set(ENGINE_SOURCES\n\t$SRC/Foo.cpp\n)\nset(ENGINE_HEADERS\n)\n"
        );
    }

    #[test]
    fn test_byte_order_mark_is_preserved() {
        let (_temp, path) = setup();
        fs::write(&path, format!("\u{feff}{}", MANIFEST)).unwrap();

        edit_manifest(&path, &add_source("Foo.cpp")).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
        assert!(String::from_utf8(bytes).unwrap().contains("\t$SRC/Foo.cpp\n)"));
    }
}
