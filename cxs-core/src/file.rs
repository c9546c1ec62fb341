use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// UTF-8 byte order mark.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk
    fn write(&self, base: &Path) -> io::Result<()> {
        let rules = self.rules();
        let content = rules.encoding.encode(&self.render());
        write_with_rules(&self.path(base), &content, rules.overwrite)
    }
}

fn write_with_rules(path: &Path, content: &[u8], overwrite: Overwrite) -> io::Result<()> {
    match overwrite {
        Overwrite::Always => {
            create_parents(path)?;
            write_atomic(path, content)
        }
        Overwrite::Never => create_new(path, content),
    }
}

fn create_parents(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Create a file that must not exist yet.
///
/// Fails with [`io::ErrorKind::AlreadyExists`] when the path is taken, even if
/// it appeared after the caller last looked.
fn create_new(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(content)?;
    file.sync_all()
}

/// Replace `path` with `content` without ever exposing a half-written file.
///
/// The data goes to a temporary file next to the destination which is then
/// renamed over it. A symlinked destination is written through: the link
/// stays and its target is replaced. Permissions of an existing destination
/// are carried over.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let target = resolve_symlink(path)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    if let Ok(meta) = fs::metadata(&target) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| e.error)?;

    tracing::debug!(path = %target.display(), bytes = content.len(), "replaced file");
    Ok(())
}

/// Follow `path` to the file it names. Paths that are not symlinks, and
/// dangling links, come back unchanged.
fn resolve_symlink(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
            Err(e) => Err(e),
        },
        _ => Ok(path.to_path_buf()),
    }
}

/// A file to be written as-is
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given path and content (default rules: always overwrite)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Replace the write rules.
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Write the file according to its rules
    pub fn write(&self) -> io::Result<()> {
        let content = self.rules.encoding.encode(&self.content);
        write_with_rules(&self.path, &content, self.rules.overwrite)
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRules {
    pub overwrite: Overwrite,
    pub encoding: Encoding,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite, atomically
    Always,
    /// Create the file, failing if it exists. Never creates missing parents.
    Never,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            overwrite: Overwrite::Always,
            encoding: Encoding::Utf8,
        }
    }
}

/// Text encoding used when writing a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Plain UTF-8.
    Utf8,
    /// UTF-8 prefixed with a byte order mark. Visual Studio and friends
    /// use it to detect the encoding of source files.
    #[default]
    Utf8Bom,
}

impl Encoding {
    /// Name as written in the project config.
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf8Bom => "utf8-bom",
        }
    }

    /// Encode text into the bytes that go on disk.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf8Bom => {
                let mut bytes = Vec::with_capacity(BOM.len() + text.len());
                bytes.extend_from_slice(BOM);
                bytes.extend_from_slice(text.as_bytes());
                bytes
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn rules(overwrite: Overwrite) -> FileRules {
        FileRules {
            overwrite,
            encoding: Encoding::Utf8,
        }
    }

    #[test]
    fn test_write_atomic_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_atomic(&path, b"hello").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_atomic_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CMakeLists.txt");

        write_atomic(&path, b"set(A\n)\n").unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("CMakeLists.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");
        fs::write(&path, "original").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&path, b"updated").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_file_write_always_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("test.txt");

        File::new(&path, "nested").write().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");
        fs::write(&path, "original").unwrap();

        File::new(&path, "updated").write().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_file_write_never_fails_on_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Foo.h");
        fs::write(&path, "original").unwrap();

        let err = File::new(&path, "clobber")
            .with_rules(rules(Overwrite::Never))
            .write()
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_file_write_never_does_not_create_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gone").join("Foo.h");

        let err = File::new(&path, "content")
            .with_rules(rules(Overwrite::Never))
            .write()
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!temp.path().join("gone").exists());
    }

    #[test]
    fn test_bom_encoding() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Foo.h");

        File::new(&path, "#pragma once\n")
            .with_rules(FileRules {
                overwrite: Overwrite::Never,
                encoding: Encoding::Utf8Bom,
            })
            .write()
            .unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], BOM);
        assert_eq!(&bytes[3..], b"#pragma once\n");
    }

    #[test]
    fn test_encoding_serde_names() {
        assert_eq!(
            serde_json::to_string(&Encoding::Utf8Bom).unwrap(),
            "\"utf8-bom\""
        );
        let parsed: Encoding = serde_json::from_str("\"utf8\"").unwrap();
        assert_eq!(parsed, Encoding::Utf8);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_writes_through_symlink() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("cmake")).unwrap();
        let target = temp.path().join("cmake").join("real.txt");
        let link = temp.path().join("CMakeLists.txt");
        fs::write(&target, "old").unwrap();
        symlink(&target, &link).unwrap();

        write_atomic(&link, b"new").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        let names: Vec<_> = fs::read_dir(temp.path().join("cmake"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("real.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_replaces_dangling_symlink() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let link = temp.path().join("CMakeLists.txt");
        symlink(temp.path().join("gone.txt"), &link).unwrap();

        write_atomic(&link, b"new").unwrap();

        assert_eq!(fs::read_to_string(&link).unwrap(), "new");
    }
}
