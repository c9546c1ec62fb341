//! Creating and deleting project files with manifest bookkeeping.

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use cxscaffold_core::{GeneratedFile, validate_identifier};
use cxscaffold_manifest::{
    AddEdit, DeleteEdit, EntryClassifier, Error, ManifestToken, PatchWarning, Patched,
    PathResolver, ProjectConfig, Result, edit_manifest,
};

use crate::files::{ClassHeader, ClassSource, HeaderStub, SourceStub};

/// What a manifest edit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestUpdate {
    pub path: PathBuf,
    /// Tokens inserted, or for a deletion the token that was looked for.
    pub tokens: Vec<ManifestToken>,
    pub inserted: usize,
    pub removed: usize,
    pub warnings: Vec<PatchWarning>,
}

impl ManifestUpdate {
    fn new(path: PathBuf, tokens: Vec<ManifestToken>, patched: Option<Patched>) -> Self {
        let (inserted, removed, warnings) = match patched {
            Some(p) => (p.inserted, p.removed, p.warnings),
            None => (0, 0, Vec::new()),
        };
        Self {
            path,
            tokens,
            inserted,
            removed,
            warnings,
        }
    }
}

/// Files created by a scaffolding call.
///
/// The files are on disk whatever happened to the manifest; a failed
/// manifest step is reported in `manifest` and not rolled back.
#[derive(Debug)]
pub struct Scaffolded {
    pub files: Vec<PathBuf>,
    pub manifest: Result<ManifestUpdate>,
}

/// A deleted file and the matching manifest cleanup.
#[derive(Debug)]
pub struct Deleted {
    pub file: PathBuf,
    pub manifest: Result<ManifestUpdate>,
}

/// Writes C++ files into a project and keeps its manifest in step.
pub struct Scaffolder<'a> {
    config: &'a ProjectConfig,
}

impl<'a> Scaffolder<'a> {
    pub fn new(config: &'a ProjectConfig) -> Self {
        Self { config }
    }

    /// Create `<name>.h` and `<name>.cpp` declaring and defining class `name`.
    pub fn create_class(&self, name: &str, dir: &Path) -> Result<Scaffolded> {
        if let Some(reason) = validate_identifier(name) {
            return Err(Error::invalid_name(name, "class", reason));
        }
        let encoding = self.config.encoding;
        self.scaffold(
            dir,
            &[
                &ClassHeader::new(name, encoding),
                &ClassSource::new(name, encoding),
            ],
        )
    }

    /// Create a header containing only `#pragma once` and a comment.
    pub fn create_header_only(&self, name: &str, dir: &Path) -> Result<Scaffolded> {
        validate_file_stem(name)?;
        self.scaffold(dir, &[&HeaderStub::new(name, self.config.encoding)])
    }

    /// Create a source file that includes the header of the same name.
    pub fn create_source_only(&self, name: &str, dir: &Path) -> Result<Scaffolded> {
        validate_file_stem(name)?;
        self.scaffold(dir, &[&SourceStub::new(name, self.config.encoding)])
    }

    /// Remove a file, then every manifest line that refers to it.
    ///
    /// Nothing in the manifest changes when the file cannot be removed.
    pub fn delete_file(&self, path: &Path) -> Result<Deleted> {
        let meta = fs::symlink_metadata(path).map_err(|e| Error::io("remove", path, e))?;
        if meta.is_dir() {
            return Err(Box::new(Error::NotAFile {
                path: path.to_path_buf(),
            }));
        }
        fs::remove_file(path).map_err(|e| Error::io("remove", path, e))?;
        tracing::info!(file = %path.display(), "deleted");

        let dir = parent_dir(path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let token = PathResolver::new(self.config).resolve_token(dir, &file_name);

        Ok(Deleted {
            file: path.to_path_buf(),
            manifest: self.remove_from_manifest(token),
        })
    }

    fn scaffold(&self, dir: &Path, files: &[&dyn GeneratedFile]) -> Result<Scaffolded> {
        ensure_dir(dir)?;

        let paths: Vec<PathBuf> = files.iter().map(|f| f.path(dir)).collect();
        if let Some(existing) = paths.iter().find(|p| p.exists()) {
            return Err(Box::new(Error::AlreadyExists {
                path: existing.clone(),
            }));
        }

        let mut written = Vec::with_capacity(files.len());
        for (file, path) in files.iter().zip(&paths) {
            ensure_dir(dir)?;
            if let Err(e) = file.write(dir) {
                if !written.is_empty() {
                    tracing::warn!(
                        files = ?written,
                        "scaffolding stopped part way; files already written are kept"
                    );
                }
                return Err(write_error(path, dir, e));
            }
            tracing::info!(file = %path.display(), "created");
            written.push(path.clone());
        }

        let names: Vec<String> = written
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();

        Ok(Scaffolded {
            manifest: self.add_to_manifest(dir, &names),
            files: written,
        })
    }

    fn add_to_manifest(&self, dir: &Path, file_names: &[String]) -> Result<ManifestUpdate> {
        let manifest_path = self.config.manifest_path();
        let classifier = EntryClassifier::new(&self.config.buckets);
        let classification = classifier.classify(file_names);
        let rel_dir = PathResolver::new(self.config).relative_dir(dir);

        let mut edit = AddEdit::new();
        for rule in classifier.rules() {
            let tokens = classification
                .get(&rule.name)
                .iter()
                .map(|f| ManifestToken::new(&self.config.path_variable_token, &rel_dir, f));
            edit = edit.with_tokens(&rule.block, tokens);
        }

        if edit.is_empty() {
            tracing::debug!("no new file belongs in the manifest");
            return Ok(ManifestUpdate::new(manifest_path, Vec::new(), None));
        }

        let patched = edit_manifest(&manifest_path, &edit.clone().into())?;
        let listed = edit
            .iter()
            .filter(|(block, _)| !patched.warnings.iter().any(|w| w.block() == *block))
            .flat_map(|(_, tokens)| tokens.iter().cloned())
            .collect();
        Ok(ManifestUpdate::new(manifest_path, listed, Some(patched)))
    }

    fn remove_from_manifest(&self, token: ManifestToken) -> Result<ManifestUpdate> {
        let manifest_path = self.config.manifest_path();
        let edit = DeleteEdit::new([token.clone()]).with_match(self.config.delete_match);
        let patched = edit_manifest(&manifest_path, &edit.into())?;
        if patched.removed == 0 {
            tracing::debug!(token = %token, "no manifest entry referred to the deleted file");
        }
        Ok(ManifestUpdate::new(manifest_path, vec![token], Some(patched)))
    }
}

/// Stub names become file names as-is, so only path trickery is rejected.
fn validate_file_stem(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("name cannot be empty")
    } else if name.contains(['/', '\\']) {
        Some("name cannot contain path separators; use --dir to pick a directory")
    } else if name == "." || name == ".." {
        Some("name cannot be a relative directory")
    } else if name.contains('\0') {
        Some("name cannot contain NUL")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::invalid_name(name, "file", reason)),
        None => Ok(()),
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Box::new(Error::DirectoryMissing {
            path: dir.to_path_buf(),
        }))
    }
}

fn write_error(path: &Path, dir: &Path, e: io::Error) -> Box<Error> {
    match e.kind() {
        ErrorKind::AlreadyExists => Box::new(Error::AlreadyExists {
            path: path.to_path_buf(),
        }),
        ErrorKind::NotFound if !dir.is_dir() => Box::new(Error::DirectoryMissing {
            path: dir.to_path_buf(),
        }),
        _ => Error::io("write", path, e),
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
