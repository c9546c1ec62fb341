use std::path::{Path, PathBuf};

use cxscaffold_core::{Encoding, FileRules, GeneratedFile, Overwrite};

use super::{CREATED_BY, HEADER_EXT};

/// A bare header with only an include guard
pub struct HeaderStub {
    pub name: String,
    pub encoding: Encoding,
}

impl HeaderStub {
    pub fn new(name: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            name: name.into(),
            encoding,
        }
    }
}

impl GeneratedFile for HeaderStub {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.{}", self.name, HEADER_EXT))
    }

    fn rules(&self) -> FileRules {
        FileRules {
            overwrite: Overwrite::Never,
            encoding: self.encoding,
        }
    }

    fn render(&self) -> String {
        format!(
            "#pragma once\n\n// {}.{} {}\n",
            self.name, HEADER_EXT, CREATED_BY
        )
    }
}
