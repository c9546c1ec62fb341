use std::path::{Path, PathBuf};

use cxscaffold_core::{Encoding, FileRules, GeneratedFile, Overwrite};

use super::{CREATED_BY, HEADER_EXT, SOURCE_EXT};

/// A bare source file including the header of the same name
pub struct SourceStub {
    pub name: String,
    pub encoding: Encoding,
}

impl SourceStub {
    pub fn new(name: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            name: name.into(),
            encoding,
        }
    }
}

impl GeneratedFile for SourceStub {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.{}", self.name, SOURCE_EXT))
    }

    fn rules(&self) -> FileRules {
        FileRules {
            overwrite: Overwrite::Never,
            encoding: self.encoding,
        }
    }

    fn render(&self) -> String {
        // The header may not exist; it is the usual starting point either way
        format!(
            "// {name}.{SOURCE_EXT} {CREATED_BY}\n\n#include \"{name}.{HEADER_EXT}\"\n",
            name = self.name
        )
    }
}
