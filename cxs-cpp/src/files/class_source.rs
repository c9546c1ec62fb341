use std::path::{Path, PathBuf};

use cxscaffold_core::{Encoding, FileRules, GeneratedFile, Overwrite};

use super::{HEADER_EXT, SOURCE_EXT};

/// Source file with empty constructor and destructor bodies for a class
pub struct ClassSource {
    pub name: String,
    pub encoding: Encoding,
}

impl ClassSource {
    pub fn new(name: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            name: name.into(),
            encoding,
        }
    }
}

impl GeneratedFile for ClassSource {
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
        let name = &self.name;
        format!(
            "#include \"{name}.{HEADER_EXT}\"\n\
             \n\
             {name}::{name}() {{\n\
             }}\n\
             \n\
             {name}::~{name}() {{\n\
             }}\n"
        )
    }
}
