use std::path::{Path, PathBuf};

use cxscaffold_core::{Encoding, FileRules, GeneratedFile, Overwrite};

use super::HEADER_EXT;

/// Header declaring a class with a default constructor and destructor
pub struct ClassHeader {
    pub name: String,
    pub encoding: Encoding,
}

impl ClassHeader {
    pub fn new(name: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            name: name.into(),
            encoding,
        }
    }
}

impl GeneratedFile for ClassHeader {
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
        let name = &self.name;
        format!(
            "#pragma once\n\
             \n\
             // {name} header\n\
             \n\
             class {name} {{\n\
             public:\n\
             \t{name}();\n\
             \t~{name}();\n\
             }};\n"
        )
    }
}
