use crate::ast::Program;
use crate::parser::{ParseError, Parser};
use crate::tokenizer::{ScanError, Tokenizer};
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension inferred for import paths written without one.
pub const MODULE_EXTENSION: &str = "ms";

/// Environment variable holding extra module search directories,
/// separated by ';'.
pub const MODULE_PATH_ENV: &str = "MS_MODULES";

#[derive(Debug)]
pub enum ModuleError {
    NotFound { path: String },
    Io { path: PathBuf, source: io::Error },
    Scan(ScanError),
    Parse(ParseError),
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleError::NotFound { path } => write!(f, "Module '{}' not found", path),
            ModuleError::Io { path, source } => {
                write!(f, "Failed to read module '{}': {}", path.display(), source)
            }
            ModuleError::Scan(err) => write!(f, "{}", err),
            ModuleError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ModuleError {}

/// Resolve an import spec against the importing script's directory, the
/// current working directory, and each `MS_MODULES` entry, in that order.
/// A spec without an extension also tries with `.ms` appended.
pub fn resolve_module_path(spec: &str, script_dir: Option<&Path>) -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = script_dir {
        candidates.push(dir.join(spec));
    }
    candidates.push(PathBuf::from(spec));
    if let Ok(entries) = env::var(MODULE_PATH_ENV) {
        for entry in entries.split(';').filter(|entry| !entry.is_empty()) {
            candidates.push(Path::new(entry).join(spec));
        }
    }

    for candidate in candidates {
        if candidate.is_file() {
            return Some(candidate);
        }
        if candidate.extension().is_none() {
            let with_extension = candidate.with_extension(MODULE_EXTENSION);
            if with_extension.is_file() {
                return Some(with_extension);
            }
        }
    }
    None
}

/// Read and parse a module file into its top-level statements. The caller
/// decides which environment they execute in.
pub fn load_module(path: &Path) -> Result<Program, ModuleError> {
    let source = fs::read_to_string(path).map_err(|source| ModuleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tokens = Tokenizer::new(&source)
        .tokenize()
        .map_err(ModuleError::Scan)?;
    Parser::new(tokens).parse().map_err(ModuleError::Parse)
}
