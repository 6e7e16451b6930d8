use std::path::{Path, PathBuf};
use thiserror::Error;

/// The only fatal failure of the compiler: the source description could not
/// be read or is not valid Rust.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read source {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse source {path} at {line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
}

/// A parsed source description.
#[derive(Clone)]
pub struct SourceFile {
    /// Path the declarations were read from; used in the generated banner
    pub path: PathBuf,
    pub file: syn::File,
}

// syn only implements Debug for its syntax tree behind `extra-traits`.
impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("items", &self.file.items.len())
            .finish()
    }
}

/// Read and parse a source description from disk.
pub fn load_source(path: &Path) -> Result<SourceFile, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(path, &content)
}

/// Parse source text; `path` only labels errors and the generated banner.
pub fn parse_source(path: impl Into<PathBuf>, content: &str) -> Result<SourceFile, SourceError> {
    let path = path.into();
    match syn::parse_file(content) {
        Ok(file) => {
            tracing::debug!(path = %path.display(), items = file.items.len(), "parsed source");
            Ok(SourceFile { path, file })
        }
        Err(err) => {
            let start = err.span().start();
            Err(SourceError::Parse {
                path,
                line: start.line,
                column: start.column + 1,
                message: err.to_string(),
            })
        }
    }
}
