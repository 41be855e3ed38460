//! Crate-wide error taxonomy.

use std::path::PathBuf;

/// Every failure mode the core and its collaborators can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a gitnano repository (no .gitnano found at or above {0})")]
    NotARepository(PathBuf),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("ambiguous ref {0}: matches more than one commit")]
    Ambiguous(String),

    #[error("corrupt object: {0}")]
    CorruptObject(String),

    #[error("integrity error: hash mismatch after writing {0}")]
    IntegrityError(String),

    #[error("type mismatch: expected {expected}, found {found} for {hash}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        hash: String,
    },

    #[error("invalid tree: {0}")]
    InvalidTree(String),

    #[error("commit {0} has no parent")]
    NoParent(String),

    #[error("HEAD~{0} walks past the initial commit")]
    OutOfHistory(u32),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attaches path context to a raw `std::io::Error` at the point it occurs.
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
