use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for matrix-export loading operations.
#[derive(Error, Debug)]
pub enum MexError {
    /// The pipeline root, its output directory, or the matrix directory is
    /// missing.
    #[error("path not found: {0:?}")]
    PathNotFound(PathBuf),

    /// Legacy layout with anything other than exactly one genome candidate
    /// and no genome requested.
    #[error(
        "expected exactly one genome subdirectory, found {}: [{}]; pass a genome name to disambiguate",
        .0.len(),
        .0.join(", ")
    )]
    AmbiguousGenome(Vec<String>),

    /// The requested genome is not among the candidates on disk.
    #[error("unknown genome {genome:?}, available: [{}]", candidates.join(", "))]
    UnknownGenome {
        genome: String,
        candidates: Vec<String>,
    },

    /// One of the three required export files is absent.
    #[error("missing input file: {0:?}")]
    MissingInputFile(PathBuf),

    /// Malformed table or matrix content.
    #[error("parse error in {path:?} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Matrix dimensions disagree with an annotation table.
    #[error("dimension mismatch: {matrix:?} declares {declared} {axis}, but {table:?} has {found}")]
    DimensionMismatch {
        matrix: PathBuf,
        table: PathBuf,
        axis: &'static str,
        declared: usize,
        found: usize,
    },

    /// A dataset barcode has no row in the supplied per-cell metadata.
    #[error("no cell metadata for barcode {0:?}")]
    MissingCellMetadata(String),

    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for matrix-export loading operations.
pub type Result<T> = std::result::Result<T, MexError>;
