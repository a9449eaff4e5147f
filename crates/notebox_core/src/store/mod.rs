//! In-memory note storage and JSON file persistence.
//!
//! # Responsibility
//! - Own the category -> ordered notes mapping.
//! - Read and write the notes file in its current and legacy shapes.
//!
//! # Invariants
//! - Category order and note order are both insertion order.
//! - Out-of-range index reads and writes never fail or panic.
//! - A failed load leaves the in-memory store untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod document;
pub mod note_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for file persistence and category-level edits.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the notes file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The notes file is not a well-formed category mapping or note array.
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Serializing the in-memory store failed.
    Encode(serde_json::Error),
    CategoryNotFound(String),
    CategoryExists(String),
    EmptyCategoryName,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "notes file `{}` i/o failed: {source}", path.display())
            }
            Self::Format { path, source } => write!(
                f,
                "notes file `{}` is malformed: {source}",
                path.display()
            ),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::CategoryNotFound(name) => write!(f, "category not found: `{name}`"),
            Self::CategoryExists(name) => write!(f, "category already exists: `{name}`"),
            Self::EmptyCategoryName => write!(f, "category name cannot be empty"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Format { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::CategoryNotFound(_) | Self::CategoryExists(_) | Self::EmptyCategoryName => None,
        }
    }
}
