//! Document persistence.
//!
//! # Responsibility
//! - Define the whole-document load/save contract used by the service layer.
//! - Share one JSON codec between every store implementation.
//!
//! # Invariants
//! - `load` on a store with no content returns an empty `Document`.
//! - `save` either replaces the persisted content completely or leaves it
//!   untouched.
//! - Stores take no locks; concurrent load/modify/save sequences are
//!   last-writer-wins.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::{MemoryStore, MEMORY_LOCATION};

use crate::model::document::Document;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure.
#[derive(Debug)]
pub enum StoreError {
    /// Existing content could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Existing content is not a valid document.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Content could not be written; previous content is intact.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Document could not be encoded; nothing was written.
    Encode(serde_json::Error),
}

impl StoreError {
    /// Persisted content is unreadable and needs manual repair.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }

    /// A save failed and the change was not applied.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::Encode(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read data file {}: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "data file {} is corrupt: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write data file {}: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Whole-document persistence contract.
pub trait DocumentStore {
    fn load(&self) -> StoreResult<Document>;
    fn save(&self, document: &Document) -> StoreResult<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn load(&self) -> StoreResult<Document> {
        (**self).load()
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        (**self).save(document)
    }
}

/// Decodes persisted text. Blank text is treated as a first run.
pub(crate) fn decode_document(content: &str, path: &Path) -> StoreResult<Document> {
    if content.trim().is_empty() {
        return Ok(Document::default());
    }
    serde_json::from_str(content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Encodes a document as pretty JSON with a trailing newline.
pub(crate) fn encode_document(document: &Document) -> StoreResult<String> {
    let mut encoded = serde_json::to_string_pretty(document).map_err(StoreError::Encode)?;
    encoded.push('\n');
    Ok(encoded)
}
