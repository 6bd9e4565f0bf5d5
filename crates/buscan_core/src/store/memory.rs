//! In-memory document store.
//!
//! Holds the encoded document text rather than a `Document` value so that
//! loads and saves go through the same codec as the file store.

use super::{decode_document, encode_document, DocumentStore, StoreError, StoreResult};
use crate::model::document::Document;
use log::debug;
use std::cell::{Cell, RefCell};
use std::io::ErrorKind;
use std::path::Path;

/// Location reported in errors raised by `MemoryStore`.
pub const MEMORY_LOCATION: &str = ":memory:";

/// Single-threaded store keeping the encoded document in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: RefCell<Option<String>>,
    read_only: Cell<bool>,
}

impl MemoryStore {
    /// Creates an empty store (first-run state).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with raw persisted text.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: RefCell::new(Some(content.into())),
            read_only: Cell::new(false),
        }
    }

    /// Raw persisted text, `None` before the first save.
    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Makes subsequent saves fail with a write error.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> StoreResult<Document> {
        debug!("event=store_load module=store status=start mode=memory");
        match self.content.borrow().as_deref() {
            Some(content) => decode_document(content, Path::new(MEMORY_LOCATION)),
            None => Ok(Document::default()),
        }
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        if self.read_only.get() {
            return Err(StoreError::Write {
                path: MEMORY_LOCATION.into(),
                source: std::io::Error::new(ErrorKind::PermissionDenied, "store is read-only"),
            });
        }
        let encoded = encode_document(document)?;
        debug!(
            "event=store_save module=store status=ok mode=memory bytes={}",
            encoded.len()
        );
        *self.content.borrow_mut() = Some(encoded);
        Ok(())
    }
}
