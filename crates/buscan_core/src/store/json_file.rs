//! Single-file JSON document store.
//!
//! # Invariants
//! - A missing file is a first run, not an error.
//! - Saves write a sibling temp file, sync it, then rename it over the
//!   target, so readers see either the old or the new document.
//! - The parent directory is never created implicitly.

use super::{decode_document, encode_document, DocumentStore, StoreError, StoreResult};
use crate::model::document::Document;
use log::{error, info};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Document store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomically(&self, content: &str) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir).map_err(|err| self.write_error(err))?;
        staged
            .write_all(content.as_bytes())
            .map_err(|err| self.write_error(err))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|err| self.write_error(err))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.write_error(err.error))?;
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> StoreResult<Document> {
        let started_at = Instant::now();
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=ok mode=file first_run=true duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(Document::default());
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error mode=file error_code=read_failed error={}",
                    err
                );
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        match decode_document(&content, &self.path) {
            Ok(document) => {
                info!(
                    "event=store_load module=store status=ok mode=file buses={} routes={} fleet={} duration_ms={}",
                    document.buses.len(),
                    document.routes.len(),
                    document.fleet.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(document)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error mode=file error_code=corrupt error={}",
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        let started_at = Instant::now();
        let encoded = encode_document(document)?;

        match self.write_atomically(&encoded) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok mode=file bytes={} duration_ms={}",
                    encoded.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error mode=file error_code=write_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }
}
