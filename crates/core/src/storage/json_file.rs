use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::repository::Repository;
use crate::errors::CoreError;
use crate::models::Validate;

/// A collection stored as a single JSON array in one file.
///
/// Every write rewrites the whole file. A missing file reads as an empty
/// collection; a record breaking its invariants fails the whole read.
/// Concurrent writers are not coordinated.
#[derive(Debug)]
pub struct JsonFileRepository<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonFileRepository<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> JsonFileRepository<T> {
    fn write_all(&self, items: &[T]) -> Result<(), CoreError> {
        let json = serde_json::to_vec_pretty(items)
            .map_err(|e| CoreError::Serialization(format!("Failed to encode collection: {e}")))?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), records = items.len(), "collection written");
        Ok(())
    }
}

impl<T: Serialize + DeserializeOwned + Validate> Repository<T> for JsonFileRepository<T> {
    fn list(&self) -> Result<Vec<T>, CoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let items: Vec<T> = serde_json::from_slice(&bytes)?;
        // The file may have been edited by hand.
        items.validate()?;
        Ok(items)
    }

    fn append(&mut self, items: Vec<T>) -> Result<(), CoreError> {
        let mut all = self.list()?;
        all.extend(items);
        self.write_all(&all)
    }

    fn replace(&mut self, items: Vec<T>) -> Result<(), CoreError> {
        self.write_all(&items)
    }
}
