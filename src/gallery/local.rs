use crate::{
    error::{ArtgenError, Result},
    gallery::traits::StorageSlot,
};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-backed slot. A missing file reads as an empty slot.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ArtgenError::StorageError(e.to_string())),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        fs::write(&self.path, contents).map_err(|e| ArtgenError::StorageError(e.to_string()))
    }
}
