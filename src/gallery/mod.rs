pub mod local;
pub mod memory;
pub mod traits;

use crate::{
    error::{ArtgenError, Result},
    models::{NewImageRecord, StoredImageRecord},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub use local::FileSlot;
pub use memory::MemorySlot;
pub use traits::StorageSlot;

/// Append-only history of successful generations, persisted as one
/// JSON-encoded list in a single storage slot. Every mutation is a full
/// read-modify-write of the collection; concurrent writers may overwrite
/// each other, which is an accepted limitation of the slot layout.
#[derive(Clone)]
pub struct GalleryStore {
    slot: Arc<dyn StorageSlot>,
}

impl GalleryStore {
    pub fn new(slot: impl StorageSlot + 'static) -> Self {
        Self {
            slot: Arc::new(slot),
        }
    }

    /// All records, newest first. The store is best-effort: an unreadable
    /// or corrupted slot yields an empty list, never an error.
    pub fn list(&self) -> Vec<StoredImageRecord> {
        let contents = match self.slot.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read gallery slot: {}", e);
                return Vec::new();
            }
        };

        let mut records: Vec<StoredImageRecord> = match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Gallery slot holds corrupt data, treating as empty: {}", e);
                return Vec::new();
            }
        };

        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// Assign a fresh id and timestamp, prepend, and persist. Callers treat
    /// a failure here as non-fatal; the generated image is still usable.
    pub fn append(&self, new: NewImageRecord) -> Result<StoredImageRecord> {
        // The slot stores epoch milliseconds; truncate up front so the
        // record round-trips through persistence unchanged.
        let now = Utc::now();
        let timestamp = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);

        let record = StoredImageRecord {
            id: Uuid::new_v4().to_string(),
            image_url: new.image_url,
            prompt: new.prompt,
            negative_prompt: new.negative_prompt,
            width: new.width,
            height: new.height,
            model: new.model,
            timestamp,
        };

        let mut records = self.list();
        records.insert(0, record.clone());
        self.persist(&records)?;

        Ok(record)
    }

    /// Remove the record with the given id. A miss is a no-op.
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut records = self.list();
        records.retain(|record| record.id != id);
        self.persist(&records)
    }

    /// Truncate the whole collection.
    pub fn clear(&self) -> Result<()> {
        self.persist(&[])
    }

    fn persist(&self, records: &[StoredImageRecord]) -> Result<()> {
        let contents = serde_json::to_string(records)
            .map_err(|e| ArtgenError::SerializationError(e.to_string()))?;
        self.slot.write(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(prompt: &str) -> NewImageRecord {
        NewImageRecord {
            image_url: format!("http://x/{}.png", prompt.replace(' ', "-")),
            prompt: prompt.to_string(),
            negative_prompt: None,
            width: 512,
            height: 512,
            model: Some("sdxl".to_string()),
        }
    }

    #[test]
    fn test_append_then_list_round_trip() {
        let store = GalleryStore::new(MemorySlot::new());
        let appended = store
            .append(NewImageRecord {
                negative_prompt: Some("blurry".to_string()),
                ..sample_record("a red fox")
            })
            .unwrap();

        assert!(!appended.id.is_empty());
        let listed = store.list();
        assert_eq!(listed, vec![appended]);
        assert_eq!(listed[0].prompt, "a red fox");
        assert_eq!(listed[0].negative_prompt.as_deref(), Some("blurry"));
    }

    #[test]
    fn test_list_is_newest_first() {
        let store = GalleryStore::new(MemorySlot::new());
        let first = store.append(sample_record("one")).unwrap();
        let second = store.append(sample_record("two")).unwrap();
        let third = store.append(sample_record("three")).unwrap();

        let prompts: Vec<String> = store.list().into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, vec!["three", "two", "one"]);
        assert!(third.timestamp >= second.timestamp);
        assert!(second.timestamp >= first.timestamp);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = GalleryStore::new(MemorySlot::new());
        let keep = store.append(sample_record("keep")).unwrap();
        let doomed = store.append(sample_record("doomed")).unwrap();

        store.remove(&doomed.id).unwrap();
        let after_once = store.list();
        store.remove(&doomed.id).unwrap();
        assert_eq!(store.list(), after_once);
        assert_eq!(after_once, vec![keep]);
    }

    #[test]
    fn test_corrupt_slot_reads_as_empty() {
        let slot = MemorySlot::new();
        slot.write("not json at all").unwrap();
        let store = GalleryStore::new(slot);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_clear_truncates() {
        let store = GalleryStore::new(MemorySlot::new());
        store.append(sample_record("one")).unwrap();
        store.append(sample_record("two")).unwrap();
        store.clear().unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_file_slot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        let store = GalleryStore::new(FileSlot::new(&path));

        assert!(store.list().is_empty());
        let appended = store.append(sample_record("persisted")).unwrap();

        let reopened = GalleryStore::new(FileSlot::new(&path));
        assert_eq!(reopened.list(), vec![appended]);
    }

    struct FailingSlot;

    impl StorageSlot for FailingSlot {
        fn read(&self) -> crate::error::Result<Option<String>> {
            Ok(None)
        }

        fn write(&self, _contents: &str) -> crate::error::Result<()> {
            Err(ArtgenError::StorageError("quota exceeded".into()))
        }
    }

    #[test]
    fn test_append_surfaces_write_failure() {
        let store = GalleryStore::new(FailingSlot);
        let err = store.append(sample_record("doomed")).unwrap_err();
        assert!(matches!(err, ArtgenError::StorageError(_)));
    }
}
