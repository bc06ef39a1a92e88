use crate::error::Result;

/// A single named slot of string-valued storage, the persistence port the
/// gallery writes through. Implementations rewrite the whole slot on every
/// `write`; there is no partial update and no locking across writers.
pub trait StorageSlot: Send + Sync {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, contents: &str) -> Result<()>;
}
