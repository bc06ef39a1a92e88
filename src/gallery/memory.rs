use crate::{error::Result, gallery::traits::StorageSlot};
use std::sync::Mutex;

/// In-memory slot for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemorySlot {
    contents: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents.lock().expect("slot lock poisoned").clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        *self.contents.lock().expect("slot lock poisoned") = Some(contents.to_string());
        Ok(())
    }
}
