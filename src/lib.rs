pub mod config;
pub mod error;
pub mod gallery;
pub mod logger;
pub mod models;
pub mod provider;
pub mod server;

pub use config::{Config, GalleryConfig, ReplicateConfig};
pub use error::{ArtgenError, Result};
pub use gallery::{FileSlot, GalleryStore, MemorySlot, StorageSlot};
pub use models::{GenerateImageRequest, StoredImageRecord};
pub use provider::{ImageProvider, ReplicateClient};
pub use server::AppState;
