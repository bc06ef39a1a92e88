pub mod output;
pub mod payload;
pub mod replicate;

use crate::{error::Result, models::ModelSpec};
use async_trait::async_trait;
use serde_json::Value;

pub use output::extract_image_url;
pub use payload::{nearest_size, resolve_payload, ProviderPayload, SizeWeights};
pub use replicate::ReplicateClient;

/// The outbound boundary to the hosted generation service. Implementations
/// return the provider's raw output value; shape normalization happens in
/// [`extract_image_url`].
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate(&self, model: &ModelSpec, payload: &ProviderPayload) -> Result<Value>;
}
