use crate::{
    config::{ReplicateConfig, DEFAULT_REPLICATE_URL},
    error::{ArtgenError, Result},
    models::ModelSpec,
    provider::{ImageProvider, ProviderPayload},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const MAX_POLL_ATTEMPTS: u32 = 120;

#[derive(Debug, Deserialize)]
struct Prediction {
    id: String,
    status: String,
    output: Option<Value>,
    error: Option<Value>,
}

#[derive(Clone)]
pub struct ReplicateClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ReplicateClient {
    pub fn new(config: ReplicateConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_REPLICATE_URL.to_string()),
            token: config.api_token,
        }
    }

    /// The token is checked per call so a misconfigured deployment reports
    /// `ProviderUnavailable` on each request instead of failing startup.
    fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ArtgenError::ProviderUnavailable("Replicate API token not configured".into())
            })
    }

    async fn fetch_prediction(&self, id: &str) -> Result<Prediction> {
        let token = self.token()?;
        let response = self
            .client
            .get(format!("{}/predictions/{}", self.base_url, id))
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", token))
            .send()
            .await
            .map_err(|e| ArtgenError::ProviderCallFailed(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| ArtgenError::ResponseError(e.to_string()))
    }
}

#[async_trait]
impl ImageProvider for ReplicateClient {
    async fn generate(&self, model: &ModelSpec, payload: &ProviderPayload) -> Result<Value> {
        let token = self.token()?;
        let body = json!({
            "version": model.version,
            "input": payload,
        });

        log::info!("Generating image with model: {}", model.id);

        let response = self
            .client
            .post(format!("{}/predictions", self.base_url))
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", token))
            .json(&body)
            .send()
            .await
            .map_err(|e| ArtgenError::ProviderCallFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ArtgenError::ProviderCallFailed(format!(
                "Prediction request returned {}: {}",
                status, detail
            )));
        }

        let mut prediction: Prediction = response
            .json()
            .await
            .map_err(|e| ArtgenError::ResponseError(e.to_string()))?;

        // Once issued, a prediction runs to completion or failure; there is
        // no cancellation path. The attempt cap bounds runaway predictions.
        for _ in 0..MAX_POLL_ATTEMPTS {
            match prediction.status.as_str() {
                "succeeded" => {
                    return prediction.output.ok_or_else(|| {
                        ArtgenError::ResponseError(
                            "Prediction succeeded without an output value".into(),
                        )
                    });
                }
                "failed" | "canceled" => {
                    let detail = prediction
                        .error
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| prediction.status.clone());
                    return Err(ArtgenError::ProviderCallFailed(detail));
                }
                _ => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                    prediction = self.fetch_prediction(&prediction.id).await?;
                }
            }
        }

        Err(ArtgenError::ProviderCallFailed(format!(
            "Prediction {} did not finish in time",
            prediction.id
        )))
    }
}
