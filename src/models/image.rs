use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub model: Option<String>,
}

impl GenerateImageRequest {
    pub fn width_or_default(&self) -> u32 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    pub fn height_or_default(&self) -> u32 {
        self.height.unwrap_or(DEFAULT_HEIGHT)
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
