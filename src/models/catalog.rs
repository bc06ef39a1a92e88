use serde::{Deserialize, Serialize};

/// How a model expects output dimensions to be communicated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeMode {
    /// Arbitrary width/height pass through unchanged.
    Free,
    /// The model only accepts sizes from a fixed `"WxH"` enumeration;
    /// requests outside the list are snapped to the nearest entry.
    Fixed(&'static [&'static str]),
}

#[derive(Debug, Clone)]
pub struct ModelSpec {
    pub id: &'static str,
    /// Provider-side model version slug.
    pub version: &'static str,
    pub size_mode: SizeMode,
}

pub const STABLE_DIFFUSION_SIZES: &[&str] = &["512x512", "768x768"];

/// Closed set of supported models. The first entry is the default when a
/// request carries no model field.
pub const MODEL_CATALOG: &[ModelSpec] = &[
    ModelSpec {
        id: "sdxl",
        version: "stability-ai/sdxl:c221b2b8ef527988fb59bf24a8b97c4561f1c671f73bd389f86650ce26a4eda4",
        size_mode: SizeMode::Free,
    },
    ModelSpec {
        id: "stable-diffusion",
        version: "stability-ai/stable-diffusion:ac732df83cea7fff18b8472768c88ad041fa750ff7682a21affe81863cbe77e4",
        size_mode: SizeMode::Fixed(STABLE_DIFFUSION_SIZES),
    },
];

pub fn default_model() -> &'static ModelSpec {
    &MODEL_CATALOG[0]
}

pub fn find_model(id: &str) -> Option<&'static ModelSpec> {
    MODEL_CATALOG.iter().find(|spec| spec.id == id)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub version: String,
    pub fixed_sizes: Option<Vec<String>>,
}

impl From<&ModelSpec> for ModelInfo {
    fn from(spec: &ModelSpec) -> Self {
        ModelInfo {
            id: spec.id.to_string(),
            version: spec.version.to_string(),
            fixed_sizes: match spec.size_mode {
                SizeMode::Free => None,
                SizeMode::Fixed(sizes) => {
                    Some(sizes.iter().map(|s| s.to_string()).collect())
                }
            },
        }
    }
}
