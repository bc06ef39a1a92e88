use crate::{
    error::{ArtgenError, Result},
    models::{ModelSpec, SizeMode},
};
use serde::Serialize;

/// Provider-specific request body. Variant choice is keyed by the model's
/// [`SizeMode`]; serde flattens both into the plain JSON object the
/// prediction API expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProviderPayload {
    Dimensioned {
        prompt: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        negative_prompt: Option<String>,
        width: u32,
        height: u32,
    },
    Sized {
        prompt: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        negative_prompt: Option<String>,
        #[serde(rename = "image_dimensions")]
        size: String,
    },
}

/// Weighting of the nearest-size distance metric. Aspect-ratio deviation
/// counts `aspect` times as much as pixel-count deviation, which is scaled
/// down by `pixel_scale` to keep both terms in the same ballpark.
#[derive(Debug, Clone, Copy)]
pub struct SizeWeights {
    pub aspect: f64,
    pub pixel_scale: f64,
}

impl Default for SizeWeights {
    fn default() -> Self {
        SizeWeights {
            aspect: 3.0,
            pixel_scale: 1_000_000.0,
        }
    }
}

fn parse_size(size: &str) -> Option<(u32, u32)> {
    let (w, h) = size.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn size_distance(candidate: (u32, u32), requested: (u32, u32), weights: &SizeWeights) -> f64 {
    let (cw, ch) = (candidate.0 as f64, candidate.1 as f64);
    let (rw, rh) = (requested.0 as f64, requested.1 as f64);
    weights.aspect * (cw / ch - rw / rh).abs() + (cw * ch - rw * rh).abs() / weights.pixel_scale
}

/// Select the best-matching entry of `table` for the requested dimensions.
/// An exact `"WxH"` match wins outright; otherwise the entry minimizing the
/// weighted distance is chosen, with ties resolved to the earliest entry.
pub fn nearest_size<'a>(
    table: &[&'a str],
    width: u32,
    height: u32,
    weights: &SizeWeights,
) -> Option<&'a str> {
    let exact = format!("{}x{}", width, height);
    if let Some(hit) = table.iter().find(|entry| **entry == exact) {
        return Some(*hit);
    }

    let mut best: Option<(&str, f64)> = None;
    for entry in table {
        let candidate = match parse_size(entry) {
            Some(dims) => dims,
            None => continue,
        };
        let distance = size_distance(candidate, (width, height), weights);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((entry, distance)),
        }
    }
    best.map(|(entry, _)| entry)
}

/// Shape the request into the payload the target model expects. Pure; the
/// caller resolves the model against the catalog before calling in, so an
/// unsupported model never reaches the provider.
pub fn resolve_payload(
    model: &ModelSpec,
    prompt: &str,
    negative_prompt: Option<&str>,
    width: u32,
    height: u32,
) -> Result<ProviderPayload> {
    if prompt.trim().is_empty() {
        return Err(ArtgenError::MissingPrompt);
    }

    let prompt = prompt.to_string();
    let negative_prompt = negative_prompt.map(String::from);

    match model.size_mode {
        SizeMode::Free => Ok(ProviderPayload::Dimensioned {
            prompt,
            negative_prompt,
            width,
            height,
        }),
        SizeMode::Fixed(table) => {
            let size = nearest_size(table, width, height, &SizeWeights::default())
                .ok_or_else(|| {
                    ArtgenError::ConfigError(format!("Model {} has an empty size table", model.id))
                })?;
            Ok(ProviderPayload::Sized {
                prompt,
                negative_prompt,
                size: size.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::find_model;

    const SAMPLE_TABLE: &[&str] = &["256x256", "512x512", "1024x1024", "1792x1024", "1024x1792"];

    #[test]
    fn test_blank_prompt_rejected() {
        let model = find_model("sdxl").unwrap();
        assert_eq!(
            resolve_payload(model, "", None, 512, 512),
            Err(ArtgenError::MissingPrompt)
        );
        assert_eq!(
            resolve_payload(model, "   \t", None, 512, 512),
            Err(ArtgenError::MissingPrompt)
        );
    }

    #[test]
    fn test_free_sizing_passes_dimensions_through() {
        let model = find_model("sdxl").unwrap();
        let payload = resolve_payload(model, "a red fox", Some("blurry"), 640, 384).unwrap();
        assert_eq!(
            payload,
            ProviderPayload::Dimensioned {
                prompt: "a red fox".into(),
                negative_prompt: Some("blurry".into()),
                width: 640,
                height: 384,
            }
        );
    }

    #[test]
    fn test_fixed_sizing_snaps_to_table() {
        let model = find_model("stable-diffusion").unwrap();
        let payload = resolve_payload(model, "a red fox", None, 700, 700).unwrap();
        assert_eq!(
            payload,
            ProviderPayload::Sized {
                prompt: "a red fox".into(),
                negative_prompt: None,
                size: "768x768".into(),
            }
        );
    }

    #[test]
    fn test_exact_match_wins() {
        let weights = SizeWeights::default();
        assert_eq!(
            nearest_size(SAMPLE_TABLE, 1792, 1024, &weights),
            Some("1792x1024")
        );
        assert_eq!(
            nearest_size(SAMPLE_TABLE, 512, 512, &weights),
            Some("512x512")
        );
    }

    #[test]
    fn test_nearest_match_reference_table() {
        let weights = SizeWeights::default();
        // 16:9 request lands on the only wide candidate.
        assert_eq!(
            nearest_size(SAMPLE_TABLE, 1920, 1080, &weights),
            Some("1792x1024")
        );
        // Tiny square request lands on the smallest square.
        assert_eq!(
            nearest_size(SAMPLE_TABLE, 100, 100, &weights),
            Some("256x256")
        );
        // Extreme aspect ratio: the aspect term dominates the pixel term,
        // so the wide candidate beats the closer-in-pixel-count squares.
        assert_eq!(
            nearest_size(SAMPLE_TABLE, 2000, 500, &weights),
            Some("1792x1024")
        );
    }

    #[test]
    fn test_tie_resolves_to_first_entry() {
        let weights = SizeWeights::default();
        // Duplicate entries are equidistant; the earlier one is returned.
        let table = &["512x512", "512x512"];
        let winner = nearest_size(table, 600, 600, &weights).unwrap();
        assert!(std::ptr::eq(winner, table[0]));
    }

    #[test]
    fn test_serialized_payload_shape() {
        let model = find_model("stable-diffusion").unwrap();
        let payload = resolve_payload(model, "a red fox", None, 512, 512).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["image_dimensions"], "512x512");
        assert_eq!(json["prompt"], "a red fox");
        assert!(json.get("negative_prompt").is_none());
    }
}
