use crate::error::{ArtgenError, Result};
use serde::Deserialize;
use serde_json::Value;

/// The response shapes observed across hosted model versions. Deserialized
/// once into a tagged form so the probing below is an ordered walk over
/// typed variants rather than ad-hoc field lookups.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOutput {
    Url(String),
    List(Vec<RawOutput>),
    Object(OutputFields),
}

#[derive(Debug, Deserialize)]
struct OutputFields {
    output: Option<Box<RawOutput>>,
    image: Option<String>,
    images: Option<Vec<String>>,
    url: Option<String>,
}

fn first_url(raw: &RawOutput) -> Option<String> {
    match raw {
        RawOutput::Url(url) => Some(url.clone()),
        RawOutput::List(items) => items.first().and_then(first_url),
        RawOutput::Object(fields) => {
            if let Some(output) = &fields.output {
                if let Some(url) = first_url(output) {
                    return Some(url);
                }
            }
            if let Some(image) = &fields.image {
                return Some(image.clone());
            }
            if let Some(images) = &fields.images {
                if let Some(first) = images.first() {
                    return Some(first.clone());
                }
            }
            fields.url.clone()
        }
    }
}

/// Unwrap whatever the provider returned into a single image URL.
/// Probes, in order: a bare string, the first element of a sequence, then
/// the `output`/`image`/`images`/`url` fields of an object.
pub fn extract_image_url(output: Value) -> Result<String> {
    let raw: RawOutput = serde_json::from_value(output)
        .map_err(|_| ArtgenError::ResponseError("Unrecognized provider output shape".into()))?;

    match first_url(&raw) {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(ArtgenError::ResponseError(
            "Provider output contained no image URL".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_string() {
        assert_eq!(
            extract_image_url(json!("http://x/img.png")).unwrap(),
            "http://x/img.png"
        );
    }

    #[test]
    fn test_sequence_takes_first() {
        assert_eq!(
            extract_image_url(json!(["http://x/a.png", "http://x/b.png"])).unwrap(),
            "http://x/a.png"
        );
    }

    #[test]
    fn test_object_field_priority() {
        assert_eq!(
            extract_image_url(json!({"output": ["http://x/o.png"], "url": "http://x/u.png"}))
                .unwrap(),
            "http://x/o.png"
        );
        assert_eq!(
            extract_image_url(json!({"image": "http://x/i.png"})).unwrap(),
            "http://x/i.png"
        );
        assert_eq!(
            extract_image_url(json!({"images": ["http://x/first.png", "http://x/second.png"]}))
                .unwrap(),
            "http://x/first.png"
        );
        assert_eq!(
            extract_image_url(json!({"url": "http://x/u.png"})).unwrap(),
            "http://x/u.png"
        );
    }

    #[test]
    fn test_unrecognized_shapes_fail() {
        assert!(extract_image_url(json!(42)).is_err());
        assert!(extract_image_url(json!([])).is_err());
        assert!(extract_image_url(json!({"status": "succeeded"})).is_err());
        // An empty string is not a usable URL.
        assert!(extract_image_url(json!("")).is_err());
    }
}
