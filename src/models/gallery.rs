use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted generation, as stored in the gallery slot. Field names on the
/// wire match the stored JSON layout consumed by the gallery front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredImageRecord {
    pub id: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub prompt: String,
    #[serde(rename = "negativePrompt", skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Stored as epoch milliseconds, matching the slot layout the gallery
    /// front end reads.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// A record before `append` assigns its id and timestamp.
#[derive(Debug, Clone)]
pub struct NewImageRecord {
    pub image_url: String,
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub width: u32,
    pub height: u32,
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_serializes_as_epoch_millis() {
        let record = StoredImageRecord {
            id: "abc".to_string(),
            image_url: "http://x/img.png".to_string(),
            prompt: "a red fox".to_string(),
            negative_prompt: None,
            width: 512,
            height: 512,
            model: None,
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["timestamp"], 1_700_000_000_123i64);

        let parsed: StoredImageRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }
}
