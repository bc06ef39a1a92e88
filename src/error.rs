use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ArtgenError {
    MissingPrompt,
    InvalidModel(String),
    ProviderUnavailable(String),
    ProviderCallFailed(String),
    ResponseError(String),
    StorageError(String),
    SerializationError(String),
    ConfigError(String),
}

impl fmt::Display for ArtgenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtgenError::MissingPrompt => write!(f, "Prompt is required"),
            ArtgenError::InvalidModel(id) => write!(f, "Unsupported model: {}", id),
            ArtgenError::ProviderUnavailable(msg) => write!(f, "Provider unavailable: {}", msg),
            ArtgenError::ProviderCallFailed(msg) => write!(f, "Provider call failed: {}", msg),
            ArtgenError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            ArtgenError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            ArtgenError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            ArtgenError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ArtgenError {}

pub type Result<T> = std::result::Result<T, ArtgenError>;
