use std::env;

pub const DEFAULT_REPLICATE_URL: &str = "https://api.replicate.com/v1";
pub const DEFAULT_GALLERY_PATH: &str = "ai-image-gallery.json";

#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    pub api_token: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub replicate: ReplicateConfig,
    pub gallery: GalleryConfig,
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        ReplicateConfig {
            api_token: None,
            base_url: None,
        }
    }
}

impl ReplicateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_token = env::var("REPLICATE_API_TOKEN").ok();
        let base_url = env::var("REPLICATE_API_URL").ok();

        ReplicateConfig {
            api_token,
            base_url,
        }
    }

    pub fn with_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig { path: None }
    }
}

impl GalleryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let path = env::var("GALLERY_PATH").ok();
        GalleryConfig { path }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn path_or_default(&self) -> &str {
        self.path.as_deref().unwrap_or(DEFAULT_GALLERY_PATH)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            replicate: ReplicateConfig::default(),
            gallery: GalleryConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        Config {
            port,
            replicate: ReplicateConfig::from_env(),
            gallery: GalleryConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_replicate(mut self, config: ReplicateConfig) -> Self {
        self.replicate = config;
        self
    }

    pub fn with_gallery(mut self, config: GalleryConfig) -> Self {
        self.gallery = config;
        self
    }
}
