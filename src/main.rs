use artgen::{
    gallery::FileSlot, logger, server, AppState, Config, GalleryStore, ReplicateClient,
};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(logger::LoggerConfig::development())?;

    let config = Config::from_env();
    let port = config.port.unwrap_or(8080);

    if config.replicate.api_token.is_none() {
        log::warn!("⚠️  REPLICATE_API_TOKEN is not set, generation requests will fail");
    }

    let provider = ReplicateClient::new(config.replicate);
    let gallery = GalleryStore::new(FileSlot::new(config.gallery.path_or_default()));

    logger::log_startup_info("artgen", env!("CARGO_PKG_VERSION"), port);

    server::run(AppState::new(Arc::new(provider), gallery), port).await?;
    Ok(())
}
