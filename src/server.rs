use crate::{
    error::{ArtgenError, Result},
    gallery::GalleryStore,
    models::{
        default_model, find_model, ErrorResponse, GenerateImageRequest, GenerateImageResponse,
        ModelInfo, NewImageRecord, MODEL_CATALOG,
    },
    provider::{extract_image_url, resolve_payload, ImageProvider},
};
use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};
use std::sync::Arc;

pub struct AppState {
    pub provider: Arc<dyn ImageProvider>,
    pub gallery: GalleryStore,
}

impl AppState {
    pub fn new(provider: Arc<dyn ImageProvider>, gallery: GalleryStore) -> Self {
        Self { provider, gallery }
    }
}

fn status_for(error: &ArtgenError) -> StatusCode {
    match error {
        ArtgenError::MissingPrompt | ArtgenError::InvalidModel(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn run_generation(state: &AppState, request: GenerateImageRequest) -> Result<String> {
    let model = match request.model.as_deref() {
        Some(id) => find_model(id).ok_or_else(|| ArtgenError::InvalidModel(id.to_string()))?,
        None => default_model(),
    };

    let width = request.width_or_default();
    let height = request.height_or_default();
    let payload = resolve_payload(
        model,
        &request.prompt,
        request.negative_prompt.as_deref(),
        width,
        height,
    )?;

    let output = state.provider.generate(model, &payload).await?;
    let image_url = extract_image_url(output)?;

    // History is a convenience; a failed append never fails the request.
    if let Err(e) = state.gallery.append(NewImageRecord {
        image_url: image_url.clone(),
        prompt: request.prompt,
        negative_prompt: request.negative_prompt,
        width,
        height,
        model: Some(model.id.to_string()),
    }) {
        log::warn!("Failed to record generation in gallery: {}", e);
    }

    Ok(image_url)
}

async fn generate_image(
    state: web::Data<AppState>,
    body: web::Json<GenerateImageRequest>,
) -> HttpResponse {
    match run_generation(&state, body.into_inner()).await {
        Ok(image_url) => HttpResponse::Ok().json(GenerateImageResponse { image_url }),
        Err(e) => {
            log::error!("Image generation failed: {}", e);
            HttpResponse::build(status_for(&e)).json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}

async fn list_models() -> HttpResponse {
    let models: Vec<ModelInfo> = MODEL_CATALOG.iter().map(ModelInfo::from).collect();
    HttpResponse::Ok().json(models)
}

async fn list_images(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.gallery.list())
}

async fn delete_image(state: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    if let Err(e) = state.gallery.remove(&id) {
        log::warn!("Failed to remove gallery record {}: {}", id, e);
    }
    HttpResponse::NoContent().finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/generate-image", web::post().to(generate_image))
        .route("/api/models", web::get().to(list_models))
        .route("/api/images", web::get().to(list_images))
        .route("/api/images/{id}", web::delete().to(delete_image));
}

pub async fn run(state: AppState, port: u16) -> std::io::Result<()> {
    let data = web::Data::new(state);
    HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
        .bind(("0.0.0.0", port))?
        .run()
        .await
}
