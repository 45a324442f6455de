use actix_multipart::form::tempfile::TempFile;
use actix_web::web;

use crate::assets::AssetStore;
use crate::error::AppError;

pub mod foods;
pub mod health;
pub mod ingredients;
pub mod restaurants;

/// Configure application routes for the server and for tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Catalog routes: /api/**
    cfg.service(
        web::scope("/api")
            .configure(restaurants::configure_routes)
            .configure(foods::configure_routes)
            .configure(ingredients::configure_routes),
    );
}

/// Move an uploaded file into the asset store and return the relative
/// path to persist. Runs only after parent existence checks and always
/// before any row is written, so a failed upload never leaves a dangling
/// database reference.
pub(crate) async fn store_upload(
    store: &AssetStore,
    upload: &TempFile,
) -> Result<String, AppError> {
    let original_name = upload.file_name.as_deref().unwrap_or("upload");
    let content = tokio::fs::read(upload.file.path())
        .await
        .map_err(|e| AppError::asset_write(format!("failed to read upload: {e}")))?;
    store.store(original_name, &content).await
}
