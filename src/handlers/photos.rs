// src/handlers/photos.rs
// DOCUMENTATION: HTTP handlers for a venue's photo collection
// PURPOSE: Multipart upload, listing and deletion of venue photos

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::VenueError;
use crate::handlers::venues::owner_key;
use crate::services::photo_service::{IncomingPhoto, PhotoService};
use crate::services::photo_storage::PhotoStorage;

/// Multipart payload for photo uploads
/// Repeated `file` parts upload a batch; `caption` applies to all of them
#[derive(Debug, MultipartForm)]
pub struct PhotoUploadForm {
    #[multipart(rename = "file")]
    pub files: Vec<TempFile>,
    pub caption: Option<Text<String>>,
}

/// POST /venues/{venue_id}/photos - attach uploaded photos to a venue
pub async fn upload_photos(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    storage: web::Data<PhotoStorage>,
    config: web::Data<Config>,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<PhotoUploadForm>,
) -> Result<impl Responder, VenueError> {
    let owner = owner_key(&req)?;
    let venue_id = path.into_inner();

    let mut uploads = Vec::with_capacity(form.files.len());
    for file in &form.files {
        let data = tokio::fs::read(file.file.path()).await.map_err(|e| {
            log::error!("Failed to read upload buffer: {}", e);
            VenueError::StorageError(format!("Failed to read upload: {}", e))
        })?;
        uploads.push(IncomingPhoto {
            original_name: file
                .file_name
                .clone()
                .unwrap_or_else(|| "photo".to_string()),
            data,
        });
    }
    let caption = form.caption.map(|text| text.0);

    let photos = PhotoService::add_photos(
        pool.get_ref(),
        storage.get_ref(),
        &owner,
        venue_id,
        uploads,
        caption,
        config.max_photo_bytes,
    )
    .await?;

    Ok(HttpResponse::Created().json(photos))
}

/// GET /venues/{venue_id}/photos - the venue's photo collection
pub async fn list_photos(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, VenueError> {
    let owner = owner_key(&req)?;
    let photos = PhotoService::list_photos(pool.get_ref(), &owner, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// DELETE /venues/{venue_id}/photos/{photo_id} - remove one photo
pub async fn delete_photo(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    storage: web::Data<PhotoStorage>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, VenueError> {
    let owner = owner_key(&req)?;
    let (venue_id, photo_id) = path.into_inner();

    PhotoService::delete_photo(pool.get_ref(), storage.get_ref(), &owner, venue_id, photo_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure photo routes
/// This scope nests under /venues and must be registered before the venue
/// scope, which would otherwise swallow the path without matching it
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/venues/{venue_id}/photos")
            .route("", web::post().to(upload_photos))
            .route("", web::get().to(list_photos))
            .route("/{photo_id}", web::delete().to(delete_photo)),
    );
}
