// src/handlers/venues.rs
// DOCUMENTATION: HTTP handlers for venue CRUD, comparison and export
// PURPOSE: Thin layer translating requests into VenueService calls

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::VenueError;
use crate::models::{CompareQuery, CreateVenueRequest, ListQuery, UpdateVenueRequest};
use crate::services::photo_storage::PhotoStorage;
use crate::services::venue_service::VenueService;

/// Resolve the owner key from the X-User-Id header
/// DOCUMENTATION: Identification, not authentication. Every request must
/// say which collection it works on; a missing or blank header is a 401.
pub(crate) fn owner_key(req: &HttpRequest) -> Result<String, VenueError> {
    let owner = req
        .headers()
        .get("X-User-Id")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim())
        .unwrap_or("");

    if owner.is_empty() {
        log::warn!("Request without X-User-Id header rejected");
        return Err(VenueError::Unauthorized);
    }
    Ok(owner.to_string())
}

/// GET /venues - list the owner's venues with filter, sort and stats
pub async fn list_venues(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    query: web::Query<ListQuery>,
) -> Result<impl Responder, VenueError> {
    let owner = owner_key(&req)?;
    let response = VenueService::list_venues(pool.get_ref(), &owner, &query).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /venues - create a venue
pub async fn create_venue(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    body: web::Json<CreateVenueRequest>,
) -> Result<impl Responder, VenueError> {
    let owner = owner_key(&req)?;
    body.validate()
        .map_err(|e| VenueError::ValidationError(e.to_string()))?;

    let venue = VenueService::create_venue(pool.get_ref(), &owner, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(venue))
}

/// GET /venues/{id} - one venue with its photo collection
pub async fn get_venue(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, VenueError> {
    let owner = owner_key(&req)?;
    let venue = VenueService::get_venue(pool.get_ref(), &owner, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(venue))
}

/// PUT /venues/{id} - replace a venue's editable fields
pub async fn update_venue(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateVenueRequest>,
) -> Result<impl Responder, VenueError> {
    let owner = owner_key(&req)?;
    body.validate()
        .map_err(|e| VenueError::ValidationError(e.to_string()))?;

    let venue =
        VenueService::update_venue(pool.get_ref(), &owner, path.into_inner(), body.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(venue))
}

/// DELETE /venues/{id} - delete a venue, its photos and their files
pub async fn delete_venue(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    storage: web::Data<PhotoStorage>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, VenueError> {
    let owner = owner_key(&req)?;
    VenueService::delete_venue(pool.get_ref(), storage.get_ref(), &owner, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /venues/compare?ids=a,b,c - side-by-side comparison with highlights
pub async fn compare_venues(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    query: web::Query<CompareQuery>,
) -> Result<impl Responder, VenueError> {
    let owner = owner_key(&req)?;
    let ids = VenueService::parse_ids(&query.ids)?;
    let response = VenueService::compare_venues(pool.get_ref(), &owner, &ids).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /venues/export.csv - the owner's collection as a CSV download
pub async fn export_csv(
    req: HttpRequest,
    pool: web::Data<PgPool>,
) -> Result<impl Responder, VenueError> {
    let owner = owner_key(&req)?;
    let csv = VenueService::export_csv(pool.get_ref(), &owner).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", "attachment; filename=\"venues.csv\""))
        .body(csv))
}

/// Configure venue routes
/// Literal paths go before the `{id}` captures so they are never shadowed
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/venues")
            .route("", web::get().to(list_venues))
            .route("", web::post().to(create_venue))
            .route("/compare", web::get().to(compare_venues))
            .route("/export.csv", web::get().to(export_csv))
            .route("/{id}", web::get().to(get_venue))
            .route("/{id}", web::put().to(update_venue))
            .route("/{id}", web::delete().to(delete_venue)),
    );
}
