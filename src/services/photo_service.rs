// src/services/photo_service.rs
// DOCUMENTATION: Photo business logic
// PURPOSE: Validates uploads and coordinates file storage with photo records

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{PhotoRepository, VenueRepository};
use crate::errors::VenueError;
use crate::models::{CreatePhotoRequest, PhotoResponse};
use crate::services::photo_storage::PhotoStorage;

/// File extensions accepted for photo uploads, lowercase
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// One upload as received from the transport layer
#[derive(Debug)]
pub struct IncomingPhoto {
    pub original_name: String,
    pub data: Vec<u8>,
}

/// Photo service
pub struct PhotoService;

impl PhotoService {
    /// Attach uploaded photos to a venue
    /// DOCUMENTATION: Verifies venue ownership first, then validates every
    /// upload before storing any file, so a bad file in a batch rejects the
    /// whole request instead of leaving partial state. The caption, when
    /// given, applies to each photo in the batch.
    pub async fn add_photos(
        pool: &PgPool,
        storage: &PhotoStorage,
        owner_id: &str,
        venue_id: Uuid,
        uploads: Vec<IncomingPhoto>,
        caption: Option<String>,
        max_bytes: usize,
    ) -> Result<Vec<PhotoResponse>, VenueError> {
        VenueRepository::get_by_id(pool, venue_id, owner_id).await?;

        if uploads.is_empty() {
            return Err(VenueError::InvalidInput("No file provided".to_string()));
        }
        for upload in &uploads {
            Self::validate_upload(&upload.original_name, upload.data.len(), max_bytes)?;
        }

        let caption = caption.unwrap_or_default();
        let mut responses = Vec::with_capacity(uploads.len());

        for upload in uploads {
            let file_path = storage.save(&upload.original_name, &upload.data).await?;
            let photo = PhotoRepository::create_photo(
                pool,
                &CreatePhotoRequest {
                    venue_id,
                    file_path,
                    caption: caption.clone(),
                },
            )
            .await?;
            responses.push(photo.to_response());
        }

        log::info!(
            "Added {} photo(s) to venue {}",
            responses.len(),
            venue_id
        );
        Ok(responses)
    }

    /// List a venue's photos, oldest first
    pub async fn list_photos(
        pool: &PgPool,
        owner_id: &str,
        venue_id: Uuid,
    ) -> Result<Vec<PhotoResponse>, VenueError> {
        VenueRepository::get_by_id(pool, venue_id, owner_id).await?;

        let photos = PhotoRepository::get_photos_by_venue(pool, venue_id).await?;
        Ok(photos.iter().map(|p| p.to_response()).collect())
    }

    /// Delete one photo: its file, its record, and any title reference
    /// DOCUMENTATION: File removal is best effort; the record goes away
    /// regardless so the collection never shows a photo that cannot load.
    pub async fn delete_photo(
        pool: &PgPool,
        storage: &PhotoStorage,
        owner_id: &str,
        venue_id: Uuid,
        photo_id: Uuid,
    ) -> Result<(), VenueError> {
        VenueRepository::get_by_id(pool, venue_id, owner_id).await?;

        let photo = PhotoRepository::get_by_id(pool, photo_id, venue_id).await?;
        storage.remove(&photo.file_path).await;
        PhotoRepository::delete_photo(pool, photo_id, venue_id).await?;
        VenueRepository::clear_title_photo(pool, venue_id, &photo.file_path).await?;

        log::info!("Deleted photo {} from venue {}", photo_id, venue_id);
        Ok(())
    }

    /// Validate one upload against name, size and type rules
    pub fn validate_upload(
        file_name: &str,
        size: usize,
        max_bytes: usize,
    ) -> Result<(), VenueError> {
        if size == 0 {
            return Err(VenueError::InvalidInput(format!(
                "Uploaded file '{}' is empty",
                file_name
            )));
        }
        if size > max_bytes {
            return Err(VenueError::InvalidInput(format!(
                "Uploaded file '{}' exceeds the {} byte limit",
                file_name, max_bytes
            )));
        }

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(VenueError::InvalidInput(format!(
                "Unsupported file type '{}'; allowed: {}",
                file_name,
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 10 * 1024 * 1024;

    #[test]
    fn test_accepts_common_image_types() {
        assert!(PhotoService::validate_upload("venue.jpg", 1024, MAX).is_ok());
        assert!(PhotoService::validate_upload("venue.jpeg", 1024, MAX).is_ok());
        assert!(PhotoService::validate_upload("venue.png", 1024, MAX).is_ok());
        assert!(PhotoService::validate_upload("venue.webp", 1024, MAX).is_ok());
    }

    #[test]
    fn test_extension_check_ignores_case() {
        assert!(PhotoService::validate_upload("VENUE.JPG", 1024, MAX).is_ok());
        assert!(PhotoService::validate_upload("venue.PnG", 1024, MAX).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_types() {
        assert!(PhotoService::validate_upload("venue.exe", 1024, MAX).is_err());
        assert!(PhotoService::validate_upload("venue.pdf", 1024, MAX).is_err());
        assert!(PhotoService::validate_upload("no-extension", 1024, MAX).is_err());
    }

    #[test]
    fn test_rejects_empty_file() {
        let err = PhotoService::validate_upload("venue.jpg", 0, MAX).unwrap_err();
        assert!(matches!(err, VenueError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_oversized_file() {
        assert!(PhotoService::validate_upload("venue.jpg", MAX, MAX).is_ok());
        let err = PhotoService::validate_upload("venue.jpg", MAX + 1, MAX).unwrap_err();
        assert!(matches!(err, VenueError::InvalidInput(_)));
    }
}
