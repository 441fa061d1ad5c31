// src/db/photo_repository.rs
// DOCUMENTATION: Data access layer for venue photo records

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::VenueError;
use crate::models::{CreatePhotoRequest, Photo};

/// Photo repository
/// Owner scoping happens one level up, against the parent venue
pub struct PhotoRepository;

impl PhotoRepository {
    /// Insert a photo record for a venue
    pub async fn create_photo(
        pool: &PgPool,
        photo: &CreatePhotoRequest,
    ) -> Result<Photo, VenueError> {
        sqlx::query_as::<_, Photo>(
            r#"
            INSERT INTO venue_photos (venue_id, file_path, caption, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING *
            "#,
        )
        .bind(photo.venue_id)
        .bind(&photo.file_path)
        .bind(&photo.caption)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create photo record: {}", e);
            VenueError::DatabaseError(e.to_string())
        })
    }

    /// All photos of a venue, oldest first
    /// The id tiebreak keeps the order deterministic for same-instant inserts
    pub async fn get_photos_by_venue(
        pool: &PgPool,
        venue_id: Uuid,
    ) -> Result<Vec<Photo>, VenueError> {
        sqlx::query_as::<_, Photo>(
            "SELECT * FROM venue_photos WHERE venue_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(venue_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list photos for venue {}: {}", venue_id, e);
            VenueError::DatabaseError(e.to_string())
        })
    }

    /// Fetch one photo, checked against its parent venue
    pub async fn get_by_id(
        pool: &PgPool,
        photo_id: Uuid,
        venue_id: Uuid,
    ) -> Result<Photo, VenueError> {
        sqlx::query_as::<_, Photo>("SELECT * FROM venue_photos WHERE id = $1 AND venue_id = $2")
            .bind(photo_id)
            .bind(venue_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch photo {}: {}", photo_id, e);
                VenueError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| VenueError::NotFound(format!("photo {}", photo_id)))
    }

    /// Delete one photo record
    pub async fn delete_photo(
        pool: &PgPool,
        photo_id: Uuid,
        venue_id: Uuid,
    ) -> Result<(), VenueError> {
        let result = sqlx::query("DELETE FROM venue_photos WHERE id = $1 AND venue_id = $2")
            .bind(photo_id)
            .bind(venue_id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete photo {}: {}", photo_id, e);
                VenueError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(VenueError::NotFound(format!("photo {}", photo_id)));
        }

        Ok(())
    }

    /// Does this venue's collection contain a photo with the given file path
    pub async fn venue_has_photo_path(
        pool: &PgPool,
        venue_id: Uuid,
        file_path: &str,
    ) -> Result<bool, VenueError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM venue_photos WHERE venue_id = $1 AND file_path = $2)",
        )
        .bind(venue_id)
        .bind(file_path)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to check photo path for venue {}: {}", venue_id, e);
            VenueError::DatabaseError(e.to_string())
        })?;

        Ok(row.0)
    }
}
