// src/models/photo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// URL prefix under which stored photo files are served
pub const MEDIA_URL_PREFIX: &str = "/media";

/// Venue photo stored on the local media disk
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub file_path: String,
    pub caption: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create a new photo row (built internally after the file is stored)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePhotoRequest {
    pub venue_id: Uuid,
    pub file_path: String,
    pub caption: String,
}

/// Photo DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub file_path: String,
    pub url: String,
    pub caption: String,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// Convert database photo into API response DTO
    pub fn to_response(&self) -> PhotoResponse {
        PhotoResponse {
            id: self.id,
            venue_id: self.venue_id,
            file_path: self.file_path.clone(),
            url: format!("{}/{}", MEDIA_URL_PREFIX, self.file_path),
            caption: self.caption.clone(),
            created_at: self.created_at,
        }
    }
}
