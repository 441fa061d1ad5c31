// src/services/photo_storage.rs
// DOCUMENTATION: Filesystem-backed storage for venue photos
// PURPOSE: Owns the media directory; writes, removes and names photo files

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::errors::VenueError;

/// Filesystem photo store
/// DOCUMENTATION: All files live flat inside one media root. Stored names
/// are generated here and are the only path component the database keeps,
/// so a file reference can never point outside the root.
#[derive(Clone)]
pub struct PhotoStorage {
    root: PathBuf,
}

impl PhotoStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PhotoStorage { root: root.into() }
    }

    /// Create the media root if it does not exist yet
    pub async fn init(&self) -> Result<(), VenueError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            log::error!("Failed to create media directory {:?}: {}", self.root, e);
            VenueError::StorageError(format!("Failed to create media directory: {}", e))
        })?;
        log::info!("Media directory ready at {:?}", self.root);
        Ok(())
    }

    /// Write uploaded bytes under a fresh stored name
    ///
    /// # Returns
    /// The stored file name, relative to the media root
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String, VenueError> {
        let file_name = Self::stored_name(original_name, Utc::now().timestamp_millis());
        let target = self.root.join(&file_name);

        tokio::fs::write(&target, data).await.map_err(|e| {
            log::error!("Failed to write photo {:?}: {}", target, e);
            VenueError::StorageError(format!("Failed to store photo: {}", e))
        })?;

        log::debug!("Stored photo {} ({} bytes)", file_name, data.len());
        Ok(file_name)
    }

    /// Remove a stored file, best effort
    /// DOCUMENTATION: Returns whether a file was actually deleted. A missing
    /// file or an unsafe path is logged and reported as false, never as an
    /// error; record cleanup must not fail because a file is already gone.
    pub async fn remove(&self, file_path: &str) -> bool {
        if !Self::is_safe_path(file_path) {
            log::warn!("Refusing to remove unsafe media path: {}", file_path);
            return false;
        }

        let target = self.root.join(file_path);
        match tokio::fs::remove_file(&target).await {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("Photo file already gone: {}", file_path);
                false
            }
            Err(e) => {
                log::warn!("Failed to remove photo file {}: {}", file_path, e);
                false
            }
        }
    }

    /// Build the stored name for an upload: `{timestamp_millis}-{sanitized}`
    /// The timestamp prefix keeps repeated uploads of one file distinct
    pub fn stored_name(original_name: &str, timestamp_millis: i64) -> String {
        format!("{}-{}", timestamp_millis, Self::sanitize_name(original_name))
    }

    /// Reduce a client-supplied file name to a safe flat name
    /// Strips any directory components and replaces odd characters
    fn sanitize_name(original_name: &str) -> String {
        let base = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo");

        let cleaned: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if cleaned.chars().all(|c| c == '.') || cleaned.is_empty() {
            "photo".to_string()
        } else {
            cleaned
        }
    }

    /// A stored path is a single flat file name, nothing more
    fn is_safe_path(file_path: &str) -> bool {
        !file_path.is_empty()
            && file_path != "."
            && file_path != ".."
            && !file_path.contains('/')
            && !file_path.contains('\\')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_name_prefixes_timestamp() {
        assert_eq!(
            PhotoStorage::stored_name("my photo.jpg", 123),
            "123-my_photo.jpg"
        );
    }

    #[test]
    fn test_stored_name_drops_directory_components() {
        assert_eq!(PhotoStorage::stored_name("../../etc/passwd", 5), "5-passwd");
        assert_eq!(PhotoStorage::stored_name("a/b/c.png", 5), "5-c.png");
    }

    #[test]
    fn test_stored_name_falls_back_for_unusable_names() {
        assert_eq!(PhotoStorage::stored_name("..", 7), "7-photo");
        assert_eq!(PhotoStorage::stored_name("", 7), "7-photo");
    }

    #[test]
    fn test_safe_path_rejects_traversal() {
        assert!(PhotoStorage::is_safe_path("123-photo.jpg"));
        assert!(!PhotoStorage::is_safe_path("../123-photo.jpg"));
        assert!(!PhotoStorage::is_safe_path("a/b.jpg"));
        assert!(!PhotoStorage::is_safe_path("a\\b.jpg"));
        assert!(!PhotoStorage::is_safe_path(".."));
        assert!(!PhotoStorage::is_safe_path(""));
    }

    #[tokio::test]
    async fn test_save_and_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = PhotoStorage::new(dir.path());
        storage.init().await.unwrap();

        let name = storage.save("venue.jpg", b"fake image bytes").await.unwrap();
        assert!(name.ends_with("-venue.jpg"));

        let on_disk = dir.path().join(&name);
        assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"fake image bytes");

        assert!(storage.remove(&name).await);
        assert!(!on_disk.exists());

        // A second removal finds nothing and reports it
        assert!(!storage.remove(&name).await);
    }

    #[tokio::test]
    async fn test_remove_refuses_to_leave_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = PhotoStorage::new(dir.path());

        assert!(!storage.remove("../somewhere-else.jpg").await);
    }
}
