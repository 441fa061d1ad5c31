// src/db/venue_repository.rs
// DOCUMENTATION: Data access layer for venue records
// PURPOSE: All SQL touching the venues table lives here

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::VenueError;
use crate::models::{CreateVenueRequest, UpdateVenueRequest, Venue};

/// Venue repository
/// DOCUMENTATION: Every query is scoped by owner_id, so one owner can never
/// read or touch another owner's rows. A row that exists under a different
/// owner is reported as NotFound, not as a permission error.
pub struct VenueRepository;

impl VenueRepository {
    /// Insert a new venue owned by `owner_id`
    pub async fn create_venue(
        pool: &PgPool,
        owner_id: &str,
        venue: &CreateVenueRequest,
    ) -> Result<Venue, VenueError> {
        let result = sqlx::query_as::<_, Venue>(
            r#"
            INSERT INTO venues (
                owner_id, name, guest_count, event_duration_hours,
                venue_rental_cost, catering_per_person, catering_flat_fee,
                bar_service_rate, bar_flat_fee, coordinator_fee,
                event_insurance, other_costs, notes,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&venue.name)
        .bind(venue.guest_count)
        .bind(venue.event_duration_hours)
        .bind(venue.venue_rental_cost)
        .bind(venue.catering_per_person)
        .bind(venue.catering_flat_fee)
        .bind(venue.bar_service_rate)
        .bind(venue.bar_flat_fee)
        .bind(venue.coordinator_fee)
        .bind(venue.event_insurance)
        .bind(venue.other_costs)
        .bind(&venue.notes)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create venue: {}", e);
            VenueError::DatabaseError(e.to_string())
        })?;

        log::debug!("Inserted venue {}", result.id);
        Ok(result)
    }

    /// Fetch one venue by id, scoped to its owner
    pub async fn get_by_id(
        pool: &PgPool,
        venue_id: Uuid,
        owner_id: &str,
    ) -> Result<Venue, VenueError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1 AND owner_id = $2")
            .bind(venue_id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch venue {}: {}", venue_id, e);
                VenueError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Venue {} not found for owner {}", venue_id, owner_id);
                VenueError::NotFound(format!("venue {}", venue_id))
            })
    }

    /// All venues of one owner, newest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: &str) -> Result<Vec<Venue>, VenueError> {
        sqlx::query_as::<_, Venue>(
            "SELECT * FROM venues WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list venues for owner {}: {}", owner_id, e);
            VenueError::DatabaseError(e.to_string())
        })
    }

    /// Fetch a set of venues by id, scoped to their owner
    /// Returns whatever subset exists; callers decide how to treat gaps
    pub async fn get_many(
        pool: &PgPool,
        owner_id: &str,
        ids: &[Uuid],
    ) -> Result<Vec<Venue>, VenueError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE owner_id = $1 AND id = ANY($2)")
            .bind(owner_id)
            .bind(ids)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch venues for comparison: {}", e);
                VenueError::DatabaseError(e.to_string())
            })
    }

    /// Look up an owner's venue by name, case-insensitively
    /// DOCUMENTATION: Unnamed (draft) venues never participate in the
    /// uniqueness check. `exclude` skips one id so an update does not
    /// collide with the row being updated.
    pub async fn find_by_name(
        pool: &PgPool,
        owner_id: &str,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Venue>, VenueError> {
        sqlx::query_as::<_, Venue>(
            r#"
            SELECT * FROM venues
            WHERE owner_id = $1
              AND name <> ''
              AND LOWER(TRIM(name)) = LOWER(TRIM($2))
              AND ($3::uuid IS NULL OR id <> $3)
            LIMIT 1
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(exclude)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to check venue name '{}': {}", name, e);
            VenueError::DatabaseError(e.to_string())
        })
    }

    /// Replace every editable field of a venue
    pub async fn update_venue(
        pool: &PgPool,
        venue_id: Uuid,
        owner_id: &str,
        venue: &UpdateVenueRequest,
    ) -> Result<Venue, VenueError> {
        sqlx::query_as::<_, Venue>(
            r#"
            UPDATE venues SET
                name = $3,
                guest_count = $4,
                event_duration_hours = $5,
                venue_rental_cost = $6,
                catering_per_person = $7,
                catering_flat_fee = $8,
                bar_service_rate = $9,
                bar_flat_fee = $10,
                coordinator_fee = $11,
                event_insurance = $12,
                other_costs = $13,
                notes = $14,
                title_photo = $15,
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(venue_id)
        .bind(owner_id)
        .bind(&venue.name)
        .bind(venue.guest_count)
        .bind(venue.event_duration_hours)
        .bind(venue.venue_rental_cost)
        .bind(venue.catering_per_person)
        .bind(venue.catering_flat_fee)
        .bind(venue.bar_service_rate)
        .bind(venue.bar_flat_fee)
        .bind(venue.coordinator_fee)
        .bind(venue.event_insurance)
        .bind(venue.other_costs)
        .bind(&venue.notes)
        .bind(&venue.title_photo)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update venue {}: {}", venue_id, e);
            VenueError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| VenueError::NotFound(format!("venue {}", venue_id)))
    }

    /// Delete a venue row; photo rows follow via ON DELETE CASCADE
    pub async fn delete_venue(
        pool: &PgPool,
        venue_id: Uuid,
        owner_id: &str,
    ) -> Result<(), VenueError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1 AND owner_id = $2")
            .bind(venue_id)
            .bind(owner_id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete venue {}: {}", venue_id, e);
                VenueError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(VenueError::NotFound(format!("venue {}", venue_id)));
        }

        log::debug!("Deleted venue row {}", venue_id);
        Ok(())
    }

    /// Clear a venue's title photo if it points at the given file
    /// Used when that photo is deleted so the title never dangles
    pub async fn clear_title_photo(
        pool: &PgPool,
        venue_id: Uuid,
        file_path: &str,
    ) -> Result<(), VenueError> {
        sqlx::query(
            r#"
            UPDATE venues SET title_photo = NULL, updated_at = NOW()
            WHERE id = $1 AND title_photo = $2
            "#,
        )
        .bind(venue_id)
        .bind(file_path)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to clear title photo for venue {}: {}", venue_id, e);
            VenueError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}
