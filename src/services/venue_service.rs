// src/services/venue_service.rs
// DOCUMENTATION: Venue business logic
// PURPOSE: Orchestrates repositories, cost math and storage for the venue API

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{PhotoRepository, VenueRepository};
use crate::errors::VenueError;
use crate::models::{
    CompareResponse, ComparedVenue, CreateVenueRequest, ListQuery, UpdateVenueRequest,
    VenueDetailResponse, VenueListResponse, VenueResponse,
};
use crate::services::cost_aggregator::{CostAggregator, MetricKey, SortKey};
use crate::services::csv_export::CsvExporter;
use crate::services::photo_storage::PhotoStorage;

/// Metrics summarized on the list view; per-guest cost stays per venue there
pub const LIST_METRICS: &[MetricKey] = &[
    MetricKey::VenueRentalCost,
    MetricKey::CateringTotal,
    MetricKey::BarTotal,
    MetricKey::CoordinatorFee,
    MetricKey::EventInsurance,
    MetricKey::OtherCosts,
    MetricKey::TotalCost,
];

/// Metrics ranked side by side in a comparison
pub const COMPARE_METRICS: &[MetricKey] = &[
    MetricKey::VenueRentalCost,
    MetricKey::CateringTotal,
    MetricKey::BarTotal,
    MetricKey::CoordinatorFee,
    MetricKey::EventInsurance,
    MetricKey::OtherCosts,
    MetricKey::TotalCost,
    MetricKey::PerGuestCost,
];

/// Bounds on how many venues one comparison may include
pub const MIN_COMPARE: usize = 2;
pub const MAX_COMPARE: usize = 3;

/// Venue service
pub struct VenueService;

impl VenueService {
    /// Create a venue for the given owner
    /// An empty name is allowed (a draft); non-empty names must be unique
    /// per owner
    pub async fn create_venue(
        pool: &PgPool,
        owner_id: &str,
        request: CreateVenueRequest,
    ) -> Result<VenueResponse, VenueError> {
        let request = Self::normalize_create(request);

        if !request.name.is_empty() {
            Self::ensure_name_available(pool, owner_id, &request.name, None).await?;
        }

        let venue = VenueRepository::create_venue(pool, owner_id, &request).await?;
        log::info!("Created venue {} for owner {}", venue.id, owner_id);
        Ok(venue.to_response())
    }

    /// List the owner's venues with filtering, sorting and collection stats
    /// DOCUMENTATION: The pipeline is filter, then sort, then stats, so the
    /// reported extrema always describe exactly the rows being returned.
    pub async fn list_venues(
        pool: &PgPool,
        owner_id: &str,
        query: &ListQuery,
    ) -> Result<VenueListResponse, VenueError> {
        let venues = VenueRepository::list_by_owner(pool, owner_id).await?;

        let venues = match query.q.as_deref() {
            Some(q) => CostAggregator::filter_by_name(&venues, q),
            None => venues,
        };

        let sort = query.sort.unwrap_or(SortKey::CreatedAt);
        let venues = CostAggregator::sort_venues(venues, sort, query.order);

        let stats = CostAggregator::compute_stats(&venues, LIST_METRICS);
        let data: Vec<VenueResponse> = venues.iter().map(|v| v.to_response()).collect();

        Ok(VenueListResponse {
            total_count: data.len() as i64,
            data,
            stats,
        })
    }

    /// Fetch one venue with its photo collection
    pub async fn get_venue(
        pool: &PgPool,
        owner_id: &str,
        venue_id: Uuid,
    ) -> Result<VenueDetailResponse, VenueError> {
        let venue = VenueRepository::get_by_id(pool, venue_id, owner_id).await?;
        let photos = PhotoRepository::get_photos_by_venue(pool, venue_id).await?;

        Ok(VenueDetailResponse {
            venue: venue.to_response(),
            photos: photos.iter().map(|p| p.to_response()).collect(),
        })
    }

    /// Replace a venue's editable fields
    /// DOCUMENTATION: Updates require a non-empty name; drafts graduate to
    /// named venues here and cannot go back. A title photo may only point at
    /// a file that belongs to this venue's photo collection.
    pub async fn update_venue(
        pool: &PgPool,
        owner_id: &str,
        venue_id: Uuid,
        request: UpdateVenueRequest,
    ) -> Result<VenueResponse, VenueError> {
        let request = Self::normalize_update(request);
        if request.name.is_empty() {
            return Err(VenueError::ValidationError(
                "Venue name is required".to_string(),
            ));
        }

        // Existence first: an unknown id is reported before a name conflict
        VenueRepository::get_by_id(pool, venue_id, owner_id).await?;
        Self::ensure_name_available(pool, owner_id, &request.name, Some(venue_id)).await?;

        if let Some(path) = &request.title_photo {
            if !PhotoRepository::venue_has_photo_path(pool, venue_id, path).await? {
                return Err(VenueError::InvalidInput(
                    "title_photo must reference one of the venue's photos".to_string(),
                ));
            }
        }

        let venue = VenueRepository::update_venue(pool, venue_id, owner_id, &request).await?;
        log::info!("Updated venue {}", venue.id);
        Ok(venue.to_response())
    }

    /// Delete a venue, its photo records and their files
    /// File removal is best effort; the records go away regardless
    pub async fn delete_venue(
        pool: &PgPool,
        storage: &PhotoStorage,
        owner_id: &str,
        venue_id: Uuid,
    ) -> Result<(), VenueError> {
        VenueRepository::get_by_id(pool, venue_id, owner_id).await?;

        let photos = PhotoRepository::get_photos_by_venue(pool, venue_id).await?;
        for photo in &photos {
            storage.remove(&photo.file_path).await;
        }

        VenueRepository::delete_venue(pool, venue_id, owner_id).await?;
        log::info!(
            "Deleted venue {} and {} photo file(s)",
            venue_id,
            photos.len()
        );
        Ok(())
    }

    /// Compare venues side by side with per-metric highlights
    /// DOCUMENTATION: Venues come back in the order they were requested.
    /// Asking for an id the owner does not have fails the whole comparison.
    pub async fn compare_venues(
        pool: &PgPool,
        owner_id: &str,
        ids: &[Uuid],
    ) -> Result<CompareResponse, VenueError> {
        Self::validate_compare_selection(ids)?;

        let fetched = VenueRepository::get_many(pool, owner_id, ids).await?;

        let mut ordered = Vec::with_capacity(ids.len());
        for id in ids {
            let venue = fetched
                .iter()
                .find(|v| v.id == *id)
                .ok_or_else(|| VenueError::NotFound(format!("venue {}", id)))?;
            ordered.push(venue.clone());
        }

        let stats = CostAggregator::compute_stats(&ordered, COMPARE_METRICS);

        let venues = ordered
            .iter()
            .map(|venue| {
                let derived = CostAggregator::compute_derived(venue);
                let mut highlights = HashMap::with_capacity(COMPARE_METRICS.len());
                for &key in COMPARE_METRICS {
                    let value = CostAggregator::metric_value(venue, &derived, key);
                    if let Some(metric_stats) = stats.get(&key) {
                        highlights
                            .insert(key, CostAggregator::highlight_class(value, metric_stats));
                    }
                }
                ComparedVenue {
                    venue: venue.to_response(),
                    highlights,
                }
            })
            .collect();

        Ok(CompareResponse { venues, stats })
    }

    /// Render the owner's full collection as CSV, newest first
    pub async fn export_csv(pool: &PgPool, owner_id: &str) -> Result<String, VenueError> {
        let venues = VenueRepository::list_by_owner(pool, owner_id).await?;
        log::info!(
            "Exporting {} venue(s) to CSV for owner {}",
            venues.len(),
            owner_id
        );
        Ok(CsvExporter::render(&venues))
    }

    /// Parse a comma-separated id list; blank segments are skipped
    pub fn parse_ids(raw: &str) -> Result<Vec<Uuid>, VenueError> {
        let mut ids = Vec::new();
        for part in raw.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let id = Uuid::parse_str(part)
                .map_err(|_| VenueError::InvalidInput(format!("Invalid venue id: {}", part)))?;
            ids.push(id);
        }
        Ok(ids)
    }

    fn validate_compare_selection(ids: &[Uuid]) -> Result<(), VenueError> {
        if ids.len() < MIN_COMPARE {
            return Err(VenueError::InvalidInput(format!(
                "Select at least {} venues to compare",
                MIN_COMPARE
            )));
        }
        if ids.len() > MAX_COMPARE {
            return Err(VenueError::InvalidInput(format!(
                "At most {} venues can be compared",
                MAX_COMPARE
            )));
        }
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) {
                return Err(VenueError::InvalidInput(format!(
                    "Duplicate venue id: {}",
                    id
                )));
            }
        }
        Ok(())
    }

    async fn ensure_name_available(
        pool: &PgPool,
        owner_id: &str,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), VenueError> {
        if let Some(existing) = VenueRepository::find_by_name(pool, owner_id, name, exclude).await?
        {
            log::warn!("Venue name '{}' already used by venue {}", name, existing.id);
            return Err(VenueError::AlreadyExists(name.to_string()));
        }
        Ok(())
    }

    fn normalize_create(mut request: CreateVenueRequest) -> CreateVenueRequest {
        request.name = request.name.trim().to_string();
        request.guest_count = CostAggregator::clamp_guests(request.guest_count);
        request.event_duration_hours = CostAggregator::clamp_money(request.event_duration_hours);
        request.venue_rental_cost = CostAggregator::clamp_money(request.venue_rental_cost);
        request.catering_per_person = CostAggregator::clamp_money(request.catering_per_person);
        request.catering_flat_fee = CostAggregator::clamp_money(request.catering_flat_fee);
        request.bar_service_rate = CostAggregator::clamp_money(request.bar_service_rate);
        request.bar_flat_fee = CostAggregator::clamp_money(request.bar_flat_fee);
        request.coordinator_fee = CostAggregator::clamp_money(request.coordinator_fee);
        request.event_insurance = CostAggregator::clamp_money(request.event_insurance);
        request.other_costs = CostAggregator::clamp_money(request.other_costs);
        request
    }

    fn normalize_update(mut request: UpdateVenueRequest) -> UpdateVenueRequest {
        request.name = request.name.trim().to_string();
        request.guest_count = CostAggregator::clamp_guests(request.guest_count);
        request.event_duration_hours = CostAggregator::clamp_money(request.event_duration_hours);
        request.venue_rental_cost = CostAggregator::clamp_money(request.venue_rental_cost);
        request.catering_per_person = CostAggregator::clamp_money(request.catering_per_person);
        request.catering_flat_fee = CostAggregator::clamp_money(request.catering_flat_fee);
        request.bar_service_rate = CostAggregator::clamp_money(request.bar_service_rate);
        request.bar_flat_fee = CostAggregator::clamp_money(request.bar_flat_fee);
        request.coordinator_fee = CostAggregator::clamp_money(request.coordinator_fee);
        request.event_insurance = CostAggregator::clamp_money(request.event_insurance);
        request.other_costs = CostAggregator::clamp_money(request.other_costs);
        // A blank title photo clears the setting rather than referencing ""
        request.title_photo = request.title_photo.filter(|p| !p.trim().is_empty());
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_accepts_comma_separated_uuids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let raw = format!("{}, {}", a, b);

        let ids = VenueService::parse_ids(&raw).unwrap();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_parse_ids_skips_blank_segments() {
        let a = Uuid::new_v4();
        let raw = format!(",{},,", a);

        let ids = VenueService::parse_ids(&raw).unwrap();
        assert_eq!(ids, vec![a]);

        assert!(VenueService::parse_ids("").unwrap().is_empty());
        assert!(VenueService::parse_ids(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_ids_rejects_garbage() {
        let err = VenueService::parse_ids("not-a-uuid").unwrap_err();
        assert!(matches!(err, VenueError::InvalidInput(_)));
    }

    #[test]
    fn test_compare_selection_bounds() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();

        assert!(VenueService::validate_compare_selection(&ids[..1]).is_err());
        assert!(VenueService::validate_compare_selection(&ids[..2]).is_ok());
        assert!(VenueService::validate_compare_selection(&ids[..3]).is_ok());
        assert!(VenueService::validate_compare_selection(&ids[..4]).is_err());
    }

    #[test]
    fn test_compare_selection_rejects_duplicates() {
        let id = Uuid::new_v4();
        let err = VenueService::validate_compare_selection(&[id, id]).unwrap_err();
        assert!(matches!(err, VenueError::InvalidInput(_)));
    }

    #[test]
    fn test_normalize_create_trims_and_clamps() {
        let request = CreateVenueRequest {
            name: "  Cedar Hall  ".to_string(),
            guest_count: -5,
            venue_rental_cost: -100.0,
            catering_per_person: f64::NAN,
            coordinator_fee: 250.0,
            ..Default::default()
        };

        let normalized = VenueService::normalize_create(request);
        assert_eq!(normalized.name, "Cedar Hall");
        assert_eq!(normalized.guest_count, 0);
        assert_eq!(normalized.venue_rental_cost, 0.0);
        assert_eq!(normalized.catering_per_person, 0.0);
        assert_eq!(normalized.coordinator_fee, 250.0);
    }

    #[test]
    fn test_normalize_update_drops_blank_title_photo() {
        let mut request = UpdateVenueRequest {
            name: "Cedar Hall".to_string(),
            title_photo: Some("   ".to_string()),
            ..Default::default()
        };
        request = VenueService::normalize_update(request);
        assert_eq!(request.title_photo, None);

        let kept = VenueService::normalize_update(UpdateVenueRequest {
            name: "Cedar Hall".to_string(),
            title_photo: Some("123-photo.jpg".to_string()),
            ..Default::default()
        });
        assert_eq!(kept.title_photo.as_deref(), Some("123-photo.jpg"));
    }
}
