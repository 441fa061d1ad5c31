// src/models/venue.rs
// DOCUMENTATION: Core data structures for venues
// PURPOSE: Defines all serialization/deserialization models for API and database

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::services::cost_aggregator::{
    CostAggregator, DerivedCosts, Highlight, MetricKey, MetricStats, SortDirection, SortKey,
};

use super::PhotoResponse;

/// Represents a complete venue record from the database
/// DOCUMENTATION: This struct maps directly to the venues table in PostgreSQL
/// Used for internal operations and database queries
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Opaque key of the owning user (taken from the X-User-Id header)
    pub owner_id: String,

    /// Venue name, stored trimmed; empty for draft venues
    pub name: String,

    /// Expected number of guests
    pub guest_count: i32,

    /// Booked duration of the event in hours (informational, not costed)
    pub event_duration_hours: f64,

    /// Flat rental cost of the venue itself
    pub venue_rental_cost: f64,

    /// Catering cost charged per guest
    pub catering_per_person: f64,

    /// Fixed catering fee independent of guest count
    pub catering_flat_fee: f64,

    /// Bar service cost charged per guest
    pub bar_service_rate: f64,

    /// Fixed bar service fee independent of guest count
    pub bar_flat_fee: f64,

    /// Day-of coordinator fee
    pub coordinator_fee: f64,

    /// Event insurance cost
    pub event_insurance: f64,

    /// Anything not covered by the other cost fields
    pub other_costs: f64,

    /// Free-form notes
    pub notes: String,

    /// File path of one of this venue's photos, shown as the card image
    pub title_photo: Option<String>,

    /// When record was created (immutable; default sort key, newest first)
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a new venue
/// DOCUMENTATION: Data transfer object for POST /venues endpoint
/// Every field is optional with a zero/empty default so the UI can create
/// a draft venue first and fill it in afterwards
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct CreateVenueRequest {
    /// Venue name; empty creates a draft
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,

    #[serde(default)]
    pub guest_count: i32,

    #[serde(default)]
    pub event_duration_hours: f64,

    #[serde(default)]
    pub venue_rental_cost: f64,

    #[serde(default)]
    pub catering_per_person: f64,

    #[serde(default)]
    pub catering_flat_fee: f64,

    #[serde(default)]
    pub bar_service_rate: f64,

    #[serde(default)]
    pub bar_flat_fee: f64,

    #[serde(default)]
    pub coordinator_fee: f64,

    #[serde(default)]
    pub event_insurance: f64,

    #[serde(default)]
    pub other_costs: f64,

    #[serde(default)]
    pub notes: String,
}

/// Request DTO for updating an existing venue
/// DOCUMENTATION: Data transfer object for PUT /venues/{id} endpoint
/// Full update of the editable fields; the name is required here because
/// only drafts may stay unnamed
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct UpdateVenueRequest {
    /// Venue name (required, non-empty after trimming)
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub guest_count: i32,

    #[serde(default)]
    pub event_duration_hours: f64,

    #[serde(default)]
    pub venue_rental_cost: f64,

    #[serde(default)]
    pub catering_per_person: f64,

    #[serde(default)]
    pub catering_flat_fee: f64,

    #[serde(default)]
    pub bar_service_rate: f64,

    #[serde(default)]
    pub bar_flat_fee: f64,

    #[serde(default)]
    pub coordinator_fee: f64,

    #[serde(default)]
    pub event_insurance: f64,

    #[serde(default)]
    pub other_costs: f64,

    #[serde(default)]
    pub notes: String,

    /// File path of one of this venue's photos; absent or empty clears it
    #[serde(default)]
    pub title_photo: Option<String>,
}

/// Response DTO for API responses
/// DOCUMENTATION: Venue fields plus the derived cost figures, flattened
/// so clients see catering_total/bar_total/total_cost/per_guest_cost inline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueResponse {
    pub id: Uuid,
    pub name: String,
    pub guest_count: i32,
    pub event_duration_hours: f64,
    pub venue_rental_cost: f64,
    pub catering_per_person: f64,
    pub catering_flat_fee: f64,
    pub bar_service_rate: f64,
    pub bar_flat_fee: f64,
    pub coordinator_fee: f64,
    pub event_insurance: f64,
    pub other_costs: f64,
    pub notes: String,
    pub title_photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Derived cost figures (never stored)
    #[serde(flatten)]
    pub derived: DerivedCosts,
}

/// Detailed response DTO
/// DOCUMENTATION: Extended response with the venue's photos
/// Used for GET /venues/{id} endpoint
#[derive(Debug, Serialize)]
pub struct VenueDetailResponse {
    #[serde(flatten)]
    pub venue: VenueResponse,
    pub photos: Vec<PhotoResponse>,
}

/// List query parameters
/// DOCUMENTATION: DTO for parsing the query string of GET /venues
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive name substring filter
    pub q: Option<String>,

    /// Sort key: name, date or total (defaults to date, newest first)
    pub sort: Option<SortKey>,

    /// Explicit sort direction, overriding the key's default
    pub order: Option<SortDirection>,
}

/// List response with per-metric statistics
/// DOCUMENTATION: DTO for GET /venues; stats cover the returned collection
#[derive(Debug, Serialize)]
pub struct VenueListResponse {
    /// Venues after filtering and sorting
    pub data: Vec<VenueResponse>,

    /// Number of venues returned
    pub total_count: i64,

    /// Best/worst per dashboard metric over the returned venues
    pub stats: HashMap<MetricKey, MetricStats>,
}

/// Comparison query parameters
/// DOCUMENTATION: DTO for GET /venues/compare; ids is a comma-separated list
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub ids: String,
}

/// One venue inside a comparison, with its per-metric classification
#[derive(Debug, Serialize)]
pub struct ComparedVenue {
    #[serde(flatten)]
    pub venue: VenueResponse,

    /// Highlight class per metric (low = cheapest, high = most expensive)
    pub highlights: HashMap<MetricKey, Highlight>,
}

/// Comparison response
/// DOCUMENTATION: DTO for GET /venues/compare, columns in request order
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub venues: Vec<ComparedVenue>,
    pub stats: HashMap<MetricKey, MetricStats>,
}

impl Venue {
    /// Convert Venue to VenueResponse for API
    /// DOCUMENTATION: Maps database model to API response DTO
    /// Computes the derived cost figures and drops internal fields (owner_id)
    pub fn to_response(&self) -> VenueResponse {
        VenueResponse {
            id: self.id,
            name: self.name.clone(),
            guest_count: self.guest_count,
            event_duration_hours: self.event_duration_hours,
            venue_rental_cost: self.venue_rental_cost,
            catering_per_person: self.catering_per_person,
            catering_flat_fee: self.catering_flat_fee,
            bar_service_rate: self.bar_service_rate,
            bar_flat_fee: self.bar_flat_fee,
            coordinator_fee: self.coordinator_fee,
            event_insurance: self.event_insurance,
            other_costs: self.other_costs,
            notes: self.notes.clone(),
            title_photo: self.title_photo.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            derived: CostAggregator::compute_derived(self),
        }
    }
}
