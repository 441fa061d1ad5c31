// src/services/cost_aggregator.rs
// DOCUMENTATION: Cost aggregation and comparative highlighting engine
// PURPOSE: Pure venue math shared by the list, comparison and export views

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::Venue;

/// Cost figures derived from a venue's stored fields, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedCosts {
    /// catering_per_person * guest_count + catering_flat_fee
    pub catering_total: f64,
    /// bar_service_rate * guest_count + bar_flat_fee
    pub bar_total: f64,
    /// Sum of rental, catering, bar, coordinator, insurance and other costs
    pub total_cost: f64,
    /// total_cost / guest_count, or 0 when there are no guests
    pub per_guest_cost: f64,
}

/// Metrics that can be ranked across a venue collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    VenueRentalCost,
    CateringTotal,
    BarTotal,
    CoordinatorFee,
    EventInsurance,
    OtherCosts,
    TotalCost,
    PerGuestCost,
}

/// Extrema of one metric over a venue collection
/// DOCUMENTATION: best is the lowest cost, worst the highest; count is the
/// number of venues the stats were computed over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub best: f64,
    pub worst: f64,
    pub count: usize,
}

/// Classification of a single value against its metric's extrema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    /// Holds the lowest (cheapest) value of the metric
    Low,
    /// Holds the highest (most expensive) value of the metric
    High,
    /// Every venue has the same non-zero value
    Neutral,
    /// No classification applies
    None,
}

/// Sort keys accepted by the list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "date")]
    CreatedAt,
    #[serde(rename = "total")]
    TotalCost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Cost aggregation service
/// DOCUMENTATION: Stateless and deterministic; no I/O, never mutates its
/// inputs. Callers hand it a consistent snapshot of the venue collection.
pub struct CostAggregator;

impl CostAggregator {
    /// Clamp a money field: negative, NaN and infinite values count as 0
    /// Idempotent, so already-clamped values pass through unchanged
    pub fn clamp_money(value: f64) -> f64 {
        if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        }
    }

    /// Clamp a guest count to be non-negative
    pub fn clamp_guests(value: i32) -> i32 {
        value.max(0)
    }

    /// Compute the derived cost figures for one venue
    /// DOCUMENTATION: Implements the cost model shown on every screen:
    ///
    /// - catering_total = catering_per_person * guest_count + catering_flat_fee
    /// - bar_total      = bar_service_rate * guest_count + bar_flat_fee
    /// - total_cost     = rental + catering_total + bar_total + coordinator
    ///                    + insurance + other
    /// - per_guest_cost = total_cost / guest_count (0 when guest_count is 0)
    ///
    /// Every numeric input is clamped first, so the result is always finite
    /// and non-negative. Never fails.
    pub fn compute_derived(venue: &Venue) -> DerivedCosts {
        let guests = Self::clamp_guests(venue.guest_count) as f64;

        let catering_total = Self::clamp_money(venue.catering_per_person) * guests
            + Self::clamp_money(venue.catering_flat_fee);
        let bar_total = Self::clamp_money(venue.bar_service_rate) * guests
            + Self::clamp_money(venue.bar_flat_fee);

        let total_cost = Self::clamp_money(venue.venue_rental_cost)
            + catering_total
            + bar_total
            + Self::clamp_money(venue.coordinator_fee)
            + Self::clamp_money(venue.event_insurance)
            + Self::clamp_money(venue.other_costs);

        let per_guest_cost = if guests > 0.0 { total_cost / guests } else { 0.0 };

        DerivedCosts {
            catering_total,
            bar_total,
            total_cost,
            per_guest_cost,
        }
    }

    /// Value of one metric for one venue
    /// Raw fields are clamped so they agree with the derived figures
    pub fn metric_value(venue: &Venue, costs: &DerivedCosts, key: MetricKey) -> f64 {
        match key {
            MetricKey::VenueRentalCost => Self::clamp_money(venue.venue_rental_cost),
            MetricKey::CateringTotal => costs.catering_total,
            MetricKey::BarTotal => costs.bar_total,
            MetricKey::CoordinatorFee => Self::clamp_money(venue.coordinator_fee),
            MetricKey::EventInsurance => Self::clamp_money(venue.event_insurance),
            MetricKey::OtherCosts => Self::clamp_money(venue.other_costs),
            MetricKey::TotalCost => costs.total_cost,
            MetricKey::PerGuestCost => costs.per_guest_cost,
        }
    }

    /// Compute best/worst statistics per requested metric
    /// DOCUMENTATION: Plain extrema over all input venues; no averaging and
    /// no outlier exclusion. Duplicate metric keys collapse to one entry.
    ///
    /// # Arguments
    /// * `venues` - The collection the stats describe (a consistent snapshot)
    /// * `metrics` - Which metrics to compute extrema for
    ///
    /// # Returns
    /// Map from metric key to its stats; empty for an empty venue collection
    pub fn compute_stats(
        venues: &[Venue],
        metrics: &[MetricKey],
    ) -> HashMap<MetricKey, MetricStats> {
        let mut stats = HashMap::new();
        if venues.is_empty() {
            return stats;
        }

        let derived: Vec<DerivedCosts> = venues.iter().map(Self::compute_derived).collect();

        for &key in metrics {
            let mut best = f64::INFINITY;
            let mut worst = f64::NEG_INFINITY;

            for (venue, costs) in venues.iter().zip(derived.iter()) {
                let value = Self::metric_value(venue, costs, key);
                if value < best {
                    best = value;
                }
                if value > worst {
                    worst = value;
                }
            }

            stats.insert(
                key,
                MetricStats {
                    best,
                    worst,
                    count: venues.len(),
                },
            );
        }

        stats
    }

    /// Classify one value against its metric's extrema
    /// DOCUMENTATION: Rules, in order:
    /// 1. Fewer than two venues: no classification (a best/worst contrast is
    ///    meaningless for a singleton)
    /// 2. Every value is zero: no classification
    /// 3. Every value identical (non-zero): Neutral
    /// 4. Value equals the best: Low; equals the worst: High; otherwise None
    ///
    /// Ties classify every holder of the extremum, not a single winner.
    /// Equality is exact: values come from the same computation that
    /// produced the stats.
    pub fn highlight_class(value: f64, stats: &MetricStats) -> Highlight {
        if stats.count < 2 {
            return Highlight::None;
        }
        if stats.best == 0.0 && stats.worst == 0.0 {
            return Highlight::None;
        }
        if stats.best == stats.worst {
            return Highlight::Neutral;
        }
        if value == stats.best {
            return Highlight::Low;
        }
        if value == stats.worst {
            return Highlight::High;
        }
        Highlight::None
    }

    /// Default direction for a sort key
    /// Name and total sort cheapest/alphabetical first; date newest first
    pub fn default_direction(key: SortKey) -> SortDirection {
        match key {
            SortKey::Name | SortKey::TotalCost => SortDirection::Asc,
            SortKey::CreatedAt => SortDirection::Desc,
        }
    }

    /// Sort venues by the given key
    /// DOCUMENTATION: Stable sort; an explicit direction reverses each
    /// comparison rather than the output, so equal keys keep their input
    /// order in either direction. Name comparison is case-insensitive.
    pub fn sort_venues(
        mut venues: Vec<Venue>,
        key: SortKey,
        direction: Option<SortDirection>,
    ) -> Vec<Venue> {
        let direction = direction.unwrap_or_else(|| Self::default_direction(key));

        venues.sort_by(|a, b| {
            let ascending = match key {
                SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                SortKey::TotalCost => {
                    let total_a = Self::compute_derived(a).total_cost;
                    let total_b = Self::compute_derived(b).total_cost;
                    total_a.partial_cmp(&total_b).unwrap_or(Ordering::Equal)
                }
            };

            match direction {
                SortDirection::Asc => ascending,
                SortDirection::Desc => ascending.reverse(),
            }
        });

        venues
    }

    /// Filter venues by case-insensitive name substring
    /// A blank query matches everything; order is unchanged either way
    pub fn filter_by_name(venues: &[Venue], query: &str) -> Vec<Venue> {
        if query.trim().is_empty() {
            return venues.to_vec();
        }

        let needle = query.to_lowercase();
        venues
            .iter()
            .filter(|venue| venue.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn base_venue(name: &str) -> Venue {
        Venue {
            id: Uuid::new_v4(),
            owner_id: "owner-1".to_string(),
            name: name.to_string(),
            guest_count: 0,
            event_duration_hours: 0.0,
            venue_rental_cost: 0.0,
            catering_per_person: 0.0,
            catering_flat_fee: 0.0,
            bar_service_rate: 0.0,
            bar_flat_fee: 0.0,
            coordinator_fee: 0.0,
            event_insurance: 0.0,
            other_costs: 0.0,
            notes: String::new(),
            title_photo: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn venue_with_rental(name: &str, rental: f64) -> Venue {
        let mut venue = base_venue(name);
        venue.venue_rental_cost = rental;
        venue
    }

    #[test]
    fn test_catering_total_formula() {
        let mut venue = base_venue("Rosewood Barn");
        venue.guest_count = 100;
        venue.catering_per_person = 20.0;
        venue.catering_flat_fee = 200.0;

        let derived = CostAggregator::compute_derived(&venue);
        assert_eq!(derived.catering_total, 2200.0);
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let mut venue = base_venue("Grand Ballroom");
        venue.guest_count = 100;
        venue.venue_rental_cost = 3000.0;
        venue.catering_per_person = 50.0;
        venue.catering_flat_fee = 500.0;
        venue.bar_service_rate = 10.0;
        venue.bar_flat_fee = 200.0;
        venue.coordinator_fee = 800.0;
        venue.event_insurance = 150.0;
        venue.other_costs = 100.0;

        let derived = CostAggregator::compute_derived(&venue);
        assert_eq!(derived.catering_total, 5500.0);
        assert_eq!(derived.bar_total, 1200.0);
        assert_eq!(derived.total_cost, 3000.0 + 5500.0 + 1200.0 + 800.0 + 150.0 + 100.0);
        assert_eq!(derived.per_guest_cost, derived.total_cost / 100.0);
    }

    #[test]
    fn test_zero_guests_means_zero_per_guest() {
        let mut venue = base_venue("Empty Hall");
        venue.guest_count = 0;
        venue.venue_rental_cost = 5000.0;
        venue.catering_per_person = 75.0;
        venue.catering_flat_fee = 300.0;

        let derived = CostAggregator::compute_derived(&venue);
        assert_eq!(derived.per_guest_cost, 0.0);
        // Per-person charges contribute nothing without guests
        assert_eq!(derived.catering_total, 300.0);
        assert_eq!(derived.total_cost, 5300.0);
    }

    #[test]
    fn test_invalid_inputs_count_as_zero() {
        let mut venue = base_venue("Broken Input");
        venue.guest_count = -10;
        venue.venue_rental_cost = -2500.0;
        venue.catering_per_person = f64::NAN;
        venue.bar_flat_fee = f64::INFINITY;
        venue.coordinator_fee = 400.0;

        let derived = CostAggregator::compute_derived(&venue);
        assert_eq!(derived.total_cost, 400.0);
        assert_eq!(derived.per_guest_cost, 0.0);
        assert!(derived.total_cost.is_finite());
    }

    #[test]
    fn test_clamping_is_idempotent() {
        assert_eq!(CostAggregator::clamp_money(-5.0), 0.0);
        assert_eq!(CostAggregator::clamp_money(CostAggregator::clamp_money(-5.0)), 0.0);
        assert_eq!(CostAggregator::clamp_money(123.45), 123.45);
        assert_eq!(CostAggregator::clamp_money(CostAggregator::clamp_money(123.45)), 123.45);
        assert_eq!(CostAggregator::clamp_guests(-3), 0);
        assert_eq!(CostAggregator::clamp_guests(42), 42);
    }

    #[test]
    fn test_stats_report_best_and_worst() {
        let venues = vec![
            venue_with_rental("A", 1000.0),
            venue_with_rental("B", 1500.0),
            venue_with_rental("C", 1000.0),
        ];

        let stats = CostAggregator::compute_stats(&venues, &[MetricKey::VenueRentalCost]);
        let rental = stats.get(&MetricKey::VenueRentalCost).unwrap();

        assert_eq!(rental.best, 1000.0);
        assert_eq!(rental.worst, 1500.0);
        assert_eq!(rental.count, 3);

        // Both holders of the best value classify Low; the worst holder High
        assert_eq!(CostAggregator::highlight_class(1000.0, rental), Highlight::Low);
        assert_eq!(CostAggregator::highlight_class(1500.0, rental), Highlight::High);
    }

    #[test]
    fn test_stats_empty_collection_is_empty() {
        let stats = CostAggregator::compute_stats(&[], &[MetricKey::TotalCost]);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_stats_duplicate_keys_collapse() {
        let venues = vec![venue_with_rental("A", 100.0)];
        let stats = CostAggregator::compute_stats(
            &venues,
            &[MetricKey::TotalCost, MetricKey::TotalCost],
        );
        assert_eq!(stats.len(), 1);
    }

    #[test]
    fn test_single_venue_stats_and_highlight() {
        let venues = vec![venue_with_rental("Solo", 2000.0)];
        let stats = CostAggregator::compute_stats(&venues, &[MetricKey::VenueRentalCost]);
        let rental = stats.get(&MetricKey::VenueRentalCost).unwrap();

        assert_eq!(rental.best, 2000.0);
        assert_eq!(rental.worst, 2000.0);
        assert_eq!(rental.count, 1);

        // A lone venue gets no classification, even though it holds the best
        assert_eq!(CostAggregator::highlight_class(2000.0, rental), Highlight::None);
    }

    #[test]
    fn test_all_zero_metric_gets_no_highlight() {
        let stats = MetricStats {
            best: 0.0,
            worst: 0.0,
            count: 3,
        };
        assert_eq!(CostAggregator::highlight_class(0.0, &stats), Highlight::None);
    }

    #[test]
    fn test_all_equal_non_zero_is_neutral() {
        let stats = MetricStats {
            best: 750.0,
            worst: 750.0,
            count: 3,
        };
        assert_eq!(CostAggregator::highlight_class(750.0, &stats), Highlight::Neutral);
    }

    #[test]
    fn test_middle_value_gets_no_highlight() {
        let stats = MetricStats {
            best: 100.0,
            worst: 300.0,
            count: 3,
        };
        assert_eq!(CostAggregator::highlight_class(200.0, &stats), Highlight::None);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let venues = vec![
            base_venue("bravo"),
            base_venue("Alpha"),
            base_venue("charlie"),
        ];

        let sorted = CostAggregator::sort_venues(venues, SortKey::Name, None);
        let names: Vec<&str> = sorted.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_sort_by_name_is_stable_for_equal_keys() {
        let mut first = base_venue("Harborview");
        first.guest_count = 1;
        let mut second = base_venue("harborview");
        second.guest_count = 2;
        let mut third = base_venue("HARBORVIEW");
        third.guest_count = 3;

        let sorted = CostAggregator::sort_venues(vec![first, second, third], SortKey::Name, None);
        let order: Vec<i32> = sorted.iter().map(|v| v.guest_count).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_by_date_defaults_to_newest_first() {
        let mut oldest = base_venue("Oldest");
        oldest.created_at = Utc::now() - Duration::days(3);
        let mut middle = base_venue("Middle");
        middle.created_at = Utc::now() - Duration::days(2);
        let mut newest = base_venue("Newest");
        newest.created_at = Utc::now() - Duration::days(1);

        let sorted = CostAggregator::sort_venues(vec![oldest, newest, middle], SortKey::CreatedAt, None);
        let names: Vec<&str> = sorted.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
    }

    #[test]
    fn test_sort_by_date_is_stable_for_equal_timestamps() {
        let stamp = Utc::now();
        let mut first = base_venue("First");
        first.created_at = stamp;
        let mut second = base_venue("Second");
        second.created_at = stamp;

        let sorted = CostAggregator::sort_venues(vec![first, second], SortKey::CreatedAt, None);
        let names: Vec<&str> = sorted.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_sort_by_total_defaults_to_cheapest_first() {
        let venues = vec![
            venue_with_rental("Pricey", 9000.0),
            venue_with_rental("Cheap", 1000.0),
            venue_with_rental("Mid", 5000.0),
        ];

        let sorted = CostAggregator::sort_venues(venues, SortKey::TotalCost, None);
        let names: Vec<&str> = sorted.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Cheap", "Mid", "Pricey"]);
    }

    #[test]
    fn test_sort_direction_override() {
        let venues = vec![
            venue_with_rental("Cheap", 1000.0),
            venue_with_rental("Pricey", 9000.0),
        ];

        let sorted =
            CostAggregator::sort_venues(venues, SortKey::TotalCost, Some(SortDirection::Desc));
        let names: Vec<&str> = sorted.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Pricey", "Cheap"]);
    }

    #[test]
    fn test_sort_direction_override_keeps_stability() {
        let mut first = venue_with_rental("First", 4000.0);
        first.guest_count = 1;
        let mut second = venue_with_rental("Second", 4000.0);
        second.guest_count = 2;
        let cheaper = venue_with_rental("Cheaper", 1000.0);

        let sorted = CostAggregator::sort_venues(
            vec![first, second, cheaper],
            SortKey::TotalCost,
            Some(SortDirection::Desc),
        );

        // The two equal totals stay in input order even when reversed
        let order: Vec<(&str, i32)> = sorted
            .iter()
            .map(|v| (v.name.as_str(), v.guest_count))
            .collect();
        assert_eq!(order, vec![("First", 1), ("Second", 2), ("Cheaper", 0)]);
    }

    #[test]
    fn test_filter_matches_substring_case_insensitive() {
        let venues = vec![
            base_venue("The Grand Ballroom"),
            base_venue("Rosewood Barn"),
            base_venue("Harborview Terrace"),
        ];

        let filtered = CostAggregator::filter_by_name(&venues, "AR");
        let names: Vec<&str> = filtered.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Rosewood Barn", "Harborview Terrace"]);

        let exact = CostAggregator::filter_by_name(&venues, "ballroom");
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].name, "The Grand Ballroom");
    }

    #[test]
    fn test_filter_blank_query_returns_all_in_order() {
        let venues = vec![base_venue("B"), base_venue("A")];

        let all = CostAggregator::filter_by_name(&venues, "");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "B");
        assert_eq!(all[1].name, "A");

        let whitespace = CostAggregator::filter_by_name(&venues, "   ");
        assert_eq!(whitespace.len(), 2);
    }

    #[test]
    fn test_filter_never_matches_unnamed_venues() {
        let venues = vec![base_venue(""), base_venue("Cedar Hall")];

        let filtered = CostAggregator::filter_by_name(&venues, "hall");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Cedar Hall");
    }

    #[test]
    fn test_metric_key_wire_format() {
        assert_eq!(
            serde_json::to_string(&MetricKey::PerGuestCost).unwrap(),
            "\"per_guest_cost\""
        );
        assert_eq!(
            serde_json::from_str::<MetricKey>("\"venue_rental_cost\"").unwrap(),
            MetricKey::VenueRentalCost
        );
        assert_eq!(serde_json::to_string(&Highlight::Low).unwrap(), "\"low\"");
        assert_eq!(
            serde_json::from_str::<SortKey>("\"date\"").unwrap(),
            SortKey::CreatedAt
        );
        assert_eq!(
            serde_json::from_str::<SortDirection>("\"desc\"").unwrap(),
            SortDirection::Desc
        );
    }
}
