// src/services/csv_export.rs
// DOCUMENTATION: CSV rendering for venue collections
// PURPOSE: Builds the spreadsheet-compatible export returned by the API

use chrono::SecondsFormat;

use crate::models::Venue;
use crate::services::cost_aggregator::CostAggregator;

/// Column order of the export, fixed so downstream spreadsheets stay stable
const HEADER: [&str; 16] = [
    "id",
    "name",
    "guest_count",
    "event_duration_hours",
    "venue_rental_cost",
    "catering_per_person",
    "catering_flat_fee",
    "bar_service_rate",
    "bar_flat_fee",
    "coordinator_fee",
    "event_insurance",
    "other_costs",
    "total",
    "per_guest",
    "notes",
    "created_at",
];

/// CSV export service
pub struct CsvExporter;

impl CsvExporter {
    /// Render a venue collection as CSV
    /// DOCUMENTATION: The header row is unquoted; every data field is quoted
    /// and escaped, which keeps commas and newlines in names or notes intact.
    /// Derived totals are recomputed at render time. Rows follow the input
    /// order; an empty collection renders the header row alone.
    pub fn render(venues: &[Venue]) -> String {
        let mut lines = Vec::with_capacity(venues.len() + 1);
        lines.push(HEADER.join(","));

        for venue in venues {
            let derived = CostAggregator::compute_derived(venue);
            let fields = [
                venue.id.to_string(),
                venue.name.clone(),
                venue.guest_count.to_string(),
                venue.event_duration_hours.to_string(),
                venue.venue_rental_cost.to_string(),
                venue.catering_per_person.to_string(),
                venue.catering_flat_fee.to_string(),
                venue.bar_service_rate.to_string(),
                venue.bar_flat_fee.to_string(),
                venue.coordinator_fee.to_string(),
                venue.event_insurance.to_string(),
                venue.other_costs.to_string(),
                derived.total_cost.to_string(),
                derived.per_guest_cost.to_string(),
                venue.notes.clone(),
                venue
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ];

            let row: Vec<String> = fields.iter().map(|f| Self::escape(f)).collect();
            lines.push(row.join(","));
        }

        lines.join("\n")
    }

    /// Quote a field and double any embedded quotes
    pub fn escape(field: &str) -> String {
        format!("\"{}\"", field.replace('"', "\"\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample_venue() -> Venue {
        Venue {
            id: Uuid::nil(),
            owner_id: "owner-1".to_string(),
            name: "Rosewood Barn".to_string(),
            guest_count: 100,
            event_duration_hours: 6.0,
            venue_rental_cost: 3000.0,
            catering_per_person: 20.0,
            catering_flat_fee: 200.0,
            bar_service_rate: 0.0,
            bar_flat_fee: 0.0,
            coordinator_fee: 0.0,
            event_insurance: 0.0,
            other_costs: 0.0,
            notes: String::new(),
            title_photo: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_escape_doubles_embedded_quotes() {
        assert_eq!(CsvExporter::escape("plain"), "\"plain\"");
        assert_eq!(
            CsvExporter::escape("say \"hello\""),
            "\"say \"\"hello\"\"\""
        );
        assert_eq!(CsvExporter::escape(""), "\"\"");
    }

    #[test]
    fn test_header_row_is_unquoted_and_complete() {
        let csv = CsvExporter::render(&[]);
        assert_eq!(
            csv,
            "id,name,guest_count,event_duration_hours,venue_rental_cost,\
             catering_per_person,catering_flat_fee,bar_service_rate,bar_flat_fee,\
             coordinator_fee,event_insurance,other_costs,total,per_guest,notes,created_at"
        );
    }

    #[test]
    fn test_row_contains_recomputed_totals() {
        let csv = CsvExporter::render(&[sample_venue()]);
        let rows: Vec<&str> = csv.split('\n').collect();
        assert_eq!(rows.len(), 2);

        // rental 3000 + catering (20 * 100 + 200) = 5200 total, 52 per guest
        assert!(rows[1].contains("\"5200\""));
        assert!(rows[1].contains("\"52\""));
        assert!(rows[1].contains("\"Rosewood Barn\""));
        assert!(rows[1].contains("\"2025-06-01T12:00:00.000Z\""));
    }

    #[test]
    fn test_commas_and_newlines_survive_in_quoted_fields() {
        let mut venue = sample_venue();
        venue.name = "Barn, The".to_string();
        venue.notes = "line one\nline two".to_string();

        let csv = CsvExporter::render(&[venue]);
        assert!(csv.contains("\"Barn, The\""));
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_rows_follow_input_order() {
        let mut first = sample_venue();
        first.name = "First".to_string();
        let mut second = sample_venue();
        second.name = "Second".to_string();

        let csv = CsvExporter::render(&[first, second]);
        let first_at = csv.find("\"First\"").unwrap();
        let second_at = csv.find("\"Second\"").unwrap();
        assert!(first_at < second_at);
    }
}
