// src/bin/seed.rs
use anyhow::{bail, Context};
use dotenv::dotenv;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::process;
use std::time::Duration;

// --- ANSI terminal colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// The slice of the venue response this tool cares about
#[derive(Deserialize, Debug)]
struct CreatedVenue {
    id: String,
    name: String,
    total_cost: f64,
    per_guest_cost: f64,
}

/// Demo wedding venues with plausible price tags
fn sample_venues() -> Vec<serde_json::Value> {
    vec![
        json!({
            "name": "The Grand Ballroom",
            "guest_count": 150,
            "event_duration_hours": 8.0,
            "venue_rental_cost": 6500.0,
            "catering_per_person": 95.0,
            "catering_flat_fee": 1200.0,
            "bar_service_rate": 28.0,
            "bar_flat_fee": 450.0,
            "coordinator_fee": 1500.0,
            "event_insurance": 300.0,
            "other_costs": 600.0,
            "notes": "Downtown classic; tables and chairs included in the rental"
        }),
        json!({
            "name": "Rosewood Barn",
            "guest_count": 110,
            "event_duration_hours": 10.0,
            "venue_rental_cost": 3800.0,
            "catering_per_person": 72.0,
            "catering_flat_fee": 800.0,
            "bar_service_rate": 22.0,
            "bar_flat_fee": 300.0,
            "coordinator_fee": 900.0,
            "event_insurance": 250.0,
            "other_costs": 400.0,
            "notes": "Rustic barn with an outdoor ceremony lawn"
        }),
        json!({
            "name": "Harborview Terrace",
            "guest_count": 90,
            "event_duration_hours": 6.0,
            "venue_rental_cost": 5200.0,
            "catering_per_person": 88.0,
            "catering_flat_fee": 950.0,
            "bar_service_rate": 30.0,
            "bar_flat_fee": 500.0,
            "coordinator_fee": 1200.0,
            "event_insurance": 280.0,
            "other_costs": 350.0,
            "notes": "Waterfront terrace, sunset ceremony slot"
        }),
        json!({
            "name": "Willow Creek Estate",
            "guest_count": 180,
            "event_duration_hours": 12.0,
            "venue_rental_cost": 9800.0,
            "catering_per_person": 110.0,
            "catering_flat_fee": 1500.0,
            "bar_service_rate": 35.0,
            "bar_flat_fee": 700.0,
            "coordinator_fee": 2200.0,
            "event_insurance": 400.0,
            "other_costs": 900.0,
            "notes": "Full-weekend estate rental with on-site lodging"
        }),
        json!({
            "name": "The Glasshouse",
            "guest_count": 120,
            "event_duration_hours": 7.0,
            "venue_rental_cost": 7400.0,
            "catering_per_person": 98.0,
            "catering_flat_fee": 1100.0,
            "bar_service_rate": 26.0,
            "bar_flat_fee": 420.0,
            "coordinator_fee": 1600.0,
            "event_insurance": 320.0,
            "other_costs": 500.0,
            "notes": "Botanical conservatory, rain-proof garden feel"
        }),
        json!({
            "name": "Cedar Hall",
            "guest_count": 75,
            "event_duration_hours": 6.0,
            "venue_rental_cost": 2900.0,
            "catering_per_person": 58.0,
            "catering_flat_fee": 600.0,
            "bar_service_rate": 18.0,
            "bar_flat_fee": 250.0,
            "coordinator_fee": 700.0,
            "event_insurance": 180.0,
            "other_costs": 250.0,
            "notes": "Budget-friendly community hall, bring your own decor"
        }),
    ]
}

// --- Runner logic ---

struct SeedRunner {
    base_url: String,
    user_id: String,
    client: Client,
    created: Vec<CreatedVenue>,
    skipped: u32,
    failed: u32,
}

impl SeedRunner {
    fn new(base_url: String, user_id: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            user_id,
            client,
            created: Vec::new(),
            skipped: 0,
            failed: 0,
        })
    }

    async fn check_service_health(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// POST one venue; Ok(None) means the name is already taken
    async fn create_venue(
        &self,
        venue: &serde_json::Value,
    ) -> anyhow::Result<Option<CreatedVenue>> {
        let response = self
            .client
            .post(format!("{}/venues", self.base_url))
            .header("X-User-Id", &self.user_id)
            .json(venue)
            .send()
            .await?;

        match response.status().as_u16() {
            201 => {
                let created = response
                    .json::<CreatedVenue>()
                    .await
                    .context("Failed to parse venue response")?;
                Ok(Some(created))
            }
            409 => Ok(None),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                bail!("HTTP {} - {}", status, body)
            }
        }
    }

    async fn run(&mut self) -> anyhow::Result<()> {
        println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
        if !self.check_service_health().await {
            println!("{}❌ Service unavailable.{}", RED, RESET);
            println!(
                "{}Please ensure venue-compare is running (cargo run){}",
                YELLOW, RESET
            );
            process::exit(1);
        }
        println!("{}✅ Service available{}\n", GREEN, RESET);

        let venues = sample_venues();
        self.print_header(venues.len());

        println!("\n{}🚀 Creating venues...{}\n", BOLD, RESET);

        let total = venues.len();
        for (i, venue) in venues.iter().enumerate() {
            let name = venue["name"].as_str().unwrap_or("(unnamed)");
            println!("{}[{}/{}] Creating {}...{}", CYAN, i + 1, total, name, RESET);

            match self.create_venue(venue).await {
                Ok(Some(created)) => {
                    println!(
                        "{}✅ {} ({}): ${:.0} total, ${:.0} per guest{}",
                        GREEN, created.name, created.id, created.total_cost,
                        created.per_guest_cost, RESET
                    );
                    self.created.push(created);
                }
                Ok(None) => {
                    println!(
                        "{}⚠️  {} already exists, skipped{}",
                        YELLOW, name, RESET
                    );
                    self.skipped += 1;
                }
                Err(err) => {
                    println!("{}❌ Error creating {}: {}{}", RED, name, err, RESET);
                    self.failed += 1;
                }
            }
        }

        self.print_summary();
        Ok(())
    }

    fn print_header(&self, total_count: usize) {
        println!("{}╔══════════════════════════════════════════════════════════════╗{}", CYAN, RESET);
        println!("{}║   💍 Venue Seeder - Demo Wedding Venues                      ║{}", CYAN, RESET);
        println!("{}╚══════════════════════════════════════════════════════════════╝{}", CYAN, RESET);
        println!("\n{}📊 Venues to create: {} (owner: {}){}", BOLD, total_count, self.user_id, RESET);
    }

    fn print_summary(&self) {
        println!("\n\n{}📋 Seeding Summary{}", BOLD, RESET);
        println!("──────────────────────────────────────────────────────────────");
        println!("{:<30} {:>12} {:>12}", "Venue", "Total", "Per Guest");
        println!("──────────────────────────────────────────────────────────────");

        for venue in &self.created {
            println!(
                "{:<30} {:>11.0}$ {:>11.0}$",
                venue.name, venue.total_cost, venue.per_guest_cost
            );
        }

        println!("──────────────────────────────────────────────────────────────");
        println!("\n{}✨ Done{}", GREEN, RESET);
        println!("  • Created: {}{}{}", GREEN, self.created.len(), RESET);
        println!("  • Skipped: {}{}{}", YELLOW, self.skipped, RESET);
        println!("  • Failed: {}{}{}", RED, self.failed, RESET);

        let ordering = |a: &&CreatedVenue, b: &&CreatedVenue| {
            a.total_cost
                .partial_cmp(&b.total_cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        };
        if let Some(cheapest) = self.created.iter().min_by(ordering) {
            println!(
                "  • Cheapest: {} (${:.0})",
                cheapest.name, cheapest.total_cost
            );
        }
        if let Some(priciest) = self.created.iter().max_by(ordering) {
            println!(
                "  • Priciest: {} (${:.0})",
                priciest.name, priciest.total_cost
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let base_url =
        env::var("SEED_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let user_id = env::var("SEED_USER_ID").unwrap_or_else(|_| "demo-user".to_string());

    let mut runner = SeedRunner::new(base_url, user_id)?;
    runner.run().await
}
