// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, media storage, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use models::MEDIA_URL_PREFIX;
use services::PhotoStorage;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        // Use configured log level or default
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting venue-compare service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool and schema
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config::init_schema(&pool).await {
        log::error!("Failed to initialize database schema: {}", e);
        std::process::exit(1);
    }

    // 5. Initialize photo storage
    let storage = PhotoStorage::new(&config.media_root);
    if let Err(e) = storage.init().await {
        log::error!("Failed to initialize media storage: {}", e);
        std::process::exit(1);
    }

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();
    let media_root = config.media_root.clone();

    HttpServer::new(move || {
        App::new()
            // Application state (database pool, config, and photo storage)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            .app_data(web::Data::new(storage.clone()))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes; the photo scope nests under /venues and must come first
            .configure(handlers::health_config)
            .configure(handlers::photos_config)
            .configure(handlers::venues_config)
            // Stored photo files, served as-is
            .service(Files::new(MEDIA_URL_PREFIX, media_root.clone()))
    })
    .bind(&server_addr)?
    .run()
    .await
}
