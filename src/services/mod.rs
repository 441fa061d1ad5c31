// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod cost_aggregator;
pub mod csv_export;
pub mod photo_service;
pub mod photo_storage;
pub mod venue_service;

pub use cost_aggregator::*;
pub use csv_export::*;
pub use photo_service::*;
pub use photo_storage::*;
pub use venue_service::*;
