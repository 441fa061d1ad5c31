// src/config/mod.rs

pub mod db;
pub mod env;

pub use db::{init_db_pool, init_schema};
pub use env::Config;
