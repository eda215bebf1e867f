// src/lib.rs

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod seed;
pub mod state;
pub mod utils;

// Re-export specific items for convenience if needed
pub use routes::create_router;
