pub mod api;
pub mod config;
pub mod db;
pub mod listings;
pub mod pages;
pub mod telemetry;
