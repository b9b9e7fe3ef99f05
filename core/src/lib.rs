pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod generator;
pub mod plot;
pub mod report;
pub mod rng;
pub mod stats;
pub mod types;
