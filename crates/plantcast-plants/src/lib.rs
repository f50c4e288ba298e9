//! Plant database client for Plantcast.
//!
//! Queries a Trefle-compatible API for plants tolerant of a humidity range
//! and for extended botanical detail on a single plant.

pub mod client;
pub mod types;

pub use client::PlantsClient;
pub use types::{HumidityWindow, PlantDetail, PlantSummary, PlantsError};
