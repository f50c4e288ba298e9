//! Current-conditions weather client for Plantcast.
//!
//! Talks to an OpenWeatherMap-compatible API; only the temperature and
//! relative humidity of the current conditions are consumed downstream.

pub mod client;
pub mod types;

pub use client::WeatherClient;
pub use types::{WeatherError, WeatherReport};
