//! Weather client for SkyCast
//!
//! Fetches current conditions from an OpenWeatherMap-compatible endpoint
//! by city name or coordinates.

pub mod provider;
pub mod types;

pub use provider::WeatherProvider;
pub use types::*;
