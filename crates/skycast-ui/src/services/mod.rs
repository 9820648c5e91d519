//! Async service backends. Network work runs on tokio tasks; results come
//! back to the event loop over channels.

pub mod weather_service;

pub use weather_service::{request_fetch, WeatherServiceMessage};
