//! Weather backend: async weather fetching.
//! The request runs on a spawned task; the result is sent back via mpsc.

use std::sync::Arc;

use skycast_weather::{WeatherError, WeatherProvider, WeatherQuery, WeatherReading};
use tokio::sync::mpsc;

/// Messages sent from async operations back to the event loop
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of fetching weather data, tagged with the request generation
    FetchDone {
        generation: u64,
        result: Result<WeatherReading, WeatherError>,
    },
}

/// Start fetching `query` on the current runtime.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &mpsc::UnboundedSender<WeatherServiceMessage>,
    provider: Arc<WeatherProvider>,
    query: WeatherQuery,
    generation: u64,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = provider.fetch(&query).await;
        if tx
            .send(WeatherServiceMessage::FetchDone { generation, result })
            .is_err()
        {
            tracing::debug!("Event loop gone; dropping weather result #{}", generation);
        }
    });
}
