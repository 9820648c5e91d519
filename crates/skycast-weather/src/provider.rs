use crate::types::{CurrentResponse, ErrorBody, WeatherError, WeatherQuery, WeatherReading};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Current-weather client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    endpoint: Url,
    api_key: String,
    units: String,
}

impl WeatherProvider {
    /// Create a provider with the default timeout and metric units.
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Self::with_timeout(
            endpoint,
            api_key,
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        )
    }

    /// `None` leaves the request without a timeout.
    pub fn with_timeout(
        endpoint: &str,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, WeatherError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| WeatherError::InvalidEndpoint(e.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            endpoint,
            api_key: api_key.into(),
            units: "metric".to_string(),
        })
    }

    pub fn set_units(&mut self, units: impl Into<String>) {
        self.units = units.into();
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch current conditions for a city or coordinate pair.
    pub async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReading, WeatherError> {
        if self.api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        tracing::debug!("Fetching current weather for {}", query);

        let mut params = query.location_params();
        params.push(("appid", self.api_key.clone()));
        params.push(("units", self.units.clone()));

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty());
            tracing::debug!("Weather API returned status {}: {:?}", status, message);
            return Err(WeatherError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;
        let reading = WeatherReading::from_response(parsed)?;

        tracing::info!(
            "Weather for {}: {}°C, {}",
            reading.city,
            reading.temperature,
            reading.description
        );
        Ok(reading)
    }

    pub async fn fetch_city(&self, city: &str) -> Result<WeatherReading, WeatherError> {
        self.fetch(&WeatherQuery::city(city)).await
    }
}
