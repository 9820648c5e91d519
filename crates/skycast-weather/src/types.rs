use serde::Deserialize;
use std::fmt;

/// Icon image template; `{icon}` is replaced with the condition's icon code.
pub const ICON_URL_TEMPLATE: &str = "http://openweathermap.org/img/wn/{icon}@2x.png";

/// Build the icon image URL for an icon code such as "01d".
pub fn icon_url(icon_code: &str) -> String {
    ICON_URL_TEMPLATE.replace("{icon}", icon_code)
}

/// What to look up.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

impl WeatherQuery {
    pub fn city(name: impl Into<String>) -> Self {
        Self::City(name.into())
    }

    /// Query-string pairs selecting the location.
    pub(crate) fn location_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::City(name) => vec![("q", name.clone())],
            Self::Coordinates {
                latitude,
                longitude,
            } => vec![("lat", latitude.to_string()), ("lon", longitude.to_string())],
        }
    }
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City(name) => f.write_str(name),
            Self::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{:.4}, {:.4}", latitude, longitude),
        }
    }
}

/// Success body of the current-weather endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    pub name: String,
    pub main: MainBlock,
    pub weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainBlock {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionBlock {
    pub description: String,
    pub icon: String,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

/// One fetch result. Replaced wholesale by the next fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// City display name as reported by the API
    pub city: String,
    /// Temperature in °C, rounded to the nearest integer
    pub temperature: i64,
    /// Relative humidity in percent, as reported
    pub humidity: f64,
    /// Raw description, e.g. "clear sky"
    pub description: String,
    /// Icon identifier, e.g. "01d"
    pub icon_code: String,
}

impl WeatherReading {
    pub(crate) fn from_response(response: CurrentResponse) -> Result<Self, WeatherError> {
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("response has no weather conditions".into()))?;

        Ok(Self {
            city: response.name,
            temperature: round_half_up(response.main.temp),
            humidity: response.main.humidity,
            description: condition.description,
            icon_code: condition.icon,
        })
    }

    /// Description with its first letter capitalized.
    pub fn display_description(&self) -> String {
        capitalize_first(&self.description)
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon_code)
    }
}

/// Nearest integer; half-way values round toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Transport failure. The request URL is stripped since it carries the API key.
    #[error("Network error: {0}")]
    Network(reqwest::Error),
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Weather API key is not configured")]
    MissingApiKey,
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.without_url())
    }
}

impl WeatherError {
    /// True when the location does not exist upstream.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Http { status: 404, .. } => true,
            Self::Http {
                message: Some(message),
                ..
            } => message.to_lowercase().contains("not found"),
            _ => false,
        }
    }

    /// Raw failure text for display, if the failure carries one.
    ///
    /// An HTTP failure without a server message has none.
    pub fn raw_message(&self) -> Option<String> {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Network(e) => Some(e.to_string()),
            Self::Parse(s) | Self::InvalidEndpoint(s) => Some(s.clone()),
            Self::MissingApiKey => Some(self.to_string()),
        }
    }
}
