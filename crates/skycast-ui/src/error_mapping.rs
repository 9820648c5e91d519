//! Maps weather client errors to skycast_core::AppError for logging with a
//! consistent user-facing summary.

use skycast_core::{AppError, NetworkError, ReqwestErrorExt};
use skycast_weather::WeatherError;

pub trait WeatherErrorExt {
    fn into_app_error(self) -> AppError;
}

impl WeatherErrorExt for WeatherError {
    fn into_app_error(self) -> AppError {
        use skycast_core::WeatherError as Core;

        if self.is_not_found() {
            let detail = self.raw_message().unwrap_or_default();
            return AppError::Weather(Core::LocationNotFound(detail));
        }

        match self {
            WeatherError::Network(e) => AppError::Network(e.into_network_error()),
            WeatherError::Http { status: 401, .. } | WeatherError::MissingApiKey => {
                AppError::Weather(Core::InvalidApiKey)
            }
            WeatherError::Http { status, .. } if status >= 500 => {
                AppError::Weather(Core::ServiceUnavailable)
            }
            WeatherError::Http { status, message } => AppError::Weather(Core::ApiError(
                message.unwrap_or_else(|| format!("HTTP {}", status)),
            )),
            WeatherError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
            WeatherError::InvalidEndpoint(s) => {
                AppError::Config(skycast_core::ConfigError::Invalid(s))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::WeatherError as Core;

    fn http(status: u16, message: Option<&str>) -> WeatherError {
        WeatherError::Http {
            status,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_not_found_maps_to_location_not_found() {
        let app = http(404, Some("city not found")).into_app_error();
        assert!(matches!(app, AppError::Weather(Core::LocationNotFound(ref s)) if s == "city not found"));
    }

    #[test]
    fn test_auth_failures_map_to_invalid_key() {
        assert!(matches!(
            http(401, Some("Invalid API key")).into_app_error(),
            AppError::Weather(Core::InvalidApiKey)
        ));
        assert!(matches!(
            WeatherError::MissingApiKey.into_app_error(),
            AppError::Weather(Core::InvalidApiKey)
        ));
    }

    #[test]
    fn test_upstream_failures_map_to_unavailable() {
        assert!(matches!(
            http(503, None).into_app_error(),
            AppError::Weather(Core::ServiceUnavailable)
        ));
    }

    #[test]
    fn test_parse_failure_maps_to_invalid_response() {
        let app = WeatherError::Parse("expected value".into()).into_app_error();
        assert!(matches!(app, AppError::Network(NetworkError::InvalidResponse(_))));
        assert!(!app.user_message().is_empty());
    }
}
