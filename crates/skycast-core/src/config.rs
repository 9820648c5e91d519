use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::LanguageCode;

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const API_KEY_PLACEHOLDER: &str = "YOUR_OPENWEATHERMAP_API_KEY";
const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Spoken readout settings
    #[serde(default)]
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Current-weather endpoint
    pub api_url: String,

    /// API credential. `OPENWEATHER_API_KEY` takes precedence when set.
    pub api_key: String,

    /// Unit system requested from the API. Temperatures are shown in °C.
    pub units: String,

    /// City fetched once at startup
    pub default_city: String,

    /// Request timeout in seconds (0 waits for the transport indefinitely)
    pub request_timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_WEATHER_URL.to_string(),
            api_key: API_KEY_PLACEHOLDER.to_string(),
            units: "metric".to_string(),
            default_city: "India".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl WeatherConfig {
    /// Check if a credential is configured (not a placeholder)
    pub fn is_configured(&self) -> bool {
        let key = self.effective_api_key();
        !key.trim().is_empty() && !key.starts_with("YOUR_")
    }

    /// API key from the environment if present, otherwise from the file.
    pub fn effective_api_key(&self) -> String {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| self.api_key.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Language selected at startup
    #[serde(default)]
    pub language: LanguageCode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speak readings aloud
    pub enabled: bool,

    /// External text-to-speech program (espeak-ng compatible flags)
    pub command: String,

    /// Voice pitch, 1.0 is the synthesizer default
    pub pitch: f32,

    /// Speaking rate, 1.0 is the synthesizer default
    pub rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "espeak-ng".to_string(),
            pitch: 1.0,
            rate: 1.0,
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, writing defaults there if missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.api_url, "weather.api_url", &mut result);

        if !self.weather.is_configured() {
            result.add_warning(
                "weather.api_key",
                format!(
                    "Weather API key not configured - set it in the config file or {}",
                    API_KEY_ENV
                ),
            );
        }

        if self.weather.units != "metric" {
            result.add_warning(
                "weather.units",
                format!(
                    "Temperatures are labelled °C but units is '{}'",
                    self.weather.units
                ),
            );
        }

        if self.weather.default_city.trim().is_empty() {
            result.add_warning("weather.default_city", "No city will be fetched at startup");
        }

        for (field, value) in [
            ("speech.pitch", self.speech.pitch),
            ("speech.rate", self.speech.rate),
        ] {
            if !(value > 0.0 && value <= 2.0) {
                result.add_error(field, format!("Must be in (0, 2], got {}", value));
            }
        }

        if self.speech.enabled && self.speech.command.trim().is_empty() {
            result.add_error("speech.command", "Speech is enabled but no command is set");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skycast");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.api_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.api_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.api_url = "ftp://example.com/weather".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_imperial_units_is_warning() {
        let mut config = Config::default();
        config.weather.units = "imperial".to_string();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.units"));
    }

    #[test]
    fn test_speech_rate_out_of_range() {
        let mut config = Config::default();
        config.speech.rate = 0.0;
        config.speech.pitch = 3.5;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "speech.rate"));
        assert!(result.errors.iter().any(|e| e.field == "speech.pitch"));
    }

    #[test]
    fn test_empty_speech_command_only_matters_when_enabled() {
        let mut config = Config::default();
        config.speech.command = String::new();
        assert!(!config.validate().is_valid());

        config.speech.enabled = false;
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.weather.default_city, "India");
        assert_eq!(config.ui.language, LanguageCode::En);
    }

    #[test]
    fn test_load_reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[weather]
api_url = "https://weather.example.com/current"
api_key = "abc123"
default_city = "Lima"

[ui]
language = "es"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.weather.default_city, "Lima");
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.weather.request_timeout_secs, 10);
        assert_eq!(config.ui.language, LanguageCode::Es);
        assert!(config.speech.enabled);
    }

    #[test]
    fn test_load_fills_missing_weather_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\napi_key = \"abc123\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.weather.api_key, "abc123");
        assert_eq!(config.weather.api_url, WeatherConfig::default().api_url);
        assert_eq!(config.weather.default_city, "India");
        assert_eq!(config.weather.units, "metric");
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_load_fills_missing_speech_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[speech]\nenabled = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert!(!config.speech.enabled);
        assert_eq!(config.speech.command, "espeak-ng");
        assert_eq!(config.speech.pitch, 1.0);
        assert_eq!(config.speech.rate, 1.0);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\napi_url = ").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
