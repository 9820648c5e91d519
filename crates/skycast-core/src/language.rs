//! Supported UI languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language selected for UI text, date formatting and speech.
///
/// Only changed by an explicit user selection; never inferred from the
/// system locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Es,
}

impl LanguageCode {
    /// Every language the selector offers, in display order.
    pub const ALL: [LanguageCode; 2] = [LanguageCode::En, LanguageCode::Es];

    /// Short code used by the language selector ("en", "es").
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// BCP-47 tag handed to the speech synthesizer.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::Es => "es-ES",
        }
    }

    /// Locale used for long-form date and time rendering.
    pub fn locale(&self) -> chrono::Locale {
        match self {
            Self::En => chrono::Locale::en_US,
            Self::Es => chrono::Locale::es_ES,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when parsing a code the selector does not offer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown language code: '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for LanguageCode {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
