//! Date, time and time-of-day greeting.

use chrono::{DateTime, TimeZone, Timelike};
use std::fmt;

use crate::i18n::{LanguageCode, TranslationKey, TranslationSet};

/// Interval between clock refreshes.
pub const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

/// Rendered clock slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    pub date: String,
    pub time: String,
    pub greeting: &'static str,
}

/// Greeting for an hour of the day (0-23).
pub fn greeting_key(hour: u32) -> TranslationKey {
    match hour {
        5..=11 => TranslationKey::Morning,
        12..=17 => TranslationKey::Afternoon,
        18..=21 => TranslationKey::Evening,
        _ => TranslationKey::Night,
    }
}

fn date_format(language: LanguageCode) -> &'static str {
    match language {
        LanguageCode::En => "%A, %B %-d, %Y",
        LanguageCode::Es => "%A, %-d de %B de %Y",
    }
}

/// Render the clock slots for `now` in `language`.
pub fn tick<Tz>(now: &DateTime<Tz>, language: LanguageCode) -> ClockFace
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let locale = language.locale();
    ClockFace {
        date: now
            .format_localized(date_format(language), locale)
            .to_string(),
        time: now.format_localized("%H:%M:%S", locale).to_string(),
        greeting: TranslationSet::for_language(language).get(greeting_key(now.hour())),
    }
}
