//! Named display slots and the renderer that writes into them.
//!
//! Every transition overwrites whole slots; nothing is merged with what a
//! previous reading left behind.

use std::collections::BTreeMap;

use skycast_weather::WeatherReading;

use crate::clock::ClockFace;
use crate::i18n::{TranslationKey, TranslationSet};

pub const TEMPERATURE_PLACEHOLDER: &str = "--°C";
pub const HUMIDITY_PLACEHOLDER: &str = "--%";
/// City slot text after a failed fetch. Not localized.
pub const ERROR_CITY: &str = "Error";

/// Which kind of content the weather slots currently hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Loading,
    Populated,
    Errored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconSlot {
    pub url: String,
    pub alt: String,
    pub visible: bool,
}

/// Values read back out of the slots for a manual spoken readout.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub city: String,
    pub description: String,
    pub temperature: f64,
}

#[derive(Debug, Clone)]
pub struct Display {
    city: String,
    icon: IconSlot,
    temperature: String,
    description: String,
    error: String,
    humidity: String,
    greeting: String,
    date: String,
    time: String,
    input_placeholder: String,
    labels: BTreeMap<TranslationKey, String>,
    phase: Phase,
    revision: u64,
}

impl Display {
    pub fn new(translations: &TranslationSet) -> Self {
        let mut display = Self {
            city: String::new(),
            icon: IconSlot::default(),
            temperature: TEMPERATURE_PLACEHOLDER.to_string(),
            description: String::new(),
            error: String::new(),
            humidity: HUMIDITY_PLACEHOLDER.to_string(),
            greeting: String::new(),
            date: String::new(),
            time: String::new(),
            input_placeholder: String::new(),
            labels: BTreeMap::new(),
            phase: Phase::Loading,
            revision: 0,
        };
        display.apply_translations(translations);
        display
    }

    /// Rewrite every label, the input placeholder and the error slot for a
    /// new language. Weather slots are reset only while still loading.
    pub fn apply_translations(&mut self, translations: &TranslationSet) {
        for key in TranslationKey::LABELS {
            self.labels.insert(key, translations.get(key).to_string());
        }
        self.input_placeholder = translations.get(TranslationKey::Placeholder).to_string();

        if self.phase == Phase::Loading {
            self.city = translations.get(TranslationKey::Loading).to_string();
            self.description = translations.get(TranslationKey::DefaultDesc).to_string();
            self.humidity = HUMIDITY_PLACEHOLDER.to_string();
        }

        self.error.clear();
        self.touch();
    }

    /// Reset every weather slot ahead of a new request.
    pub fn show_loading(&mut self, translations: &TranslationSet) {
        self.city = translations.get(TranslationKey::Loading).to_string();
        self.temperature = TEMPERATURE_PLACEHOLDER.to_string();
        self.description = translations.get(TranslationKey::DefaultDesc).to_string();
        self.humidity = HUMIDITY_PLACEHOLDER.to_string();
        self.error.clear();
        self.icon.visible = false;
        self.phase = Phase::Loading;
        self.touch();
    }

    pub fn show_reading(&mut self, reading: &WeatherReading) {
        self.city = reading.city.clone();
        self.temperature = format!("{}°C", reading.temperature);
        self.description = reading.display_description();
        self.humidity = format!("{}%", reading.humidity);
        self.error.clear();
        self.icon = IconSlot {
            url: reading.icon_url(),
            alt: reading.description.clone(),
            visible: true,
        };
        self.phase = Phase::Populated;
        self.touch();
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.city = ERROR_CITY.to_string();
        self.temperature = TEMPERATURE_PLACEHOLDER.to_string();
        self.description.clear();
        self.humidity = HUMIDITY_PLACEHOLDER.to_string();
        self.error = message.into();
        self.icon.visible = false;
        self.phase = Phase::Errored;
        self.touch();
    }

    /// Clock updates do not bump the revision.
    pub fn set_clock(&mut self, face: ClockFace) {
        self.date = face.date;
        self.time = face.time;
        self.greeting = face.greeting.to_string();
    }

    /// Parse the current slots back into speakable values.
    ///
    /// `None` while loading, after an error, or when the temperature slot
    /// does not hold a number.
    pub fn readout(&self, translations: &TranslationSet) -> Option<Readout> {
        if self.city.is_empty()
            || self.description.is_empty()
            || self.city == translations.get(TranslationKey::Loading)
            || self.city == ERROR_CITY
        {
            return None;
        }

        let temperature: f64 = self.temperature.replace("°C", "").trim().parse().ok()?;
        if !temperature.is_finite() {
            return None;
        }

        Some(Readout {
            city: self.city.clone(),
            description: self.description.clone(),
            temperature,
        })
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Incremented on every change except clock updates.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn icon(&self) -> &IconSlot {
        &self.icon
    }

    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn humidity(&self) -> &str {
        &self.humidity
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn input_placeholder(&self) -> &str {
        &self.input_placeholder
    }

    /// Text of a tagged label, if `key` tags one.
    pub fn label(&self, key: TranslationKey) -> Option<&str> {
        self.labels.get(&key).map(String::as_str)
    }
}
