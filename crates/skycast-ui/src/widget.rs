//! The widget's event dispatcher.
//!
//! `Widget` owns the active language, the display slots and the speech
//! announcer. Front-ends feed it [`UiEvent`]s and carry out the
//! [`Effect`]s it returns; it never touches the network itself.
//!
//! Each fetch is tagged with a generation number. Only the result of the
//! most recent request is rendered, so a slow earlier response can no
//! longer overwrite a newer one.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use skycast_weather::{WeatherError, WeatherQuery, WeatherReading};

use crate::clock;
use crate::display::Display;
use crate::error_mapping::WeatherErrorExt;
use crate::i18n::{LanguageCode, TranslationKey, TranslationSet};
use crate::speech::SpeechAnnouncer;

/// Prefix for failures other than "not found".
pub const API_ERROR_PREFIX: &str = "API Error";

type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

/// Named UI events.
#[derive(Debug)]
pub enum UiEvent {
    /// Search form submitted with the raw input text
    Submit(String),
    /// Look up a query directly (startup default, coordinates)
    Search(WeatherQuery),
    /// Language selector changed
    LanguageChanged(LanguageCode),
    /// Voice button clicked
    VoiceClicked,
    /// One-second clock timer fired
    Tick,
    /// A fetch finished
    FetchDone {
        generation: u64,
        result: Result<WeatherReading, WeatherError>,
    },
}

/// Side effects the event loop must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch `query` and report back with `generation`
    FetchWeather { query: WeatherQuery, generation: u64 },
}

pub struct Widget {
    language: LanguageCode,
    display: Display,
    announcer: SpeechAnnouncer,
    clock: Clock,
    generation: u64,
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("language", &self.language)
            .field("display", &self.display)
            .field("announcer", &self.announcer)
            .field("generation", &self.generation)
            .finish()
    }
}

impl Widget {
    /// Build the widget in `language` and render the clock once.
    pub fn new(language: LanguageCode, announcer: SpeechAnnouncer) -> Self {
        let mut widget = Self {
            language,
            display: Display::new(TranslationSet::for_language(language)),
            announcer,
            clock: Arc::new(|| Local::now().fixed_offset()),
            generation: 0,
        };
        widget.tick();
        widget
    }

    /// Replace the wall-clock source.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<FixedOffset> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self.tick();
        self
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Generation of the most recent fetch (0 before the first one).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn translations(&self) -> &'static TranslationSet {
        TranslationSet::for_language(self.language)
    }

    pub fn handle(&mut self, event: UiEvent) -> Option<Effect> {
        match event {
            UiEvent::Submit(input) => self.submit(&input),
            UiEvent::Search(query) => Some(self.fetch_weather(query)),
            UiEvent::LanguageChanged(language) => {
                self.translate(language);
                None
            }
            UiEvent::VoiceClicked => {
                self.voice_clicked();
                None
            }
            UiEvent::Tick => {
                self.tick();
                None
            }
            UiEvent::FetchDone { generation, result } => {
                self.fetch_done(generation, result);
                None
            }
        }
    }

    /// Switch language: relabel everything, clear the error and refresh the
    /// clock so the greeting follows the new language.
    pub fn translate(&mut self, language: LanguageCode) {
        tracing::debug!("Switching language to {}", language);
        self.language = language;
        let translations = self.translations();
        self.display.apply_translations(translations);
        self.tick();
    }

    /// Form submit: trimmed, ignored when empty.
    pub fn submit(&mut self, input: &str) -> Option<Effect> {
        let city = input.trim();
        if city.is_empty() {
            return None;
        }
        Some(self.fetch_weather(WeatherQuery::city(city)))
    }

    /// Reset the weather slots and issue a new request generation.
    pub fn fetch_weather(&mut self, query: WeatherQuery) -> Effect {
        self.generation += 1;
        let translations = self.translations();
        self.display.show_loading(translations);
        tracing::info!("Fetching weather for {} (#{})", query, self.generation);
        Effect::FetchWeather {
            query,
            generation: self.generation,
        }
    }

    pub fn fetch_done(&mut self, generation: u64, result: Result<WeatherReading, WeatherError>) {
        if generation != self.generation {
            tracing::debug!(
                "Discarding stale weather result #{} (current #{})",
                generation,
                self.generation
            );
            return;
        }

        match result {
            Ok(reading) => {
                self.display.show_reading(&reading);
                self.announcer.speak(
                    self.language,
                    &reading.city,
                    &reading.description,
                    reading.temperature,
                );
            }
            Err(err) => {
                let message = self.error_text(&err);
                let app_error = err.into_app_error();
                tracing::error!("Fetch error: {} ({})", app_error, app_error.user_message());
                self.display.show_error(message);
            }
        }
    }

    fn error_text(&self, err: &WeatherError) -> String {
        let generic = self.translations().get(TranslationKey::ErrorApi);
        if err.is_not_found() {
            return generic.to_string();
        }
        let raw = err.raw_message().unwrap_or_else(|| generic.to_string());
        format!("{}: {}", API_ERROR_PREFIX, raw)
    }

    /// Speak whatever the slots currently show, unless they hold a
    /// placeholder or the error sentinel.
    pub fn voice_clicked(&mut self) {
        match self.display.readout(self.translations()) {
            Some(readout) => self.announcer.speak(
                self.language,
                &readout.city,
                &readout.description,
                readout.temperature,
            ),
            None => tracing::debug!("Nothing to speak yet"),
        }
    }

    pub fn tick(&mut self) {
        let now = (self.clock)();
        self.display.set_clock(clock::tick(&now, self.language));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Phase;
    use chrono::TimeZone;

    fn fixed(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, hour, 0, 0)
            .unwrap()
    }

    fn widget() -> Widget {
        Widget::new(LanguageCode::En, SpeechAnnouncer::silent()).with_clock(|| fixed(9))
    }

    fn reading(city: &str, temperature: i64) -> WeatherReading {
        WeatherReading {
            city: city.into(),
            temperature,
            humidity: 40.0,
            description: "few clouds".into(),
            icon_code: "02d".into(),
        }
    }

    #[test]
    fn test_submit_ignores_blank_input() {
        let mut w = widget();
        assert_eq!(w.handle(UiEvent::Submit("   ".into())), None);
        assert_eq!(w.generation(), 0);
    }

    #[test]
    fn test_submit_trims_and_fetches() {
        let mut w = widget();
        let effect = w.handle(UiEvent::Submit("  Lima \n".into()));
        assert_eq!(
            effect,
            Some(Effect::FetchWeather {
                query: WeatherQuery::city("Lima"),
                generation: 1
            })
        );
        assert_eq!(w.display().city(), "Loading...");
    }

    #[test]
    fn test_latest_request_wins() {
        let mut w = widget();
        w.handle(UiEvent::Submit("Lima".into()));
        w.handle(UiEvent::Submit("Quito".into()));

        // Quito resolves first, then the slower Lima response arrives.
        w.handle(UiEvent::FetchDone {
            generation: 2,
            result: Ok(reading("Quito", 12)),
        });
        w.handle(UiEvent::FetchDone {
            generation: 1,
            result: Ok(reading("Lima", 22)),
        });

        assert_eq!(w.display().city(), "Quito");
        assert_eq!(w.display().temperature(), "12°C");
    }

    #[test]
    fn test_stale_result_does_not_replace_loading() {
        let mut w = widget();
        w.handle(UiEvent::Submit("Lima".into()));
        w.handle(UiEvent::Submit("Quito".into()));
        w.handle(UiEvent::FetchDone {
            generation: 1,
            result: Ok(reading("Lima", 22)),
        });
        assert_eq!(w.display().phase(), Phase::Loading);
    }

    #[test]
    fn test_api_error_prefix() {
        let mut w = widget();
        w.handle(UiEvent::Submit("Lima".into()));
        w.handle(UiEvent::FetchDone {
            generation: 1,
            result: Err(WeatherError::Http {
                status: 401,
                message: Some("Invalid API key".into()),
            }),
        });
        assert_eq!(w.display().city(), "Error");
        assert_eq!(w.display().error(), "API Error: Invalid API key");
    }

    #[test]
    fn test_http_error_without_message_uses_generic_text() {
        let mut w = widget();
        w.handle(UiEvent::Submit("Lima".into()));
        w.handle(UiEvent::FetchDone {
            generation: 1,
            result: Err(WeatherError::Http {
                status: 500,
                message: None,
            }),
        });
        assert_eq!(
            w.display().error(),
            "API Error: City not found or API error. Please try again."
        );
    }

    #[test]
    fn test_not_found_is_localized() {
        let mut w = widget();
        w.translate(LanguageCode::Es);
        w.handle(UiEvent::Submit("Atlantis".into()));
        w.handle(UiEvent::FetchDone {
            generation: 1,
            result: Err(WeatherError::Http {
                status: 404,
                message: Some("city not found".into()),
            }),
        });
        assert_eq!(
            w.display().error(),
            "Ciudad no encontrada o error de API. Por favor, inténtelo de nuevo."
        );
    }

    #[test]
    fn test_language_change_refreshes_greeting() {
        let mut w = widget();
        assert_eq!(w.display().greeting(), "Good morning!");
        w.handle(UiEvent::LanguageChanged(LanguageCode::Es));
        assert_eq!(w.language(), LanguageCode::Es);
        assert_eq!(w.display().greeting(), "¡Buenos días!");
        assert_eq!(w.display().date(), "viernes, 16 de octubre de 2026");
    }

    #[test]
    fn test_tick_reads_clock() {
        let hour = Arc::new(std::sync::atomic::AtomicU32::new(9));
        let source = hour.clone();
        let mut w = Widget::new(LanguageCode::En, SpeechAnnouncer::silent())
            .with_clock(move || fixed(source.load(std::sync::atomic::Ordering::SeqCst)));
        assert_eq!(w.display().time(), "09:00:00");

        hour.store(22, std::sync::atomic::Ordering::SeqCst);
        w.handle(UiEvent::Tick);
        assert_eq!(w.display().time(), "22:00:00");
        assert_eq!(w.display().greeting(), "Hello there!");
    }
}
