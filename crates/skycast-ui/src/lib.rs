//! Weather widget model for SkyCast: localization, display slots, clock,
//! spoken readouts and the event dispatcher tying them together.

pub mod clock;
pub mod display;
pub mod error_mapping;
pub mod i18n;
pub mod services;
pub mod speech;
pub mod widget;

pub use display::{Display, IconSlot, Phase, Readout};
pub use i18n::{LanguageCode, TranslationKey, TranslationSet};
pub use services::{request_fetch, WeatherServiceMessage};
pub use speech::{CommandSynthesizer, SpeechAnnouncer, SpeechSynthesizer, Utterance};
pub use widget::{Effect, UiEvent, Widget};
