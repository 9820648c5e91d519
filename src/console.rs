//! Line-oriented terminal front-end: command parsing and panel rendering.

use skycast_ui::{Display, LanguageCode, TranslationKey, UiEvent};
use skycast_weather::WeatherQuery;

/// What a line of input asks for.
#[derive(Debug)]
pub enum Command {
    Event(UiEvent),
    Quit,
    /// Unrecognized command, with a hint to print
    Invalid(String),
}

pub const HELP: &str = "Type a city name and press Enter. Commands: \
:lang <en|es>, :speak, :at <lat> <lon>, :quit";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Event(UiEvent::Submit(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    match parts.next() {
        Some("quit") | Some("q") => Command::Quit,
        Some("speak") => Command::Event(UiEvent::VoiceClicked),
        Some("lang") => match parts.next().and_then(LanguageCode::from_code) {
            Some(language) => Command::Event(UiEvent::LanguageChanged(language)),
            None => Command::Invalid("usage: :lang <en|es>".to_string()),
        },
        Some("at") => {
            let coords: Vec<f64> = parts.filter_map(|p| p.parse().ok()).collect();
            match coords.as_slice() {
                [latitude, longitude]
                    if (-90.0..=90.0).contains(latitude)
                        && (-180.0..=180.0).contains(longitude) =>
                {
                    Command::Event(UiEvent::Search(WeatherQuery::Coordinates {
                        latitude: *latitude,
                        longitude: *longitude,
                    }))
                }
                _ => Command::Invalid("usage: :at <lat> <lon>".to_string()),
            }
        }
        _ => Command::Invalid(HELP.to_string()),
    }
}

fn label(display: &Display, key: TranslationKey) -> &str {
    display.label(key).unwrap_or_default()
}

pub fn render_panel(display: &Display, language: LanguageCode) -> String {
    let mut lines = vec![
        format!("{}  {}", display.greeting(), display.date()),
        display.time().to_string(),
        String::new(),
        display.city().to_string(),
    ];

    if display.icon().visible {
        lines.push(format!("[{}] {}", display.icon().alt, display.icon().url));
    }

    lines.push(format!(
        "{} {}",
        label(display, TranslationKey::TempLabel),
        display.temperature()
    ));
    lines.push(format!(
        "{} {}",
        label(display, TranslationKey::DescLabel),
        display.description()
    ));
    lines.push(format!(
        "{} {}",
        label(display, TranslationKey::HumidityLabel),
        display.humidity()
    ));

    if !display.error().is_empty() {
        lines.push(format!("! {}", display.error()));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} {} | [{}] | [{}] | {}",
        label(display, TranslationKey::LangLabel),
        language,
        label(display, TranslationKey::SearchBtn),
        label(display, TranslationKey::VoiceBtnText),
        display.input_placeholder(),
    ));

    lines.join("\n")
}
