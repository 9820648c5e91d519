mod console;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use skycast_core::{AppError, Config, ConfigError};
use skycast_ui::clock::TICK_INTERVAL;
use skycast_ui::{
    request_fetch, CommandSynthesizer, Effect, SpeechAnnouncer, SpeechSynthesizer, UiEvent,
    WeatherServiceMessage, Widget,
};
use skycast_weather::{WeatherProvider, WeatherQuery};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use console::Command;

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

fn build_announcer(config: &Config) -> SpeechAnnouncer {
    if !config.speech.enabled {
        tracing::info!("Speech disabled in config");
        return SpeechAnnouncer::silent();
    }

    let synthesizer = match CommandSynthesizer::spawn(&config.speech.command) {
        Ok(s) => Some(Arc::new(s) as Arc<dyn SpeechSynthesizer>),
        Err(e) => {
            let e: AppError = e.into();
            tracing::warn!("{} ({})", e, e.user_message());
            None
        }
    };

    SpeechAnnouncer::new(synthesizer).with_voice(config.speech.pitch, config.speech.rate)
}

fn build_provider(config: &Config) -> Result<WeatherProvider, AppError> {
    let timeout = match config.weather.request_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let mut provider = WeatherProvider::with_timeout(
        &config.weather.api_url,
        config.weather.effective_api_key(),
        timeout,
    )
    .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    provider.set_units(config.weather.units.clone());
    Ok(provider)
}

async fn run() -> Result<(), AppError> {
    let (config, _validation) = Config::load_validated().map_err(|e| {
        AppError::Config(ConfigError::Invalid(format!("{:#}", e)))
    })?;

    let provider = Arc::new(build_provider(&config)?);
    let mut widget = Widget::new(config.ui.language, build_announcer(&config));
    let (tx, mut rx) = mpsc::unbounded_channel::<WeatherServiceMessage>();

    let dispatch = |widget: &mut Widget, event: UiEvent| {
        if let Some(Effect::FetchWeather { query, generation }) = widget.handle(event) {
            request_fetch(&tx, provider.clone(), query, generation);
        }
    };

    let default_city = config.weather.default_city.trim();
    if !default_city.is_empty() {
        dispatch(&mut widget, UiEvent::Search(WeatherQuery::city(default_city)));
    }

    println!("{}", console::HELP);
    let mut shown_revision = widget.display().revision();
    println!("{}", console::render_panel(widget.display(), widget.language()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                widget.handle(UiEvent::Tick);
            }
            Some(WeatherServiceMessage::FetchDone { generation, result }) = rx.recv() => {
                widget.handle(UiEvent::FetchDone { generation, result });
            }
            line = lines.next_line() => {
                match line? {
                    None => break,
                    Some(line) => match console::parse_command(&line) {
                        Command::Quit => break,
                        Command::Invalid(hint) => println!("{}", hint),
                        Command::Event(event) => dispatch(&mut widget, event),
                    },
                }
            }
        }

        if widget.display().revision() != shown_revision {
            shown_revision = widget.display().revision();
            println!("\n{}", console::render_panel(widget.display(), widget.language()));
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}
