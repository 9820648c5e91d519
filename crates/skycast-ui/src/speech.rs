//! Spoken weather readouts.
//!
//! Speech is an optional capability: the announcer holds
//! `Option<Arc<dyn SpeechSynthesizer>>` and degrades to a logged warning
//! when no synthesizer is available. The bundled [`CommandSynthesizer`]
//! drives an espeak-ng compatible CLI and plays queued utterances one at a
//! time on a background task.

use std::fmt;
use std::sync::Arc;

use skycast_core::SpeechError;
use tokio::sync::mpsc;

use crate::i18n::LanguageCode;

pub const DEFAULT_PITCH: f32 = 1.0;
pub const DEFAULT_RATE: f32 = 1.0;

/// One sentence queued for playback.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// BCP-47 tag, e.g. "es-ES"
    pub lang: &'static str,
    pub pitch: f32,
    pub rate: f32,
}

/// Platform text-to-speech. `speak` must not block; playback order is the
/// implementation's concern.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, utterance: Utterance);
}

/// Sentence spoken for a reading.
pub fn compose(
    language: LanguageCode,
    city: &str,
    description: &str,
    temperature: impl fmt::Display,
) -> String {
    match language {
        LanguageCode::Es => format!(
            "El tiempo actual en {} es de {}, con una temperatura de {} grados centígrados.",
            city, description, temperature
        ),
        LanguageCode::En => format!(
            "The current weather in {} is {}, with a temperature of {} degrees Celsius.",
            city, description, temperature
        ),
    }
}

#[derive(Clone)]
pub struct SpeechAnnouncer {
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    pitch: f32,
    rate: f32,
}

impl fmt::Debug for SpeechAnnouncer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechAnnouncer")
            .field("available", &self.is_available())
            .field("pitch", &self.pitch)
            .field("rate", &self.rate)
            .finish()
    }
}

impl SpeechAnnouncer {
    pub fn new(synthesizer: Option<Arc<dyn SpeechSynthesizer>>) -> Self {
        Self {
            synthesizer,
            pitch: DEFAULT_PITCH,
            rate: DEFAULT_RATE,
        }
    }

    /// Announcer with no speech capability.
    pub fn silent() -> Self {
        Self::new(None)
    }

    pub fn with_voice(mut self, pitch: f32, rate: f32) -> Self {
        self.pitch = pitch;
        self.rate = rate;
        self
    }

    pub fn is_available(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// Queue a spoken readout. Fire-and-forget.
    pub fn speak(
        &self,
        language: LanguageCode,
        city: &str,
        description: &str,
        temperature: impl fmt::Display,
    ) {
        let Some(synthesizer) = &self.synthesizer else {
            tracing::warn!("Speech synthesis not available; skipping readout");
            return;
        };

        synthesizer.speak(Utterance {
            text: compose(language, city, description, temperature),
            lang: language.speech_tag(),
            pitch: self.pitch,
            rate: self.rate,
        });
    }
}

/// Speaks through an external espeak-ng compatible program.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    tx: mpsc::UnboundedSender<Utterance>,
}

impl CommandSynthesizer {
    /// Check that `program` runs and, if so, start the playback queue.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(program: &str) -> Result<Self, SpeechError> {
        check_available(program)?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Utterance>();
        tracing::info!("Speech synthesis via '{}'", program);
        let program = program.to_string();
        tokio::spawn(async move {
            while let Some(utterance) = rx.recv().await {
                if let Err(e) = play(&program, &utterance).await {
                    tracing::warn!("Speech playback failed: {}", e);
                }
            }
            tracing::debug!("Speech queue closed");
        });

        Ok(Self { tx })
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn speak(&self, utterance: Utterance) {
        if self.tx.send(utterance).is_err() {
            tracing::warn!("Speech queue is closed; utterance dropped");
        }
    }
}

fn check_available(program: &str) -> Result<(), SpeechError> {
    std::process::Command::new(program)
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|_| ())
        .map_err(|_| SpeechError::Unavailable(program.to_string()))
}

async fn play(program: &str, utterance: &Utterance) -> Result<(), SpeechError> {
    let status = tokio::process::Command::new(program)
        .args(command_args(utterance))
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await
        .map_err(|e| SpeechError::Failed(e.to_string()))?;

    if !status.success() {
        return Err(SpeechError::Failed(status.to_string()));
    }
    Ok(())
}

/// espeak-ng voice for a BCP-47 tag.
fn espeak_voice(tag: &str) -> String {
    match tag {
        "es-ES" => "es".to_string(),
        other => other.to_lowercase(),
    }
}

/// Map neutral 1.0 pitch/rate onto espeak-ng's defaults (50, 175 wpm).
fn command_args(utterance: &Utterance) -> Vec<String> {
    let pitch = (utterance.pitch * 50.0).round().clamp(0.0, 99.0) as u32;
    let rate = (utterance.rate * 175.0).round().clamp(80.0, 450.0) as u32;
    vec![
        "-v".to_string(),
        espeak_voice(utterance.lang),
        "-p".to_string(),
        pitch.to_string(),
        "-s".to_string(),
        rate.to_string(),
        utterance.text.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        spoken: Mutex<Vec<Utterance>>,
    }

    impl SpeechSynthesizer for Recorder {
        fn speak(&self, utterance: Utterance) {
            self.spoken.lock().push(utterance);
        }
    }

    #[test]
    fn test_compose_english() {
        assert_eq!(
            compose(LanguageCode::En, "Lima", "clear sky", 22),
            "The current weather in Lima is clear sky, with a temperature of 22 degrees Celsius."
        );
    }

    #[test]
    fn test_compose_spanish() {
        assert_eq!(
            compose(LanguageCode::Es, "Lima", "cielo claro", 22),
            "El tiempo actual en Lima es de cielo claro, con una temperatura de 22 grados centígrados."
        );
    }

    #[test]
    fn test_speak_tags_language_and_voice() {
        let recorder = Arc::new(Recorder::default());
        let announcer = SpeechAnnouncer::new(Some(recorder.clone()));

        announcer.speak(LanguageCode::Es, "Lima", "cielo claro", 22);

        let spoken = recorder.spoken.lock();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].lang, "es-ES");
        assert_eq!(spoken[0].pitch, 1.0);
        assert_eq!(spoken[0].rate, 1.0);
        assert!(spoken[0].text.starts_with("El tiempo actual en Lima"));
    }

    #[test]
    fn test_each_call_enqueues() {
        let recorder = Arc::new(Recorder::default());
        let announcer = SpeechAnnouncer::new(Some(recorder.clone()));

        announcer.speak(LanguageCode::En, "Lima", "clear sky", 22);
        announcer.speak(LanguageCode::En, "Quito", "mist", 12);

        assert_eq!(recorder.spoken.lock().len(), 2);
    }

    #[test]
    fn test_silent_announcer_is_a_no_op() {
        let announcer = SpeechAnnouncer::silent();
        assert!(!announcer.is_available());
        announcer.speak(LanguageCode::En, "Lima", "clear sky", 22);
    }

    #[test]
    fn test_command_args_for_neutral_voice() {
        let utterance = Utterance {
            text: "hola".into(),
            lang: "es-ES",
            pitch: DEFAULT_PITCH,
            rate: DEFAULT_RATE,
        };
        assert_eq!(
            command_args(&utterance),
            vec!["-v", "es", "-p", "50", "-s", "175", "hola"]
        );
        assert_eq!(espeak_voice("en-US"), "en-us");
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let err = check_available("skycast-no-such-tts-binary").unwrap_err();
        assert!(matches!(err, SpeechError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_starts_queue_for_installed_program() {
        let synthesizer = CommandSynthesizer::spawn("true").unwrap();
        let announcer = SpeechAnnouncer::new(Some(Arc::new(synthesizer)));

        assert!(announcer.is_available());
        announcer.speak(LanguageCode::En, "Lima", "clear sky", 22);
    }
}
