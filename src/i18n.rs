//! Translated UI strings
//!
//! Only the menu chrome is translated; in-game banners stay English.

use serde::{Deserialize, Serialize};

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    Turkish,
}

impl Language {
    /// Storage code ("en" / "tr")
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Turkish => "tr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Language::English),
            "tr" => Some(Language::Turkish),
            _ => None,
        }
    }

    /// Name shown on the language picker
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Turkish => "Türkçe",
        }
    }

    pub const ALL: [Language; 2] = [Language::English, Language::Turkish];
}

/// Translatable string keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Play,
    Local,
    Settings,
    PlayerName,
    Language,
    Volume,
    Back,
    Apply,
    LocalLobby,
    Start,
}

/// Look up a key in the given language
pub fn translate(lang: Language, key: TextKey) -> &'static str {
    match lang {
        Language::English => english(key),
        Language::Turkish => turkish(key),
    }
}

fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::Play => "Play",
        TextKey::Local => "Local",
        TextKey::Settings => "Settings",
        TextKey::PlayerName => "Player Name",
        TextKey::Language => "Language",
        TextKey::Volume => "Volume",
        TextKey::Back => "Back",
        TextKey::Apply => "Apply",
        TextKey::LocalLobby => "Local Lobby",
        TextKey::Start => "Start Game",
    }
}

fn turkish(key: TextKey) -> &'static str {
    match key {
        TextKey::Play => "Oyna",
        TextKey::Local => "Yerel",
        TextKey::Settings => "Ayarlar",
        TextKey::PlayerName => "Oyuncu Adı",
        TextKey::Language => "Dil",
        TextKey::Volume => "Ses",
        TextKey::Back => "Geri",
        TextKey::Apply => "Uygula",
        TextKey::LocalLobby => "Yerel Lobi",
        TextKey::Start => "Oyunu Başlat",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code(" TR "), Some(Language::Turkish));
        assert_eq!(Language::from_code("de"), None);
    }

    #[test]
    fn test_translations() {
        assert_eq!(translate(Language::English, TextKey::LocalLobby), "Local Lobby");
        assert_eq!(translate(Language::Turkish, TextKey::Start), "Oyunu Başlat");
        assert_eq!(translate(Language::Turkish, TextKey::Back), "Geri");
    }
}
