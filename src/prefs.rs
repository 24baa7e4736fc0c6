//! Player preferences
//!
//! Persisted as flat LocalStorage strings, separate from any session state.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::i18n::{Language, TextKey, translate};
use crate::platform::KeyValueStore;

pub const NAME_KEY: &str = "among-us-player-name";
pub const LANGUAGE_KEY: &str = "among-us-language";
pub const VOLUME_KEY: &str = "among-us-volume";
pub const CUSTOMIZATION_KEY: &str = "among-us-customization";

/// Longest accepted player name
pub const MAX_NAME_LEN: usize = 12;
pub const DEFAULT_NAME: &str = "Player";
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Lobby look for the local player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    pub body_color: u32,
    pub backpack_color: u32,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            body_color: 0xC51111,
            backpack_color: 0x6B2FBB,
        }
    }
}

/// Persisted player preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub player_name: String,
    pub language: Language,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    pub customization: Customization,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_NAME.to_string(),
            language: Language::English,
            volume: DEFAULT_VOLUME,
            customization: Customization::default(),
        }
    }
}

impl Preferences {
    /// Load preferences, falling back to defaults for missing or invalid values
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut prefs = Self::default();

        match store.get(NAME_KEY) {
            Ok(Some(name)) => {
                if let Some(name) = sanitize_name(&name) {
                    prefs.player_name = name;
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("{e}"),
        }

        match store.get(LANGUAGE_KEY) {
            Ok(Some(code)) => {
                prefs.language = Language::from_code(&code).unwrap_or_default();
            }
            Ok(None) => {}
            Err(e) => log::warn!("{e}"),
        }

        match store.get(VOLUME_KEY) {
            Ok(Some(raw)) => {
                if let Ok(v) = raw.trim().parse::<f32>() {
                    if v.is_finite() {
                        prefs.volume = v.clamp(0.0, 1.0);
                    }
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("{e}"),
        }

        match store.get(CUSTOMIZATION_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(c) => prefs.customization = c,
                Err(e) => log::warn!("Ignoring invalid customization: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("{e}"),
        }

        log::info!(
            "Loaded preferences (name: {}, language: {})",
            prefs.player_name,
            prefs.language.code()
        );
        prefs
    }

    /// Write every preference back to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(NAME_KEY, &self.player_name)?;
        store.set(LANGUAGE_KEY, self.language.code())?;
        store.set(VOLUME_KEY, &format!("{:.1}", self.volume))?;
        let json = serde_json::to_string(&self.customization).map_err(|e| {
            StorageError::Encode {
                key: CUSTOMIZATION_KEY.to_string(),
                reason: e.to_string(),
            }
        })?;
        store.set(CUSTOMIZATION_KEY, &json)?;
        log::info!("Preferences saved");
        Ok(())
    }

    /// Set the player name; blank names are rejected
    pub fn set_player_name(&mut self, name: &str) -> bool {
        match sanitize_name(name) {
            Some(name) => {
                self.player_name = name;
                true
            }
            None => false,
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Translate a UI string into the preferred language
    pub fn text(&self, key: TextKey) -> &'static str {
        translate(self.language, key)
    }
}

/// Trim and truncate a player name, rejecting blanks
pub fn sanitize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_LEN).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_defaults_when_empty() {
        let store = MemoryStore::new();
        let prefs = Preferences::load(&store);
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.player_name, "Player");
        assert!((prefs.volume - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut prefs = Preferences::default();
        assert!(prefs.set_player_name("  Kaan  "));
        prefs.set_language(Language::Turkish);
        prefs.set_volume(0.3);
        prefs.customization.body_color = 0x00ffff;
        prefs.save(&mut store).unwrap();

        assert_eq!(store.get(NAME_KEY).unwrap().as_deref(), Some("Kaan"));
        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("tr"));
        assert_eq!(store.get(VOLUME_KEY).unwrap().as_deref(), Some("0.3"));

        let loaded = Preferences::load(&store);
        assert_eq!(loaded.player_name, "Kaan");
        assert_eq!(loaded.language, Language::Turkish);
        assert!((loaded.volume - 0.3).abs() < 1e-6);
        assert_eq!(loaded.customization.body_color, 0x00ffff);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(LANGUAGE_KEY, "klingon").unwrap();
        store.set(VOLUME_KEY, "loud").unwrap();
        store.set(CUSTOMIZATION_KEY, "{not json").unwrap();
        store.set(NAME_KEY, "   ").unwrap();

        let prefs = Preferences::load(&store);
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_volume_clamped() {
        let mut store = MemoryStore::new();
        store.set(VOLUME_KEY, "7").unwrap();
        assert_eq!(Preferences::load(&store).volume, 1.0);
    }

    #[test]
    fn test_name_rules() {
        let mut prefs = Preferences::default();
        assert!(!prefs.set_player_name("   "));
        assert_eq!(prefs.player_name, "Player");
        assert!(prefs.set_player_name("AVeryLongPlayerName"));
        assert_eq!(prefs.player_name.chars().count(), MAX_NAME_LEN);
    }
}
