//! Crewmate - a local social-deduction party game
//!
//! Core modules:
//! - `sim`: Deterministic scene simulation (characters, lobby, dropship, map)
//! - `renderer`: WebGPU rendering of procedural sprites
//! - `ui`: DOM text overlay (labels, name input)
//! - `platform`: Storage and viewport abstraction
//! - `prefs`: Player preferences persisted in LocalStorage
//! - `i18n`: English/Turkish string table

pub mod error;
pub mod i18n;
pub mod platform;
pub mod prefs;
pub mod renderer;
pub mod sim;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use error::{BootError, StorageError};
pub use i18n::{Language, TextKey};
pub use prefs::{Customization, Preferences};

/// Game configuration constants
pub mod consts {
    /// Logical game resolution (all scene coordinates use this space)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Fixed simulation timestep (60 Hz; movement speeds are per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Character texture frame size before scaling
    pub const CHARACTER_FRAME: f32 = 64.0;
    /// Name tag sits this far above the character's center
    pub const NAME_TAG_OFFSET: f32 = 40.0;
    /// Map walking speed (pixels per frame at full direction)
    pub const MAP_SPEED: f32 = 2.0;
    /// Dropship walking speed (pixels per frame)
    pub const DROPSHIP_SPEED: f32 = 3.0;

    /// Range for use/kill/report interactions
    pub const INTERACTION_DISTANCE: f32 = 80.0;

    /// Lobby limits
    pub const MAX_PLAYERS: usize = 10;
    pub const MIN_PLAYERS: usize = 4;
    pub const AI_PLAYER_COUNT: usize = 5;

    /// Timings (seconds)
    pub const SEATED_DURATION: f32 = 2.0;
    pub const SHHH_DURATION: f32 = 2.0;
    pub const ROLE_REVEAL_DURATION: f32 = 5.0;
    pub const AI_DECISION_INTERVAL: f32 = 2.0;
    pub const TOAST_DURATION: f32 = 3.0;
}

/// Split a packed 0xRRGGBB color into normalized RGBA
#[inline]
pub fn rgb_to_rgba(color: u32, alpha: f32) -> [f32; 4] {
    let r = ((color >> 16) & 0xff) as f32 / 255.0;
    let g = ((color >> 8) & 0xff) as f32 / 255.0;
    let b = (color & 0xff) as f32 / 255.0;
    [r, g, b, alpha]
}

/// Format a packed color as a CSS hex string
pub fn css_color(color: u32) -> String {
    format!("#{:06x}", color & 0xff_ffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_rgba() {
        let c = rgb_to_rgba(0xff8000, 0.5);
        assert!((c[0] - 1.0).abs() < 1e-6);
        assert!((c[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 0.5);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(0x3498db), "#3498db");
        assert_eq!(css_color(0), "#000000");
    }
}
