//! Events emitted by scenes for the platform layer

use glam::Vec2;

use super::assets::TextureKey;
use super::scene::SceneId;

/// Sound effects the audio layer knows how to synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Any button press
    ButtonClick,
    /// Lobby start refused
    Warning,
    /// Pre-reveal "shhh"
    Shhh,
    RevealCrewmate,
    RevealImpostor,
    Kill,
    Report,
    EmergencyMeeting,
}

/// Side effects requested by the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PlaySound(SoundEffect),
    /// Preferences changed and should be written to storage
    SavePreferences,
    /// Build a texture for the renderer
    LoadTexture(TextureKey),
    /// Remove the HTML loading element
    HideLoadingScreen,
    SceneChanged(SceneId),
    /// Create the player-name text field
    ShowNameInput { value: String, center: Vec2, width: f32 },
    HideNameInput,
    /// Master volume changed
    VolumeChanged(f32),
}
