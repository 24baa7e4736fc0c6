//! Texture keys and the preload manifest
//!
//! All textures are generated procedurally by the renderer; the simulation
//! only refers to them by key.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::CharacterState;
use crate::consts::{CHARACTER_FRAME, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Cosmetic hats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hat {
    Eggscellent,
    GiftWrapped,
    Knighted,
    Pompous,
    Punkin,
}

impl Hat {
    pub const ALL: [Hat; 5] = [
        Hat::Eggscellent,
        Hat::GiftWrapped,
        Hat::Knighted,
        Hat::Pompous,
        Hat::Punkin,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Hat::Eggscellent => "eggscellent",
            Hat::GiftWrapped => "gift_wrapped",
            Hat::Knighted => "knighted",
            Hat::Pompous => "pompous",
            Hat::Punkin => "punkin",
        }
    }
}

/// Cosmetic outfits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skin {
    Flashy,
    Officer,
    Suited,
}

impl Skin {
    pub const ALL: [Skin; 3] = [Skin::Flashy, Skin::Officer, Skin::Suited];

    pub fn key(&self) -> &'static str {
        match self {
            Skin::Flashy => "flashy",
            Skin::Officer => "officer",
            Skin::Suited => "suited",
        }
    }
}

/// Companion pets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pet {
    MiniCrewmate,
    Bedcrab,
    Robot,
}

impl Pet {
    pub const ALL: [Pet; 3] = [Pet::MiniCrewmate, Pet::Bedcrab, Pet::Robot];

    pub fn key(&self) -> &'static str {
        match self {
            Pet::MiniCrewmate => "mini_crewmate",
            Pet::Bedcrab => "bedcrab",
            Pet::Robot => "robot",
        }
    }
}

/// Step through `items` after `current`; `None` comes before the first item
/// and follows the last one.
pub fn cycle<T: Copy + PartialEq>(items: &[T], current: Option<T>) -> Option<T> {
    match current.and_then(|c| items.iter().position(|i| *i == c)) {
        None => items.first().copied(),
        Some(i) => items.get(i + 1).copied(),
    }
}

/// Map action buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Report,
    Use,
    Kill,
    Sabotage,
    Vent,
}

impl ActionKind {
    pub fn key(&self) -> &'static str {
        match self {
            ActionKind::Report => "report",
            ActionKind::Use => "use",
            ActionKind::Kill => "kill",
            ActionKind::Sabotage => "sabotage",
            ActionKind::Vent => "vent",
        }
    }
}

/// Every texture the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureKey {
    Character(CharacterState),
    Hat(Hat),
    Skin(Skin),
    Pet(Pet),
    Action(ActionKind),
    Logo,
    PlayButton,
    LocalButton,
    SettingsButton,
    StartButton,
    /// Small settings icon for scene corners
    Gear,
    EmergencyButton,
    Laptop,
    /// "Shhh" card shown before the role reveal
    Shhh,
    DropshipFloor,
    MapFloor,
    JoystickBase,
    JoystickHandle,
}

impl TextureKey {
    /// Unscaled texture size in pixels
    pub fn size(&self) -> Vec2 {
        match self {
            TextureKey::Character(_) => Vec2::splat(CHARACTER_FRAME),
            TextureKey::Hat(_) | TextureKey::Skin(_) | TextureKey::Pet(_) => Vec2::splat(64.0),
            TextureKey::Action(_) => Vec2::splat(100.0),
            TextureKey::Logo => Vec2::new(800.0, 300.0),
            TextureKey::PlayButton
            | TextureKey::LocalButton
            | TextureKey::SettingsButton
            | TextureKey::StartButton => Vec2::new(300.0, 100.0),
            TextureKey::Gear | TextureKey::EmergencyButton => Vec2::splat(100.0),
            TextureKey::Laptop => Vec2::new(80.0, 60.0),
            TextureKey::Shhh => Vec2::new(500.0, 400.0),
            TextureKey::DropshipFloor | TextureKey::MapFloor => {
                Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
            }
            TextureKey::JoystickBase => Vec2::splat(100.0),
            TextureKey::JoystickHandle => Vec2::splat(50.0),
        }
    }

    /// Stable name used in logs
    pub fn name(&self) -> String {
        match self {
            TextureKey::Character(state) => format!("character_{}", state.key()),
            TextureKey::Hat(hat) => format!("hat_{}", hat.key()),
            TextureKey::Skin(skin) => format!("skin_{}", skin.key()),
            TextureKey::Pet(pet) => format!("pet_{}", pet.key()),
            TextureKey::Action(action) => format!("{}_button", action.key()),
            TextureKey::Logo => "logo".to_string(),
            TextureKey::PlayButton => "play_button".to_string(),
            TextureKey::LocalButton => "local_button".to_string(),
            TextureKey::SettingsButton => "settings_button".to_string(),
            TextureKey::StartButton => "start_button".to_string(),
            TextureKey::Gear => "gear".to_string(),
            TextureKey::EmergencyButton => "emergency".to_string(),
            TextureKey::Laptop => "laptop".to_string(),
            TextureKey::Shhh => "shhh".to_string(),
            TextureKey::DropshipFloor => "dropship".to_string(),
            TextureKey::MapFloor => "map".to_string(),
            TextureKey::JoystickBase => "joystick_base".to_string(),
            TextureKey::JoystickHandle => "joystick_handle".to_string(),
        }
    }
}

/// Every texture loaded during preload, in load order
pub fn manifest() -> Vec<TextureKey> {
    let mut keys = vec![
        TextureKey::Logo,
        TextureKey::PlayButton,
        TextureKey::LocalButton,
        TextureKey::SettingsButton,
        TextureKey::StartButton,
        TextureKey::Gear,
        TextureKey::EmergencyButton,
        TextureKey::Laptop,
        TextureKey::Shhh,
        TextureKey::DropshipFloor,
        TextureKey::MapFloor,
        TextureKey::JoystickBase,
        TextureKey::JoystickHandle,
    ];
    keys.extend(CharacterState::ALL.iter().map(|s| TextureKey::Character(*s)));
    keys.extend(Hat::ALL.iter().map(|h| TextureKey::Hat(*h)));
    keys.extend(Skin::ALL.iter().map(|s| TextureKey::Skin(*s)));
    keys.extend(Pet::ALL.iter().map(|p| TextureKey::Pet(*p)));
    keys.extend(
        [
            ActionKind::Report,
            ActionKind::Use,
            ActionKind::Kill,
            ActionKind::Sabotage,
            ActionKind::Vent,
        ]
        .iter()
        .map(|a| TextureKey::Action(*a)),
    );
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_manifest_unique() {
        let keys = manifest();
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
        let names: HashSet<_> = keys.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), keys.len());
        assert!(names.contains("character_kill_animation"));
        assert!(names.contains("hat_punkin"));
    }

    #[test]
    fn test_cycle() {
        assert_eq!(cycle(&Hat::ALL, None), Some(Hat::Eggscellent));
        assert_eq!(cycle(&Hat::ALL, Some(Hat::Eggscellent)), Some(Hat::GiftWrapped));
        assert_eq!(cycle(&Hat::ALL, Some(Hat::Punkin)), None);
        assert_eq!(cycle::<Pet>(&[], None), None);
    }
}
