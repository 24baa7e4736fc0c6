//! Character bundles and their animation states
//!
//! A `CharacterSystem` belongs to a single scene and maps player ids to
//! characters: body, name tag, accessories, movement direction and the
//! tweens driving idle effects. Characters are kept in insertion order.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::assets::{Hat, Pet, Skin, TextureKey};
use super::color::needs_outline;
use super::tween::Tween;
use crate::consts::{CHARACTER_FRAME, NAME_TAG_OFFSET};

/// Unique player id within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player_{}", self.0)
    }
}

/// Animation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterState {
    Idle,
    Walk,
    Vent,
    VentPlayer,
    Ghost,
    Lobby,
    VoteIcon,
    Death,
    Ejected,
    KillAnimation,
}

/// Frame animation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAnimation {
    pub frames: u32,
    pub fps: f32,
    pub looped: bool,
}

impl CharacterState {
    pub const ALL: [CharacterState; 10] = [
        CharacterState::Idle,
        CharacterState::Walk,
        CharacterState::Vent,
        CharacterState::VentPlayer,
        CharacterState::Ghost,
        CharacterState::Lobby,
        CharacterState::VoteIcon,
        CharacterState::Death,
        CharacterState::Ejected,
        CharacterState::KillAnimation,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CharacterState::Idle => "idle",
            CharacterState::Walk => "walk",
            CharacterState::Vent => "vent",
            CharacterState::VentPlayer => "vent_player",
            CharacterState::Ghost => "ghost",
            CharacterState::Lobby => "lobby",
            CharacterState::VoteIcon => "vote_icon",
            CharacterState::Death => "death",
            CharacterState::Ejected => "ejected",
            CharacterState::KillAnimation => "kill_animation",
        }
    }

    pub fn texture(&self) -> TextureKey {
        TextureKey::Character(*self)
    }

    pub fn scale(&self) -> f32 {
        match self {
            CharacterState::Death | CharacterState::KillAnimation => 0.8,
            _ => 0.6,
        }
    }

    pub fn animation(&self) -> Option<FrameAnimation> {
        match self {
            CharacterState::Walk => Some(FrameAnimation {
                frames: 4,
                fps: 8.0,
                looped: true,
            }),
            CharacterState::KillAnimation => Some(FrameAnimation {
                frames: 8,
                fps: 12.0,
                looped: false,
            }),
            _ => None,
        }
    }

    pub fn breathing(&self) -> bool {
        matches!(self, CharacterState::Idle)
    }

    pub fn floating(&self) -> bool {
        matches!(self, CharacterState::Ghost)
    }

    /// Fixed alpha for the state, if any
    pub fn alpha(&self) -> Option<f32> {
        match self {
            CharacterState::Ghost => Some(0.7),
            _ => None,
        }
    }

    /// State entered when a one-time animation completes
    pub fn on_complete(&self) -> Option<CharacterState> {
        match self {
            CharacterState::KillAnimation => Some(CharacterState::Death),
            _ => None,
        }
    }
}

/// Options for `CharacterSystem::create_character`
#[derive(Debug, Clone)]
pub struct CharacterConfig {
    pub color: u32,
    pub name: String,
    pub state: CharacterState,
    pub is_local: bool,
    pub hat: Option<Hat>,
    pub skin: Option<Skin>,
    pub pet: Option<Pet>,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            color: 0xff0000,
            name: "Player".to_string(),
            state: CharacterState::Idle,
            is_local: false,
            hat: None,
            skin: None,
            pet: None,
        }
    }
}

/// Marker left where a player was killed
#[derive(Debug, Clone, PartialEq)]
pub struct Corpse {
    pub id: String,
    pub position: Vec2,
    pub color: u32,
    pub name: String,
    pub reported: bool,
}

/// Direction components below this count as standing still
const MOVE_THRESHOLD: f32 = 0.1;
/// Breathing stretches the body vertically by this much
const BREATH_AMOUNT: f32 = 0.02;
const BREATH_DURATION: f32 = 2.0;
const FLOAT_AMOUNT: f32 = 10.0;
const FLOAT_DURATION: f32 = 3.0;

pub const HAT_OFFSET: Vec2 = Vec2::new(0.0, -20.0);
pub const HAT_SCALE: f32 = 0.4;
pub const PET_OFFSET: Vec2 = Vec2::new(-25.0, 10.0);
pub const PET_SCALE: f32 = 0.3;
pub const DEFAULT_NAME_TAG_PX: f32 = 12.0;
pub const DEFAULT_SPEED: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Character {
    pub id: PlayerId,
    pub position: Vec2,
    pub color: u32,
    pub name: String,
    pub state: CharacterState,
    pub is_local: bool,
    pub hat: Option<Hat>,
    pub skin: Option<Skin>,
    pub pet: Option<Pet>,
    pub direction: Vec2,
    /// Pixels per frame at full direction
    pub speed: f32,
    pub is_dead: bool,
    pub is_ghost: bool,
    pub can_phase_walls: bool,
    pub scale: f32,
    pub alpha: f32,
    pub name_tag_px: f32,
    pub facing_left: bool,
    breathing: Option<Tween>,
    floating: Option<Tween>,
    anim_time: f32,
    anim_done: bool,
}

impl Character {
    fn new(id: PlayerId, position: Vec2, config: CharacterConfig) -> Self {
        let mut character = Self {
            id,
            position,
            color: config.color,
            name: config.name,
            state: config.state,
            is_local: config.is_local,
            hat: config.hat,
            skin: config.skin,
            pet: config.pet,
            direction: Vec2::ZERO,
            speed: DEFAULT_SPEED,
            is_dead: false,
            is_ghost: false,
            can_phase_walls: false,
            scale: config.state.scale(),
            alpha: 1.0,
            name_tag_px: DEFAULT_NAME_TAG_PX,
            facing_left: false,
            breathing: None,
            floating: None,
            anim_time: 0.0,
            anim_done: false,
        };
        character.apply_state();
        character
    }

    /// Apply texture scale, alpha and effects for the current state
    fn apply_state(&mut self) {
        self.scale = self.state.scale();
        self.alpha = self.state.alpha().unwrap_or(1.0);
        self.anim_time = 0.0;
        self.anim_done = false;
        self.breathing = self
            .state
            .breathing()
            .then(|| Tween::pulse(self.scale, self.scale + BREATH_AMOUNT, BREATH_DURATION));
        self.floating = self
            .state
            .floating()
            .then(|| Tween::pulse(0.0, -FLOAT_AMOUNT, FLOAT_DURATION));
    }

    /// Override the body scale (keeps the current state)
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        if self.breathing.is_some() {
            self.breathing = Some(Tween::pulse(scale, scale + BREATH_AMOUNT, BREATH_DURATION));
        }
    }

    pub fn is_moving(&self) -> bool {
        self.direction.x.abs() > MOVE_THRESHOLD || self.direction.y.abs() > MOVE_THRESHOLD
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// Body scale including the breathing stretch
    pub fn scale_xy(&self) -> Vec2 {
        let y = self.breathing.as_ref().map_or(self.scale, |t| t.value());
        Vec2::new(self.scale, y)
    }

    /// Vertical offset from the floating effect
    pub fn float_offset(&self) -> f32 {
        self.floating.as_ref().map_or(0.0, |t| t.value())
    }

    /// Position the body is drawn at
    pub fn draw_position(&self) -> Vec2 {
        self.position + Vec2::new(0.0, self.float_offset())
    }

    pub fn name_tag_position(&self) -> Vec2 {
        self.draw_position() - Vec2::new(0.0, NAME_TAG_OFFSET)
    }

    pub fn hat_position(&self) -> Vec2 {
        self.position + HAT_OFFSET
    }

    pub fn pet_position(&self) -> Vec2 {
        self.position + PET_OFFSET
    }

    /// Collision box of the body
    pub fn body_size(&self) -> Vec2 {
        Vec2::splat(CHARACTER_FRAME * self.scale)
    }

    /// Current animation frame (0 for static states)
    pub fn frame(&self) -> u32 {
        match self.state.animation() {
            Some(anim) => {
                let f = (self.anim_time * anim.fps) as u32;
                if anim.looped {
                    f % anim.frames
                } else {
                    f.min(anim.frames - 1)
                }
            }
            None => 0,
        }
    }

    pub fn outlined(&self) -> bool {
        needs_outline(self.color)
    }

    pub fn corpse(&self) -> Corpse {
        Corpse {
            id: format!("corpse_{}", self.id),
            position: self.position,
            color: self.color,
            name: self.name.clone(),
            reported: false,
        }
    }

    /// Advance tweens and frame animation; returns a state to enter when a
    /// one-time animation has completed
    fn update(&mut self, dt: f32) -> Option<CharacterState> {
        if let Some(t) = self.breathing.as_mut() {
            t.update(dt);
        }
        if let Some(t) = self.floating.as_mut() {
            t.update(dt);
        }
        let anim = self.state.animation()?;
        self.anim_time += dt;
        if !anim.looped && !self.anim_done && self.anim_time * anim.fps >= anim.frames as f32 {
            self.anim_done = true;
            return self.state.on_complete();
        }
        None
    }
}

/// Per-scene registry of characters
#[derive(Debug, Clone, Default)]
pub struct CharacterSystem {
    characters: Vec<Character>,
}

impl CharacterSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a character; an existing character with the same id is replaced
    pub fn create_character(
        &mut self,
        id: PlayerId,
        position: Vec2,
        config: CharacterConfig,
    ) -> &mut Character {
        self.remove_character(id);
        self.characters.push(Character::new(id, position, config));
        let last = self.characters.len() - 1;
        &mut self.characters[last]
    }

    pub fn get(&self, id: PlayerId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// All characters in insertion order
    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    pub fn all_mut(&mut self) -> &mut [Character] {
        &mut self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn remove_character(&mut self, id: PlayerId) -> Option<Character> {
        let index = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(index))
    }

    /// Switch state; unknown ids and unchanged states are ignored
    pub fn set_state(&mut self, id: PlayerId, state: CharacterState) {
        let Some(character) = self.get_mut(id) else {
            return;
        };
        if character.state == state {
            return;
        }
        character.state = state;
        character.apply_state();
    }

    pub fn update_position(&mut self, id: PlayerId, position: Vec2) {
        if let Some(character) = self.get_mut(id) {
            character.position = position;
        }
    }

    /// Store a movement direction and toggle idle/walk accordingly
    pub fn set_direction(&mut self, id: PlayerId, direction: Vec2) {
        let Some(character) = self.get_mut(id) else {
            return;
        };
        character.direction = direction;
        if direction.x < -MOVE_THRESHOLD {
            character.facing_left = true;
        } else if direction.x > MOVE_THRESHOLD {
            character.facing_left = false;
        }

        let moving = character.is_moving();
        let next = match character.state {
            CharacterState::Idle if moving => Some(CharacterState::Walk),
            CharacterState::Walk if !moving => Some(CharacterState::Idle),
            _ => None,
        };
        if let Some(state) = next {
            self.set_state(id, state);
        }
    }

    pub fn add_hat(&mut self, id: PlayerId, hat: Option<Hat>) {
        if let Some(character) = self.get_mut(id) {
            character.hat = hat;
        }
    }

    pub fn add_skin(&mut self, id: PlayerId, skin: Option<Skin>) {
        if let Some(character) = self.get_mut(id) {
            character.skin = skin;
        }
    }

    pub fn add_pet(&mut self, id: PlayerId, pet: Option<Pet>) {
        if let Some(character) = self.get_mut(id) {
            character.pet = pet;
        }
    }

    pub fn set_color(&mut self, id: PlayerId, color: u32) {
        if let Some(character) = self.get_mut(id) {
            character.color = color;
        }
    }

    /// Kill `victim`. Returns the corpse, or `None` when the victim is
    /// unknown or already dead. A known killer is moved onto the victim.
    pub fn perform_kill(
        &mut self,
        killer: Option<PlayerId>,
        victim: PlayerId,
        animate: bool,
    ) -> Option<Corpse> {
        let target = self.get_mut(victim)?;
        if target.is_dead {
            return None;
        }
        target.is_dead = true;
        target.direction = Vec2::ZERO;
        let position = target.position;
        let corpse = target.corpse();

        let state = if animate {
            CharacterState::KillAnimation
        } else {
            CharacterState::Death
        };
        self.set_state(victim, state);

        if let Some(killer) = killer.filter(|k| *k != victim) {
            if let Some(k) = self.get_mut(killer) {
                k.position = position;
            }
        }

        log::info!("{victim} was killed");
        Some(corpse)
    }

    /// Turn a character into a wall-phasing ghost
    pub fn convert_to_ghost(&mut self, id: PlayerId) {
        self.set_state(id, CharacterState::Ghost);
        if let Some(character) = self.get_mut(id) {
            character.is_ghost = true;
            character.can_phase_walls = true;
            character.direction = Vec2::ZERO;
        }
    }

    /// Advance every character's tweens and animations
    pub fn update(&mut self, dt: f32) {
        let mut transitions = Vec::new();
        for character in &mut self.characters {
            if let Some(next) = character.update(dt) {
                transitions.push((character.id, next));
            }
        }
        for (id, state) in transitions {
            self.set_state(id, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system_with(ids: &[u32]) -> CharacterSystem {
        let mut sys = CharacterSystem::new();
        for id in ids {
            sys.create_character(
                PlayerId(*id),
                Vec2::new(100.0 * *id as f32, 100.0),
                CharacterConfig::default(),
            );
        }
        sys
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(3).to_string(), "player_3");
    }

    #[test]
    fn test_state_table() {
        for state in CharacterState::ALL {
            let expected = if matches!(state, CharacterState::Death | CharacterState::KillAnimation) {
                0.8
            } else {
                0.6
            };
            assert_eq!(state.scale(), expected, "{state:?}");
        }
        assert_eq!(CharacterState::Ghost.alpha(), Some(0.7));
        assert!(CharacterState::Idle.breathing());
        assert!(!CharacterState::Walk.breathing());
        let walk = CharacterState::Walk.animation().unwrap();
        assert_eq!((walk.frames, walk.fps, walk.looped), (4, 8.0, true));
        let kill = CharacterState::KillAnimation.animation().unwrap();
        assert_eq!((kill.frames, kill.fps, kill.looped), (8, 12.0, false));
    }

    #[test]
    fn test_create_applies_state() {
        let mut sys = CharacterSystem::new();
        let c = sys.create_character(
            PlayerId(0),
            Vec2::new(10.0, 20.0),
            CharacterConfig {
                state: CharacterState::Ghost,
                ..Default::default()
            },
        );
        assert_eq!(c.alpha, 0.7);
        assert_eq!(c.scale, 0.6);
        assert_eq!(c.name_tag_position(), Vec2::new(10.0, -20.0));
    }

    #[test]
    fn test_direction_toggles_walk() {
        let mut sys = system_with(&[0]);
        let id = PlayerId(0);
        sys.set_direction(id, Vec2::new(0.05, 0.0));
        assert_eq!(sys.get(id).unwrap().state, CharacterState::Idle);
        sys.set_direction(id, Vec2::new(-1.0, 0.0));
        assert_eq!(sys.get(id).unwrap().state, CharacterState::Walk);
        assert!(sys.get(id).unwrap().facing_left);
        sys.set_direction(id, Vec2::ZERO);
        assert_eq!(sys.get(id).unwrap().state, CharacterState::Idle);
    }

    #[test]
    fn test_direction_does_not_leave_lobby_pose() {
        let mut sys = CharacterSystem::new();
        sys.create_character(
            PlayerId(0),
            Vec2::ZERO,
            CharacterConfig {
                state: CharacterState::Lobby,
                ..Default::default()
            },
        );
        sys.set_direction(PlayerId(0), Vec2::X);
        assert_eq!(sys.get(PlayerId(0)).unwrap().state, CharacterState::Lobby);
    }

    #[test]
    fn test_set_state_resets_alpha() {
        let mut sys = system_with(&[0]);
        sys.set_state(PlayerId(0), CharacterState::Ghost);
        assert_eq!(sys.get(PlayerId(0)).unwrap().alpha, 0.7);
        sys.set_state(PlayerId(0), CharacterState::Idle);
        assert_eq!(sys.get(PlayerId(0)).unwrap().alpha, 1.0);
        // Unknown id is ignored
        sys.set_state(PlayerId(9), CharacterState::Ghost);
    }

    #[test]
    fn test_breathing_stretches_vertically() {
        let mut sys = system_with(&[0]);
        sys.update(2.0);
        let c = sys.get(PlayerId(0)).unwrap();
        assert!((c.scale_xy().y - 0.62).abs() < 1e-4);
        assert_eq!(c.scale_xy().x, 0.6);
    }

    #[test]
    fn test_walk_frames_loop() {
        let mut sys = system_with(&[0]);
        sys.set_direction(PlayerId(0), Vec2::X);
        sys.update(0.3);
        assert_eq!(sys.get(PlayerId(0)).unwrap().frame(), 2);
        sys.update(0.3);
        assert_eq!(sys.get(PlayerId(0)).unwrap().frame(), 0);
    }

    #[test]
    fn test_kill_animation_ends_in_death() {
        let mut sys = system_with(&[0, 1]);
        let corpse = sys.perform_kill(Some(PlayerId(1)), PlayerId(0), true).unwrap();
        assert_eq!(corpse.id, "corpse_player_0");
        assert!(!corpse.reported);

        let victim = sys.get(PlayerId(0)).unwrap();
        assert!(victim.is_dead);
        assert_eq!(victim.state, CharacterState::KillAnimation);
        assert_eq!(victim.scale, 0.8);
        // Killer snapped onto the victim
        assert_eq!(sys.get(PlayerId(1)).unwrap().position, corpse.position);

        // 8 frames at 12 fps, well under a second
        for _ in 0..60 {
            sys.update(1.0 / 60.0);
        }
        assert_eq!(sys.get(PlayerId(0)).unwrap().state, CharacterState::Death);

        // Already dead
        assert!(sys.perform_kill(None, PlayerId(0), false).is_none());
    }

    #[test]
    fn test_kill_without_animation() {
        let mut sys = system_with(&[0]);
        sys.perform_kill(None, PlayerId(0), false).unwrap();
        assert_eq!(sys.get(PlayerId(0)).unwrap().state, CharacterState::Death);
        assert!(sys.perform_kill(None, PlayerId(7), false).is_none());
    }

    #[test]
    fn test_ghost_conversion() {
        let mut sys = system_with(&[0]);
        sys.perform_kill(None, PlayerId(0), false);
        sys.convert_to_ghost(PlayerId(0));
        let c = sys.get(PlayerId(0)).unwrap();
        assert!(c.is_ghost && c.can_phase_walls && c.is_dead);
        assert_eq!(c.state, CharacterState::Ghost);

        sys.update(3.0);
        let c = sys.get(PlayerId(0)).unwrap();
        assert!((c.float_offset() + 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_insertion_order_and_remove() {
        let mut sys = system_with(&[3, 1, 2]);
        let ids: Vec<u32> = sys.all().iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(sys.remove_character(PlayerId(1)).is_some());
        assert!(sys.remove_character(PlayerId(1)).is_none());
        assert_eq!(sys.len(), 2);
    }

    #[test]
    fn test_accessories_replace() {
        let mut sys = system_with(&[0]);
        sys.add_hat(PlayerId(0), Some(Hat::Punkin));
        sys.add_hat(PlayerId(0), Some(Hat::Knighted));
        sys.add_pet(PlayerId(0), Some(Pet::Robot));
        let c = sys.get(PlayerId(0)).unwrap();
        assert_eq!(c.hat, Some(Hat::Knighted));
        assert_eq!(c.hat_position(), c.position + HAT_OFFSET);
        assert_eq!(c.pet_position(), c.position + PET_OFFSET);
    }
}
