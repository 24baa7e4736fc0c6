//! The Skeld: free roaming with AI wanderers, kills, reports and meetings

use glam::Vec2;
use rand::Rng;

use super::{SceneContext, SceneId, Transition};
use crate::consts::{
    AI_DECISION_INTERVAL, INTERACTION_DISTANCE, MAP_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::sim::assets::{ActionKind, TextureKey};
use crate::sim::button::Button;
use crate::sim::character::{
    CharacterConfig, CharacterState, CharacterSystem, Corpse, PlayerId,
};
use crate::sim::color::needs_outline;
use crate::sim::draw::{DrawList, Label, Shape, Sprite, Stroke};
use crate::sim::event::SoundEffect;
use crate::sim::geom::{Rect, collides};
use crate::sim::input::FrameInput;
use crate::sim::joystick::{JoystickControl, JoystickUpdate};
use crate::sim::session::Session;
use crate::sim::toast::{Toast, Toasts};

/// Outer walls and room obstacles
pub const BOUNDS: [Rect; 12] = [
    Rect::new(0.0, 0.0, 1280.0, 100.0),
    Rect::new(0.0, 0.0, 100.0, 720.0),
    Rect::new(1180.0, 0.0, 100.0, 720.0),
    Rect::new(0.0, 620.0, 1280.0, 100.0),
    Rect::new(200.0, 150.0, 150.0, 50.0),
    Rect::new(400.0, 200.0, 100.0, 100.0),
    Rect::new(600.0, 150.0, 200.0, 80.0),
    Rect::new(300.0, 350.0, 100.0, 150.0),
    Rect::new(700.0, 300.0, 150.0, 100.0),
    Rect::new(200.0, 500.0, 200.0, 80.0),
    Rect::new(800.0, 450.0, 100.0, 120.0),
    Rect::new(500.0, 520.0, 180.0, 60.0),
];

pub const SPAWNS: [Vec2; 10] = [
    Vec2::new(640.0, 360.0),
    Vec2::new(600.0, 400.0),
    Vec2::new(680.0, 400.0),
    Vec2::new(560.0, 360.0),
    Vec2::new(720.0, 360.0),
    Vec2::new(600.0, 320.0),
    Vec2::new(680.0, 320.0),
    Vec2::new(520.0, 400.0),
    Vec2::new(760.0, 400.0),
    Vec2::new(640.0, 280.0),
];

/// Keyboard diagonals are scaled by roughly 1/sqrt(2)
const DIAGONAL: f32 = 0.707;
const AI_TURN_CHANCE: f64 = 0.3;
const AI_STOP_CHANCE: f64 = 0.4;
const AI_SPEED: f32 = 0.5;
const UI_BAR_HEIGHT: f32 = 120.0;
const ACTION_SPACING: f32 = 80.0;
const MODAL_SIZE: Vec2 = Vec2::new(400.0, 300.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapAction {
    Settings,
    Emergency,
    Action(ActionKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Leave,
    Close,
}

fn modal_rect() -> Rect {
    Rect::centered(Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0), MODAL_SIZE)
}

/// Keyboard direction with diagonals normalised
pub fn keyboard_direction(input: &FrameInput) -> Vec2 {
    let dir = input.key_direction();
    if dir.x != 0.0 && dir.y != 0.0 {
        dir * DIAGONAL
    } else {
        dir
    }
}

#[derive(Debug, Clone)]
pub struct MapScene {
    pub characters: CharacterSystem,
    pub corpses: Vec<Corpse>,
    pub local: Option<PlayerId>,
    pub is_impostor: bool,
    pub camera: Vec2,
    pub settings_open: bool,
    buttons: Vec<Button<MapAction>>,
    modal_buttons: Vec<Button<ModalAction>>,
    joystick: JoystickControl,
    ai_timer: f32,
    /// Living players within reach of the local player, nearest first
    nearby_players: Vec<PlayerId>,
    /// Unreported corpse within reach, by index
    nearby_corpse: Option<usize>,
    toasts: Toasts,
}

impl MapScene {
    pub fn new(ctx: &mut SceneContext) -> Self {
        let session = &*ctx.session;
        let mut characters = CharacterSystem::new();
        let mut local = None;
        for (player, spawn) in session.players.iter().zip(SPAWNS) {
            let outfit = session.outfit;
            let character = characters.create_character(
                player.id,
                spawn,
                CharacterConfig {
                    color: player.color,
                    name: player.name.clone(),
                    state: CharacterState::Idle,
                    is_local: player.is_local,
                    hat: player.is_local.then_some(outfit.hat).flatten(),
                    skin: player.is_local.then_some(outfit.skin).flatten(),
                    pet: player.is_local.then_some(outfit.pet).flatten(),
                },
            );
            character.speed = MAP_SPEED;
            if player.is_local {
                local = Some(player.id);
            }
        }

        let is_impostor = session.is_impostor;
        let bottom = SCREEN_HEIGHT - 60.0;
        let mut buttons = vec![
            Button::image_scaled(
                MapAction::Settings,
                TextureKey::Gear,
                Vec2::new(SCREEN_WIDTH - 50.0, 70.0),
                0.4,
                0.45,
            ),
            Button::image(
                MapAction::Emergency,
                TextureKey::EmergencyButton,
                Vec2::new(SCREEN_WIDTH / 2.0, bottom),
            ),
        ];
        let mut actions = vec![ActionKind::Report, ActionKind::Use];
        if is_impostor {
            actions.extend([ActionKind::Kill, ActionKind::Sabotage, ActionKind::Vent]);
        }
        for (i, kind) in actions.into_iter().enumerate() {
            let mut button = Button::image_scaled(
                MapAction::Action(kind),
                TextureKey::Action(kind),
                Vec2::new(SCREEN_WIDTH - 50.0 - i as f32 * ACTION_SPACING, bottom),
                0.6,
                0.65,
            );
            button.visible = kind == ActionKind::Sabotage;
            buttons.push(button);
        }

        let panel = modal_rect();
        let modal_buttons = vec![
            Button::text(
                ModalAction::Leave,
                "Leave Game",
                Vec2::new(SCREEN_WIDTH / 2.0, panel.y + 120.0),
                20.0,
                0xe74c3c,
                0xc0392b,
            ),
            Button::text(
                ModalAction::Close,
                "×",
                Vec2::new(panel.x + panel.w - 30.0, panel.y + 20.0),
                32.0,
                0xe74c3c,
                0xc0392b,
            )
            .with_padding(Vec2::new(8.0, 4.0)),
        ];

        log::info!(
            "Map started with {} players (impostor: {is_impostor})",
            characters.len()
        );

        Self {
            characters,
            corpses: Vec::new(),
            local,
            is_impostor,
            camera: Vec2::ZERO,
            settings_open: false,
            buttons,
            modal_buttons,
            joystick: JoystickControl::default(),
            ai_timer: 0.0,
            nearby_players: Vec::new(),
            nearby_corpse: None,
            toasts: Toasts::default(),
        }
    }

    pub fn local_position(&self) -> Option<Vec2> {
        self.local
            .and_then(|id| self.characters.get(id))
            .map(|c| c.position)
    }

    pub fn action_visible(&self, kind: ActionKind) -> bool {
        self.buttons
            .iter()
            .any(|b| b.action == MapAction::Action(kind) && b.visible)
    }

    pub fn toast_texts(&self) -> Vec<&str> {
        self.toasts.texts().collect()
    }

    /// Re-roll AI directions
    fn decide_ai(&mut self, ctx: &mut SceneContext) {
        let rng = &mut ctx.session.rng;
        for character in self.characters.all_mut() {
            if character.is_local || character.is_dead {
                continue;
            }
            if rng.random_bool(AI_TURN_CHANCE) {
                let angle = rng.random::<f32>() * std::f32::consts::TAU;
                character.direction = Vec2::new(angle.cos(), angle.sin()) * AI_SPEED;
                if rng.random_bool(AI_STOP_CHANCE) {
                    character.direction = Vec2::ZERO;
                }
            }
        }
    }

    /// Move every character one frame along its direction
    fn move_characters(&mut self) {
        let moves: Vec<(PlayerId, Vec2, Vec2, Vec2, bool, bool)> = self
            .characters
            .all()
            .iter()
            .map(|c| {
                (
                    c.id,
                    c.position,
                    c.direction * c.speed,
                    c.body_size(),
                    c.is_ghost && c.can_phase_walls,
                    c.is_dead && !c.is_ghost,
                )
            })
            .collect();

        for (id, position, step, size, phases, lying_dead) in moves {
            if lying_dead {
                continue;
            }
            if step == Vec2::ZERO {
                self.characters.set_direction(id, Vec2::ZERO);
                continue;
            }
            let next = position + step;
            if phases || !collides(next, size, &BOUNDS) {
                let dir = self.characters.get(id).map_or(Vec2::ZERO, |c| c.direction);
                self.characters.update_position(id, next);
                self.characters.set_direction(id, dir);
            } else {
                self.characters.set_direction(id, Vec2::ZERO);
            }
        }
    }

    fn update_proximity(&mut self) {
        self.nearby_players.clear();
        self.nearby_corpse = None;
        let Some(here) = self.local_position() else {
            return;
        };

        let mut players: Vec<(f32, PlayerId)> = self
            .characters
            .all()
            .iter()
            .filter(|c| !c.is_local && !c.is_dead && !c.is_ghost)
            .map(|c| (c.position.distance(here), c.id))
            .filter(|(d, _)| *d < INTERACTION_DISTANCE)
            .collect();
        players.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.nearby_players = players.into_iter().map(|(_, id)| id).collect();

        self.nearby_corpse = self
            .corpses
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.reported)
            .map(|(i, c)| (c.position.distance(here), i))
            .filter(|(d, _)| *d < INTERACTION_DISTANCE)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, i)| i);
    }

    fn local_alive(&self) -> bool {
        self.local
            .and_then(|id| self.characters.get(id))
            .is_some_and(|c| c.is_alive())
    }

    fn refresh_buttons(&mut self) {
        let report = self.nearby_corpse.is_some();
        let kill = self.is_impostor && self.local_alive() && !self.nearby_players.is_empty();
        for button in &mut self.buttons {
            if let MapAction::Action(kind) = button.action {
                button.visible = match kind {
                    ActionKind::Report => report,
                    ActionKind::Kill => kill,
                    ActionKind::Sabotage => true,
                    ActionKind::Use | ActionKind::Vent => false,
                };
            }
        }
    }

    fn follow_camera(&mut self) {
        let Some(here) = self.local_position() else {
            return;
        };
        let screen = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let max = (TextureKey::MapFloor.size() - screen).max(Vec2::ZERO);
        self.camera = (here - screen / 2.0).clamp(Vec2::ZERO, max);
    }

    pub fn call_emergency_meeting(&mut self, ctx: &mut SceneContext) {
        log::info!("Emergency meeting called");
        ctx.sound(SoundEffect::EmergencyMeeting);
        self.toasts.push(Toast::banner(
            "EMERGENCY MEETING!",
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            48.0,
            0xff0000,
        ));
    }

    /// Kill the nearest reachable player
    pub fn kill_nearby(&mut self, ctx: &mut SceneContext) {
        let Some(&victim) = self.nearby_players.first() else {
            return;
        };
        if !self.is_impostor {
            return;
        }
        let Some(corpse) = self.characters.perform_kill(self.local, victim, true) else {
            return;
        };
        self.corpses.push(corpse);
        if self.characters.get(victim).is_some_and(|c| c.is_local) {
            self.characters.convert_to_ghost(victim);
        }
        ctx.sound(SoundEffect::Kill);
        self.update_proximity();
    }

    pub fn report_nearby(&mut self, ctx: &mut SceneContext) {
        let Some(index) = self.nearby_corpse else {
            return;
        };
        let Some(corpse) = self.corpses.get_mut(index) else {
            return;
        };
        corpse.reported = true;
        log::info!("Reported corpse: {}", corpse.name);
        ctx.sound(SoundEffect::Report);
        self.toasts.push(Toast::banner(
            "DEAD BODY REPORTED",
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            48.0,
            0xff0000,
        ));
        self.nearby_corpse = None;
    }

    /// Debug: the first living AI kills the local player
    pub fn test_kill_local(&mut self, ctx: &mut SceneContext) {
        let Some(local) = self.local else {
            return;
        };
        if !self.local_alive() {
            return;
        }
        let killer = self
            .characters
            .all()
            .iter()
            .find(|c| !c.is_local && !c.is_dead)
            .map(|c| c.id);
        if let Some(corpse) = self.characters.perform_kill(killer, local, false) {
            self.corpses.push(corpse);
        }
        self.characters.convert_to_ghost(local);
        ctx.sound(SoundEffect::Kill);
        log::info!("Local player killed and converted to ghost");
    }

    fn update_modal(&mut self, ctx: &mut SceneContext, input: &FrameInput, dt: f32) -> Option<Transition> {
        if input.escape {
            self.settings_open = false;
            return None;
        }
        let mut clicked = None;
        for button in &mut self.modal_buttons {
            if let Some(action) = button.update(input, dt) {
                clicked = Some(action);
            }
        }
        match clicked? {
            ModalAction::Leave => {
                ctx.sound(SoundEffect::ButtonClick);
                Some(Transition::Goto(SceneId::MainMenu))
            }
            ModalAction::Close => {
                ctx.sound(SoundEffect::ButtonClick);
                self.settings_open = false;
                None
            }
        }
    }

    pub fn update(
        &mut self,
        ctx: &mut SceneContext,
        input: &FrameInput,
        dt: f32,
    ) -> Option<Transition> {
        self.characters.update(dt);
        self.toasts.update(dt);

        self.ai_timer += dt;
        while self.ai_timer >= AI_DECISION_INTERVAL {
            self.ai_timer -= AI_DECISION_INTERVAL;
            self.decide_ai(ctx);
        }

        let mut stick = JoystickUpdate::Idle;
        let mut transition = None;
        if self.settings_open {
            transition = self.update_modal(ctx, input, dt);
        } else {
            let mut clicked = None;
            let mut over_button = false;
            for button in &mut self.buttons {
                if let Some(action) = button.update(input, dt) {
                    clicked = Some(action);
                }
                over_button |= button.visible && button.is_hovered();
            }
            match clicked {
                Some(MapAction::Settings) => {
                    ctx.sound(SoundEffect::ButtonClick);
                    self.settings_open = true;
                }
                Some(MapAction::Emergency) => self.call_emergency_meeting(ctx),
                Some(MapAction::Action(ActionKind::Report)) => self.report_nearby(ctx),
                Some(MapAction::Action(ActionKind::Kill)) => self.kill_nearby(ctx),
                Some(MapAction::Action(ActionKind::Sabotage)) => log::info!("Opening sabotage menu"),
                Some(MapAction::Action(ActionKind::Use)) => log::info!("Using nearby object"),
                Some(MapAction::Action(ActionKind::Vent)) => log::info!("Using vent"),
                None => {}
            }

            if ctx.session.touch_mode {
                stick = self
                    .joystick
                    .update(input, SCREEN_HEIGHT, !over_button, dt);
            }
        }

        // Keys stay live under the settings modal
        if input.space {
            self.call_emergency_meeting(ctx);
        }
        if input.kill_key {
            self.test_kill_local(ctx);
        }

        if let Some(id) = self.local {
            let keys = keyboard_direction(input);
            let dir = match stick {
                _ if keys != Vec2::ZERO => Some(keys),
                JoystickUpdate::Drag(d) => Some(d),
                JoystickUpdate::Released => Some(Vec2::ZERO),
                JoystickUpdate::Idle if self.joystick.joystick.is_none() => Some(Vec2::ZERO),
                JoystickUpdate::Idle => None,
            };
            if let Some(dir) = dir {
                if let Some(c) = self.characters.get_mut(id) {
                    if !c.is_dead || c.is_ghost {
                        c.direction = dir;
                    }
                }
            }
        }

        self.move_characters();
        self.update_proximity();
        self.refresh_buttons();
        self.follow_camera();
        transition
    }

    fn draw_modal(&self, out: &mut DrawList) {
        let panel = modal_rect();
        out.ui_shape(Shape::rect(
            Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
            0x000000,
            0.8,
        ));
        out.ui_shape(Shape::panel(
            panel,
            0x2c3e50,
            0.95,
            20.0,
            Some(Stroke {
                width: 4.0,
                color: 0x3498db,
                alpha: 1.0,
            }),
        ));
        out.label(
            Label::new(
                "Game Settings",
                Vec2::new(SCREEN_WIDTH / 2.0, panel.y + 40.0),
                28.0,
                0xffffff,
            )
            .bold(),
        );
        for button in &self.modal_buttons {
            button.draw(out);
        }
    }

    pub fn draw(&self, session: &Session, out: &mut DrawList) {
        out.background = 0x101018;
        out.camera = self.camera;

        let floor = TextureKey::MapFloor.size();
        out.world_sprite(Sprite::new(TextureKey::MapFloor, floor / 2.0, 1.0));

        for corpse in &self.corpses {
            let alpha = if corpse.reported { 0.6 } else { 1.0 };
            out.world_sprite(Sprite {
                outline: needs_outline(corpse.color),
                ..Sprite::new(
                    CharacterState::Death.texture(),
                    corpse.position,
                    CharacterState::Death.scale(),
                )
                .with_tint(corpse.color)
                .with_alpha(alpha)
            });
        }
        for character in self.characters.all() {
            if character.state != CharacterState::Death {
                out.character(character);
            }
        }

        out.ui_shape(Shape::rect(
            Rect::new(0.0, SCREEN_HEIGHT - UI_BAR_HEIGHT, SCREEN_WIDTH, UI_BAR_HEIGHT),
            0x000000,
            0.8,
        ));
        for button in &self.buttons {
            button.draw(out);
        }

        let (role, color) = if self.is_impostor {
            ("IMPOSTOR", 0xff0000)
        } else {
            ("CREWMATE", 0x00ff00)
        };
        out.label(
            Label::new(role, Vec2::new(20.0, 20.0), 18.0, color)
                .with_origin(Vec2::ZERO)
                .with_background(0x000000, Vec2::new(10.0, 5.0)),
        );
        out.label(
            Label::new(
                format!("Players: {}", session.players.len()),
                Vec2::new(SCREEN_WIDTH - 20.0, 20.0),
                16.0,
                0xffffff,
            )
            .with_origin(Vec2::new(1.0, 0.0))
            .with_background(0x000000, Vec2::new(8.0, 4.0)),
        );

        self.joystick.draw(out);
        self.toasts.draw(out);

        if self.settings_open {
            self.draw_modal(out);
        }
    }
}
