//! Dropship: pre-game waiting room
//!
//! Players sit for a moment, then the local player can walk around. The
//! laptop opens the host menu; starting the game plays the "shhh" card and
//! the role reveal before the map loads.

use glam::Vec2;
use rand::Rng;

use super::{SceneContext, SceneId, Transition};
use crate::consts::{
    DROPSHIP_SPEED, INTERACTION_DISTANCE, ROLE_REVEAL_DURATION, SCREEN_HEIGHT, SCREEN_WIDTH,
    SEATED_DURATION, SHHH_DURATION,
};
use crate::sim::assets::{ActionKind, Hat, Pet, Skin, TextureKey, cycle};
use crate::sim::button::Button;
use crate::sim::character::{CharacterConfig, CharacterState, CharacterSystem, PlayerId};
use crate::sim::draw::{DrawList, Label, Shape, Sprite, Stroke};
use crate::sim::event::SoundEffect;
use crate::sim::geom::{Rect, collides};
use crate::sim::input::FrameInput;
use crate::sim::joystick::{JoystickControl, JoystickUpdate};
use crate::sim::session::{HostSettings, Session};

pub const SEATS: [Vec2; 10] = [
    Vec2::new(300.0, 400.0),
    Vec2::new(300.0, 500.0),
    Vec2::new(980.0, 400.0),
    Vec2::new(980.0, 500.0),
    Vec2::new(640.0, 350.0),
    Vec2::new(640.0, 450.0),
    Vec2::new(640.0, 550.0),
    Vec2::new(450.0, 380.0),
    Vec2::new(830.0, 380.0),
    Vec2::new(640.0, 250.0),
];

/// Hull walls and consoles
pub const BOUNDS: [Rect; 7] = [
    Rect::new(0.0, 0.0, 1280.0, 150.0),
    Rect::new(0.0, 570.0, 1280.0, 150.0),
    Rect::new(0.0, 0.0, 200.0, 720.0),
    Rect::new(1080.0, 0.0, 200.0, 720.0),
    Rect::new(200.0, 150.0, 100.0, 100.0),
    Rect::new(980.0, 150.0, 100.0, 100.0),
    Rect::new(500.0, 200.0, 280.0, 50.0),
];

pub const LAPTOP_POS: Vec2 = Vec2::new(200.0, 300.0);
const CHARACTER_SCALE: f32 = 0.5;
const NAME_TAG_PX: f32 = 14.0;
const MENU_SIZE: Vec2 = Vec2::new(600.0, 500.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    ImpostorsDown,
    ImpostorsUp,
    TasksDown,
    TasksUp,
    CycleMap,
    Hats,
    Skins,
    Pets,
    Start,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Everyone sits in the lobby pose
    Seated { remaining: f32 },
    /// Local player can move and use the laptop
    Roaming,
    Shhh { remaining: f32 },
    Reveal { remaining: f32, impostor: bool },
}

fn menu_rect() -> Rect {
    Rect::centered(Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0), MENU_SIZE)
}

fn menu_buttons(settings: &HostSettings) -> Vec<Button<HostAction>> {
    let panel = menu_rect();
    let x = panel.x + 150.0;
    let y = panel.y + 90.0;
    let custom_y = panel.y + 250.0;

    let stepper = |action, text, corner: Vec2, bg, hover| {
        Button::text(action, text, Vec2::ZERO, 24.0, bg, hover)
            .with_padding(Vec2::new(10.0, 5.0))
            .at_top_left(corner)
    };

    let mut buttons = vec![
        stepper(HostAction::ImpostorsDown, "-", Vec2::new(x, y), 0xe74c3c, 0xc0392b),
        stepper(HostAction::ImpostorsUp, "+", Vec2::new(x + 80.0, y), 0x27ae60, 0x229954),
        stepper(HostAction::TasksDown, "-", Vec2::new(x, y + 50.0), 0xe74c3c, 0xc0392b),
        stepper(HostAction::TasksUp, "+", Vec2::new(x + 80.0, y + 50.0), 0x27ae60, 0x229954),
        Button::text(
            HostAction::CycleMap,
            settings.map.display_name(),
            Vec2::ZERO,
            18.0,
            0x34495e,
            0x3498db,
        )
        .with_padding(Vec2::new(15.0, 8.0))
        .at_top_left(Vec2::new(x, y + 100.0)),
    ];

    for (i, (action, text)) in [
        (HostAction::Hats, "Hats"),
        (HostAction::Skins, "Skins"),
        (HostAction::Pets, "Pets"),
    ]
    .into_iter()
    .enumerate()
    {
        buttons.push(
            Button::text(action, text, Vec2::ZERO, 16.0, 0x7f8c8d, 0x95a5a6)
                .with_padding(Vec2::new(15.0, 8.0))
                .at_top_left(Vec2::new(panel.x + 30.0 + i as f32 * 120.0, custom_y + 40.0)),
        );
    }

    buttons.push(Button::image(
        HostAction::Start,
        TextureKey::StartButton,
        Vec2::new(SCREEN_WIDTH / 2.0, panel.y + panel.h - 60.0),
    ));
    buttons.push(
        Button::text(
            HostAction::Close,
            "×",
            Vec2::new(panel.x + panel.w - 40.0, panel.y + 20.0),
            32.0,
            0xe74c3c,
            0xc0392b,
        )
        .with_padding(Vec2::new(8.0, 4.0)),
    );
    buttons
}

#[derive(Debug, Clone)]
pub struct DropshipScene {
    pub characters: CharacterSystem,
    pub local: Option<PlayerId>,
    pub phase: Phase,
    pub menu_open: bool,
    use_button: Button<()>,
    menu_buttons: Vec<Button<HostAction>>,
    joystick: JoystickControl,
}

impl DropshipScene {
    pub fn new(ctx: &mut SceneContext) -> Self {
        let session = &*ctx.session;
        let mut characters = CharacterSystem::new();
        let mut local = None;

        for (player, seat) in session.players.iter().zip(SEATS) {
            let outfit = session.outfit;
            let character = characters.create_character(
                player.id,
                seat,
                CharacterConfig {
                    color: player.color,
                    name: player.name.clone(),
                    state: CharacterState::Lobby,
                    is_local: player.is_local,
                    hat: player.is_local.then_some(outfit.hat).flatten(),
                    skin: player.is_local.then_some(outfit.skin).flatten(),
                    pet: player.is_local.then_some(outfit.pet).flatten(),
                },
            );
            character.set_scale(CHARACTER_SCALE);
            character.name_tag_px = NAME_TAG_PX;
            character.speed = DROPSHIP_SPEED;
            if player.is_local {
                local = Some(player.id);
            }
        }

        let mut use_button = Button::image_scaled(
            (),
            TextureKey::Action(ActionKind::Use),
            LAPTOP_POS - Vec2::new(0.0, 50.0),
            0.6,
            0.65,
        );
        use_button.visible = false;

        Self {
            characters,
            local,
            phase: Phase::Seated {
                remaining: SEATED_DURATION,
            },
            menu_open: false,
            use_button,
            menu_buttons: menu_buttons(&session.host_settings),
            joystick: JoystickControl::default(),
        }
    }

    pub fn local_position(&self) -> Option<Vec2> {
        self.local
            .and_then(|id| self.characters.get(id))
            .map(|c| c.position)
    }

    pub fn near_laptop(&self) -> bool {
        self.local_position()
            .is_some_and(|p| p.distance(LAPTOP_POS) < INTERACTION_DISTANCE)
    }

    pub fn use_visible(&self) -> bool {
        self.use_button.visible
    }

    /// State changes reset the body scale, so reapply the dropship scale
    fn restore_scale(&mut self) {
        for character in self.characters.all_mut() {
            if (character.scale - CHARACTER_SCALE).abs() > f32::EPSILON {
                character.set_scale(CHARACTER_SCALE);
            }
        }
    }

    fn stand_up(&mut self) {
        let ids: Vec<PlayerId> = self.characters.all().iter().map(|c| c.id).collect();
        for id in ids {
            self.characters.set_state(id, CharacterState::Idle);
        }
        self.restore_scale();
        self.phase = Phase::Roaming;
    }

    pub fn open_menu(&mut self, ctx: &mut SceneContext) {
        self.menu_open = true;
        self.menu_buttons = menu_buttons(&ctx.session.host_settings);
        if let Some(id) = self.local {
            self.characters.set_direction(id, Vec2::ZERO);
            self.restore_scale();
        }
    }

    /// Move the local player one frame along `dir`
    fn move_local(&mut self, dir: Vec2) {
        let Some(id) = self.local else {
            return;
        };
        if let Some(c) = self.characters.get(id) {
            if dir != Vec2::ZERO {
                let next = c.position + dir * c.speed;
                if !collides(next, c.body_size(), &BOUNDS) {
                    self.characters.update_position(id, next);
                }
            }
        }
        self.characters.set_direction(id, dir);
        self.restore_scale();
    }

    fn update_roaming(&mut self, ctx: &mut SceneContext, input: &FrameInput, dt: f32) {
        if self.menu_open {
            self.update_menu(ctx, input, dt);
            return;
        }

        self.use_button.visible = self.near_laptop();
        if self.use_button.update(input, dt).is_some() {
            ctx.sound(SoundEffect::ButtonClick);
            self.open_menu(ctx);
            return;
        }

        let stick = if ctx.session.touch_mode {
            self.joystick
                .update(input, SCREEN_HEIGHT, !self.use_button.is_hovered(), dt)
        } else {
            JoystickUpdate::Idle
        };

        let keys = input.key_direction();
        let dir = match stick {
            _ if keys != Vec2::ZERO => keys,
            JoystickUpdate::Drag(d) => d,
            JoystickUpdate::Released | JoystickUpdate::Idle => Vec2::ZERO,
        };
        self.move_local(dir);
    }

    fn update_menu(&mut self, ctx: &mut SceneContext, input: &FrameInput, dt: f32) {
        if input.escape {
            self.menu_open = false;
            return;
        }

        let mut clicked = None;
        for button in &mut self.menu_buttons {
            if let Some(action) = button.update(input, dt) {
                clicked = Some(action);
            }
        }
        let Some(action) = clicked else {
            return;
        };
        ctx.sound(SoundEffect::ButtonClick);

        let settings = &mut ctx.session.host_settings;
        let outfit = &mut ctx.session.outfit;
        match action {
            HostAction::ImpostorsDown => settings.change_impostors(-1),
            HostAction::ImpostorsUp => settings.change_impostors(1),
            HostAction::TasksDown => settings.change_tasks(-1),
            HostAction::TasksUp => settings.change_tasks(1),
            HostAction::CycleMap => {
                settings.cycle_map();
                let name = settings.map.display_name();
                if let Some(b) = self
                    .menu_buttons
                    .iter_mut()
                    .find(|b| b.action == HostAction::CycleMap)
                {
                    let corner = b.hit_rect();
                    b.set_text(name);
                    b.anchor_top_left(Vec2::new(corner.x, corner.y));
                }
            }
            HostAction::Hats => {
                outfit.hat = cycle(&Hat::ALL, outfit.hat);
                if let Some(id) = self.local {
                    self.characters.add_hat(id, outfit.hat);
                }
            }
            HostAction::Skins => {
                outfit.skin = cycle(&Skin::ALL, outfit.skin);
                if let Some(id) = self.local {
                    self.characters.add_skin(id, outfit.skin);
                }
            }
            HostAction::Pets => {
                outfit.pet = cycle(&Pet::ALL, outfit.pet);
                if let Some(id) = self.local {
                    self.characters.add_pet(id, outfit.pet);
                }
            }
            HostAction::Start => {
                self.menu_open = false;
                self.phase = Phase::Shhh {
                    remaining: SHHH_DURATION,
                };
                log::info!(
                    "Game starting: {} impostor(s), {} task(s), {}",
                    settings.impostor_count,
                    settings.task_count,
                    settings.map.key()
                );
                ctx.sound(SoundEffect::Shhh);
            }
            HostAction::Close => self.menu_open = false,
        }
    }

    /// Roll the local role and start the reveal
    fn reveal_role(&mut self, ctx: &mut SceneContext) {
        let players = ctx.session.players.len().max(1);
        let chance = ctx.session.host_settings.impostor_count as f32 / players as f32;
        let impostor = ctx.session.rng.random::<f32>() < chance;
        ctx.session.is_impostor = impostor;
        log::info!(
            "Local player is {}",
            if impostor { "an impostor" } else { "a crewmate" }
        );
        ctx.sound(if impostor {
            SoundEffect::RevealImpostor
        } else {
            SoundEffect::RevealCrewmate
        });
        self.phase = Phase::Reveal {
            remaining: ROLE_REVEAL_DURATION,
            impostor,
        };
    }

    pub fn update(
        &mut self,
        ctx: &mut SceneContext,
        input: &FrameInput,
        dt: f32,
    ) -> Option<Transition> {
        self.characters.update(dt);

        match self.phase {
            Phase::Seated { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.stand_up();
                } else {
                    self.phase = Phase::Seated { remaining };
                }
            }
            Phase::Roaming => self.update_roaming(ctx, input, dt),
            Phase::Shhh { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.reveal_role(ctx);
                } else {
                    self.phase = Phase::Shhh { remaining };
                }
            }
            Phase::Reveal { remaining, impostor } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    return Some(Transition::Goto(SceneId::Map));
                }
                self.phase = Phase::Reveal { remaining, impostor };
            }
        }
        None
    }

    fn draw_menu(&self, session: &Session, out: &mut DrawList) {
        let panel = menu_rect();
        let settings = &session.host_settings;
        let outfit = &session.outfit;

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
                "Host Settings",
                Vec2::new(SCREEN_WIDTH / 2.0, panel.y + 40.0),
                28.0,
                0xffffff,
            )
            .bold(),
        );

        let row = |dy: f32| Vec2::new(panel.x + 30.0, panel.y + 90.0 + dy);
        for (text, dy) in [("Impostors:", 0.0), ("Tasks:", 50.0), ("Map:", 100.0)] {
            out.label(Label::new(text, row(dy), 18.0, 0xffffff).with_origin(Vec2::ZERO));
        }
        for (value, dy) in [(settings.impostor_count, 0.0), (settings.task_count, 50.0)] {
            out.label(
                Label::new(value.to_string(), row(dy) + Vec2::new(160.0, 0.0), 18.0, 0xffffff)
                    .with_origin(Vec2::ZERO)
                    .with_background(0x34495e, Vec2::new(15.0, 8.0)),
            );
        }

        let custom_y = panel.y + 250.0;
        out.label(
            Label::new("Customization:", Vec2::new(panel.x + 30.0, custom_y), 20.0, 0xffffff)
                .with_origin(Vec2::ZERO)
                .bold(),
        );
        let equipped = [
            outfit.hat.map(|h| h.key()),
            outfit.skin.map(|s| s.key()),
            outfit.pet.map(|p| p.key()),
        ];
        for (i, key) in equipped.into_iter().enumerate() {
            out.label(
                Label::new(
                    key.unwrap_or("none"),
                    Vec2::new(panel.x + 30.0 + i as f32 * 120.0, custom_y + 85.0),
                    14.0,
                    0xbdc3c7,
                )
                .with_origin(Vec2::ZERO),
            );
        }

        for button in &self.menu_buttons {
            button.draw(out);
        }
    }

    fn draw_reveal(&self, session: &Session, impostor: bool, out: &mut DrawList) {
        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        out.ui_shape(Shape::rect(
            Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
            0x000000,
            1.0,
        ));

        let impostors = session.host_settings.impostor_count;
        let (title, color, subtitle) = if impostor {
            ("IMPOSTOR", 0xff0000, "Sabotage and eliminate the crew".to_string())
        } else if impostors == 1 {
            ("CREWMATE", 0x00ffff, "There is 1 Impostor among us".to_string())
        } else {
            (
                "CREWMATE",
                0x00ffff,
                format!("There are {impostors} Impostors among us"),
            )
        };
        out.label(Label::new(title, center - Vec2::new(0.0, 200.0), 64.0, color).bold());
        out.label(Label::new(subtitle, center - Vec2::new(0.0, 130.0), 24.0, 0xffffff));

        if let Some(c) = self.local.and_then(|id| self.characters.get(id)) {
            out.ui_sprite(
                Sprite::new(CharacterState::Idle.texture(), center + Vec2::new(0.0, 60.0), 2.0)
                    .with_tint(c.color),
            );
            out.label(Label::new(c.name.clone(), center + Vec2::new(0.0, 150.0), 20.0, 0xffffff));
        }
    }

    pub fn draw(&self, session: &Session, out: &mut DrawList) {
        out.background = 0x0b0b1a;
        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);

        match self.phase {
            Phase::Shhh { .. } => {
                out.ui_shape(Shape::rect(
                    Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
                    0x000000,
                    1.0,
                ));
                out.ui_sprite(Sprite::new(TextureKey::Shhh, center, 0.8));
                return;
            }
            Phase::Reveal { impostor, .. } => {
                self.draw_reveal(session, impostor, out);
                return;
            }
            Phase::Seated { .. } | Phase::Roaming => {}
        }

        out.world_sprite(Sprite::new(TextureKey::DropshipFloor, center, 1.0));
        out.world_sprite(Sprite::new(TextureKey::Laptop, LAPTOP_POS, 0.75));
        for character in self.characters.all() {
            out.character(character);
        }
        self.use_button.draw(out);
        self.joystick.draw(out);

        if self.menu_open {
            self.draw_menu(session, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preferences;
    use crate::sim::scene::local_lobby::build_roster;

    fn session() -> Session {
        let mut session = Session::new(Preferences::default(), 9);
        session.players = build_roster("Me");
        session.local_player = Some(PlayerId(0));
        session
    }

    fn click(scene: &mut DropshipScene, ctx: &mut SceneContext, p: Vec2) {
        let down = FrameInput {
            pointer: Some(p),
            pointer_pressed: true,
            pointer_held: true,
            ..Default::default()
        };
        let up = FrameInput {
            pointer: Some(p),
            pointer_released: true,
            ..Default::default()
        };
        scene.update(ctx, &down, 0.0);
        scene.update(ctx, &up, 0.0);
    }

    fn menu_click(scene: &mut DropshipScene, ctx: &mut SceneContext, action: HostAction) {
        let pos = scene
            .menu_buttons
            .iter()
            .find(|b| b.action == action)
            .map(|b| b.draw_pos())
            .unwrap();
        click(scene, ctx, pos);
    }

    fn roaming(ctx: &mut SceneContext) -> DropshipScene {
        let mut scene = DropshipScene::new(ctx);
        scene.update(ctx, &FrameInput::default(), SEATED_DURATION + 0.01);
        assert_eq!(scene.phase, Phase::Roaming);
        scene
    }

    #[test]
    fn test_seated_then_idle() {
        let mut session = session();
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = DropshipScene::new(&mut ctx);
        assert_eq!(scene.characters.len(), 6);
        let first = &scene.characters.all()[0];
        assert_eq!(first.state, CharacterState::Lobby);
        assert_eq!(first.position, SEATS[0]);
        assert_eq!(first.name_tag_px, 14.0);
        assert_eq!(first.scale, 0.5);

        // No movement while seated
        let right = FrameInput {
            right: true,
            ..Default::default()
        };
        scene.update(&mut ctx, &right, 1.0);
        assert_eq!(scene.local_position(), Some(SEATS[0]));

        scene.update(&mut ctx, &FrameInput::default(), 1.01);
        assert!(scene.characters.all().iter().all(|c| c.state == CharacterState::Idle));
        assert!(scene.characters.all().iter().all(|c| c.scale == 0.5));
    }

    #[test]
    fn test_keyboard_movement_and_walls() {
        let mut session = session();
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = roaming(&mut ctx);

        let left = FrameInput {
            left: true,
            ..Default::default()
        };
        scene.update(&mut ctx, &left, 1.0 / 60.0);
        assert_eq!(scene.local_position(), Some(SEATS[0] - Vec2::new(3.0, 0.0)));
        let local = scene.characters.get(PlayerId(0)).unwrap();
        assert_eq!(local.state, CharacterState::Walk);
        assert!(local.facing_left);
        assert_eq!(local.scale, 0.5);

        // Left hull wall ends at x = 200 and the body is 32 px wide
        scene.characters.update_position(PlayerId(0), Vec2::new(217.0, 400.0));
        scene.update(&mut ctx, &left, 1.0 / 60.0);
        assert_eq!(scene.local_position(), Some(Vec2::new(217.0, 400.0)));

        scene.update(&mut ctx, &FrameInput::default(), 1.0 / 60.0);
        assert_eq!(
            scene.characters.get(PlayerId(0)).unwrap().state,
            CharacterState::Idle
        );
    }

    #[test]
    fn test_joystick_moves_on_touch() {
        let mut session = session();
        session.touch_mode = true;
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = roaming(&mut ctx);

        let press = FrameInput {
            pointer: Some(Vec2::new(100.0, 600.0)),
            pointer_pressed: true,
            pointer_held: true,
            touch: true,
            ..Default::default()
        };
        scene.update(&mut ctx, &press, 1.0 / 60.0);
        let drag = FrameInput {
            pointer: Some(Vec2::new(200.0, 600.0)),
            pointer_held: true,
            touch: true,
            ..Default::default()
        };
        scene.update(&mut ctx, &drag, 1.0 / 60.0);
        let pos = scene.local_position().unwrap();
        assert!((pos.x - (SEATS[0].x + 3.0)).abs() < 1e-4);
    }

    #[test]
    fn test_use_button_near_laptop() {
        let mut session = session();
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = roaming(&mut ctx);
        scene.update(&mut ctx, &FrameInput::default(), 1.0 / 60.0);
        assert!(!scene.use_visible());

        scene.characters.update_position(PlayerId(0), Vec2::new(230.0, 330.0));
        scene.update(&mut ctx, &FrameInput::default(), 1.0 / 60.0);
        assert!(scene.use_visible());

        let use_pos = scene.use_button.draw_pos();
        click(&mut scene, &mut ctx, use_pos);
        assert!(scene.menu_open);
    }

    #[test]
    fn test_host_menu_settings_and_outfit() {
        let mut session = session();
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = roaming(&mut ctx);
        scene.open_menu(&mut ctx);

        for _ in 0..4 {
            menu_click(&mut scene, &mut ctx, HostAction::ImpostorsUp);
        }
        menu_click(&mut scene, &mut ctx, HostAction::TasksDown);
        menu_click(&mut scene, &mut ctx, HostAction::CycleMap);
        assert_eq!(ctx.session.host_settings.impostor_count, 3);
        assert_eq!(ctx.session.host_settings.task_count, 2);
        assert_eq!(ctx.session.host_settings.map.key(), "mira_hq");

        menu_click(&mut scene, &mut ctx, HostAction::Hats);
        menu_click(&mut scene, &mut ctx, HostAction::Pets);
        assert_eq!(ctx.session.outfit.hat, Some(Hat::Eggscellent));
        assert_eq!(scene.characters.get(PlayerId(0)).unwrap().pet, Some(Pet::MiniCrewmate));

        menu_click(&mut scene, &mut ctx, HostAction::Close);
        assert!(!scene.menu_open);
    }

    #[test]
    fn test_start_reveal_then_map() {
        let mut session = Session::new(Preferences::default(), 4);
        session.players = build_roster("Solo");
        session.players.truncate(1);
        session.local_player = Some(PlayerId(0));
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = roaming(&mut ctx);
        scene.open_menu(&mut ctx);
        menu_click(&mut scene, &mut ctx, HostAction::Start);
        assert!(!scene.menu_open);
        assert!(matches!(scene.phase, Phase::Shhh { .. }));

        assert_eq!(scene.update(&mut ctx, &FrameInput::default(), SHHH_DURATION), None);
        // One impostor among one player is certain
        assert!(matches!(scene.phase, Phase::Reveal { impostor: true, .. }));
        assert!(ctx.session.is_impostor);

        assert_eq!(scene.update(&mut ctx, &FrameInput::default(), 4.0), None);
        assert_eq!(
            scene.update(&mut ctx, &FrameInput::default(), 1.0),
            Some(Transition::Goto(SceneId::Map))
        );
        assert!(events.contains(&crate::sim::event::GameEvent::PlaySound(SoundEffect::Shhh)));
    }
}
