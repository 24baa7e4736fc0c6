//! Local lobby: roster, colour customization and game start

use glam::Vec2;

use super::{SceneContext, SceneId, Transition};
use crate::consts::{AI_PLAYER_COUNT, MAX_PLAYERS, MIN_PLAYERS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::i18n::TextKey;
use crate::sim::assets::TextureKey;
use crate::sim::button::Button;
use crate::sim::character::PlayerId;
use crate::sim::color::{available_colors, lobby_color};
use crate::sim::draw::{DrawList, Label, Shape, Stroke};
use crate::sim::event::{GameEvent, SoundEffect};
use crate::sim::geom::Rect;
use crate::sim::input::FrameInput;
use crate::sim::session::{PlayerRecord, Session};
use crate::sim::starfield::Starfield;
use crate::sim::toast::{Toast, Toasts};
use crate::sim::tween::{Repeat, Tween};

const AI_NAMES: [&str; 9] = [
    "Red", "Blue", "Green", "Pink", "Orange", "Yellow", "Black", "White", "Purple",
];

const BACKGROUND: u32 = 0x1a1a2e;
const PANEL_FILL: u32 = 0x16213e;
const PANEL_STROKE: u32 = 0x0f4c75;

const ROW_X: f32 = 90.0;
const ROW_TOP: f32 = 180.0;
const ROW_SPACING: f32 = 40.0;

const CUSTOM_X: f32 = SCREEN_WIDTH - 300.0;
const CUSTOM_Y: f32 = 120.0;
const PICKER_SPACING: f32 = 35.0;
const PICKER_RADIUS: f32 = 12.0;
const PICKERS_PER_ROW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyAction {
    Settings,
    Back,
    Start,
}

/// Which colour a picker sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Body,
    Backpack,
}

impl ColorTarget {
    fn origin(&self) -> Vec2 {
        match self {
            ColorTarget::Body => Vec2::new(CUSTOM_X + 20.0, CUSTOM_Y + 85.0),
            ColorTarget::Backpack => Vec2::new(CUSTOM_X + 20.0, CUSTOM_Y + 185.0),
        }
    }
}

/// Centre of picker circle `index`
pub fn picker_center(target: ColorTarget, index: usize) -> Vec2 {
    let origin = target.origin();
    Vec2::new(
        origin.x + (index % PICKERS_PER_ROW) as f32 * PICKER_SPACING + 15.0,
        origin.y + (index / PICKERS_PER_ROW) as f32 * PICKER_SPACING + 15.0,
    )
}

/// Build the lobby roster: the local player followed by AI players
pub fn build_roster(local_name: &str) -> Vec<PlayerRecord> {
    let mut players = Vec::with_capacity(MAX_PLAYERS);
    let ai_count = AI_PLAYER_COUNT.min(MAX_PLAYERS - 1);
    let names = std::iter::once(local_name.to_string()).chain(
        (0..ai_count).map(|i| {
            AI_NAMES
                .get(i)
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("Player {}", i + 2))
        }),
    );
    for (index, name) in names.enumerate().take(MAX_PLAYERS) {
        players.push(PlayerRecord {
            id: PlayerId(index as u32),
            name,
            color: lobby_color(index),
            ready: false,
            is_local: index == 0,
        });
    }
    players
}

#[derive(Debug, Clone)]
pub struct LocalLobbyScene {
    pub players: Vec<PlayerRecord>,
    stars: Starfield,
    row_pulses: Vec<Tween>,
    buttons: Vec<Button<LobbyAction>>,
    toasts: Toasts,
}

impl LocalLobbyScene {
    pub fn new(ctx: &mut SceneContext) -> Self {
        let mut players = build_roster(&ctx.session.prefs.player_name);
        if let Some(local) = players.iter_mut().find(|p| p.is_local) {
            local.color = ctx.session.prefs.customization.body_color;
        }
        let row_pulses = (0..players.len())
            .map(|i| {
                Tween::new(1.0, 0.8, 2.0)
                    .with_yoyo()
                    .with_repeat(Repeat::Forever)
                    .with_delay(i as f32 * 0.2)
            })
            .collect();

        let mut scene = Self {
            players,
            stars: Starfield::new(
                &mut ctx.session.rng,
                50,
                Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            ),
            row_pulses,
            buttons: Vec::new(),
            toasts: Toasts::default(),
        };
        scene.layout_buttons(ctx.session);
        scene
    }

    fn layout_buttons(&mut self, session: &Session) {
        let t = |key| session.prefs.text(key);

        let mut back = Button::text(LobbyAction::Back, t(TextKey::Back), Vec2::ZERO, 20.0, 0xe74c3c, 0xc0392b)
            .with_padding(Vec2::new(15.0, 10.0));
        back.pos = Vec2::new(70.0, SCREEN_HEIGHT - 100.0) + back.box_size() / 2.0;

        let mut start = Button::text(LobbyAction::Start, t(TextKey::Start), Vec2::ZERO, 20.0, 0x27ae60, 0x229954)
            .with_padding(Vec2::new(15.0, 10.0));
        let size = start.box_size();
        start.pos = Vec2::new(SCREEN_WIDTH - 70.0 - size.x / 2.0, SCREEN_HEIGHT - 100.0 + size.y / 2.0);

        let settings = Button::image_scaled(
            LobbyAction::Settings,
            TextureKey::Gear,
            Vec2::new(SCREEN_WIDTH - 50.0, 50.0),
            0.4,
            0.45,
        );

        self.buttons = vec![settings, back, start];
    }

    pub fn local_player(&self) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.is_local)
    }

    /// Pick up a name or language change made in the settings overlay
    pub fn refresh_local_name(&mut self, ctx: &mut SceneContext) {
        let name = ctx.session.prefs.player_name.clone();
        if let Some(local) = self.players.iter_mut().find(|p| p.is_local) {
            local.name = name;
        }
        self.layout_buttons(ctx.session);
    }

    /// Apply a picked colour
    pub fn select_color(&mut self, ctx: &mut SceneContext, target: ColorTarget, color: u32) {
        let custom = &mut ctx.session.prefs.customization;
        match target {
            ColorTarget::Body => custom.body_color = color,
            ColorTarget::Backpack => custom.backpack_color = color,
        }
        let body = custom.body_color;
        if let Some(local) = self.players.iter_mut().find(|p| p.is_local) {
            local.color = body;
        }
        ctx.emit(GameEvent::SavePreferences);
    }

    fn try_start(&mut self, ctx: &mut SceneContext) -> Option<Transition> {
        if self.players.len() < MIN_PLAYERS {
            ctx.sound(SoundEffect::Warning);
            self.toasts.push(Toast::new(
                Label::new(
                    "Need at least 4 players to start!",
                    Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
                    24.0,
                    0xff0000,
                )
                .with_background(0x000000, Vec2::new(20.0, 10.0)),
            ));
            return None;
        }

        ctx.session.players = self.players.clone();
        ctx.session.local_player = self.local_player().map(|p| p.id);
        log::info!("Starting dropship with {} players", self.players.len());
        Some(Transition::Goto(SceneId::Dropship))
    }

    fn picked_color(input: &FrameInput) -> Option<(ColorTarget, u32)> {
        let p = input.pointer.filter(|_| input.pointer_released)?;
        for target in [ColorTarget::Body, ColorTarget::Backpack] {
            for (i, (_, color)) in available_colors().iter().enumerate() {
                if p.distance(picker_center(target, i)) <= PICKER_RADIUS {
                    return Some((target, *color));
                }
            }
        }
        None
    }

    pub fn update(
        &mut self,
        ctx: &mut SceneContext,
        input: &FrameInput,
        dt: f32,
    ) -> Option<Transition> {
        self.stars.update(dt);
        for pulse in &mut self.row_pulses {
            pulse.update(dt);
        }
        self.toasts.update(dt);

        if let Some((target, color)) = Self::picked_color(input) {
            self.select_color(ctx, target, color);
        }

        let mut clicked = None;
        for button in &mut self.buttons {
            if let Some(action) = button.update(input, dt) {
                clicked = Some(action);
            }
        }

        let action = clicked?;
        ctx.sound(SoundEffect::ButtonClick);
        match action {
            LobbyAction::Settings => Some(Transition::OpenSettings),
            LobbyAction::Back => Some(Transition::Goto(SceneId::MainMenu)),
            LobbyAction::Start => self.try_start(ctx),
        }
    }

    pub fn draw(&self, session: &Session, out: &mut DrawList) {
        out.background = BACKGROUND;
        let t = |key| session.prefs.text(key);
        let custom = session.prefs.customization;

        out.label(
            Label::new(
                t(TextKey::LocalLobby),
                Vec2::new(SCREEN_WIDTH / 2.0, 50.0),
                36.0,
                0xffffff,
            )
            .bold(),
        );

        self.stars.draw(out);

        let panel_stroke = Some(Stroke {
            width: 2.0,
            color: PANEL_STROKE,
            alpha: 1.0,
        });
        out.world_shape(Shape::panel(
            Rect::new(50.0, 120.0, SCREEN_WIDTH - 100.0, SCREEN_HEIGHT - 300.0),
            PANEL_FILL,
            0.8,
            10.0,
            panel_stroke,
        ));
        out.label(
            Label::new("Players:", Vec2::new(70.0, 140.0), 24.0, 0xffffff)
                .with_origin(Vec2::ZERO)
                .bold(),
        );

        for (i, player) in self.players.iter().enumerate() {
            let alpha = self.row_pulses.get(i).map_or(1.0, |t| t.value());
            let center = Vec2::new(ROW_X, ROW_TOP + i as f32 * ROW_SPACING);
            out.world_shape(Shape::Circle {
                center,
                radius: 15.0,
                color: player.color,
                alpha,
            });
            if player.color == 0x000000 {
                out.world_shape(Shape::Ring {
                    center,
                    radius: 15.0,
                    width: 2.0,
                    color: 0xffffff,
                    alpha,
                });
            }
            let text = if player.is_local {
                format!("{} (You)", player.name)
            } else {
                player.name.clone()
            };
            out.label(
                Label::new(text, center + Vec2::new(30.0, 0.0), 18.0, 0xffffff)
                    .with_origin(Vec2::new(0.0, 0.5))
                    .with_alpha(alpha),
            );
            out.label(
                Label::new(player.name.clone(), center - Vec2::new(0.0, 25.0), 12.0, 0xffffff)
                    .with_background(0x000000, Vec2::new(4.0, 2.0))
                    .with_alpha(alpha),
            );
        }

        out.label(
            Label::new(
                format!("{}/{}", self.players.len(), MAX_PLAYERS),
                Vec2::new(SCREEN_WIDTH - 70.0, 140.0),
                20.0,
                0xffffff,
            )
            .with_origin(Vec2::new(1.0, 0.0))
            .bold(),
        );

        // Customization panel
        out.world_shape(Shape::panel(
            Rect::new(CUSTOM_X, CUSTOM_Y, 250.0, SCREEN_HEIGHT - 300.0),
            PANEL_FILL,
            0.8,
            10.0,
            panel_stroke,
        ));
        let text_at = |dy: f32| Vec2::new(CUSTOM_X + 20.0, CUSTOM_Y + dy);
        out.label(
            Label::new("Customize:", text_at(20.0), 20.0, 0xffffff)
                .with_origin(Vec2::ZERO)
                .bold(),
        );
        out.label(Label::new("Body Color:", text_at(60.0), 16.0, 0xffffff).with_origin(Vec2::ZERO));
        out.label(
            Label::new("Backpack Color:", text_at(160.0), 16.0, 0xffffff).with_origin(Vec2::ZERO),
        );

        for (target, selected) in [
            (ColorTarget::Body, custom.body_color),
            (ColorTarget::Backpack, custom.backpack_color),
        ] {
            for (i, (_, color)) in available_colors().iter().enumerate() {
                let center = picker_center(target, i);
                out.world_shape(Shape::Circle {
                    center,
                    radius: PICKER_RADIUS,
                    color: *color,
                    alpha: 1.0,
                });
                let (width, ring) = if *color == selected {
                    (4.0, 0x00ff00)
                } else if *color == 0x000000 {
                    (3.0, 0xffffff)
                } else {
                    (2.0, 0xffffff)
                };
                out.world_shape(Shape::Ring {
                    center,
                    radius: PICKER_RADIUS,
                    width,
                    color: ring,
                    alpha: 1.0,
                });
            }
        }

        // Preview
        let preview = Vec2::new(CUSTOM_X + 125.0, CUSTOM_Y + 280.0);
        out.world_shape(Shape::Circle {
            center: preview,
            radius: 20.0,
            color: custom.body_color,
            alpha: 1.0,
        });
        if custom.body_color == 0x000000 {
            out.world_shape(Shape::Ring {
                center: preview,
                radius: 20.0,
                width: 2.0,
                color: 0xffffff,
                alpha: 1.0,
            });
        }
        out.world_shape(Shape::Circle {
            center: preview + Vec2::new(12.0, -8.0),
            radius: 8.0,
            color: custom.backpack_color,
            alpha: 1.0,
        });
        out.label(
            Label::new(
                session.prefs.player_name.clone(),
                preview - Vec2::new(0.0, 35.0),
                12.0,
                0xffffff,
            )
            .with_background(0x000000, Vec2::new(4.0, 2.0)),
        );

        for button in &self.buttons {
            button.draw(out);
        }
        self.toasts.draw(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preferences;

    fn click(scene: &mut LocalLobbyScene, ctx: &mut SceneContext, p: Vec2) -> Option<Transition> {
        let down = FrameInput {
            pointer: Some(p),
            pointer_pressed: true,
            ..Default::default()
        };
        let up = FrameInput {
            pointer: Some(p),
            pointer_released: true,
            ..Default::default()
        };
        scene.update(ctx, &down, 0.0).or(scene.update(ctx, &up, 0.0))
    }

    fn button_pos(scene: &LocalLobbyScene, action: LobbyAction) -> Vec2 {
        scene
            .buttons
            .iter()
            .find(|b| b.action == action)
            .map(|b| b.draw_pos())
            .unwrap()
    }

    #[test]
    fn test_roster() {
        let roster = build_roster("Me");
        let names: Vec<&str> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Me", "Red", "Blue", "Green", "Pink", "Orange"]);
        assert!(roster[0].is_local);
        assert!(roster[1..].iter().all(|p| !p.is_local));
        assert_eq!(roster[0].id.to_string(), "player_0");
        assert_eq!(roster[5].id.to_string(), "player_5");
        assert_eq!(roster[1].color, 0x0000ff);
    }

    #[test]
    fn test_roster_rebuilt_on_entry() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let first = LocalLobbyScene::new(&mut ctx);
        let second = LocalLobbyScene::new(&mut ctx);
        assert_eq!(first.players.len(), 6);
        assert_eq!(second.players.len(), 6);
    }

    #[test]
    fn test_start_goes_to_dropship() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = LocalLobbyScene::new(&mut ctx);
        let pos = button_pos(&scene, LobbyAction::Start);
        assert_eq!(click(&mut scene, &mut ctx, pos), Some(Transition::Goto(SceneId::Dropship)));
        assert_eq!(ctx.session.players.len(), 6);
        assert_eq!(ctx.session.local_player, Some(PlayerId(0)));
    }

    #[test]
    fn test_start_refused_below_minimum() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = LocalLobbyScene::new(&mut ctx);
        scene.players.truncate(3);
        let pos = button_pos(&scene, LobbyAction::Start);
        assert_eq!(click(&mut scene, &mut ctx, pos), None);
        assert_eq!(scene.toasts.len(), 1);

        scene.update(&mut ctx, &FrameInput::default(), 3.1);
        assert!(scene.toasts.is_empty());
    }

    #[test]
    fn test_back_and_settings() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = LocalLobbyScene::new(&mut ctx);
        let back = button_pos(&scene, LobbyAction::Back);
        assert_eq!(click(&mut scene, &mut ctx, back), Some(Transition::Goto(SceneId::MainMenu)));
        let gear = button_pos(&scene, LobbyAction::Settings);
        assert_eq!(click(&mut scene, &mut ctx, gear), Some(Transition::OpenSettings));
    }

    #[test]
    fn test_body_color_recolors_local_player() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = LocalLobbyScene::new(&mut ctx);
        // Cyan is palette index 9
        click(&mut scene, &mut ctx, picker_center(ColorTarget::Body, 9));
        assert_eq!(scene.local_player().unwrap().color, 0x00ffff);
        click(&mut scene, &mut ctx, picker_center(ColorTarget::Backpack, 11));
        assert_eq!(ctx.session.prefs.customization.backpack_color, 0x8b4513);
        assert_eq!(ctx.session.prefs.customization.body_color, 0x00ffff);
    }

    #[test]
    fn test_saved_body_color_applied_on_entry() {
        let mut prefs = Preferences::default();
        prefs.customization.body_color = 0x00ffff;
        let mut session = Session::new(prefs, 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let scene = LocalLobbyScene::new(&mut ctx);
        assert_eq!(scene.local_player().unwrap().color, 0x00ffff);
        assert_eq!(scene.players[1].color, 0x0000ff);
    }

    #[test]
    fn test_refresh_local_name() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = LocalLobbyScene::new(&mut ctx);
        ctx.session.prefs.set_player_name("Quinn");
        scene.refresh_local_name(&mut ctx);
        assert_eq!(scene.local_player().unwrap().name, "Quinn");
    }
}
