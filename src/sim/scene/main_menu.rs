//! Title screen

use glam::Vec2;

use super::{SceneContext, SceneId, Transition};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::assets::TextureKey;
use crate::sim::button::Button;
use crate::sim::draw::{DrawList, Shape, Sprite};
use crate::sim::event::SoundEffect;
use crate::sim::geom::Rect;
use crate::sim::input::FrameInput;
use crate::sim::starfield::Starfield;
use crate::sim::tween::Tween;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Local,
    Settings,
}

const BUTTON_SPACING: f32 = 120.0;
const STAR_COUNT: usize = 120;
/// Star drift in pixels per frame for a unit-size star
const DRIFT_SPEED: f32 = 0.4;

#[derive(Debug, Clone)]
pub struct MainMenuScene {
    stars: Starfield,
    logo_pulse: Tween,
    pub buttons: Vec<Button<MenuAction>>,
}

impl MainMenuScene {
    pub fn new(ctx: &mut SceneContext) -> Self {
        let center_x = SCREEN_WIDTH / 2.0;
        let top = SCREEN_HEIGHT * 0.6;
        let buttons = [
            (MenuAction::Play, TextureKey::PlayButton),
            (MenuAction::Local, TextureKey::LocalButton),
            (MenuAction::Settings, TextureKey::SettingsButton),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (action, texture))| {
            Button::image(action, texture, Vec2::new(center_x, top + i as f32 * BUTTON_SPACING))
                .with_bob(10.0, 1.5 + i as f32 * 0.2)
        })
        .collect();

        Self {
            stars: Starfield::scatter(
                &mut ctx.session.rng,
                STAR_COUNT,
                Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            ),
            logo_pulse: Tween::pulse(0.6, 0.65, 2.0),
            buttons,
        }
    }

    pub fn logo_scale(&self) -> f32 {
        self.logo_pulse.value()
    }

    pub fn update(
        &mut self,
        ctx: &mut SceneContext,
        input: &FrameInput,
        dt: f32,
    ) -> Option<Transition> {
        self.stars.update(dt);
        self.stars.drift(DRIFT_SPEED, SCREEN_WIDTH);
        self.logo_pulse.update(dt);

        let mut clicked = None;
        for button in &mut self.buttons {
            if let Some(action) = button.update(input, dt) {
                clicked = Some(action);
            }
        }

        let action = clicked?;
        ctx.sound(SoundEffect::ButtonClick);
        match action {
            MenuAction::Play | MenuAction::Local => Some(Transition::Goto(SceneId::LocalLobby)),
            MenuAction::Settings => Some(Transition::OpenSettings),
        }
    }

    pub fn draw(&self, out: &mut DrawList) {
        out.background = 0x05050f;
        self.stars.draw(out);
        out.ui_shape(Shape::rect(
            Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
            0x000000,
            0.3,
        ));
        out.ui_sprite(Sprite::new(
            TextureKey::Logo,
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT * 0.25),
            self.logo_scale(),
        ));
        for button in &self.buttons {
            button.draw(out);
        }
    }
}
