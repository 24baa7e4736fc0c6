//! Settings overlay
//!
//! Drawn above another scene. Holds the player-name field, language choice
//! and volume; language and volume persist immediately, the name on Apply.

use glam::Vec2;

use super::SceneContext;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::i18n::{Language, TextKey, translate};
use crate::prefs::{MAX_NAME_LEN, Preferences, sanitize_name};
use crate::sim::button::Button;
use crate::sim::draw::{DrawList, Label, Shape, Stroke};
use crate::sim::event::{GameEvent, SoundEffect};
use crate::sim::geom::Rect;
use crate::sim::input::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    Language(Language),
    VolumeDown,
    VolumeUp,
    Back,
    Apply,
}

const PANEL_SIZE: Vec2 = Vec2::new(500.0, 400.0);
const VOLUME_STEP: f32 = 0.1;

const SELECTED_TEXT: u32 = 0x3498db;
const SELECTED_BG: u32 = 0xffffff;
const UNSELECTED_BG: u32 = 0x34495e;
const LANGUAGE_HOVER_BG: u32 = 0x3498db;

fn panel_rect() -> Rect {
    Rect::centered(Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0), PANEL_SIZE)
}

/// White box behind the name field
fn name_box() -> Rect {
    let panel = panel_rect();
    Rect::new(SCREEN_WIDTH / 2.0 - 55.0, panel.y + 90.0, 200.0, 35.0)
}

#[derive(Debug, Clone)]
pub struct SettingsScene {
    buttons: Vec<Button<SettingsAction>>,
    /// Current contents of the name field
    pub name_text: String,
}

impl SettingsScene {
    /// Open the overlay and create the name field
    pub fn open(ctx: &mut SceneContext) -> Self {
        let panel = panel_rect();
        let cx = SCREEN_WIDTH / 2.0;
        let lang_y = panel.y + 237.0;
        let volume_y = panel.y + 285.0;

        let mut buttons = vec![
            Button::text(
                SettingsAction::Language(Language::English),
                Language::English.display_name(),
                Vec2::new(cx - 30.0, lang_y),
                18.0,
                UNSELECTED_BG,
                LANGUAGE_HOVER_BG,
            )
            .with_padding(Vec2::new(15.0, 8.0)),
            Button::text(
                SettingsAction::Language(Language::Turkish),
                Language::Turkish.display_name(),
                Vec2::new(cx + 65.0, lang_y),
                18.0,
                UNSELECTED_BG,
                LANGUAGE_HOVER_BG,
            )
            .with_padding(Vec2::new(15.0, 8.0)),
            Button::text(
                SettingsAction::VolumeDown,
                "-",
                Vec2::new(cx - 20.0, volume_y),
                18.0,
                UNSELECTED_BG,
                LANGUAGE_HOVER_BG,
            )
            .with_size(Vec2::new(36.0, 32.0)),
            Button::text(
                SettingsAction::VolumeUp,
                "+",
                Vec2::new(cx + 100.0, volume_y),
                18.0,
                UNSELECTED_BG,
                LANGUAGE_HOVER_BG,
            )
            .with_size(Vec2::new(36.0, 32.0)),
            Button::text(
                SettingsAction::Back,
                "",
                Vec2::new(panel.x + panel.w - 80.0, panel.y + 20.0),
                16.0,
                0xe74c3c,
                0xc0392b,
            )
            .with_padding(Vec2::new(12.0, 6.0)),
            Button::text(
                SettingsAction::Apply,
                "",
                Vec2::new(cx, panel.y + panel.h - 60.0),
                18.0,
                0x27ae60,
                0x229954,
            ),
        ];
        for b in &mut buttons {
            b.set_text_color(0xffffff);
        }

        let name_text = ctx.session.prefs.player_name.clone();
        let field = name_box();
        ctx.emit(GameEvent::ShowNameInput {
            value: name_text.clone(),
            center: field.center(),
            width: field.w - 10.0,
        });

        let mut scene = Self { buttons, name_text };
        scene.relabel(ctx.session.prefs.language);
        scene
    }

    /// Refresh translated button text and the language highlight
    fn relabel(&mut self, language: Language) {
        for button in &mut self.buttons {
            match button.action {
                SettingsAction::Back => button.set_text(translate(language, TextKey::Back)),
                SettingsAction::Apply => button.set_text(translate(language, TextKey::Apply)),
                SettingsAction::Language(lang) => {
                    if lang == language {
                        button.set_background(SELECTED_BG, LANGUAGE_HOVER_BG);
                        button.set_text_color(SELECTED_TEXT);
                    } else {
                        button.set_background(UNSELECTED_BG, LANGUAGE_HOVER_BG);
                        button.set_text_color(0xffffff);
                    }
                }
                _ => {}
            }
        }
    }

    /// Returns true when the overlay closed this frame
    pub fn update(&mut self, ctx: &mut SceneContext, input: &FrameInput, dt: f32) -> bool {
        if let Some(text) = &input.name_text {
            self.name_text = text.chars().take(MAX_NAME_LEN).collect();
        }
        if input.escape {
            return true;
        }

        let mut clicked = None;
        for button in &mut self.buttons {
            if let Some(action) = button.update(input, dt) {
                clicked = Some(action);
            }
        }
        let Some(action) = clicked else {
            return false;
        };
        ctx.sound(SoundEffect::ButtonClick);

        match action {
            SettingsAction::Language(language) => {
                ctx.session.prefs.set_language(language);
                ctx.emit(GameEvent::SavePreferences);
                self.relabel(language);
                log::info!("Language set to {}", language.code());
                false
            }
            SettingsAction::VolumeDown | SettingsAction::VolumeUp => {
                let step = if action == SettingsAction::VolumeUp {
                    VOLUME_STEP
                } else {
                    -VOLUME_STEP
                };
                let volume = ((ctx.session.prefs.volume + step) * 10.0).round() / 10.0;
                ctx.session.prefs.set_volume(volume);
                let volume = ctx.session.prefs.volume;
                ctx.emit(GameEvent::VolumeChanged(volume));
                ctx.emit(GameEvent::SavePreferences);
                false
            }
            SettingsAction::Back => true,
            SettingsAction::Apply => {
                if let Some(name) = sanitize_name(&self.name_text) {
                    ctx.session.prefs.set_player_name(&name);
                    ctx.emit(GameEvent::SavePreferences);
                    log::info!("Player name set to {name}");
                }
                true
            }
        }
    }

    pub fn draw(&self, prefs: &Preferences, out: &mut DrawList) {
        let panel = panel_rect();
        let cx = SCREEN_WIDTH / 2.0;
        let t = |key| translate(prefs.language, key);

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
        out.ui_shape(Shape::panel(
            name_box(),
            0xffffff,
            1.0,
            5.0,
            Some(Stroke {
                width: 2.0,
                color: 0x3498db,
                alpha: 1.0,
            }),
        ));

        out.label(
            Label::new(t(TextKey::Settings), Vec2::new(cx, panel.y + 40.0), 32.0, 0xffffff).bold(),
        );
        let rows = [
            (TextKey::PlayerName, 100.0),
            (TextKey::Language, 180.0),
            (TextKey::Volume, 272.0),
        ];
        for (key, dy) in rows {
            out.label(
                Label::new(
                    format!("{}:", t(key)),
                    Vec2::new(cx - 180.0, panel.y + dy),
                    20.0,
                    0xffffff,
                )
                .with_origin(Vec2::ZERO),
            );
        }
        out.label(Label::new(
            format!("{}%", (prefs.volume * 100.0).round() as u32),
            Vec2::new(cx + 40.0, panel.y + 285.0),
            18.0,
            0xffffff,
        ));

        for button in &self.buttons {
            button.draw(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preferences;
    use crate::sim::session::Session;

    fn click(scene: &mut SettingsScene, ctx: &mut SceneContext, action: SettingsAction) -> bool {
        let pos = scene
            .buttons
            .iter()
            .find(|b| b.action == action)
            .map(|b| b.draw_pos())
            .unwrap();
        let down = FrameInput {
            pointer: Some(pos),
            pointer_pressed: true,
            ..Default::default()
        };
        let up = FrameInput {
            pointer: Some(pos),
            pointer_released: true,
            ..Default::default()
        };
        let a = scene.update(ctx, &down, 0.0);
        let b = scene.update(ctx, &up, 0.0);
        a || b
    }

    #[test]
    fn test_open_creates_name_field() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let scene = SettingsScene::open(&mut ctx);
        assert_eq!(scene.name_text, "Player");
        assert!(matches!(
            events.first(),
            Some(GameEvent::ShowNameInput { value, .. }) if value == "Player"
        ));
    }

    #[test]
    fn test_apply_saves_trimmed_name() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = SettingsScene::open(&mut ctx);
        let typing = FrameInput {
            name_text: Some("  Nova  ".into()),
            ..Default::default()
        };
        assert!(!scene.update(&mut ctx, &typing, 0.0));
        assert!(click(&mut scene, &mut ctx, SettingsAction::Apply));
        assert_eq!(session.prefs.player_name, "Nova");
        assert!(events.contains(&GameEvent::SavePreferences));
    }

    #[test]
    fn test_apply_ignores_blank_name() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = SettingsScene::open(&mut ctx);
        let typing = FrameInput {
            name_text: Some("   ".into()),
            ..Default::default()
        };
        scene.update(&mut ctx, &typing, 0.0);
        assert!(click(&mut scene, &mut ctx, SettingsAction::Apply));
        assert_eq!(session.prefs.player_name, "Player");
    }

    #[test]
    fn test_language_persists_immediately() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = SettingsScene::open(&mut ctx);
        assert!(!click(&mut scene, &mut ctx, SettingsAction::Language(Language::Turkish)));
        assert_eq!(ctx.session.prefs.language, Language::Turkish);
        let back = scene
            .buttons
            .iter()
            .find(|b| b.action == SettingsAction::Back)
            .unwrap();
        assert!(matches!(&back.style, crate::sim::button::ButtonStyle::Text { text, .. } if text == "Geri"));
        assert!(events.contains(&GameEvent::SavePreferences));
    }

    #[test]
    fn test_volume_steps_and_escape() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut ctx = SceneContext::new(&mut session, &mut events);
        let mut scene = SettingsScene::open(&mut ctx);
        for _ in 0..5 {
            click(&mut scene, &mut ctx, SettingsAction::VolumeUp);
        }
        assert!((ctx.session.prefs.volume - 1.0).abs() < 1e-6);
        click(&mut scene, &mut ctx, SettingsAction::VolumeDown);
        assert!((ctx.session.prefs.volume - 0.9).abs() < 1e-6);

        let esc = FrameInput {
            escape: true,
            ..Default::default()
        };
        assert!(scene.update(&mut ctx, &esc, 0.0));
    }
}
