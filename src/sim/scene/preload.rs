//! Loading screen
//!
//! Requests every texture in the manifest a few per frame and shows the
//! progress, then hands over to the main menu.

use std::collections::VecDeque;

use glam::Vec2;

use super::{SceneContext, SceneId, Transition};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::assets::{TextureKey, manifest};
use crate::sim::draw::{DrawList, Label, Shape};
use crate::sim::event::GameEvent;
use crate::sim::geom::Rect;

/// Textures requested per substep
const LOADS_PER_TICK: usize = 2;

#[derive(Debug, Clone)]
pub struct PreloadScene {
    pending: VecDeque<TextureKey>,
    total: usize,
    loaded: usize,
}

impl PreloadScene {
    pub fn new() -> Self {
        let pending: VecDeque<_> = manifest().into();
        Self {
            total: pending.len(),
            pending,
            loaded: 0,
        }
    }

    /// Fraction of textures requested so far
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f32 / self.total as f32
        }
    }

    pub fn update(&mut self, ctx: &mut SceneContext) -> Option<Transition> {
        for _ in 0..LOADS_PER_TICK {
            let Some(key) = self.pending.pop_front() else {
                break;
            };
            ctx.emit(GameEvent::LoadTexture(key));
            self.loaded += 1;
        }

        if self.pending.is_empty() {
            log::info!("Loaded {} textures", self.total);
            ctx.emit(GameEvent::HideLoadingScreen);
            return Some(Transition::Goto(SceneId::MainMenu));
        }
        None
    }

    pub fn draw(&self, out: &mut DrawList) {
        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        out.ui_shape(Shape::rect(
            Rect::new(center.x - 160.0, center.y - 25.0, 320.0, 50.0),
            0x222222,
            0.8,
        ));
        out.ui_shape(Shape::rect(
            Rect::new(center.x - 150.0, center.y - 15.0, 300.0 * self.progress(), 30.0),
            0xffffff,
            1.0,
        ));
        out.label(Label::new("Loading...", center - Vec2::new(0.0, 50.0), 20.0, 0xffffff));
        out.label(Label::new(
            format!("{}%", (self.progress() * 100.0) as u32),
            center,
            18.0,
            0x808080,
        ));
    }
}

impl Default for PreloadScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preferences;
    use crate::sim::session::Session;

    #[test]
    fn test_loads_everything_then_leaves() {
        let mut session = Session::new(Preferences::default(), 1);
        let mut events = Vec::new();
        let mut scene = PreloadScene::new();
        let total = manifest().len();

        let mut transition = None;
        for _ in 0..total {
            let mut ctx = SceneContext::new(&mut session, &mut events);
            transition = scene.update(&mut ctx);
            if transition.is_some() {
                break;
            }
        }
        assert_eq!(transition, Some(Transition::Goto(SceneId::MainMenu)));
        assert_eq!(scene.progress(), 1.0);

        let loads = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LoadTexture(_)))
            .count();
        assert_eq!(loads, total);
        assert_eq!(events.last(), Some(&GameEvent::HideLoadingScreen));
    }
}
