//! Scene graph
//!
//! Exactly one scene is active at a time; each owns everything it creates.
//! The settings overlay can be launched on top and takes pointer input
//! while it is open.

pub mod dropship;
pub mod local_lobby;
pub mod main_menu;
pub mod map;
pub mod preload;
pub mod settings;

use serde::{Deserialize, Serialize};

pub use dropship::DropshipScene;
pub use local_lobby::LocalLobbyScene;
pub use main_menu::MainMenuScene;
pub use map::MapScene;
pub use preload::PreloadScene;
pub use settings::SettingsScene;

use super::draw::DrawList;
use super::event::{GameEvent, SoundEffect};
use super::input::FrameInput;
use super::session::Session;

/// Scene identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneId {
    Preload,
    MainMenu,
    LocalLobby,
    Dropship,
    Map,
}

/// Requested by a scene at the end of an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Goto(SceneId),
    OpenSettings,
}

/// Shared state a scene may touch while updating
pub struct SceneContext<'a> {
    pub session: &'a mut Session,
    events: &'a mut Vec<GameEvent>,
}

impl<'a> SceneContext<'a> {
    pub fn new(session: &'a mut Session, events: &'a mut Vec<GameEvent>) -> Self {
        Self { session, events }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, effect: SoundEffect) {
        self.events.push(GameEvent::PlaySound(effect));
    }
}

#[derive(Debug, Clone)]
pub enum Scene {
    Preload(PreloadScene),
    MainMenu(MainMenuScene),
    LocalLobby(LocalLobbyScene),
    Dropship(DropshipScene),
    Map(MapScene),
}

impl Scene {
    fn enter(id: SceneId, ctx: &mut SceneContext) -> Self {
        match id {
            SceneId::Preload => Scene::Preload(PreloadScene::new()),
            SceneId::MainMenu => Scene::MainMenu(MainMenuScene::new(ctx)),
            SceneId::LocalLobby => Scene::LocalLobby(LocalLobbyScene::new(ctx)),
            SceneId::Dropship => Scene::Dropship(DropshipScene::new(ctx)),
            SceneId::Map => Scene::Map(MapScene::new(ctx)),
        }
    }

    pub fn id(&self) -> SceneId {
        match self {
            Scene::Preload(_) => SceneId::Preload,
            Scene::MainMenu(_) => SceneId::MainMenu,
            Scene::LocalLobby(_) => SceneId::LocalLobby,
            Scene::Dropship(_) => SceneId::Dropship,
            Scene::Map(_) => SceneId::Map,
        }
    }

    fn update(&mut self, ctx: &mut SceneContext, input: &FrameInput, dt: f32) -> Option<Transition> {
        match self {
            Scene::Preload(s) => s.update(ctx),
            Scene::MainMenu(s) => s.update(ctx, input, dt),
            Scene::LocalLobby(s) => s.update(ctx, input, dt),
            Scene::Dropship(s) => s.update(ctx, input, dt),
            Scene::Map(s) => s.update(ctx, input, dt),
        }
    }

    fn overlay_closed(&mut self, ctx: &mut SceneContext) {
        if let Scene::LocalLobby(s) = self {
            s.refresh_local_name(ctx);
        }
    }

    fn draw(&self, session: &Session, out: &mut DrawList) {
        match self {
            Scene::Preload(s) => s.draw(out),
            Scene::MainMenu(s) => s.draw(out),
            Scene::LocalLobby(s) => s.draw(session, out),
            Scene::Dropship(s) => s.draw(session, out),
            Scene::Map(s) => s.draw(session, out),
        }
    }
}

/// Owns the session, the active scene and the settings overlay
pub struct SceneManager {
    pub session: Session,
    scene: Scene,
    overlay: Option<SettingsScene>,
    events: Vec<GameEvent>,
}

impl SceneManager {
    /// Start at the preload scene
    pub fn new(session: Session) -> Self {
        Self::starting_at(session, SceneId::Preload)
    }

    pub fn starting_at(mut session: Session, id: SceneId) -> Self {
        let mut events = Vec::new();
        let scene = Scene::enter(id, &mut SceneContext::new(&mut session, &mut events));
        events.push(GameEvent::SceneChanged(id));
        Self {
            session,
            scene,
            overlay: None,
            events,
        }
    }

    pub fn current(&self) -> SceneId {
        self.scene.id()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay.is_some()
    }

    /// Advance one fixed step
    pub fn tick(&mut self, input: &FrameInput, dt: f32) {
        if input.pointer_pressed && input.touch {
            self.session.touch_mode = true;
        }

        let mut ctx = SceneContext::new(&mut self.session, &mut self.events);

        let masked;
        let scene_input = match self.overlay.as_mut() {
            Some(overlay) => {
                if overlay.update(&mut ctx, input, dt) {
                    self.overlay = None;
                    ctx.emit(GameEvent::HideNameInput);
                    self.scene.overlay_closed(&mut ctx);
                }
                masked = input.without_pointer();
                &masked
            }
            None => input,
        };

        match self.scene.update(&mut ctx, scene_input, dt) {
            Some(Transition::Goto(id)) => self.goto(id),
            Some(Transition::OpenSettings) => {
                if self.overlay.is_none() {
                    let mut ctx = SceneContext::new(&mut self.session, &mut self.events);
                    self.overlay = Some(SettingsScene::open(&mut ctx));
                }
            }
            None => {}
        }
    }

    /// Replace the active scene
    pub fn goto(&mut self, id: SceneId) {
        if self.overlay.take().is_some() {
            self.events.push(GameEvent::HideNameInput);
        }
        log::info!("Scene: {:?} -> {:?}", self.scene.id(), id);
        let mut ctx = SceneContext::new(&mut self.session, &mut self.events);
        self.scene = Scene::enter(id, &mut ctx);
        self.events.push(GameEvent::SceneChanged(id));
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Describe the current frame
    pub fn draw(&self) -> DrawList {
        let mut list = DrawList::new(0x000000);
        self.scene.draw(&self.session, &mut list);
        if let Some(overlay) = &self.overlay {
            list.dim_labels(0.3);
            let mut top = DrawList::new(0x000000);
            overlay.draw(&self.session.prefs, &mut top);
            list.append(top);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preferences;

    fn manager_at(id: SceneId) -> SceneManager {
        SceneManager::starting_at(Session::new(Preferences::default(), 42), id)
    }

    #[test]
    fn test_preload_reaches_main_menu() {
        let mut mgr = SceneManager::new(Session::new(Preferences::default(), 1));
        assert_eq!(mgr.current(), SceneId::Preload);
        for _ in 0..100 {
            mgr.tick(&FrameInput::default(), 1.0 / 60.0);
        }
        assert_eq!(mgr.current(), SceneId::MainMenu);
        let events = mgr.drain_events();
        assert!(events.contains(&GameEvent::HideLoadingScreen));
        assert!(events.contains(&GameEvent::SceneChanged(SceneId::MainMenu)));
        assert!(mgr.drain_events().is_empty());
    }

    #[test]
    fn test_overlay_blocks_pointer_and_closes_on_escape() {
        let mut mgr = manager_at(SceneId::MainMenu);
        mgr.overlay = Some(SettingsScene::open(&mut SceneContext::new(
            &mut mgr.session,
            &mut mgr.events,
        )));
        assert!(mgr.overlay_open());

        // Clicking where the Play button sits does nothing while the overlay is open
        let play = match mgr.scene() {
            Scene::MainMenu(menu) => menu.buttons[0].draw_pos(),
            _ => unreachable!(),
        };
        let down = FrameInput {
            pointer: Some(play),
            pointer_pressed: true,
            ..Default::default()
        };
        let up = FrameInput {
            pointer: Some(play),
            pointer_released: true,
            ..Default::default()
        };
        mgr.tick(&down, 0.0);
        mgr.tick(&up, 0.0);
        assert_eq!(mgr.current(), SceneId::MainMenu);

        let esc = FrameInput {
            escape: true,
            ..Default::default()
        };
        mgr.tick(&esc, 0.0);
        assert!(!mgr.overlay_open());
        assert!(mgr.drain_events().contains(&GameEvent::HideNameInput));
    }

    #[test]
    fn test_goto_closes_overlay() {
        let mut mgr = manager_at(SceneId::LocalLobby);
        mgr.overlay = Some(SettingsScene::open(&mut SceneContext::new(
            &mut mgr.session,
            &mut mgr.events,
        )));
        mgr.goto(SceneId::MainMenu);
        assert!(!mgr.overlay_open());
        assert_eq!(mgr.current(), SceneId::MainMenu);
    }

    #[test]
    fn test_draw_dims_labels_under_overlay() {
        let mut mgr = manager_at(SceneId::LocalLobby);
        let before = mgr.draw();
        let title_alpha = before.labels[0].alpha;
        mgr.overlay = Some(SettingsScene::open(&mut SceneContext::new(
            &mut mgr.session,
            &mut mgr.events,
        )));
        let after = mgr.draw();
        assert!((after.labels[0].alpha - title_alpha * 0.3).abs() < 1e-6);
        assert!(after.labels.len() > before.labels.len());
    }
}
