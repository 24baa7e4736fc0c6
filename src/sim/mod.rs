//! Deterministic game simulation
//!
//! Scenes, characters and UI widgets live here. This module must be pure:
//! - Fixed timestep only
//! - Seeded RNG only (owned by the session)
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies; side effects leave as `GameEvent`s
//!   and each frame is described by a `DrawList`

pub mod assets;
pub mod button;
pub mod character;
pub mod color;
pub mod draw;
pub mod event;
pub mod geom;
pub mod input;
pub mod joystick;
pub mod scene;
pub mod session;
pub mod starfield;
pub mod toast;
pub mod tween;

pub use assets::{ActionKind, Hat, Pet, Skin, TextureKey};
pub use character::{Character, CharacterState, CharacterSystem, Corpse, PlayerId};
pub use draw::{DrawCmd, DrawList, Label, Shape, Sprite};
pub use event::{GameEvent, SoundEffect};
pub use geom::Rect;
pub use input::FrameInput;
pub use scene::{Scene, SceneId, SceneManager};
pub use session::Session;
pub use tween::{Ease, Repeat, Tween};
