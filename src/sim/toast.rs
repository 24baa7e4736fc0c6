//! Short-lived banner messages that fade out

use glam::Vec2;

use super::draw::{DrawList, Label};
use super::tween::Tween;
use crate::consts::TOAST_DURATION;

#[derive(Debug, Clone)]
pub struct Toast {
    pub label: Label,
    fade: Tween,
}

impl Toast {
    /// Banner fading from opaque to invisible over the default duration
    pub fn new(label: Label) -> Self {
        Self::with_duration(label, TOAST_DURATION)
    }

    pub fn with_duration(label: Label, duration: f32) -> Self {
        Self {
            label,
            fade: Tween::new(1.0, 0.0, duration),
        }
    }

    /// Centred banner text on a black box
    pub fn banner(text: &str, center: Vec2, font_px: f32, color: u32) -> Self {
        Self::new(
            Label::new(text, center, font_px, color)
                .with_background(0x000000, Vec2::new(20.0, 10.0))
                .bold(),
        )
    }

    pub fn alpha(&self) -> f32 {
        self.fade.value()
    }

    pub fn is_finished(&self) -> bool {
        self.fade.is_finished()
    }
}

/// Active toasts in creation order
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, toast: Toast) {
        self.items.push(toast);
    }

    pub fn update(&mut self, dt: f32) {
        for toast in &mut self.items {
            toast.fade.update(dt);
        }
        self.items.retain(|t| !t.is_finished());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|t| t.label.text.as_str())
    }

    pub fn draw(&self, out: &mut DrawList) {
        for toast in &self.items {
            out.label(toast.label.clone().with_alpha(toast.alpha()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_fades_and_expires() {
        let mut toasts = Toasts::default();
        toasts.push(Toast::banner("EMERGENCY MEETING!", Vec2::new(640.0, 360.0), 32.0, 0xff0000));
        toasts.update(1.5);
        let mut list = DrawList::new(0);
        toasts.draw(&mut list);
        assert!((list.labels[0].alpha - 0.5).abs() < 1e-4);

        toasts.update(1.6);
        assert!(toasts.is_empty());
    }
}
