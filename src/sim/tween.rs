//! Scalar tweens
//!
//! A tween interpolates one value over time. Times are in seconds.

use serde::{Deserialize, Serialize};

/// Easing curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Ease {
    #[default]
    Linear,
    /// Sine ease-in-out
    SineInOut,
    /// Quadratic ease-out
    Power2,
}

impl Ease {
    /// Map linear progress `t` in 0..=1 onto the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
            Ease::Power2 => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// How many extra times a tween plays after the first pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    Times(u32),
    Forever,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub delay: f32,
    pub yoyo: bool,
    pub repeat: Repeat,
    pub ease: Ease,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(f32::EPSILON),
            delay: 0.0,
            yoyo: false,
            repeat: Repeat::Times(0),
            ease: Ease::Linear,
            elapsed: 0.0,
        }
    }

    /// Back-and-forth forever, the shape used by idle effects
    pub fn pulse(from: f32, to: f32, duration: f32) -> Self {
        Self::new(from, to, duration)
            .with_yoyo()
            .with_repeat(Repeat::Forever)
            .with_ease(Ease::SineInOut)
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Length of one forward (and back, for yoyo) pass
    fn cycle_len(&self) -> f32 {
        if self.yoyo {
            self.duration * 2.0
        } else {
            self.duration
        }
    }

    /// Total active time, `None` when infinite
    pub fn total_duration(&self) -> Option<f32> {
        match self.repeat {
            Repeat::Forever => None,
            Repeat::Times(n) => Some(self.delay + self.cycle_len() * (n as f32 + 1.0)),
        }
    }

    /// Advance by `dt` and return the new value
    pub fn update(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        if let Some(total) = self.total_duration() {
            self.elapsed = self.elapsed.min(total);
        }
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.total_duration().is_some_and(|total| self.elapsed >= total)
    }

    /// Current value
    pub fn value(&self) -> f32 {
        let t = self.elapsed - self.delay;
        if t <= 0.0 {
            return self.from;
        }
        if self.is_finished() {
            return if self.yoyo { self.from } else { self.to };
        }

        let local = t % self.cycle_len();
        let progress = if local <= self.duration {
            local / self.duration
        } else {
            1.0 - (local - self.duration) / self.duration
        };
        self.from + (self.to - self.from) * self.ease.apply(progress)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::SineInOut, Ease::Power2] {
            assert!(ease.apply(0.0).abs() < 1e-6);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert!((Ease::SineInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Ease::Power2.apply(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_one_shot() {
        let mut tw = Tween::new(0.0, 10.0, 1.0);
        assert!((tw.update(0.5) - 5.0).abs() < 1e-4);
        assert!(!tw.is_finished());
        assert_eq!(tw.update(1.0), 10.0);
        assert!(tw.is_finished());
    }

    #[test]
    fn test_yoyo_forever() {
        let mut tw = Tween::new(0.6, 0.65, 2.0)
            .with_yoyo()
            .with_repeat(Repeat::Forever);
        // Peak after one duration
        assert!((tw.update(2.0) - 0.65).abs() < 1e-4);
        // Back at start after the return leg
        assert!((tw.update(2.0) - 0.6).abs() < 1e-4);
        assert!(!tw.is_finished());
        assert!((tw.update(1.0) - 0.625).abs() < 1e-4);
    }

    #[test]
    fn test_delay() {
        let mut tw = Tween::new(1.0, 0.0, 1.0).with_delay(2.0);
        assert_eq!(tw.update(1.5), 1.0);
        assert!((tw.update(1.0) - 0.5).abs() < 1e-4);
        assert_eq!(tw.update(5.0), 0.0);
        assert!(tw.is_finished());
    }

    #[test]
    fn test_yoyo_finite_ends_at_start() {
        let mut tw = Tween::new(0.0, 1.0, 1.0).with_yoyo();
        tw.update(10.0);
        assert!(tw.is_finished());
        assert_eq!(tw.value(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_value_stays_in_range(
            from in -100.0f32..100.0,
            to in -100.0f32..100.0,
            duration in 0.05f32..5.0,
            steps in proptest::collection::vec(0.0f32..0.5, 1..50),
        ) {
            let mut tw = Tween::pulse(from, to, duration);
            let lo = from.min(to) - 1e-3;
            let hi = from.max(to) + 1e-3;
            for dt in steps {
                let v = tw.update(dt);
                prop_assert!(v >= lo && v <= hi);
            }
        }
    }
}
