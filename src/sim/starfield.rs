//! Twinkling background stars

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::draw::{DrawList, Shape};
use super::tween::{Repeat, Tween};

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    twinkle: Tween,
}

impl Star {
    pub fn alpha(&self) -> f32 {
        self.twinkle.value()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    /// Scatter `count` stars over the screen, each fading 0.7 -> 0.2 and back
    pub fn new(rng: &mut Pcg32, count: usize, size: Vec2) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(rng.random_range(0.0..=size.x), rng.random_range(0.0..=size.y)),
                radius: 1.0,
                twinkle: Tween::new(0.7, 0.2, rng.random_range(1.0..=3.0))
                    .with_yoyo()
                    .with_repeat(Repeat::Forever)
                    .with_delay(rng.random_range(0.0..=2.0)),
            })
            .collect();
        Self { stars }
    }

    /// Drifting variant used behind the main menu
    pub fn scatter(rng: &mut Pcg32, count: usize, size: Vec2) -> Self {
        let mut field = Self::new(rng, count, size);
        for star in &mut field.stars {
            star.radius = rng.random_range(0.5..=2.0);
        }
        field
    }

    pub fn update(&mut self, dt: f32) {
        for star in &mut self.stars {
            star.twinkle.update(dt);
        }
    }

    /// Move every star left, wrapping at the screen edge
    pub fn drift(&mut self, dx: f32, width: f32) {
        for star in &mut self.stars {
            star.pos.x -= dx * star.radius;
            if star.pos.x < 0.0 {
                star.pos.x += width;
            }
        }
    }

    pub fn draw(&self, out: &mut DrawList) {
        for star in &self.stars {
            out.world_shape(Shape::Circle {
                center: star.pos,
                radius: star.radius,
                color: 0xffffff,
                alpha: star.alpha(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_stars_inside_screen() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = Starfield::new(&mut rng, 50, Vec2::new(1280.0, 720.0));
        assert_eq!(field.stars.len(), 50);
        for _ in 0..200 {
            field.update(1.0 / 60.0);
        }
        for star in &field.stars {
            assert!(star.pos.x >= 0.0 && star.pos.x <= 1280.0);
            assert!(star.pos.y >= 0.0 && star.pos.y <= 720.0);
            assert!(star.alpha() >= 0.2 - 1e-4 && star.alpha() <= 0.7 + 1e-4);
        }
    }

    #[test]
    fn test_drift_wraps() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = Starfield::scatter(&mut rng, 10, Vec2::new(100.0, 100.0));
        for _ in 0..1000 {
            field.drift(1.0, 100.0);
        }
        assert!(field.stars.iter().all(|s| s.pos.x >= 0.0 && s.pos.x <= 100.0));
    }
}
