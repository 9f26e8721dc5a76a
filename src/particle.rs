//! A single drifting point of the backdrop.

use glam::Vec2;
use rand::Rng;

use crate::field::FieldConfig;
use crate::surface::Surface;
use crate::theme::Theme;

/// One simulated point.
///
/// Position and velocity change every frame; radius and opacity are fixed
/// when the particle is created (or re-rolled by [`Particle::reset`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    opacity: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            opacity,
        }
    }

    /// A particle with every attribute drawn from the configured ranges.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, config: &FieldConfig) -> Self {
        let mut particle = Self::new(Vec2::ZERO, Vec2::ZERO, 0.0, 0.0);
        particle.reset(rng, bounds, config);
        particle
    }

    /// Re-roll position, velocity, radius and opacity.
    ///
    /// Position is uniform over the surface, each velocity component uniform
    /// in `[-max_speed, max_speed)`.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Vec2, config: &FieldConfig) {
        let [r_lo, r_hi] = config.radius_range;
        let [a_lo, a_hi] = config.opacity_range;

        self.position = Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y);
        self.velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * 2.0 * config.max_speed,
            (rng.gen::<f32>() - 0.5) * 2.0 * config.max_speed,
        );
        self.radius = r_lo + rng.gen::<f32>() * (r_hi - r_lo);
        self.opacity = a_lo + rng.gen::<f32>() * (a_hi - a_lo);
    }

    /// Move by one frame of velocity and reflect off the surface edges.
    ///
    /// Past the low edge the component is pointed positive, past the high
    /// edge negative. Coming from inside that is a single sign flip; a
    /// particle stranded outside by a resize is steered back in.
    pub fn update(&mut self, bounds: Vec2) {
        self.position += self.velocity;

        if self.position.x < 0.0 {
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > bounds.x {
            self.velocity.x = -self.velocity.x.abs();
        }

        if self.position.y < 0.0 {
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > bounds.y {
            self.velocity.y = -self.velocity.y.abs();
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, theme: Theme) {
        surface.fill_circle(self.position, self.radius, theme.particle_color(self.opacity));
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = FieldConfig::default();
        let bounds = Vec2::new(1280.0, 720.0);

        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, bounds, &config);
            assert!((0.0..bounds.x).contains(&p.position().x));
            assert!((0.0..bounds.y).contains(&p.position().y));
            assert!(p.velocity().x.abs() <= 0.3 && p.velocity().y.abs() <= 0.3);
            assert!((0.4..2.2).contains(&p.radius()));
            assert!((0.15..0.75).contains(&p.opacity()));
        }
    }

    #[test]
    fn test_update_moves_by_velocity() {
        let mut p = Particle::new(Vec2::new(10.0, 10.0), Vec2::new(0.25, -0.5), 1.0, 0.5);
        p.update(Vec2::new(100.0, 100.0));
        assert_eq!(p.position(), Vec2::new(10.25, 9.5));
        assert_eq!(p.velocity(), Vec2::new(0.25, -0.5));
    }

    #[test]
    fn test_reflects_off_each_wall_once() {
        let bounds = Vec2::new(100.0, 50.0);
        let mut p = Particle::new(Vec2::new(99.9, 0.1), Vec2::new(0.3, -0.3), 1.0, 0.5);

        p.update(bounds);
        assert_eq!(p.velocity(), Vec2::new(-0.3, 0.3));

        // Next frame brings it back inside with no second flip.
        p.update(bounds);
        assert_eq!(p.velocity(), Vec2::new(-0.3, 0.3));
        assert!(p.position().x <= bounds.x && p.position().y >= 0.0);
    }

    #[test]
    fn test_stranded_particle_returns_after_shrink() {
        let mut p = Particle::new(Vec2::new(500.0, 20.0), Vec2::new(0.2, 0.0), 1.0, 0.5);
        let shrunk = Vec2::new(300.0, 100.0);

        let mut last_x = p.position().x;
        for _ in 0..20 {
            p.update(shrunk);
        }
        // Moving steadily toward the surface instead of jittering in place.
        assert!(p.velocity().x < 0.0);
        assert!(p.position().x < last_x);
        last_x = p.position().x;
        p.update(shrunk);
        assert!(p.position().x < last_x);
    }

    #[test]
    fn test_reset_keeps_ranges() {
        let mut rng = StdRng::seed_from_u64(99);
        let config = FieldConfig::default();
        let bounds = Vec2::new(200.0, 200.0);
        let mut p = Particle::new(Vec2::new(-50.0, 900.0), Vec2::splat(5.0), 9.0, 0.99);

        p.reset(&mut rng, bounds, &config);
        assert!((0.0..200.0).contains(&p.position().x));
        assert!((0.0..200.0).contains(&p.position().y));
        assert!(p.radius() < 2.2);
        assert!(p.opacity() < 0.75);
    }

    #[test]
    fn test_draw_uses_theme_palette() {
        let p = Particle::new(Vec2::new(3.0, 4.0), Vec2::ZERO, 1.5, 0.6);
        let mut list = DrawList::new(10.0, 10.0);

        p.draw(&mut list, Theme::Light);
        match list.commands()[0] {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                assert_eq!(center, Vec2::new(3.0, 4.0));
                assert_eq!(radius, 1.5);
                assert_eq!(color, Theme::Light.particle_color(0.6));
            }
            _ => panic!("expected a circle"),
        }
    }
}
