//! Linear interpolation and per-frame smoothing.
//!
//! Followers approach their target exponentially: applying [`lerp`] with a
//! constant factor every frame closes the same fraction of the remaining gap,
//! so the follower glides in without ever snapping onto the target.

use glam::Vec2;

/// Linear interpolation between `a` and `b` by factor `t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A 2D value that chases a target by a fixed fraction each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Follower {
    current: Vec2,
    factor: f32,
}

impl Follower {
    /// Create a follower resting at `start`.
    ///
    /// `factor` is the fraction of the remaining distance covered per step,
    /// clamped into `[0, 1]`.
    pub fn new(start: Vec2, factor: f32) -> Self {
        Self {
            current: start,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    /// Advance one step toward `target` and return the new position.
    pub fn step(&mut self, target: Vec2) -> Vec2 {
        self.current = Vec2::new(
            lerp(self.current.x, target.x, self.factor),
            lerp(self.current.y, target.y, self.factor),
        );
        self.current
    }

    #[inline]
    pub fn current(&self) -> Vec2 {
        self.current
    }

    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }
}
