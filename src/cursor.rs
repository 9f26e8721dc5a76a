//! Custom cursor: a dot pinned to the pointer and a ring trailing behind it.

use glam::Vec2;

use crate::clock::{Frame, FrameTask};
use crate::interp::Follower;

/// Fraction of the gap the ring closes each frame.
pub const RING_SMOOTHING: f32 = 0.13;

const DOT_RADIUS: f32 = 3.0;
const RING_RADIUS: f32 = 16.0;
const RING_ALPHA: f32 = 0.18;

/// Draws the cursor dot and its trailing ring.
#[derive(Debug, Clone)]
pub struct CursorTrail {
    ring: Follower,
}

impl CursorTrail {
    pub fn new(smoothing: f32) -> Self {
        Self {
            ring: Follower::new(Vec2::ZERO, smoothing),
        }
    }

    /// Where the ring is drawn.
    pub fn ring(&self) -> Vec2 {
        self.ring.current()
    }
}

impl Default for CursorTrail {
    fn default() -> Self {
        Self::new(RING_SMOOTHING)
    }
}

impl FrameTask for CursorTrail {
    fn tick(&mut self, frame: &mut Frame<'_>) {
        let ring = self.ring.step(frame.pointer);
        let color = frame.theme.line_color(1.0);
        frame
            .surface
            .fill_circle(ring, RING_RADIUS, color.with_alpha(RING_ALPHA));
        frame.surface.fill_circle(frame.pointer, DOT_RADIUS, color);
    }

    fn name(&self) -> &'static str {
        "cursor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameClock;
    use crate::surface::{DrawCommand, DrawList, Surface};
    use crate::theme::Theme;
    use std::time::Instant;

    #[test]
    fn test_dot_snaps_ring_trails() {
        let mut trail = CursorTrail::default();
        let mut list = DrawList::new(800.0, 600.0);
        let pointer = Vec2::new(100.0, 50.0);

        {
            let mut frame = Frame {
                index: 1,
                delta: Default::default(),
                theme: Theme::Dark,
                pointer,
                surface: &mut list,
            };
            trail.tick(&mut frame);
        }

        assert!((trail.ring() - pointer * RING_SMOOTHING).length() < 1e-4);
        match list.commands() {
            [DrawCommand::Circle { center: ring, .. }, DrawCommand::Circle { center: dot, .. }] => {
                assert_eq!(*dot, pointer);
                assert_eq!(*ring, trail.ring());
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_ring_closes_in_over_frames() {
        let mut clock = FrameClock::new();
        clock.schedule(Box::new(CursorTrail::default()));
        let mut list = DrawList::new(800.0, 600.0);
        let target = Vec2::new(400.0, 300.0);

        let mut last_gap = f32::INFINITY;
        for _ in 0..20 {
            list.clear();
            clock.advance(Instant::now(), Theme::Dark, target, &mut list);
            let DrawCommand::Circle { center, .. } = list.commands()[0] else {
                panic!("ring first");
            };
            let gap = center.distance(target);
            assert!(gap < last_gap);
            last_gap = gap;
        }
    }
}
