//! The particle backdrop as a frame task.

use glam::Vec2;
use rand::Rng;

use crate::clock::{Frame, FrameClock, FrameTask, TaskHandle};
use crate::error::FolioError;
use crate::field::{FieldConfig, ParticleField};

/// Clears the surface and ticks the particle field, every frame, forever.
#[derive(Debug, Clone)]
pub struct ParticleLayer {
    field: ParticleField,
}

impl ParticleLayer {
    pub fn new(field: ParticleField) -> Self {
        Self { field }
    }

    /// Spawn a field sized to the surface and register it with `clock`.
    ///
    /// `surface_size` is `None` when there is nothing to draw on; the layer
    /// is then never scheduled and no per-frame work happens at all.
    pub fn attach<R: Rng + ?Sized>(
        clock: &mut FrameClock,
        surface_size: Option<Vec2>,
        config: FieldConfig,
        rng: &mut R,
    ) -> Result<TaskHandle, FolioError> {
        let size = surface_size.ok_or(FolioError::MissingSurface)?;
        let field = ParticleField::new(config, size, rng);
        tracing::info!(
            particles = field.len(),
            width = size.x,
            height = size.y,
            "particle layer attached"
        );
        Ok(clock.schedule(Box::new(Self::new(field))))
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

impl FrameTask for ParticleLayer {
    fn tick(&mut self, frame: &mut Frame<'_>) {
        frame.surface.clear();
        self.field.tick(frame.surface, frame.theme);
    }

    fn name(&self) -> &'static str {
        "particles"
    }
}
