//! Drawing surface abstraction.
//!
//! Everything that renders goes through [`Surface`]. The window host records
//! a frame into a [`DrawList`] and hands it to the GPU renderer; tests read
//! the same list back to check what was drawn.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Straight-alpha RGBA colour with channels in `0.0..=1.0`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a colour from 8-bit channels and a float alpha.
    pub fn from_rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A 2D pixel surface: origin top-left, y pointing down.
pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> Vec2;

    /// Change the pixel dimensions.
    fn resize(&mut self, width: f32, height: f32);

    /// Wipe everything drawn so far.
    fn clear(&mut self);

    /// Filled disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Straight line segment of the given stroke width.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
}

/// A [`Surface`] that records commands instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_records_and_clears() {
        let mut list = DrawList::new(800.0, 600.0);
        list.fill_circle(Vec2::new(1.0, 2.0), 3.0, Rgba::new(1.0, 0.0, 0.0, 1.0));
        list.stroke_line(Vec2::ZERO, Vec2::ONE, 0.6, Rgba::new(0.0, 0.0, 1.0, 0.5));

        assert_eq!(list.len(), 2);
        assert_eq!(list.circles().count(), 1);
        assert_eq!(list.lines().count(), 1);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.size(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_rgb8_conversion() {
        let c = Rgba::from_rgb8(0, 191, 255, 0.5);
        assert_eq!(c.r, 0.0);
        assert!((c.g - 191.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 1.0);
        assert_eq!(c.with_alpha(0.2).a, 0.2);
    }
}
