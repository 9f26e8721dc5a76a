//! Instanced 2D shapes.
//!
//! Every draw command becomes one [`ShapeInstance`]: a capsule between two
//! points with a radius. A circle is a capsule whose ends coincide; a line is
//! a capsule whose radius is half the stroke width. One quad per instance is
//! shaded with the capsule's signed distance for anti-aliased edges.

use bytemuck::{Pod, Zeroable};

use crate::surface::{DrawCommand, DrawList};

/// Per-instance vertex data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    pub color: [f32; 4],
    pub a: [f32; 2],
    pub b: [f32; 2],
    pub radius: f32,
    _pad: f32,
}

impl ShapeInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x2, 2 => Float32x2, 3 => Float32];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<&DrawCommand> for ShapeInstance {
    fn from(command: &DrawCommand) -> Self {
        match *command {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => Self {
                color: color.to_array(),
                a: center.to_array(),
                b: center.to_array(),
                radius,
                _pad: 0.0,
            },
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => Self {
                color: color.to_array(),
                a: from.to_array(),
                b: to.to_array(),
                radius: width * 0.5,
                _pad: 0.0,
            },
        }
    }
}

/// Instances for a recorded frame, in draw order.
pub fn instances(list: &DrawList) -> Vec<ShapeInstance> {
    list.commands().iter().map(ShapeInstance::from).collect()
}

/// Viewport size in pixels, padded to 16 bytes for the uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ViewportUniform {
    pub size: [f32; 2],
    _pad: [f32; 2],
}

impl ViewportUniform {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width.max(1.0), height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

pub const SHAPE_SHADER: &str = r#"
struct Viewport {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> viewport: Viewport;

struct ShapeIn {
    @location(0) color: vec4<f32>,
    @location(1) a: vec2<f32>,
    @location(2) b: vec2<f32>,
    @location(3) radius: f32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) pixel: vec2<f32>,
    @location(2) a: vec2<f32>,
    @location(3) b: vec2<f32>,
    @location(4) radius: f32,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32, shape: ShapeIn) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(0.0, 0.0),
        vec2<f32>(1.0, 0.0),
        vec2<f32>(0.0, 1.0),
        vec2<f32>(0.0, 1.0),
        vec2<f32>(1.0, 0.0),
        vec2<f32>(1.0, 1.0),
    );

    // One pixel of slack around the capsule for the soft edge.
    let pad = vec2<f32>(shape.radius + 1.0);
    let lo = min(shape.a, shape.b) - pad;
    let hi = max(shape.a, shape.b) + pad;
    let pixel = mix(lo, hi, corners[vertex_index]);

    let ndc = vec2<f32>(
        pixel.x / viewport.size.x * 2.0 - 1.0,
        1.0 - pixel.y / viewport.size.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.color = shape.color;
    out.pixel = pixel;
    out.a = shape.a;
    out.b = shape.b;
    out.radius = shape.radius;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let ab = in.b - in.a;
    let len2 = dot(ab, ab);
    var t = 0.0;
    if len2 > 0.0 {
        t = clamp(dot(in.pixel - in.a, ab) / len2, 0.0, 1.0);
    }
    let d = distance(in.pixel, in.a + ab * t);
    let coverage = clamp(in.radius + 0.5 - d, 0.0, 1.0);
    if coverage <= 0.0 {
        discard;
    }
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Rgba, Surface};
    use glam::Vec2;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), 40);
        assert_eq!(ShapeInstance::layout().array_stride, 40);
        assert_eq!(std::mem::size_of::<ViewportUniform>(), 16);
    }

    #[test]
    fn test_commands_become_capsules() {
        let mut list = DrawList::new(100.0, 100.0);
        let color = Rgba::new(0.0, 0.5, 1.0, 0.25);
        list.fill_circle(Vec2::new(10.0, 20.0), 2.0, color);
        list.stroke_line(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0), 0.6, color);

        let shapes = instances(&list);
        assert_eq!(shapes.len(), 2);

        assert_eq!(shapes[0].a, [10.0, 20.0]);
        assert_eq!(shapes[0].a, shapes[0].b);
        assert_eq!(shapes[0].radius, 2.0);
        assert_eq!(shapes[0].color, [0.0, 0.5, 1.0, 0.25]);

        assert_eq!(shapes[1].b, [30.0, 40.0]);
        assert!((shapes[1].radius - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_viewport_never_zero() {
        assert_eq!(ViewportUniform::new(0.0, 600.0).size, [1.0, 600.0]);
    }
}
