//! The fixed-population particle field and its connection pass.
//!
//! Every frame each particle moves and is drawn, then every pair closer than
//! the link distance is joined by a faint line that fades out with distance.
//!
//! The pair scan is O(N²). The field holds tens of particles and keeps no
//! state between frames, so a spatial index would cost more than it saves.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;
use crate::surface::Surface;
use crate::theme::Theme;

/// Tunables for the particle field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles. Zero is allowed and draws nothing.
    pub count: usize,
    /// Largest absolute velocity component at spawn, in pixels per frame.
    pub max_speed: f32,
    /// Radius range `[min, max)` in pixels.
    pub radius_range: [f32; 2],
    /// Opacity range `[min, max)`.
    pub opacity_range: [f32; 2],
    /// Pairs strictly closer than this are connected.
    pub link_distance: f32,
    /// Line alpha for two coincident particles; falls to zero at `link_distance`.
    pub link_alpha: f32,
    /// Connection stroke width in pixels.
    pub line_width: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 85,
            max_speed: 0.3,
            radius_range: [0.4, 2.2],
            opacity_range: [0.15, 0.75],
            link_distance: 130.0,
            link_alpha: 0.18,
            line_width: 0.6,
        }
    }
}

/// A connection between particles `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub alpha: f32,
}

/// Alpha of a connection at `distance`, or `None` when out of range.
pub fn link_alpha(distance: f32, config: &FieldConfig) -> Option<f32> {
    (distance < config.link_distance)
        .then(|| (1.0 - distance / config.link_distance) * config.link_alpha)
}

/// Owns the particles and steps them once per frame.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Vec2,
    config: FieldConfig,
}

impl ParticleField {
    /// Spawn `config.count` random particles over a `bounds`-sized surface.
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, bounds: Vec2, rng: &mut R) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle::spawn(rng, bounds, &config))
            .collect();
        Self {
            particles,
            bounds,
            config,
        }
    }

    /// Build a field from explicit particles.
    pub fn from_particles(particles: Vec<Particle>, bounds: Vec2, config: FieldConfig) -> Self {
        let count = particles.len();
        Self {
            particles,
            bounds,
            config: FieldConfig { count, ..config },
        }
    }

    /// One frame: adopt the surface size, update and draw every particle,
    /// then draw the connections.
    pub fn tick(&mut self, surface: &mut dyn Surface, theme: Theme) {
        let size = surface.size();
        if size != self.bounds {
            self.resize(size.x, size.y);
        }

        for particle in &mut self.particles {
            particle.update(self.bounds);
            particle.draw(surface, theme);
        }

        self.draw_connections(surface, theme);
    }

    /// Advance every particle without drawing.
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.update(self.bounds);
        }
    }

    /// All pairs currently within link distance, in `(i, j)` order with `i < j`.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = a.position().distance(b.position());
                if let Some(alpha) = link_alpha(distance, &self.config) {
                    links.push(Link {
                        a: i,
                        b: j,
                        distance,
                        alpha,
                    });
                }
            }
        }
        links
    }

    fn draw_connections(&self, surface: &mut dyn Surface, theme: Theme) {
        for link in self.links() {
            surface.stroke_line(
                self.particles[link.a].position(),
                self.particles[link.b].position(),
                self.config.line_width,
                theme.line_color(link.alpha),
            );
        }
    }

    /// New surface dimensions. Particles stay where they are; any left
    /// outside drift back in through their own reflection.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
