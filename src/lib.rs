//! # folio
//!
//! Presentation layer of a single-page portfolio: an animated particle
//! backdrop and a "solo" section navigator, hosted in a winit window and
//! drawn with wgpu.
//!
//! ## Quick Start
//!
//! ```ignore
//! use folio::prelude::*;
//!
//! fn main() -> Result<(), FolioError> {
//!     folio::app::run(PageConfig::default())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particle field
//!
//! A fixed number of [`Particle`]s drift across the surface, bounce off its
//! edges, and are joined by faint lines when closer than the link distance.
//! The field is ticked once per displayed frame by the [`FrameClock`],
//! through a [`ParticleLayer`] task:
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! ParticleLayer::attach(&mut clock, Some(size), FieldConfig::default(), &mut rng)?;
//!
//! // Per frame:
//! clock.advance(Instant::now(), theme, pointer, &mut draw_list);
//! ```
//!
//! ### Solo navigation
//!
//! The [`Navigator`] is either in normal scroll mode, with every section
//! shown, or focused on a single section with the rest hidden. Activating a
//! navigation link focuses its section; the first burst of wheel or touch
//! scrolling after a short quiet period returns to normal mode.
//!
//! ```ignore
//! navigator.navigate("projects", now)?;
//! navigator.scroll_intent(now);
//! for event in navigator.poll(later) {
//!     println!("{event:?}");
//! }
//! ```
//!
//! ### Drawing
//!
//! Everything draws through the [`Surface`] trait. The window host records
//! into a [`DrawList`] and the GPU renderer draws the list; tests inspect
//! the list directly.
//!
//! ## Configuration
//!
//! [`PageConfig`] holds every tunable and loads from JSON; the binary takes
//! the path of a config file as its first argument.

pub mod app;
pub mod clock;
pub mod config;
pub mod cursor;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod interp;
pub mod page;
pub mod particle;
pub mod render_loop;
pub mod section;
pub mod solo;
pub mod surface;
pub mod theme;
pub mod timer;

pub use clock::{Frame, FrameClock, FrameTask, TaskHandle};
pub use config::{PageConfig, SectionConfig, WindowConfig};
pub use cursor::CursorTrail;
pub use error::{ConfigError, FolioError, GpuError, NavError};
pub use field::{link_alpha, FieldConfig, Link, ParticleField};
pub use glam::Vec2;
pub use input::{Input, PageEvent};
pub use interp::{lerp, Follower};
pub use page::Page;
pub use particle::Particle;
pub use render_loop::ParticleLayer;
pub use section::{NavLink, Revealable, Section, SectionId, SectionRegistry};
pub use solo::{Mode, NavEvent, Navigator, SoloConfig};
pub use surface::{DrawCommand, DrawList, Rgba, Surface};
pub use theme::{Preferences, Theme, THEME_KEY};
pub use timer::{Debounce, Timeline};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use folio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::{Frame, FrameClock, FrameTask};
    pub use crate::config::PageConfig;
    pub use crate::error::{FolioError, NavError};
    pub use crate::field::{FieldConfig, ParticleField};
    pub use crate::input::PageEvent;
    pub use crate::page::Page;
    pub use crate::render_loop::ParticleLayer;
    pub use crate::solo::{Mode, NavEvent, Navigator};
    pub use crate::surface::{DrawList, Surface};
    pub use crate::theme::Theme;
    pub use crate::Vec2;
}
