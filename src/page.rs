//! The page: particle backdrop, cursor, navigation and theme in one place.
//!
//! [`Page`] owns no window. The host feeds it [`PageEvent`]s, polls its
//! timers, and asks it to draw a frame onto whatever [`Surface`] it has.

use std::time::Instant;

use glam::Vec2;
use rand::Rng;

use crate::clock::{FrameClock, TaskHandle};
use crate::config::PageConfig;
use crate::cursor::CursorTrail;
use crate::error::{ConfigError, NavError};
use crate::input::PageEvent;
use crate::render_loop::ParticleLayer;
use crate::solo::{NavEvent, Navigator};
use crate::surface::Surface;
use crate::theme::{Preferences, Theme};

pub struct Page {
    config: PageConfig,
    preferences: Preferences,
    theme: Theme,
    pointer: Vec2,
    viewport: Vec2,
    navigator: Navigator,
    clock: FrameClock,
    particles: Option<TaskHandle>,
    visible: bool,
}

impl Page {
    /// Build the page for a viewport of the given size.
    ///
    /// The theme comes from `preferences`. Nothing animates until a surface
    /// is attached with [`Page::attach_surface`].
    pub fn new(
        config: PageConfig,
        preferences: Preferences,
        viewport: Vec2,
    ) -> Result<Self, ConfigError> {
        let navigator = Navigator::new(
            config.registry()?,
            config.links(),
            config.solo.clone(),
            viewport.y,
        )?;
        let theme = preferences.theme();
        tracing::info!(
            sections = navigator.registry().len(),
            links = navigator.links().len(),
            %theme,
            "page ready"
        );

        Ok(Self {
            config,
            preferences,
            theme,
            pointer: Vec2::ZERO,
            viewport,
            navigator,
            clock: FrameClock::new(),
            particles: None,
            visible: true,
        })
    }

    /// Initial navigation sync. Call once before the first event.
    pub fn start(&mut self, now: Instant) {
        self.navigator.start(now);
    }

    /// Start the particle backdrop and cursor on a surface of `size`.
    ///
    /// With no surface the page runs without any frame work; navigation is
    /// unaffected. Returns whether the backdrop is running.
    pub fn attach_surface<R: Rng + ?Sized>(&mut self, size: Option<Vec2>, rng: &mut R) -> bool {
        if self.particles.is_some() {
            return true;
        }
        match ParticleLayer::attach(&mut self.clock, size, self.config.field, rng) {
            Ok(handle) => {
                self.particles = Some(handle);
                self.clock
                    .schedule(Box::new(CursorTrail::new(self.config.cursor_smoothing)));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "running without particle backdrop");
                false
            }
        }
    }

    /// React to one input event.
    pub fn handle(&mut self, event: PageEvent, now: Instant) {
        match event {
            PageEvent::PointerMoved(position) => self.pointer = position,
            PageEvent::Scroll { delta_y } => {
                self.navigator.scroll_intent(now);
                self.navigator.scroll_by(delta_y, now);
            }
            PageEvent::NavActivated(index) => {
                if let Err(e) = self.navigator.activate_link(index, now) {
                    tracing::debug!(error = %e, "navigation ignored");
                }
            }
            PageEvent::ToggleTheme => {
                self.toggle_theme();
            }
            PageEvent::Resized(size) => self.resize(size, now),
        }
    }

    /// Focus a section by id.
    pub fn navigate(&mut self, id: &str, now: Instant) -> Result<(), NavError> {
        self.navigator.navigate(id, now)
    }

    /// Flip the theme and persist it. A failed write keeps the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.preferences.set_theme(self.theme) {
            tracing::warn!(
                path = %self.preferences.path().display(),
                error = %e,
                "could not save theme preference"
            );
        }
        tracing::debug!(theme = %self.theme, "theme toggled");
        self.theme
    }

    pub fn resize(&mut self, size: Vec2, now: Instant) {
        self.viewport = size.max(Vec2::ZERO);
        self.navigator.set_viewport_height(self.viewport.y, now);
    }

    /// Whether frames are being shown. Hidden pages should not be drawn.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if !visible {
            self.clock.suspend();
        }
        tracing::debug!(visible, "page visibility changed");
    }

    /// Fire due timers.
    pub fn poll(&mut self, now: Instant) -> Vec<NavEvent> {
        self.navigator.poll(now)
    }

    /// Draw one frame. Returns the number of frame tasks that ran.
    pub fn frame(&mut self, surface: &mut dyn Surface, now: Instant) -> usize {
        self.navigator.step_scroll(now);
        self.clock.advance(now, self.theme, self.pointer, surface)
    }

    /// Whether the host should keep requesting frames.
    pub fn is_animating(&self) -> bool {
        self.visible && (self.clock.task_count() > 0 || self.navigator.is_scrolling())
    }

    /// Earliest instant at which [`Page::poll`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.navigator.next_deadline()
    }

    // ========== Queries ==========

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn has_backdrop(&self) -> bool {
        self.particles.is_some()
    }
}
