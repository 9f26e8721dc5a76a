//! Single-section ("solo") navigation.
//!
//! The page is either in normal scroll mode, where every section is visible
//! and the active navigation link follows the scroll position, or focused on
//! one section with every other section hidden.
//!
//! ```text
//!            navigate(id)                    navigate(id2)
//!   Normal ───────────────▶ Solo(id) ───────────────▶ Solo(id2)
//!     ▲                        │
//!     └── 50ms of scroll quiet ┘   (wheel / touch restarts the timer)
//! ```
//!
//! All timing is host-driven: every mutating call takes `now`, and
//! [`Navigator::poll`] fires whatever has come due since.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, NavError};
use crate::interp::lerp;
use crate::section::{validate_links, NavLink, Section, SectionId, SectionRegistry};
use crate::timer::{Debounce, Timeline};

/// Timing and layout tunables for navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoloConfig {
    /// Quiet period after the last wheel/touch input before leaving solo mode.
    pub exit_debounce_ms: u64,
    /// Added to each element's own delay during a solo reveal pass.
    pub reveal_offset_ms: u64,
    /// Wait before scrolling the focused section into view.
    pub scroll_into_view_ms: u64,
    /// Fraction of the viewport height a section top must cross to become active.
    pub active_line: f32,
    /// Visible fraction of a section needed to reveal its elements while scrolling.
    pub reveal_threshold: f32,
    /// Per-frame interpolation factor of smooth scrolling.
    pub scroll_smoothing: f32,
    /// Section that keeps the footer visible while focused.
    pub footer_section: Option<String>,
}

impl Default for SoloConfig {
    fn default() -> Self {
        Self {
            exit_debounce_ms: 50,
            reveal_offset_ms: 50,
            scroll_into_view_ms: 40,
            active_line: 0.45,
            reveal_threshold: 0.12,
            scroll_smoothing: 0.2,
            footer_section: Some("contact".to_string()),
        }
    }
}

/// Navigation mode. The focused section exists only in solo mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Solo(SectionId),
}

/// Something the host may want to react to (logging, window title, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    EnteredSolo(SectionId),
    ExitedSolo,
    ActiveLinkChanged(Option<SectionId>),
    Revealed { section: SectionId, item: usize },
    ScrollStarted { target: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Deferred {
    Reveal { section: usize, item: usize },
    ScrollIntoView(usize),
}

/// The navigation state machine together with the scroll position it
/// drives.
#[derive(Debug, Clone)]
pub struct Navigator {
    config: SoloConfig,
    registry: SectionRegistry,
    links: Vec<NavLink>,
    mode: Mode,
    exit_timer: Debounce,
    timeline: Timeline<Deferred>,
    footer_visible: bool,
    scroll_y: f32,
    scroll_target: Option<f32>,
    viewport_height: f32,
    active: Option<SectionId>,
    events: Vec<NavEvent>,
}

impl Navigator {
    /// Compose a navigator from its sections and links.
    ///
    /// Starts in normal mode at the top of the page. Call [`Navigator::start`]
    /// once the page is ready to compute the initial active link.
    pub fn new(
        registry: SectionRegistry,
        links: Vec<NavLink>,
        config: SoloConfig,
        viewport_height: f32,
    ) -> Result<Self, ConfigError> {
        validate_links(&registry, &links)?;
        Ok(Self {
            exit_timer: Debounce::new(Duration::from_millis(config.exit_debounce_ms)),
            config,
            registry,
            links,
            mode: Mode::Normal,
            timeline: Timeline::new(),
            footer_visible: true,
            scroll_y: 0.0,
            scroll_target: None,
            viewport_height: viewport_height.max(0.0),
            active: None,
            events: Vec::new(),
        })
    }

    /// Initial active-link sync and reveal of whatever is on screen.
    pub fn start(&mut self, now: Instant) {
        self.sync_active_link();
        self.reveal_in_view(now);
    }

    // ========== Transitions ==========

    /// Focus the section `id`.
    ///
    /// Every link bound to `id` becomes active, every other link inactive.
    /// Unknown ids change nothing.
    pub fn navigate(&mut self, id: &str, now: Instant) -> Result<(), NavError> {
        let index = self
            .registry
            .index_of(id)
            .ok_or_else(|| NavError::UnknownSection(id.to_string()))?;

        for link in &mut self.links {
            let bound = link.section() == id;
            link.set_active(bound);
        }
        self.enter_solo(index, now);
        Ok(())
    }

    /// Focus the section behind link `index`; only that link becomes active.
    pub fn activate_link(&mut self, index: usize, now: Instant) -> Result<(), NavError> {
        let target = self
            .links
            .get(index)
            .ok_or(NavError::UnknownLink(index))?
            .section()
            .clone();
        let section = self
            .registry
            .index_of(target.as_str())
            .ok_or_else(|| NavError::UnknownSection(target.to_string()))?;

        for (i, link) in self.links.iter_mut().enumerate() {
            link.set_active(i == index);
        }
        self.enter_solo(section, now);
        Ok(())
    }

    fn enter_solo(&mut self, index: usize, now: Instant) {
        let id = self.registry.sections()[index].id().clone();

        self.mode = Mode::Solo(id.clone());
        self.footer_visible = self.config.footer_section.as_deref() == Some(id.as_str());
        self.scroll_y = self.scroll_y.min(self.max_scroll());

        self.reveal_pass(index, now);
        self.timeline.schedule(
            now,
            Duration::from_millis(self.config.scroll_into_view_ms),
            Deferred::ScrollIntoView(index),
        );

        self.set_active(Some(id.clone()));
        tracing::debug!(section = %id, "entered solo mode");
        self.events.push(NavEvent::EnteredSolo(id));
    }

    /// Clear each element's marker now and re-add it after its delay.
    fn reveal_pass(&mut self, index: usize, now: Instant) {
        let offset = Duration::from_millis(self.config.reveal_offset_ms);
        let Some(section) = self.registry.section_mut(index) else {
            return;
        };
        for (item, revealable) in section.revealables_mut().iter_mut().enumerate() {
            revealable.clear();
            revealable.mark_pending();
            self.timeline.schedule(
                now,
                revealable.delay() + offset,
                Deferred::Reveal {
                    section: index,
                    item,
                },
            );
        }
    }

    /// A wheel or touch-move input. Restarts the exit debounce.
    pub fn scroll_intent(&mut self, now: Instant) {
        self.exit_timer.trigger(now);
    }

    fn exit_solo(&mut self, now: Instant) {
        let Mode::Solo(id) = &self.mode else {
            return;
        };
        let index = self.registry.index_of(id.as_str());
        let before = index.and_then(|i| self.layout()[i]);

        self.mode = Mode::Normal;
        self.footer_visible = true;

        // Keep the previously focused section where it was on screen while
        // the hidden sections come back above it.
        let after = index.and_then(|i| self.layout()[i]);
        if let (Some(before), Some(after)) = (before, after) {
            self.scroll_y = after + (self.scroll_y - before);
        }
        self.scroll_target = None;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());

        tracing::debug!("left solo mode");
        self.events.push(NavEvent::ExitedSolo);
        self.sync_active_link();
        self.reveal_in_view(now);
    }

    // ========== Scrolling ==========

    /// User scroll by `dy` pixels. Cancels any smooth scroll in flight.
    pub fn scroll_by(&mut self, dy: f32, now: Instant) {
        self.scroll_target = None;
        self.scroll_y = (self.scroll_y + dy).clamp(0.0, self.max_scroll());
        self.on_scroll(now);
    }

    /// New viewport height in pixels.
    pub fn set_viewport_height(&mut self, height: f32, now: Instant) {
        self.viewport_height = height.max(0.0);
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
        self.on_scroll(now);
    }

    /// Advance a smooth scroll by one frame.
    pub fn step_scroll(&mut self, now: Instant) {
        let Some(target) = self.scroll_target else {
            return;
        };
        self.scroll_y = lerp(self.scroll_y, target, self.config.scroll_smoothing);
        if (self.scroll_y - target).abs() < 0.5 {
            self.scroll_y = target;
            self.scroll_target = None;
        }
        self.on_scroll(now);
    }

    fn on_scroll(&mut self, now: Instant) {
        if self.mode == Mode::Normal {
            self.sync_active_link();
        }
        self.reveal_in_view(now);
    }

    /// Highlight the link of the last section whose top has crossed the
    /// active line. Only meaningful in normal mode.
    fn sync_active_link(&mut self) {
        let line = self.viewport_height * self.config.active_line;
        let layout = self.layout();
        let current = self
            .registry
            .sections()
            .iter()
            .zip(&layout)
            .filter_map(|(section, top)| top.map(|top| (section, top - self.scroll_y)))
            .filter(|&(_, top)| top <= line)
            .last()
            .map(|(section, _)| section.id().clone());

        for link in &mut self.links {
            let on = current.as_ref() == Some(link.section());
            link.set_active(on);
        }
        self.set_active(current);
    }

    fn set_active(&mut self, section: Option<SectionId>) {
        if self.active != section {
            self.active = section.clone();
            self.events.push(NavEvent::ActiveLinkChanged(section));
        }
    }

    /// Schedule the elements of every sufficiently visible section to enter.
    fn reveal_in_view(&mut self, now: Instant) {
        let layout = self.layout();
        let view_top = self.scroll_y;
        let view_bottom = self.scroll_y + self.viewport_height;
        let threshold = self.config.reveal_threshold;

        for (index, top) in layout.into_iter().enumerate() {
            let Some(top) = top else { continue };
            let Some(section) = self.registry.section_mut(index) else {
                continue;
            };
            let height = section.height();
            let overlap = (top + height).min(view_bottom) - top.max(view_top);
            let basis = height.min(self.viewport_height);
            if basis <= 0.0 || overlap / basis < threshold {
                continue;
            }

            for (item, revealable) in section.revealables_mut().iter_mut().enumerate() {
                if revealable.entered() || revealable.pending() {
                    continue;
                }
                revealable.mark_pending();
                self.timeline.schedule(
                    now,
                    revealable.delay(),
                    Deferred::Reveal {
                        section: index,
                        item,
                    },
                );
            }
        }
    }

    // ========== Timers ==========

    /// Fire everything due at `now` and return the events produced since
    /// the previous poll.
    pub fn poll(&mut self, now: Instant) -> Vec<NavEvent> {
        if self.exit_timer.poll(now) {
            self.exit_solo(now);
        }

        for action in self.timeline.drain_due(now) {
            match action {
                Deferred::Reveal { section, item } => {
                    let Some(s) = self.registry.section_mut(section) else {
                        continue;
                    };
                    let id = s.id().clone();
                    if let Some(revealable) = s.revealables_mut().get_mut(item) {
                        revealable.enter();
                        self.events.push(NavEvent::Revealed { section: id, item });
                    }
                }
                Deferred::ScrollIntoView(index) => {
                    if let Some(top) = self.layout().get(index).copied().flatten() {
                        let target = top.clamp(0.0, self.max_scroll());
                        self.scroll_target = Some(target);
                        self.events.push(NavEvent::ScrollStarted { target });
                    }
                }
            }
        }

        std::mem::take(&mut self.events)
    }

    /// Earliest instant at which [`Navigator::poll`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.exit_timer.deadline(), self.timeline.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether a smooth scroll is still in flight.
    pub fn is_scrolling(&self) -> bool {
        self.scroll_target.is_some()
    }

    // ========== Queries ==========

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_solo(&self) -> bool {
        matches!(self.mode, Mode::Solo(_))
    }

    pub fn focused(&self) -> Option<&SectionId> {
        match &self.mode {
            Mode::Solo(id) => Some(id),
            Mode::Normal => None,
        }
    }

    fn shows(&self, section: &Section) -> bool {
        match &self.mode {
            Mode::Normal => true,
            Mode::Solo(id) => section.id() == id,
        }
    }

    /// Whether the section `id` is currently shown. Unknown ids are not.
    pub fn is_visible(&self, id: &str) -> bool {
        self.registry.get(id).is_some_and(|s| self.shows(s))
    }

    pub fn visible_sections(&self) -> Vec<&SectionId> {
        self.registry
            .sections()
            .iter()
            .filter(|s| self.shows(s))
            .map(Section::id)
            .collect()
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Section of the active link, if any.
    pub fn active_section(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    pub fn footer_visible(&self) -> bool {
        self.footer_visible
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Height of the visible sections stacked together.
    pub fn document_height(&self) -> f32 {
        self.registry
            .sections()
            .iter()
            .filter(|s| self.shows(s))
            .map(Section::height)
            .sum()
    }

    pub fn max_scroll(&self) -> f32 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    /// Top of section `id` relative to the viewport, when visible.
    pub fn section_top(&self, id: &str) -> Option<f32> {
        let index = self.registry.index_of(id)?;
        self.layout()[index].map(|top| top - self.scroll_y)
    }

    fn layout(&self) -> Vec<Option<f32>> {
        self.registry.layout(|s| self.shows(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn navigator() -> Navigator {
        let registry = SectionRegistry::new(vec![
            Section::new("home", 900.0),
            Section::new("about", 700.0).with_revealable(Duration::ZERO),
            Section::new("skills", 800.0)
                .with_revealable(Duration::ZERO)
                .with_revealable(80 * MS)
                .with_revealable(160 * MS),
            Section::new("contact", 500.0),
        ])
        .unwrap();
        let links = ["home", "about", "skills", "contact"]
            .into_iter()
            .map(NavLink::new)
            .collect();
        Navigator::new(registry, links, SoloConfig::default(), 800.0).unwrap()
    }

    fn active_links(nav: &Navigator) -> Vec<&str> {
        nav.links()
            .iter()
            .filter(|l| l.is_active())
            .map(|l| l.section().as_str())
            .collect()
    }

    #[test]
    fn test_starts_normal_with_everything_visible() {
        let mut nav = navigator();
        nav.start(Instant::now());
        assert_eq!(nav.mode(), &Mode::Normal);
        assert!(nav.focused().is_none());
        assert_eq!(nav.visible_sections().len(), 4);
        assert_eq!(active_links(&nav), vec!["home"]);
    }

    #[test]
    fn test_navigate_enters_solo() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.navigate("skills", t0).unwrap();

        assert_eq!(nav.focused().map(SectionId::as_str), Some("skills"));
        assert_eq!(nav.visible_sections(), vec![&SectionId::from("skills")]);
        assert!(!nav.is_visible("home"));
        assert_eq!(active_links(&nav), vec!["skills"]);
        assert!(!nav.footer_visible());

        let events = nav.poll(t0);
        assert!(events.contains(&NavEvent::EnteredSolo("skills".into())));
    }

    #[test]
    fn test_footer_only_for_contact() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.navigate("contact", t0).unwrap();
        assert!(nav.footer_visible());
        nav.navigate("about", t0).unwrap();
        assert!(!nav.footer_visible());
    }

    #[test]
    fn test_unknown_target_is_noop() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.navigate("about", t0).unwrap();

        let err = nav.navigate("blog", t0).unwrap_err();
        assert_eq!(err, NavError::UnknownSection("blog".into()));
        assert_eq!(nav.focused().map(SectionId::as_str), Some("about"));
        assert_eq!(nav.activate_link(42, t0), Err(NavError::UnknownLink(42)));
        assert_eq!(active_links(&nav), vec!["about"]);
    }

    #[test]
    fn test_reveal_pass_is_staggered() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.navigate("skills", t0).unwrap();
        nav.poll(t0);

        let entered = |nav: &Navigator| -> Vec<bool> {
            nav.registry().get("skills").unwrap().revealables().iter().map(|r| r.entered()).collect()
        };

        assert_eq!(entered(&nav), vec![false, false, false]);
        nav.poll(t0 + 50 * MS);
        assert_eq!(entered(&nav), vec![true, false, false]);
        nav.poll(t0 + 130 * MS);
        assert_eq!(entered(&nav), vec![true, true, false]);
        nav.poll(t0 + 210 * MS);
        assert_eq!(entered(&nav), vec![true, true, true]);
    }

    #[test]
    fn test_scroll_exit_is_debounced() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.navigate("about", t0).unwrap();

        nav.scroll_intent(t0 + 100 * MS);
        nav.scroll_intent(t0 + 130 * MS);
        assert!(!nav.poll(t0 + 160 * MS).contains(&NavEvent::ExitedSolo));
        assert!(nav.is_solo());

        let events = nav.poll(t0 + 180 * MS);
        assert_eq!(events.iter().filter(|e| **e == NavEvent::ExitedSolo).count(), 1);
        assert_eq!(nav.mode(), &Mode::Normal);
        assert!(nav.footer_visible());
        assert_eq!(nav.visible_sections().len(), 4);
    }

    #[test]
    fn test_pending_exit_survives_navigation() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.scroll_intent(t0);
        nav.navigate("skills", t0 + 10 * MS).unwrap();
        assert_eq!(nav.focused().map(SectionId::as_str), Some("skills"));

        assert!(!nav.poll(t0 + 40 * MS).contains(&NavEvent::ExitedSolo));
        let events = nav.poll(t0 + 60 * MS);
        assert!(events.contains(&NavEvent::ExitedSolo));
        assert_eq!(nav.mode(), &Mode::Normal);
        assert!(nav.footer_visible());
    }

    #[test]
    fn test_scroll_intent_in_normal_mode_is_harmless() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.scroll_intent(t0);
        let events = nav.poll(t0 + 60 * MS);
        assert!(!events.contains(&NavEvent::ExitedSolo));
        assert_eq!(nav.mode(), &Mode::Normal);
    }

    #[test]
    fn test_active_link_follows_scroll() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.start(t0);

        // about starts at 900 and the active line sits at 360.
        nav.scroll_by(530.0, t0);
        assert_eq!(active_links(&nav), vec!["home"]);
        nav.scroll_by(20.0, t0);
        assert_eq!(active_links(&nav), vec!["about"]);
        assert_eq!(nav.active_section().map(SectionId::as_str), Some("about"));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.scroll_by(-100.0, t0);
        assert_eq!(nav.scroll_y(), 0.0);
        nav.scroll_by(1e6, t0);
        assert_eq!(nav.scroll_y(), 2900.0 - 800.0);
    }

    #[test]
    fn test_solo_scrolls_section_into_view() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.scroll_by(300.0, t0);
        nav.navigate("skills", t0).unwrap();

        // Only skills is laid out now: 800 tall in an 800 viewport.
        assert_eq!(nav.scroll_y(), 0.0);
        let events = nav.poll(t0 + 40 * MS);
        assert!(events.contains(&NavEvent::ScrollStarted { target: 0.0 }));
        nav.step_scroll(t0 + 40 * MS);
        assert!(!nav.is_scrolling());
    }

    #[test]
    fn test_smooth_scroll_converges() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.set_viewport_height(400.0, t0);
        nav.scroll_by(700.0, t0);
        nav.navigate("skills", t0).unwrap();
        nav.poll(t0 + 40 * MS);

        assert!(nav.is_scrolling());
        let mut previous = nav.scroll_y();
        for _ in 0..200 {
            nav.step_scroll(t0 + 40 * MS);
            assert!(nav.scroll_y() <= previous);
            previous = nav.scroll_y();
        }
        assert!(!nav.is_scrolling());
        assert_eq!(nav.scroll_y(), 0.0);
    }

    #[test]
    fn test_exit_keeps_focused_section_anchored() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.set_viewport_height(400.0, t0);
        nav.navigate("skills", t0).unwrap();
        nav.poll(t0 + 40 * MS);
        while nav.is_scrolling() {
            nav.step_scroll(t0);
        }
        nav.scroll_by(100.0, t0);
        let before = nav.section_top("skills").unwrap();

        nav.scroll_intent(t0 + 100 * MS);
        nav.poll(t0 + 150 * MS);
        assert_eq!(nav.mode(), &Mode::Normal);
        assert_eq!(nav.section_top("skills"), Some(before));
        assert_eq!(nav.scroll_y(), 900.0 + 700.0 + 100.0);
    }

    #[test]
    fn test_scroll_reveal_in_normal_mode() {
        let t0 = Instant::now();
        let mut nav = navigator();
        nav.start(t0);
        nav.poll(t0);
        assert!(!nav.registry().get("about").unwrap().revealables()[0].entered());

        // about occupies 900..1600; showing 900..1000 is over 12% of it.
        nav.scroll_by(200.0, t0);
        nav.poll(t0);
        assert!(nav.registry().get("about").unwrap().revealables()[0].entered());
    }

    #[test]
    fn test_next_deadline() {
        let t0 = Instant::now();
        let mut nav = navigator();
        assert_eq!(nav.next_deadline(), None);
        nav.navigate("about", t0).unwrap();
        assert_eq!(nav.next_deadline(), Some(t0 + 40 * MS));
        nav.poll(t0 + 100 * MS);
        nav.scroll_intent(t0 + 100 * MS);
        assert_eq!(nav.next_deadline(), Some(t0 + 150 * MS));
    }
}
