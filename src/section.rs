//! Page sections, their reveal targets, and the navigation links that point
//! at them.
//!
//! The registry is built once from configuration. Visibility is not stored
//! here; the navigator derives it from its mode.

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Unique identifier of a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An element inside a section that animates in when revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct Revealable {
    delay: Duration,
    entered: bool,
    pending: bool,
}

impl Revealable {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            entered: false,
            pending: false,
        }
    }

    /// Stagger delay before the element enters.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the element carries the "entered" marker.
    pub fn entered(&self) -> bool {
        self.entered
    }

    /// Whether an enter is scheduled but has not fired yet.
    pub fn pending(&self) -> bool {
        self.pending
    }

    pub(crate) fn clear(&mut self) {
        self.entered = false;
    }

    pub(crate) fn mark_pending(&mut self) {
        self.pending = true;
    }

    pub(crate) fn enter(&mut self) {
        self.entered = true;
        self.pending = false;
    }
}

/// One navigable block of content.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    id: SectionId,
    height: f32,
    revealables: Vec<Revealable>,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, height: f32) -> Self {
        Self {
            id: id.into(),
            height: height.max(0.0),
            revealables: Vec::new(),
        }
    }

    /// Add a revealable element with the given stagger delay.
    pub fn with_revealable(mut self, delay: Duration) -> Self {
        self.revealables.push(Revealable::new(delay));
        self
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    /// Laid-out height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn revealables(&self) -> &[Revealable] {
        &self.revealables
    }

    pub(crate) fn revealables_mut(&mut self) -> &mut [Revealable] {
        &mut self.revealables
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Ordered list of sections, in document order.
#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Build a registry, rejecting duplicate identifiers.
    pub fn new(sections: Vec<Section>) -> Result<Self, ConfigError> {
        for (i, section) in sections.iter().enumerate() {
            if sections[..i].iter().any(|s| s.id == section.id) {
                return Err(ConfigError::DuplicateSection(section.id.to_string()));
            }
        }
        Ok(Self { sections })
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == *id)
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.index_of(id).map(|i| &self.sections[i])
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub(crate) fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Document-space tops of the sections that pass `visible`, stacked in
    /// order. Hidden sections get `None` and take no space.
    pub fn layout(&self, visible: impl Fn(&Section) -> bool) -> Vec<Option<f32>> {
        let mut top = 0.0;
        self.sections
            .iter()
            .map(|section| {
                if visible(section) {
                    let this = top;
                    top += section.height;
                    Some(this)
                } else {
                    None
                }
            })
            .collect()
    }
}

/// A navigation control bound to exactly one section.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    section: SectionId,
    active: bool,
}

impl NavLink {
    pub fn new(section: impl Into<SectionId>) -> Self {
        Self {
            section: section.into(),
            active: false,
        }
    }

    pub fn section(&self) -> &SectionId {
        &self.section
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Check every link against the registry.
pub fn validate_links(registry: &SectionRegistry, links: &[NavLink]) -> Result<(), ConfigError> {
    match links
        .iter()
        .find(|link| registry.index_of(link.section.as_str()).is_none())
    {
        Some(link) => Err(ConfigError::UnknownLinkTarget(link.section.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SectionRegistry {
        SectionRegistry::new(vec![
            Section::new("home", 800.0),
            Section::new("about", 600.0),
            Section::new("contact", 400.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = SectionRegistry::new(vec![Section::new("a", 1.0), Section::new("a", 2.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSection(id) if id == "a"));
    }

    #[test]
    fn test_lookup() {
        let reg = registry();
        assert_eq!(reg.index_of("about"), Some(1));
        assert_eq!(reg.get("contact").map(Section::height), Some(400.0));
        assert!(reg.get("blog").is_none());
    }

    #[test]
    fn test_layout_skips_hidden() {
        let reg = registry();
        assert_eq!(reg.layout(|_| true), vec![Some(0.0), Some(800.0), Some(1400.0)]);
        assert_eq!(reg.layout(|s| s.id() != "home"), vec![None, Some(0.0), Some(600.0)]);
    }

    #[test]
    fn test_link_validation() {
        let reg = registry();
        assert!(validate_links(&reg, &[NavLink::new("home"), NavLink::new("contact")]).is_ok());
        let err = validate_links(&reg, &[NavLink::new("blog")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLinkTarget(id) if id == "blog"));
    }

    #[test]
    fn test_revealable_markers() {
        let mut r = Revealable::new(Duration::from_millis(80));
        r.mark_pending();
        assert!(r.pending() && !r.entered());
        r.enter();
        assert!(r.entered() && !r.pending());
        r.clear();
        assert!(!r.entered());
    }
}
