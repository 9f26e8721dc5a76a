//! Page configuration.
//!
//! Everything tunable about the page lives in [`PageConfig`]: the particle
//! field, navigation timing, the section layout and the window. The whole
//! thing round-trips through JSON and every field has a default, so a
//! config file only needs to name what it changes:
//!
//! ```json
//! {
//!   "field": { "count": 120 },
//!   "solo": { "exit_debounce_ms": 80 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cursor::RING_SMOOTHING;
use crate::error::ConfigError;
use crate::field::FieldConfig;
use crate::section::{NavLink, Section, SectionRegistry};
use crate::solo::SoloConfig;

/// One section of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    /// Laid-out height in pixels.
    pub height: f32,
    /// Stagger delay of each revealable element, in milliseconds.
    #[serde(default)]
    pub reveal_delays_ms: Vec<u64>,
}

impl SectionConfig {
    pub fn new(id: &str, height: f32, reveal_delays_ms: Vec<u64>) -> Self {
        Self {
            id: id.to_string(),
            height,
            reveal_delays_ms,
        }
    }

    fn to_section(&self) -> Section {
        self.reveal_delays_ms
            .iter()
            .fold(Section::new(self.id.as_str(), self.height), |section, &ms| {
                section.with_revealable(Duration::from_millis(ms))
            })
    }
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "folio".into(),
            width: 1280,
            height: 800,
        }
    }
}

/// Full page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub field: FieldConfig,
    pub solo: SoloConfig,
    /// Per-frame smoothing of the cursor ring.
    pub cursor_smoothing: f32,
    /// Sections in document order.
    pub sections: Vec<SectionConfig>,
    /// Section targeted by each navigation link, in link order. Empty means
    /// one link per section.
    pub nav: Vec<String>,
    /// Where the theme preference is stored.
    pub preferences: PathBuf,
    pub window: WindowConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            solo: SoloConfig::default(),
            cursor_smoothing: RING_SMOOTHING,
            sections: vec![
                SectionConfig::new("home", 900.0, vec![0, 120]),
                SectionConfig::new("about", 760.0, vec![0, 100]),
                SectionConfig::new("skills", 820.0, (0..8).map(|i| i * 80).collect()),
                SectionConfig::new("projects", 1100.0, vec![0, 100, 200]),
                SectionConfig::new("contact", 600.0, vec![0]),
            ],
            nav: Vec::new(),
            preferences: PathBuf::from("folio-prefs.json"),
            window: WindowConfig::default(),
        }
    }
}

impl PageConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Build the section registry. Fails on duplicate ids.
    pub fn registry(&self) -> Result<SectionRegistry, ConfigError> {
        SectionRegistry::new(self.sections.iter().map(SectionConfig::to_section).collect())
    }

    /// Navigation links in order. Targets are not checked here.
    pub fn links(&self) -> Vec<NavLink> {
        if self.nav.is_empty() {
            self.sections
                .iter()
                .map(|s| NavLink::new(s.id.as_str()))
                .collect()
        } else {
            self.nav.iter().map(|id| NavLink::new(id.as_str())).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_build() {
        let config = PageConfig::default();
        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(config.links().len(), 5);

        let skills = registry.get("skills").unwrap();
        let delays: Vec<_> = skills.revealables().iter().map(|r| r.delay()).collect();
        assert_eq!(delays[3], Duration::from_millis(240));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: PageConfig =
            serde_json::from_str(r#"{ "field": { "count": 12 }, "nav": ["about"] }"#).unwrap();
        assert_eq!(config.field.count, 12);
        assert_eq!(config.field.link_distance, FieldConfig::default().link_distance);
        assert_eq!(config.solo, SoloConfig::default());
        assert_eq!(config.links(), vec![NavLink::new("about")]);
        assert_eq!(config.sections.len(), 5);
    }

    #[test]
    fn test_duplicate_sections_rejected() {
        let config = PageConfig {
            sections: vec![
                SectionConfig::new("a", 10.0, vec![]),
                SectionConfig::new("a", 10.0, vec![]),
            ],
            ..PageConfig::default()
        };
        assert!(matches!(config.registry(), Err(ConfigError::DuplicateSection(_))));
    }

    #[test]
    fn test_save_load() {
        let path = std::env::temp_dir().join(format!("folio-config-{}.json", std::process::id()));
        let mut config = PageConfig::default();
        config.window.title = "portfolio".into();
        config.solo.exit_debounce_ms = 75;

        config.save(&path).unwrap();
        let loaded = PageConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PageConfig::load("/nonexistent/folio.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
