//! Colour themes and the persisted theme preference.
//!
//! There are exactly two palettes. Nothing blends between them: whatever
//! theme is current when a frame is drawn decides every colour in it.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::surface::Rgba;

/// Key the theme is stored under in the preferences file.
pub const THEME_KEY: &str = "folio-theme";

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Colour of a particle with the given stored opacity.
    ///
    /// Light backgrounds get a deeper blue at 70% of the opacity.
    pub fn particle_color(self, opacity: f32) -> Rgba {
        match self {
            Theme::Dark => Rgba::from_rgb8(0, 191, 255, opacity),
            Theme::Light => Rgba::from_rgb8(0, 120, 200, opacity * 0.7),
        }
    }

    /// Colour of a connection line with the given alpha.
    pub fn line_color(self, alpha: f32) -> Rgba {
        match self {
            Theme::Dark => Rgba::from_rgb8(0, 191, 255, alpha),
            Theme::Light => Rgba::from_rgb8(0, 120, 200, alpha),
        }
    }

    /// Page background behind the surface.
    pub fn background(self) -> Rgba {
        match self {
            Theme::Dark => Rgba::from_rgb8(5, 8, 16, 1.0),
            Theme::Light => Rgba::from_rgb8(240, 244, 248, 1.0),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Tiny string key/value store backed by a JSON file.
///
/// Reads happen once when loading; every `set` is written through
/// immediately, so the last write wins.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Preferences {
    /// Load preferences from `path`.
    ///
    /// A missing file is an empty store; an unreadable or corrupt one is
    /// reported and also treated as empty.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable preferences");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store a value and persist the whole file.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.values.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Stored theme, or dark when absent or unrecognised.
    pub fn theme(&self) -> Theme {
        self.get(THEME_KEY)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), ConfigError> {
        self.set(THEME_KEY, theme.as_str())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("folio-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_light_scales_particle_alpha() {
        assert_eq!(Theme::Dark.particle_color(0.5).a, 0.5);
        assert!((Theme::Light.particle_color(0.5).a - 0.35).abs() < 1e-6);
        // Lines keep their alpha in both themes.
        assert_eq!(Theme::Light.line_color(0.1).a, 0.1);
    }

    #[test]
    fn test_parse() {
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_missing_file_defaults_to_dark() {
        let prefs = Preferences::load(scratch_path("missing"));
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_theme_round_trips_through_file() {
        let path = scratch_path("roundtrip");
        let mut prefs = Preferences::load(&path);
        prefs.set_theme(Theme::Light).unwrap();

        let reloaded = Preferences::load(&path);
        assert_eq!(reloaded.theme(), Theme::Light);
        assert_eq!(reloaded.get(THEME_KEY), Some("light"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_defaults_to_dark() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Preferences::load(&path).theme(), Theme::Dark);
        let _ = fs::remove_file(&path);
    }
}
