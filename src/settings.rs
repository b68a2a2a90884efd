//! Fixture settings: where fixtures live and whether calls update or verify.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default fixture directory, relative to the working directory.
pub const DEFAULT_DIR: &str = "testdata";

/// Default prefix prepended to every fixture name.
pub const DEFAULT_PREFIX: &str = "fixture.";

/// Name of the optional project settings file.
pub const SETTINGS_FILE: &str = "fixtures.toml";

/// Environment variable that switches calls into update mode.
pub const FIX_ENV: &str = "FIX";

/// Permission bits for a newly created fixture directory.
pub const DIR_MODE: u32 = 0o775;

/// Permission bits for a written fixture file.
pub const FILE_MODE: u32 = 0o664;

/// Whether a comparison call writes the reference or checks against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read the existing fixture and compare.
    #[default]
    Verify,
    /// Overwrite the fixture with the computed value.
    Update,
}

impl Mode {
    pub fn is_update(self) -> bool {
        self == Mode::Update
    }
}

impl From<bool> for Mode {
    fn from(fix: bool) -> Self {
        if fix { Mode::Update } else { Mode::Verify }
    }
}

/// Errors while loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Fixture directory, file prefix and mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding fixture files
    pub dir: PathBuf,

    /// Prefix prepended to each fixture name to form its file name
    pub prefix: String,

    /// Update or verify
    pub mode: Mode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            mode: Mode::Verify,
        }
    }
}

impl Settings {
    /// Load settings for the current working directory.
    ///
    /// Precedence order:
    /// 1. `FIX` environment variable (mode only)
    /// 2. `fixtures.toml` in the working directory
    /// 3. Defaults (`testdata`, `fixture.`, verify)
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = Self::from_file(Path::new(SETTINGS_FILE))?;
        if let Some(fix) = std::env::var(FIX_ENV).ok().as_deref().and_then(parse_flag) {
            settings.mode = Mode::from(fix);
        }
        Ok(settings)
    }

    /// Read settings from a TOML file, or defaults if it doesn't exist.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.into(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.into(),
            source,
        })
    }

    /// Apply command-line overrides on top of loaded settings.
    ///
    /// `--fix` can only turn update mode on; leaving it off keeps whatever
    /// the environment or settings file selected.
    pub fn with_overrides(mut self, dir: Option<&Path>, prefix: Option<&str>, fix: bool) -> Self {
        if let Some(dir) = dir {
            self.dir = dir.to_path_buf();
        }
        if let Some(prefix) = prefix {
            self.prefix = prefix.to_string();
        }
        if fix {
            self.mode = Mode::Update;
        }
        self
    }
}

/// Parses a boolean flag value the way shells usually spell them.
///
/// Returns `None` for values that are neither truthy nor falsy.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_conventional_layout() {
        let settings = Settings::default();
        assert_eq!(settings.dir, PathBuf::from("testdata"));
        assert_eq!(settings.prefix, "fixture.");
        assert_eq!(settings.mode, Mode::Verify);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::from_file(&temp.path().join("fixtures.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn file_overrides_selected_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fixtures.toml");
        std::fs::write(&path, "dir = \"tests/golden\"\nmode = \"update\"\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.dir, PathBuf::from("tests/golden"));
        assert_eq!(settings.prefix, "fixture.");
        assert_eq!(settings.mode, Mode::Update);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fixtures.toml");
        std::fs::write(&path, "directory = \"x\"\n").unwrap();

        let err = Settings::from_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("fixtures.toml"));
    }

    #[test]
    fn overrides_take_precedence() {
        let settings = Settings::default().with_overrides(
            Some(Path::new("golden")),
            Some("snap-"),
            true,
        );
        assert_eq!(settings.dir, PathBuf::from("golden"));
        assert_eq!(settings.prefix, "snap-");
        assert_eq!(settings.mode, Mode::Update);
    }

    #[test]
    fn absent_fix_override_keeps_mode() {
        let settings = Settings {
            mode: Mode::Update,
            ..Settings::default()
        }
        .with_overrides(None, None, false);
        assert_eq!(settings.mode, Mode::Update);
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        for truthy in ["1", "true", "TRUE", "yes", "on", " on "] {
            assert_eq!(parse_flag(truthy), Some(true), "{truthy:?}");
        }
        for falsy in ["", "0", "false", "No", "off"] {
            assert_eq!(parse_flag(falsy), Some(false), "{falsy:?}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn mode_from_bool() {
        assert_eq!(Mode::from(true), Mode::Update);
        assert_eq!(Mode::from(false), Mode::Verify);
        assert!(Mode::Update.is_update());
        assert!(!Mode::Verify.is_update());
    }
}
