//! Isolated test environment with temp directory.

// Allow dead code since each test crate uses a different subset
#![allow(dead_code)]

use super::FixturesCommand;
use fixtures::{FixtureStore, Fixtures, Mode};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory for fixture tests.
///
/// Fixtures live in the conventional `testdata/` subdirectory with the
/// `fixture.` prefix. Everything is removed when the TestEnv is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Working directory for commands
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment with no fixtures.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the working directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the fixture directory (may not exist yet).
    pub fn fixture_dir(&self) -> PathBuf {
        self.root.join("testdata")
    }

    /// Returns the on-disk path of fixture `name`.
    pub fn fixture_path(&self, name: &str) -> PathBuf {
        self.fixture_dir().join(format!("fixture.{name}"))
    }

    /// Library handle on this environment's fixtures in `mode`.
    pub fn fixtures(&self, mode: Mode) -> Fixtures {
        Fixtures::from_store(FixtureStore::new(self.fixture_dir(), "fixture."), mode)
    }

    /// Writes a fixture file directly, bypassing the library.
    pub fn write_fixture(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        std::fs::create_dir_all(self.fixture_dir()).expect("Failed to create fixture dir");
        let path = self.fixture_path(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// Reads a fixture file directly.
    pub fn read_fixture(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.fixture_path(name)).expect("Failed to read fixture")
    }

    /// Writes a file relative to the working directory and returns its path.
    pub fn write_file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a FixturesCommand running in this environment.
    pub fn cmd(&self) -> FixturesCommand {
        FixturesCommand::new(&self.root)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
