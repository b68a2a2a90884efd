//! Fixture files on disk: path resolution, reads, atomic writes, listing.

use crate::content::{Kind, classify, digest};
use crate::settings::{DIR_MODE, FILE_MODE, Settings};
use serde::Serialize;
use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::WalkDir;

/// Errors during file system operations on fixtures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("fixture file does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create fixture directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied { path: path.into() },
            _ => StoreError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// A fixture file found in the fixture directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureEntry {
    /// Logical fixture name (file name without the prefix)
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub kind: Kind,
    pub sha256: String,
}

/// The fixture directory and the naming scheme inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureStore {
    dir: PathBuf,
    prefix: String,
}

impl FixtureStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.dir.clone(), settings.prefix.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolves `dir / (prefix + name)`.
    ///
    /// The name is not checked for separators or `..`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{}", self.prefix, name))
    }

    /// Reads the fixture's reference content.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the fixture file doesn't exist.
    /// Returns `StoreError::PermissionDenied` if it can't be opened.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(name);
        fs::read(&path).map_err(|e| StoreError::from_io(&path, e))
    }

    /// Writes `content` as the fixture's new reference and returns its path.
    ///
    /// Creates the fixture directory if it is missing. The content goes to a
    /// temporary file in the same directory which is then renamed over the
    /// target, so the previous content is replaced in one step.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CreateDir` if the directory can't be created.
    /// Returns `StoreError::Io` if the temporary file can't be written.
    /// Returns `StoreError::AtomicWrite` if the rename fails.
    pub fn write(&self, name: &str, content: &[u8]) -> Result<PathBuf, StoreError> {
        self.ensure_dir()?;

        let path = self.path_for(name);
        let io_err = |source: io::Error| StoreError::Io {
            path: path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        temp.write_all(content).map_err(io_err)?;
        set_file_mode(temp.as_file()).map_err(io_err)?;

        temp.persist(&path).map_err(|e| StoreError::AtomicWrite {
            path: path.clone(),
            source: e.error,
        })?;

        Ok(path)
    }

    /// Lists fixtures in the directory whose file names carry the prefix.
    ///
    /// Only direct children are considered. A missing directory yields an
    /// empty list. Entries are sorted by name.
    pub fn list(&self) -> Result<Vec<FixtureEntry>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(self.dir.as_path()).to_path_buf();
                match e.into_io_error() {
                    Some(source) => StoreError::from_io(&path, source),
                    None => StoreError::Io {
                        path,
                        source: io::Error::other("file system loop"),
                    },
                }
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let Some(name) = file_name.strip_prefix(self.prefix.as_str()) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }

            let path = entry.path().to_path_buf();
            let content = fs::read(&path).map_err(|e| StoreError::from_io(&path, e))?;
            entries.push(FixtureEntry {
                name: name.to_string(),
                size: content.len() as u64,
                kind: classify(&content),
                sha256: digest(&content),
                path,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if self.dir.is_dir() {
            return Ok(());
        }
        create_dir(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }
}

#[cfg(unix)]
fn create_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(path)
}

#[cfg(not(unix))]
fn create_dir(path: &Path) -> io::Result<()> {
    let _ = DIR_MODE;
    fs::create_dir_all(path)
}

#[cfg(unix)]
fn set_file_mode(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(FILE_MODE))
}

#[cfg(not(unix))]
fn set_file_mode(_file: &fs::File) -> io::Result<()> {
    let _ = FILE_MODE;
    Ok(())
}
