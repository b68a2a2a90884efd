//! The update/verify engine behind every fixture comparison.

use crate::content::{Kind, classify, reindent_json, to_hex};
use crate::report::Reporter;
use crate::settings::{Mode, Settings};
use crate::store::{FixtureStore, StoreError};
use serde::Serialize;
use serde_json::Value;
use similar::TextDiff;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Lines of unchanged context shown around each change in a diff.
pub const DIFF_CONTEXT: usize = 3;

/// How content is normalized before it is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    /// Pretty-print both sides as JSON when both parse.
    Json,
    /// Compare the bytes as given.
    Exact,
}

/// Errors that stop a comparison before a verdict is reached.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("fixture file does not exist: {path}")]
    Missing { path: PathBuf },

    #[error("failed to read fixture: {0}")]
    Read(#[source] StoreError),

    #[error("failed to update fixture: {0}")]
    Update(#[source] StoreError),

    #[error("failed to serialize value as JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FixtureError {
    /// Update-mode I/O failures point at a broken environment rather than
    /// at the test that triggered them.
    pub fn is_environment(&self) -> bool {
        matches!(self, FixtureError::Update(_))
    }
}

/// Result of a comparison that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Update mode wrote the fixture.
    Updated { path: PathBuf },
    /// Verify mode found the fixture equal to the computed value.
    Matched { path: PathBuf },
    /// Verify mode found a difference.
    Mismatch(Mismatch),
}

impl Outcome {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Outcome::Mismatch(_))
    }
}

/// A verified fixture that differs from the computed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: PathBuf,
    pub detail: MismatchDetail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchDetail {
    /// Both sides were binary; the raw bytes are kept for hex rendering.
    Binary { want: Vec<u8>, got: Vec<u8> },
    /// At least one side was text; a unified diff of the two.
    Diff { unified: String },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            MismatchDetail::Binary { want, got } => write!(
                f,
                "wrong value:\nwant:\n{}\ngot:\n{}\n",
                to_hex(want),
                to_hex(got)
            ),
            MismatchDetail::Diff { unified } => write!(f, "wrong value:\n{unified}\n"),
        }
    }
}

/// Compares computed values against fixture files, or rewrites them.
#[derive(Debug, Clone)]
pub struct Fixtures {
    store: FixtureStore,
    mode: Mode,
}

impl Fixtures {
    pub fn new(settings: &Settings) -> Self {
        Self {
            store: FixtureStore::from_settings(settings),
            mode: settings.mode,
        }
    }

    pub fn from_store(store: FixtureStore, mode: Mode) -> Self {
        Self { store, mode }
    }

    /// Returns a copy of these fixtures running in `mode`.
    pub fn with_mode(&self, mode: Mode) -> Self {
        Self {
            store: self.store.clone(),
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &FixtureStore {
        &self.store
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.store.path_for(name)
    }

    /// Compares `value` serialized as two-space indented JSON with object
    /// keys in sorted order.
    pub fn check_json<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<Outcome, FixtureError> {
        let encoded = encode_json(value)?;
        self.check(name, &encoded, Normalize::Json)
    }

    /// Compares text, pretty-printing both sides first if they are JSON.
    pub fn check_text(&self, name: &str, text: &str) -> Result<Outcome, FixtureError> {
        self.check(name, text.as_bytes(), Normalize::Json)
    }

    /// Compares raw bytes without any reformatting.
    pub fn check_bytes(&self, name: &str, bytes: &[u8]) -> Result<Outcome, FixtureError> {
        self.check(name, bytes, Normalize::Exact)
    }

    /// Writes or verifies the fixture `name` against `now`.
    ///
    /// In update mode the fixture is overwritten and nothing is compared.
    /// In verify mode both sides are classified independently. Two binary
    /// sides are compared byte for byte. Otherwise, with
    /// [`Normalize::Json`], both sides are re-indented if both parse as
    /// JSON, and any difference is reported as a unified diff.
    pub fn check(&self, name: &str, now: &[u8], normalize: Normalize) -> Result<Outcome, FixtureError> {
        if self.mode.is_update() {
            let path = self.store.write(name, now).map_err(FixtureError::Update)?;
            return Ok(Outcome::Updated { path });
        }

        let path = self.store.path_for(name);
        let old = self.store.read(name).map_err(|e| match e {
            StoreError::NotFound { path } => FixtureError::Missing { path },
            other => FixtureError::Read(other),
        })?;

        if classify(&old) == Kind::Binary && classify(now) == Kind::Binary {
            if old == now {
                return Ok(Outcome::Matched { path });
            }
            return Ok(Outcome::Mismatch(Mismatch {
                path,
                detail: MismatchDetail::Binary {
                    want: old,
                    got: now.to_vec(),
                },
            }));
        }

        let (old, now) = match normalize {
            Normalize::Json => match (reindent_json(&old), reindent_json(now)) {
                (Some(old), Some(now)) => (old, now),
                _ => (old, now.to_vec()),
            },
            Normalize::Exact => (old, now.to_vec()),
        };

        if old == now {
            return Ok(Outcome::Matched { path });
        }

        let unified = unified_diff(&path, &old, &now);
        Ok(Outcome::Mismatch(Mismatch {
            path,
            detail: MismatchDetail::Diff { unified },
        }))
    }

    /// Compares `value` as JSON and reports the verdict to `reporter`.
    pub fn assert_json<T: Serialize + ?Sized>(
        &self,
        reporter: &mut impl Reporter,
        name: &str,
        value: &T,
    ) {
        let encoded = match encode_json(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                reporter.fatal(&FixtureError::Serialize(err).to_string());
                return;
            }
        };
        self.assert_bytes_with(reporter, name, &encoded, Normalize::Json);
    }

    /// Compares text and reports the verdict to `reporter`.
    pub fn assert_text(&self, reporter: &mut impl Reporter, name: &str, text: &str) {
        self.assert_bytes_with(reporter, name, text.as_bytes(), Normalize::Json);
    }

    /// Compares raw bytes and reports the verdict to `reporter`.
    pub fn assert_bytes(&self, reporter: &mut impl Reporter, name: &str, bytes: &[u8]) {
        self.assert_bytes_with(reporter, name, bytes, Normalize::Exact);
    }

    fn assert_bytes_with(
        &self,
        reporter: &mut impl Reporter,
        name: &str,
        now: &[u8],
        normalize: Normalize,
    ) {
        match self.check(name, now, normalize) {
            Ok(Outcome::Updated { .. } | Outcome::Matched { .. }) => {}
            Ok(Outcome::Mismatch(mismatch)) => reporter.error(&mismatch.to_string()),
            Err(err) if err.is_environment() => {
                eprintln!("fatal: {err}");
                std::process::abort();
            }
            Err(err) => reporter.fatal(&err.to_string()),
        }
    }
}

/// Pretty JSON for `value` with every object's keys sorted, so maps with
/// unspecified iteration order encode to the same bytes on every run.
fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let value = sort_keys(serde_json::to_value(value)?);
    serde_json::to_vec_pretty(&value)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Line diff of `old` against `now` with both headers naming `path`.
fn unified_diff(path: &Path, old: &[u8], now: &[u8]) -> String {
    let label = path.display().to_string();
    let old = String::from_utf8_lossy(old);
    let now = String::from_utf8_lossy(now);
    let diff = TextDiff::from_lines(&*old, &*now);
    let mut unified = diff.unified_diff();
    unified.context_radius(DIFF_CONTEXT).header(&label, &label);
    unified.to_string()
}
