//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::store::FixtureEntry;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain file paths, one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Formats a fixture entry as one aligned listing line.
pub fn listing_line(entry: &FixtureEntry) -> String {
    format!(
        "{:<40}  {:<6}  {:>10}  {}",
        entry.name,
        entry.kind.to_string(),
        entry.size,
        &entry.sha256[..12]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Kind, digest};
    use std::path::PathBuf;

    #[test]
    fn listing_line_shows_short_digest() {
        let entry = FixtureEntry {
            name: "users.json".to_string(),
            path: PathBuf::from("testdata/fixture.users.json"),
            size: 42,
            kind: Kind::Text,
            sha256: digest(b"x"),
        };
        let line = listing_line(&entry);
        assert!(line.starts_with("users.json "));
        assert!(line.contains("text"));
        assert!(line.contains("42"));
        assert!(line.ends_with(&entry.sha256[..12]));
    }

    #[test]
    fn output_wraps_data() {
        let json = serde_json::to_string(&Output::new(vec![1, 2])).unwrap();
        assert_eq!(json, r#"{"data":[1,2]}"#);
    }
}
