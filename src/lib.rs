//! fixtures - golden-file comparisons for tests
//!
//! A fixture is a reference file under `testdata/` named `fixture.<name>`.
//! In verify mode a computed value is compared against it and differences
//! are reported as a unified diff (or a hex dump for binary content). In
//! update mode the value replaces the file. Set `FIX=1` to update.
//!
//! ```no_run
//! let report = serde_json::json!({"total": 3, "items": ["a", "b", "c"]});
//! fixtures::json("report.json", &report);
//! ```

pub mod cli;
pub mod compare;
pub mod content;
pub mod report;
pub mod settings;
pub mod store;

use std::sync::OnceLock;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use cli::{
    Cli, Command,
    handlers::{handle_check, handle_completions, handle_list, handle_show},
};

pub use compare::{DIFF_CONTEXT, FixtureError, Fixtures, Mismatch, MismatchDetail, Normalize, Outcome};
pub use content::{Kind, classify, reindent_json};
pub use report::{Assertions, Reporter};
pub use settings::{Mode, Settings, SettingsError};
pub use store::{FixtureEntry, FixtureStore, StoreError};

/// Process-wide fixtures, configured once from [`Settings::load`].
pub fn shared() -> &'static Fixtures {
    static SHARED: OnceLock<Fixtures> = OnceLock::new();
    SHARED.get_or_init(|| match Settings::load() {
        Ok(settings) => Fixtures::new(&settings),
        Err(err) => panic!("failed to load fixture settings: {err}"),
    })
}

/// Compares `value`, serialized as indented JSON, with fixture `name`.
///
/// # Panics
///
/// Panics if the fixture is missing, the value can't be serialized, or the
/// content differs.
pub fn json<T: Serialize + ?Sized>(name: &str, value: &T) {
    shared().assert_json(&mut Assertions::new(), name, value);
}

/// Compares `text` with fixture `name`, pretty-printing JSON text first.
///
/// # Panics
///
/// Panics if the fixture is missing or the content differs.
pub fn text(name: &str, text: &str) {
    shared().assert_text(&mut Assertions::new(), name, text);
}

/// Compares `data` byte for byte with fixture `name`.
///
/// # Panics
///
/// Panics if the fixture is missing or the content differs.
pub fn bytes(name: &str, data: &[u8]) {
    shared().assert_bytes(&mut Assertions::new(), name, data);
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load()?.with_overrides(cli.dir.as_deref(), cli.prefix.as_deref(), cli.fix);
    let fixtures = Fixtures::new(&settings);
    let verbose = cli.verbose > 0;

    match &cli.command {
        Command::Check(args) => handle_check(args, &fixtures, verbose),
        Command::List(args) => handle_list(args, fixtures.store()),
        Command::Show(args) => handle_show(args, fixtures.store()),
        Command::Completions(args) => handle_completions(args),
    }
}
