//! Test harness for fixture integration tests.
//!
//! Provides isolated working directories and CLI assertion helpers using
//! `assert_cmd`.

mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::FixturesCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
