//! Shared utilities for integration tests.

pub mod harness;

use fixtures::Reporter;

/// A failure delivered to a [`Recorder`].
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Fatal(String),
    Error(String),
}

/// Reporter that records failures instead of failing the test.
///
/// `fatal` still unwinds, so code after a fatal assertion never runs; wrap
/// the call in `catch_unwind` to inspect what was recorded.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub failures: Vec<Failure>,
}

impl Reporter for Recorder {
    fn fatal(&mut self, message: &str) {
        self.failures.push(Failure::Fatal(message.to_string()));
        panic!("fatal fixture failure: {message}");
    }

    fn error(&mut self, message: &str) {
        self.failures.push(Failure::Error(message.to_string()));
    }
}
