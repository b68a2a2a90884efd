//! Failure reporting for fixture assertions.

use std::fmt::Write as _;
use std::thread;

/// Receives the failures raised by fixture assertions.
///
/// `fatal` is for failures after which the current test must not go on:
/// a missing fixture or a value that can't be serialized. `error` is for
/// mismatches, which are recorded while the test keeps running.
pub trait Reporter {
    /// Records a failure that ends the current test.
    fn fatal(&mut self, message: &str);

    /// Records a failure and lets the test continue.
    fn error(&mut self, message: &str);
}

/// Test-side reporter: panics on fatal failures, collects the rest.
///
/// Collected failures make the test fail when the reporter goes out of
/// scope (or on [`Assertions::finish`]), so every mismatch in a test is
/// reported together.
///
/// ```no_run
/// use fixtures::{Assertions, Fixtures, Settings};
///
/// let fixtures = Fixtures::new(&Settings::default());
/// let mut check = Assertions::new();
/// fixtures.assert_text(&mut check, "header", "name,size\n");
/// fixtures.assert_bytes(&mut check, "payload", &[0, 1, 2]);
/// check.finish();
/// ```
#[derive(Debug, Default)]
pub struct Assertions {
    failures: Vec<String>,
}

impl Assertions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Removes and returns the recorded failures.
    pub fn take_failures(&mut self) -> Vec<String> {
        std::mem::take(&mut self.failures)
    }

    /// Panics if any failure was recorded.
    pub fn finish(mut self) {
        let failures = self.take_failures();
        if !failures.is_empty() {
            panic!("{}", summarize(&failures));
        }
    }
}

impl Reporter for Assertions {
    fn fatal(&mut self, message: &str) {
        let mut failures = self.take_failures();
        failures.push(message.to_string());
        panic!("{}", summarize(&failures));
    }

    fn error(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}

impl Drop for Assertions {
    fn drop(&mut self) {
        if self.failures.is_empty() || thread::panicking() {
            return;
        }
        let failures = self.take_failures();
        panic!("{}", summarize(&failures));
    }
}

fn summarize(failures: &[String]) -> String {
    match failures {
        [only] => only.clone(),
        many => {
            let mut out = format!("{} fixture failures:\n", many.len());
            for (i, failure) in many.iter().enumerate() {
                let _ = write!(out, "\n[{}] {}", i + 1, failure);
            }
            out
        }
    }
}
