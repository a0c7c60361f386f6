//! Runs rspec suites inside an ordinary `#[test]`.

use std::sync::Arc;

use rspec::report::Report;
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};

/// Runs every example of `suite` on the calling thread and fails the test if
/// any of them failed.
///
/// The examples share one `App`, so they must not run in parallel. Failures
/// are reported as a panic rather than a process exit so the remaining
/// `#[test]` functions in the binary still run.
///
/// # Panics
///
/// Panics when rspec rejects the configuration or an example fails.
pub fn run_scenarios<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(false)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    let report = Runner::new(config, vec![Arc::new(Logger::new(std::io::stdout()))]).run(suite);
    assert!(report.is_success(), "some scenarios failed; see the log above");
}
