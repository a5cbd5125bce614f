//! Runs tap spawn behaviour suites one example at a time.

use std::fmt::Debug;
use std::io;
use std::sync::Arc;

use rspec::block::Suite;
use rspec::{ConfigurationBuilder, Logger, Runner};

/// Runs `suite` on the calling thread and fails the test binary on the
/// first failing example.
///
/// Every example in a tapping scenario drives the same [`SharedApp`], so
/// examples must not interleave.
///
/// [`SharedApp`]: super::shared_app::SharedApp
pub fn run_scenarios<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + Debug,
{
    let Ok(config) = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
    else {
        panic!("serial rspec configuration rejected");
    };
    let report_to_stdout = Arc::new(Logger::new(io::stdout()));
    Runner::new(config, vec![report_to_stdout]).run(suite);
}
