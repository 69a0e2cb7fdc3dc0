//! Scenario replay binary for the notoriety resolver.
//!
//! Loads one or more YAML scenarios, builds each world, evaluates every query
//! and logs the results. Exits with an error when any query does not produce
//! its expected outcome.
//!
//! # Startup Sequence
//!
//! 1. Load every scenario named on the command line
//! 2. Initialize structured logging (tracing), honouring `RUST_LOG` and
//!    falling back to the first scenario's `logging.level`
//! 3. Replay each scenario and log a summary
//! 4. Fail if any query mismatched

mod error;
mod scenario;

use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ReplayError;
use crate::scenario::Scenario;

fn main() -> Result<(), ReplayError> {
    // 1. Load scenarios.
    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        return Err(ReplayError::Usage);
    }
    let scenarios = paths
        .iter()
        .map(|path| Scenario::from_file(path).map(|scenario| (path, scenario)))
        .collect::<Result<Vec<_>, _>>()?;

    // 2. Initialize structured logging.
    let level = scenarios
        .first()
        .map_or("info", |(_, scenario)| scenario.config.logging.level.as_str())
        .to_owned();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(true)
        .init();

    info!(scenarios = scenarios.len(), "notoriety-replay starting");

    // 3. Replay.
    let mut failures: usize = 0;
    for (path, scenario) in scenarios {
        let name = scenario.name.clone();
        let report = scenario.run()?;
        info!(
            path = %path.display(),
            scenario = %name,
            passed = report.passed,
            failed = report.mismatches.len(),
            "Scenario replayed"
        );
        for mismatch in &report.mismatches {
            warn!(
                scenario = %name,
                index = mismatch.index,
                expected = %mismatch.expected,
                actual = %mismatch.actual,
                "Query mismatch"
            );
        }
        failures = failures.saturating_add(report.mismatches.len());
    }

    // 4. Verdict.
    if failures > 0 {
        return Err(ReplayError::Mismatch { failures });
    }
    info!("All scenarios matched");
    Ok(())
}
