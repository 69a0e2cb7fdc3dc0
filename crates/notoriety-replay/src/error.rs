//! Error types for the replay binary.
//!
//! [`ReplayError`] wraps every failure mode between reading a scenario file
//! and reporting its results, so `main` can propagate with `?`.

use std::path::PathBuf;

/// Top-level error for the replay binary.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// No scenario paths were given.
    #[error("usage: notoriety-replay <scenario.yaml>...")]
    Usage,

    /// A scenario file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    Io {
        /// The scenario path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A scenario file is not valid scenario YAML.
    #[error("failed to parse scenario YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// The scenario's world fixture is inconsistent.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: notoriety_world::WorldError,
    },

    /// One or more queries did not produce the expected outcome.
    #[error("{failures} scenario queries did not match")]
    Mismatch {
        /// Number of mismatched queries across all scenarios.
        failures: usize,
    },
}
