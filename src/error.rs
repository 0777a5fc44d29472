//! Error types.
//!
//! Only configuration can fail.  Calls made in the wrong game state are
//! ignored by the components instead of being reported as errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read tuning file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse tuning: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Failed to render tuning: {0}")]
    Render(#[from] ron::Error),

    /// No catalog entry can ever be drawn, so an upgrade pause would present nothing.
    #[error("Upgrade catalog has no entry with a positive weight")]
    EmptyCatalog,

    #[error("Invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
