//! Error types for the engine binary.

use hegemonia_core::{ConfigError, TickError};

/// Errors the engine binary can exit with.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A tick failed.
    #[error("simulation error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}
