//! Crate-wide error taxonomy.

use thiserror::Error;

/// Everything that can go wrong while grabbing or loading stuff.
#[derive(Debug, Error)]
pub enum BilboError {
    /// A grab on a key with no resolver and no miss handling.
    #[error("Couldn't find stuff: {key}")]
    NotFound {
        /// The key that had no resolver.
        key: String,
    },

    /// A stored producer whose shape does not fit its strategy.
    #[error("RESOLUTION ERROR: {code} - {message}")]
    Resolution {
        /// Stable machine-readable failure code.
        code: String,
        /// Human-readable detail.
        message: String,
    },

    /// An external resource could not be located or understood.
    #[error("LOAD ERROR: {code} - {message}")]
    Load {
        /// Stable machine-readable failure code.
        code: String,
        /// Human-readable detail.
        message: String,
    },
}
