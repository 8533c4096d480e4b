//! Error taxonomy for generation.
//!
//! Only one condition is ever recovered inside the crate: a missing
//! non-secure device, which degrades to the seeded fallback generator with a
//! warning. Everything below is surfaced to the caller and is fatal for the
//! current line.

use std::io;

/// Errors produced while configuring, opening or drawing from entropy, or
/// writing encoded output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Secure mode was requested and the high-quality device could not be opened.
    #[error("cannot open {device}: {source}")]
    EntropyUnavailable {
        device: String,
        #[source]
        source: io::Error,
    },

    /// The entropy device failed (or hit end-of-file) in the middle of a fill.
    #[error("entropy read failed: {0}")]
    EntropyReadFailure(#[source] io::Error),

    /// Requested length was zero or negative.
    #[error("invalid length {0}: must be at least 1")]
    InvalidLength(i64),

    /// Format name did not match any known output kind.
    #[error("unknown output format '{0}'")]
    UnknownFormat(String),

    /// The output sink refused a write.
    #[error("write failed: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    /// True for the configuration errors raised before entropy is touched.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidLength(_) | Self::UnknownFormat(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
