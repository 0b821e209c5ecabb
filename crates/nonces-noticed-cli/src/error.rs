//! Error types for the command-line front end.
//!
//! Input errors (bad hex, wrong buffer sizes) are reported as-is. Self-test
//! failures carry the scheme and the check that did not hold.

use nonces_noticed::{SchemeError, SchemeId};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum CliError {
    /// An argument was not valid hex
    #[error("invalid hex in --{field}: {source}")]
    InvalidHex {
        /// Flag the value came from
        field: &'static str,
        /// Decoder error
        source: hex::FromHexError,
    },

    /// The scheme rejected the input
    #[error("{scheme}: {source}")]
    Scheme {
        /// Scheme that was running
        scheme: SchemeId,
        /// Underlying scheme error
        source: SchemeError,
    },

    /// A known-answer check produced the wrong bytes
    #[error("{scheme}: known-answer {check} mismatch")]
    KnownAnswerMismatch {
        /// Scheme under test
        scheme: SchemeId,
        /// Which direction failed (`encrypt` or `decrypt`)
        check: &'static str,
    },

    /// A tampered ciphertext was not rejected
    #[error("{scheme}: tampered ciphertext was accepted")]
    TamperAccepted {
        /// Scheme under test
        scheme: SchemeId,
    },

    /// Writing output failed
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Returns true if a self-test check failed.
    ///
    /// These indicate a broken build or platform, never bad user input.
    pub fn is_self_test_failure(&self) -> bool {
        matches!(self, Self::KnownAnswerMismatch { .. } | Self::TamperAccepted { .. })
    }
}
