//! Error types for scheme operations

use std::fmt;

use thiserror::Error;

/// The length a buffer was required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRequirement {
    /// Exactly this many bytes
    Exactly(usize),
    /// At least this many bytes
    AtLeast(usize),
    /// At most this many bytes
    AtMost(usize),
}

impl fmt::Display for LengthRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::AtMost(n) => write!(f, "at most {n}"),
        }
    }
}

/// Errors from encrypt and decrypt operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    /// A caller-supplied buffer has the wrong size.
    ///
    /// Raised before any key material is derived.
    #[error("invalid {parameter} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Name of the offending parameter
        parameter: &'static str,
        /// What the scheme requires
        expected: LengthRequirement,
        /// Length that was supplied
        actual: usize,
    },

    /// The ciphertext, key or associated data did not authenticate.
    ///
    /// The plaintext buffer is all zero when this is returned.
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl SchemeError {
    /// Returns true if the ciphertext was rejected by tag verification.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }

    /// Returns true if the error is a caller mistake rather than a
    /// cryptographic rejection.
    ///
    /// Caller errors are deterministic: retrying with the same buffers fails
    /// the same way.
    pub fn is_caller_error(&self) -> bool {
        match self {
            Self::InvalidLength { .. } => true,
            Self::AuthenticationFailed => false,
        }
    }
}
