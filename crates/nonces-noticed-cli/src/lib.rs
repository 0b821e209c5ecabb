//! Command-line front end for the HN schemes.
//!
//! All inputs and outputs are hex. The library half holds the commands so
//! they can be tested without spawning the binary.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod error;

pub use commands::{SelfTestReport, decrypt, encrypt, self_test};
pub use error::CliError;
