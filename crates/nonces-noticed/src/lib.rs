//! Nonces Noticed
//!
//! Four AEAD compositions that keep the caller's nonce out of the
//! transmitted ciphertext. All of them are pure functions over caller
//! buffers: no state survives a call, and subkeys are wiped before return.
//!
//! # Schemes
//!
//! | Scheme | Body cipher   | Nonce handling                              |
//! |--------|---------------|---------------------------------------------|
//! | HN1    | AEGIS-256     | nonce XOR keyed hash of the leading output  |
//! | HN2    | AES-256-GCM   | AES block over nonce and first ciphertext   |
//! | HN3    | AEGIS-256     | synthetic nonce `BLAKE2b(nonce, prfKey)`    |
//! | HN4    | XChaCha20     | nonce encrypted with the message, tag-bound |
//!
//! Every ciphertext is `NONCE_SIZE + TAG_SIZE` bytes longer than its
//! plaintext, and the length is the only thing the schemes leak for free.
//!
//! ```text
//! master key (32)
//!        │
//!        ▼
//! BLAKE2b-512 / HKDF-SHA256 (scheme label)
//!        │
//!        ├──► encKey ──► body AEAD / stream
//!        └──► prfKey ──► nonce mask / synthetic nonce / tag
//! ```
//!
//! # Security
//!
//! Failed decryption:
//! - Returns [`SchemeError::AuthenticationFailed`] with no further detail
//! - Leaves the plaintext buffer all zero
//!
//! Nonce reuse:
//! - HN1, HN2 and HN3 inherit the body AEAD's behaviour under reuse
//! - HN4 is deterministic: reuse only reveals that two messages were equal

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod hn1;
pub mod hn2;
pub mod hn3;
pub mod hn4;
pub mod scheme;
pub mod vectors;

mod subkeys;
mod validation;

#[cfg(test)]
mod test_support;

pub use error::{LengthRequirement, SchemeError};
pub use hn1::Hn1;
pub use hn2::Hn2;
pub use hn3::Hn3;
pub use hn4::Hn4;
pub use scheme::{Scheme, SchemeId, UnknownScheme};
pub use vectors::{KNOWN_ANSWERS, KnownAnswer, known_answer};
