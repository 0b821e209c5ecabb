//! Fuzz target for encrypt/decrypt across all schemes
//!
//! # Strategy
//!
//! - Arbitrary scheme, key, nonce, plaintext and associated data
//! - Key and nonce are sometimes the wrong size
//! - One corruption per run, aimed at ciphertext, key or associated data
//!
//! # Invariants
//!
//! - Correctly sized inputs always encrypt
//! - Wrongly sized inputs are rejected as caller errors, never panics
//! - Ciphertext is exactly plaintext + overhead
//! - Encryption is deterministic
//! - Decrypt of a fresh ciphertext returns the plaintext
//! - Any corruption fails authentication and leaves a zeroed buffer

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nonces_noticed::{SchemeError, SchemeId};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum FuzzScheme {
    Hn1,
    Hn2,
    Hn3,
    Hn4,
}

impl From<FuzzScheme> for SchemeId {
    fn from(scheme: FuzzScheme) -> Self {
        match scheme {
            FuzzScheme::Hn1 => SchemeId::Hn1,
            FuzzScheme::Hn2 => SchemeId::Hn2,
            FuzzScheme::Hn3 => SchemeId::Hn3,
            FuzzScheme::Hn4 => SchemeId::Hn4,
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
enum Corruption {
    None,
    Ciphertext { index: u16, mask: u8 },
    Key { index: u8, mask: u8 },
    AssociatedData { index: u16, mask: u8 },
    AppendAssociatedData(u8),
}

#[derive(Debug, Clone, Arbitrary)]
struct Scenario {
    scheme: FuzzScheme,
    key: [u8; 32],
    nonce: [u8; 32],
    /// Trim key/nonce by this many bytes when non-zero
    key_trim: u8,
    nonce_trim: u8,
    plaintext: Vec<u8>,
    associated_data: Vec<u8>,
    corruption: Corruption,
}

fuzz_target!(|scenario: Scenario| {
    let id = SchemeId::from(scenario.scheme);

    let key_len = id.key_size().saturating_sub(usize::from(scenario.key_trim % 4));
    let nonce_len = id.nonce_size().saturating_sub(usize::from(scenario.nonce_trim % 4));
    let key = &scenario.key[..key_len];
    let nonce = &scenario.nonce[..nonce_len];

    let sealed = id.seal(&scenario.plaintext, nonce, key, &scenario.associated_data);

    // INVARIANT 1: Sizes decide success, never content
    if key_len != id.key_size() || nonce_len != id.nonce_size() {
        let err = sealed.expect_err("wrong sizes must be rejected");
        assert!(err.is_caller_error(), "size errors must be caller errors");
        return;
    }
    let ciphertext = sealed.expect("correctly sized inputs must encrypt");

    // INVARIANT 2: Length is plaintext + overhead
    assert_eq!(ciphertext.len(), scenario.plaintext.len() + id.overhead());

    // INVARIANT 3: Deterministic
    let again = id.seal(&scenario.plaintext, nonce, key, &scenario.associated_data).unwrap();
    assert_eq!(ciphertext, again, "encryption must be deterministic");

    // INVARIANT 4: Round-trip
    let opened = id.open(&ciphertext, key, &scenario.associated_data).unwrap();
    assert_eq!(opened.as_slice(), scenario.plaintext.as_slice());

    let mut ciphertext = ciphertext;
    let mut key = key.to_vec();
    let mut associated_data = scenario.associated_data.clone();

    let corrupted = match scenario.corruption {
        Corruption::None => false,
        Corruption::Ciphertext { mask: 0, .. }
        | Corruption::Key { mask: 0, .. }
        | Corruption::AssociatedData { mask: 0, .. } => false,
        Corruption::Ciphertext { index, mask } => {
            let i = usize::from(index) % ciphertext.len();
            ciphertext[i] ^= mask;
            true
        },
        Corruption::Key { index, mask } => {
            let i = usize::from(index) % key.len();
            key[i] ^= mask;
            true
        },
        Corruption::AssociatedData { index, mask } => {
            if associated_data.is_empty() {
                false
            } else {
                let i = usize::from(index) % associated_data.len();
                associated_data[i] ^= mask;
                true
            }
        },
        Corruption::AppendAssociatedData(byte) => {
            associated_data.push(byte);
            true
        },
    };

    if corrupted {
        // INVARIANT 5: Corruption fails authentication with a zeroed buffer
        let mut plaintext = vec![0xA5u8; scenario.plaintext.len()];
        let result = id.decrypt(&mut plaintext, &ciphertext, &key, &associated_data);
        assert_eq!(result, Err(SchemeError::AuthenticationFailed));
        assert!(plaintext.iter().all(|&b| b == 0), "failed decrypt must zero output");
    }
});
