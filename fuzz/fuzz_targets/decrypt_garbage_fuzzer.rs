//! Fuzz target for decrypt on attacker-controlled bytes
//!
//! # Strategy
//!
//! - Arbitrary ciphertext of any length, including shorter than the overhead
//! - Arbitrary key and associated data lengths
//!
//! # Invariants
//!
//! - Decrypt never panics
//! - Short ciphertexts and wrong key sizes are caller errors
//! - Random ciphertexts never authenticate
//! - Any failure leaves the output buffer zeroed

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nonces_noticed::{SchemeError, SchemeId};

#[derive(Debug, Clone, Arbitrary)]
struct Garbage {
    scheme: u8,
    key: Vec<u8>,
    associated_data: Vec<u8>,
    ciphertext: Vec<u8>,
}

fuzz_target!(|input: Garbage| {
    let id = SchemeId::ALL[usize::from(input.scheme) % SchemeId::ALL.len()];

    // INVARIANT 1: open never panics
    let result = id.open(&input.ciphertext, &input.key, &input.associated_data);

    match result {
        Ok(_) => panic!("random ciphertext authenticated under {id}"),
        Err(SchemeError::InvalidLength { .. }) => {
            // INVARIANT 2: Length errors only when sizes are actually wrong
            assert!(
                input.ciphertext.len() < id.overhead() || input.key.len() != id.key_size(),
                "length error on well-sized input"
            );
        },
        Err(SchemeError::AuthenticationFailed) => {},
    }

    // INVARIANT 3: Caller-buffer path zeroes output too
    if let Some(len) = input.ciphertext.len().checked_sub(id.overhead()) {
        let mut plaintext = vec![0xFFu8; len];
        let result =
            id.decrypt(&mut plaintext, &input.ciphertext, &input.key, &input.associated_data);
        if result.is_err() && input.key.len() == id.key_size() {
            assert!(plaintext.iter().all(|&b| b == 0));
        }
    }
});
