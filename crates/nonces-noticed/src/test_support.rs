//! Helpers shared by the per-scheme unit tests.

use crate::{
    scheme::SchemeId,
    vectors::{KnownAnswer, known_answer},
};

/// A known-answer vector with its hex fields decoded.
pub(crate) struct Decoded {
    pub key: Vec<u8>,
    pub nonce: Vec<u8>,
    pub plaintext: Vec<u8>,
    pub associated_data: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl From<&KnownAnswer> for Decoded {
    fn from(vector: &KnownAnswer) -> Self {
        Self {
            key: hex::decode(vector.key).unwrap(),
            nonce: hex::decode(vector.nonce).unwrap(),
            plaintext: hex::decode(vector.plaintext).unwrap(),
            associated_data: hex::decode(vector.associated_data).unwrap(),
            ciphertext: hex::decode(vector.ciphertext).unwrap(),
        }
    }
}

pub(crate) fn vector(scheme: SchemeId) -> Decoded {
    Decoded::from(known_answer(scheme))
}
