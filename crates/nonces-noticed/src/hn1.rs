//! HN1: AEGIS-256 with a tag-masked nonce
//!
//! The real nonce is used for AEGIS-256 and then hidden: the first
//! `NONCE_SIZE` output bytes are `nonce XOR BLAKE2b(x, prfKey)`, where `x` is
//! the leading `TAG_SIZE` bytes of the AEGIS output that follows.
//!
//! ```text
//! [ nonce ^ mask (32) ][ AEGIS ciphertext ][ AEGIS tag (32) ]
//!                      ^---- x (32) ----^
//! ```
//!
//! Reusing a nonce still leaks through the AEGIS layer, and the mask for a
//! given `x` is stable.

use aegis::aegis256::Aegis256;
use zeroize::Zeroize;

use crate::{
    error::SchemeError,
    scheme::Scheme,
    subkeys::{SubkeyPair, keyed_hash_256},
    validation,
};

/// AEGIS-256 key size (32 bytes)
pub const KEY_SIZE: usize = 32;

/// AEGIS-256 nonce size (32 bytes)
pub const NONCE_SIZE: usize = 32;

/// AEGIS-256 tag size (32 bytes)
pub const TAG_SIZE: usize = 32;

const CONTEXT: &[u8] = b"HN1[AEGIS-256,BLAKE2b-256]";

/// Encrypt with HN1.
///
/// `ciphertext` must be `plaintext.len() + NONCE_SIZE + TAG_SIZE` bytes.
pub fn encrypt(
    ciphertext: &mut [u8],
    plaintext: &[u8],
    nonce: &[u8],
    key: &[u8],
    associated_data: &[u8],
) -> Result<(), SchemeError> {
    validation::exact("ciphertext", ciphertext.len(), plaintext.len() + NONCE_SIZE + TAG_SIZE)?;
    let nonce = validation::array::<NONCE_SIZE>("nonce", nonce)?;
    let key = validation::array::<KEY_SIZE>("key", key)?;

    let subkeys = SubkeyPair::derive_blake2b(CONTEXT, key);
    let (enc_key, prf_key) = (subkeys.first(), subkeys.second());

    let (masked_nonce, body) = ciphertext.split_at_mut(NONCE_SIZE);
    let (inner, tag) = body.split_at_mut(plaintext.len());
    inner.copy_from_slice(plaintext);
    tag.copy_from_slice(
        &Aegis256::<TAG_SIZE>::new(enc_key, nonce).encrypt_in_place(inner, associated_data),
    );

    let mask = keyed_hash_256(&body[..TAG_SIZE], prf_key);
    for ((out, m), n) in masked_nonce.iter_mut().zip(mask.iter()).zip(nonce) {
        *out = m ^ n;
    }

    Ok(())
}

/// Decrypt with HN1.
///
/// `plaintext` must be `ciphertext.len() - NONCE_SIZE - TAG_SIZE` bytes.
pub fn decrypt(
    plaintext: &mut [u8],
    ciphertext: &[u8],
    key: &[u8],
    associated_data: &[u8],
) -> Result<(), SchemeError> {
    validation::at_least("ciphertext", ciphertext.len(), NONCE_SIZE + TAG_SIZE)?;
    validation::exact("plaintext", plaintext.len(), ciphertext.len() - NONCE_SIZE - TAG_SIZE)?;
    let key = validation::array::<KEY_SIZE>("key", key)?;

    let subkeys = SubkeyPair::derive_blake2b(CONTEXT, key);
    let (enc_key, prf_key) = (subkeys.first(), subkeys.second());

    let (masked_nonce, body) = ciphertext.split_at(NONCE_SIZE);
    let (inner, tag) = body.split_at(plaintext.len());
    let tag = validation::array::<TAG_SIZE>("tag", tag)?;

    // A wrong recovery here surfaces as an AEGIS tag failure below
    let mut nonce = keyed_hash_256(&body[..TAG_SIZE], prf_key);
    for (n, m) in nonce.iter_mut().zip(masked_nonce) {
        *n ^= m;
    }

    plaintext.copy_from_slice(inner);
    let cipher = Aegis256::<TAG_SIZE>::new(enc_key, &nonce);
    if cipher.decrypt_in_place(plaintext, tag, associated_data).is_err() {
        plaintext.zeroize();
        return Err(SchemeError::AuthenticationFailed);
    }

    Ok(())
}

/// HN1 as a [`Scheme`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Hn1;

impl Scheme for Hn1 {
    const NAME: &'static str = "HN1";
    const KEY_SIZE: usize = KEY_SIZE;
    const NONCE_SIZE: usize = NONCE_SIZE;
    const TAG_SIZE: usize = TAG_SIZE;

    fn encrypt(
        ciphertext: &mut [u8],
        plaintext: &[u8],
        nonce: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<(), SchemeError> {
        encrypt(ciphertext, plaintext, nonce, key, associated_data)
    }

    fn decrypt(
        plaintext: &mut [u8],
        ciphertext: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<(), SchemeError> {
        decrypt(plaintext, ciphertext, key, associated_data)
    }
}
