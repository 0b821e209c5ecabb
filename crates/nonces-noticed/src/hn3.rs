//! HN3: AEGIS-256 under a synthetic nonce
//!
//! The caller's nonce is replaced before encryption by
//! `BLAKE2b(nonce, prfKey)`. The synthetic nonce is sent in the clear and is
//! all a receiver needs; the real nonce never leaves the sender.
//!
//! ```text
//! [ synthetic nonce (32) ][ AEGIS ciphertext ][ AEGIS tag (32) ]
//! ```

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

const CONTEXT: &[u8] = b"HN3[AEGIS-256,BLAKE2b-256]";

/// Encrypt with HN3.
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
    let (prf_key, enc_key) = (subkeys.first(), subkeys.second());

    let synthetic_nonce = keyed_hash_256(nonce, prf_key);

    let (prefix, body) = ciphertext.split_at_mut(NONCE_SIZE);
    prefix.copy_from_slice(&synthetic_nonce[..]);

    let (inner, tag) = body.split_at_mut(plaintext.len());
    inner.copy_from_slice(plaintext);
    tag.copy_from_slice(
        &Aegis256::<TAG_SIZE>::new(enc_key, &synthetic_nonce)
            .encrypt_in_place(inner, associated_data),
    );

    Ok(())
}

/// Decrypt with HN3.
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

    // Only the encryption half is needed here
    let subkeys = SubkeyPair::derive_blake2b(CONTEXT, key);
    let enc_key = subkeys.second();

    let (prefix, body) = ciphertext.split_at(NONCE_SIZE);
    let synthetic_nonce = validation::array::<NONCE_SIZE>("nonce", prefix)?;
    let (inner, tag) = body.split_at(plaintext.len());
    let tag = validation::array::<TAG_SIZE>("tag", tag)?;

    plaintext.copy_from_slice(inner);
    let cipher = Aegis256::<TAG_SIZE>::new(enc_key, synthetic_nonce);
    if cipher.decrypt_in_place(plaintext, tag, associated_data).is_err() {
        plaintext.zeroize();
        return Err(SchemeError::AuthenticationFailed);
    }

    Ok(())
}

/// HN3 as a [`Scheme`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Hn3;

impl Scheme for Hn3 {
    const NAME: &'static str = "HN3";
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
