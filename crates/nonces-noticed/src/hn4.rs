//! HN4: nonce-bound BLAKE2b tag driving XChaCha20
//!
//! The tag is a keyed BLAKE2b-256 over
//! `nonce || plaintext || associated_data || le64(|plaintext|) || le64(|ad|)`.
//! Its first 24 bytes are the XChaCha20 nonce used to encrypt
//! `nonce || plaintext`, so the caller's nonce is both encrypted and
//! authenticated, and no separate nonce is transmitted.
//!
//! ```text
//! [ tag (32) ][ XChaCha20(encKey, tag[..24], nonce || plaintext) ]
//! ```
//!
//! Associated data is bound through the tag only. It does not feed the
//! keystream derivation; that would mean computing a second tag.

use blake2::{
    Blake2bMac,
    digest::{Mac, consts::U32},
};
use chacha20::{
    XChaCha20, XNonce,
    cipher::{KeyIvInit, StreamCipher},
};
use zeroize::{Zeroize, Zeroizing};

use crate::{error::SchemeError, scheme::Scheme, subkeys::SubkeyPair, validation};

/// XChaCha20 key size (32 bytes)
pub const KEY_SIZE: usize = 32;

/// XChaCha20 nonce size (24 bytes)
pub const NONCE_SIZE: usize = 24;

/// BLAKE2b-256 tag size (32 bytes)
pub const TAG_SIZE: usize = 32;

/// Two little-endian u64 lengths
const LENGTHS_SIZE: usize = 16;

const CONTEXT: &[u8] = b"HN4[XChaCha20,192,BLAKE2b-256]";

type Blake2bMac256 = Blake2bMac<U32>;

const _: () = assert!(NONCE_SIZE <= TAG_SIZE);

/// Encrypt with HN4.
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

    let tag = authenticator(prf_key, nonce, plaintext, associated_data).finalize().into_bytes();

    let (tag_out, body) = ciphertext.split_at_mut(TAG_SIZE);
    tag_out.copy_from_slice(&tag);

    let (nonce_out, message_out) = body.split_at_mut(NONCE_SIZE);
    nonce_out.copy_from_slice(nonce);
    message_out.copy_from_slice(plaintext);

    let mut stream = XChaCha20::new(enc_key.into(), XNonce::from_slice(&tag[..NONCE_SIZE]));
    stream.apply_keystream(body);

    Ok(())
}

/// Decrypt with HN4.
///
/// `plaintext` must be `ciphertext.len() - NONCE_SIZE - TAG_SIZE` bytes. The
/// recovered message is only copied out after the tag verifies.
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
    let (prf_key, enc_key) = (subkeys.first(), subkeys.second());

    let (tag, body) = ciphertext.split_at(TAG_SIZE);

    let mut recovered = Zeroizing::new(body.to_vec());
    let mut stream = XChaCha20::new(enc_key.into(), XNonce::from_slice(&tag[..NONCE_SIZE]));
    stream.apply_keystream(&mut recovered);

    let (nonce, message) = recovered.split_at(NONCE_SIZE);
    if authenticator(prf_key, nonce, message, associated_data).verify_slice(tag).is_err() {
        plaintext.zeroize();
        return Err(SchemeError::AuthenticationFailed);
    }

    plaintext.copy_from_slice(message);
    Ok(())
}

/// Incremental BLAKE2b-256 over the nonce, message, associated data and
/// their lengths, ready to finalize or verify.
fn authenticator(
    prf_key: &[u8; 32],
    nonce: &[u8],
    message: &[u8],
    associated_data: &[u8],
) -> Blake2bMac256 {
    let Ok(mut mac) = <Blake2bMac256 as Mac>::new_from_slice(prf_key) else {
        unreachable!("BLAKE2b accepts keys up to 64 bytes");
    };
    mac.update(nonce);
    mac.update(message);
    mac.update(associated_data);

    let mut lengths = [0u8; LENGTHS_SIZE];
    lengths[..8].copy_from_slice(&(message.len() as u64).to_le_bytes());
    lengths[8..].copy_from_slice(&(associated_data.len() as u64).to_le_bytes());
    mac.update(&lengths);

    mac
}

/// HN4 as a [`Scheme`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Hn4;

impl Scheme for Hn4 {
    const NAME: &'static str = "HN4";
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
