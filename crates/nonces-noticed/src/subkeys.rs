//! Per-call subkey derivation from a master key
//!
//! Every scheme splits its master key into an encryption subkey and a
//! PRF/masking subkey. The pair lives for exactly one encrypt or decrypt call
//! and is zeroized when dropped, which covers early error returns as well as
//! normal exits.

use blake2::{
    Blake2bMac, Blake2bMac512,
    digest::{FixedOutput, KeyInit, Update, consts::U32, generic_array::GenericArray},
};
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Size of each derived subkey (32 bytes)
pub(crate) const SUBKEY_SIZE: usize = 32;

/// Size of the keyed BLAKE2b outputs used for masks, synthetic nonces and tags
pub(crate) const HASH_SIZE: usize = 32;

/// Output keying material: both subkeys back to back
const OKM_SIZE: usize = SUBKEY_SIZE * 2;

type Blake2bMac256 = Blake2bMac<U32>;

/// Two 32-byte subkeys derived from one master key.
///
/// Which half is the encryption key is a per-scheme decision.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct SubkeyPair {
    first: [u8; SUBKEY_SIZE],
    second: [u8; SUBKEY_SIZE],
}

impl SubkeyPair {
    /// Keyed BLAKE2b-512 of `label` under `master_key`.
    pub(crate) fn derive_blake2b(label: &[u8], master_key: &[u8; SUBKEY_SIZE]) -> Self {
        let Ok(mut mac) = <Blake2bMac512 as KeyInit>::new_from_slice(master_key) else {
            unreachable!("BLAKE2b accepts keys up to 64 bytes");
        };
        mac.update(label);

        let mut okm = Zeroizing::new([0u8; OKM_SIZE]);
        mac.finalize_into(GenericArray::from_mut_slice(&mut okm[..]));
        Self::split(&okm)
    }

    /// HKDF-SHA256 expand with `master_key` used directly as the PRK.
    ///
    /// There is no extract step.
    pub(crate) fn expand_hkdf_sha256(info: &[u8], master_key: &[u8; SUBKEY_SIZE]) -> Self {
        let Ok(hkdf) = Hkdf::<Sha256>::from_prk(master_key) else {
            unreachable!("32-byte PRK matches the SHA-256 output length");
        };

        let mut okm = Zeroizing::new([0u8; OKM_SIZE]);
        let Ok(()) = hkdf.expand(info, &mut okm[..]) else {
            unreachable!("64 bytes is a valid HKDF-SHA256 output length");
        };
        Self::split(&okm)
    }

    /// Leading 32 bytes of the keying material.
    pub(crate) fn first(&self) -> &[u8; SUBKEY_SIZE] {
        &self.first
    }

    /// Trailing 32 bytes of the keying material.
    pub(crate) fn second(&self) -> &[u8; SUBKEY_SIZE] {
        &self.second
    }

    fn split(okm: &[u8; OKM_SIZE]) -> Self {
        let mut pair = Self { first: [0u8; SUBKEY_SIZE], second: [0u8; SUBKEY_SIZE] };
        let (first, second) = okm.split_at(SUBKEY_SIZE);
        pair.first.copy_from_slice(first);
        pair.second.copy_from_slice(second);
        pair
    }
}

/// Keyed BLAKE2b-256 of `message`, zeroized on drop.
pub(crate) fn keyed_hash_256(
    message: &[u8],
    key: &[u8; SUBKEY_SIZE],
) -> Zeroizing<[u8; HASH_SIZE]> {
    let Ok(mut mac) = <Blake2bMac256 as KeyInit>::new_from_slice(key) else {
        unreachable!("BLAKE2b accepts keys up to 64 bytes");
    };
    mac.update(message);

    let mut out = Zeroizing::new([0u8; HASH_SIZE]);
    mac.finalize_into(GenericArray::from_mut_slice(&mut out[..]));
    out
}
