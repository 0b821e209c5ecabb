//! Common interface over the four constructions
//!
//! Each scheme is a zero-sized type; all state is in the caller's buffers.
//! [`SchemeId`] selects one at runtime.

use std::{fmt, str::FromStr};

use thiserror::Error;
use zeroize::Zeroizing;

use crate::{
    error::SchemeError,
    hn1::Hn1,
    hn2::Hn2,
    hn3::Hn3,
    hn4::Hn4,
    validation,
};

/// A nonce-misuse-mitigating AEAD composition.
///
/// Ciphertexts are always `prefix || body`, exactly
/// `NONCE_SIZE + TAG_SIZE` bytes longer than the plaintext.
pub trait Scheme {
    /// Short scheme name (`HN1` .. `HN4`)
    const NAME: &'static str;
    /// Master key size in bytes
    const KEY_SIZE: usize;
    /// Caller nonce size in bytes
    const NONCE_SIZE: usize;
    /// Authentication tag size in bytes
    const TAG_SIZE: usize;

    /// Encrypt `plaintext` into `ciphertext`.
    ///
    /// `ciphertext` must be exactly `plaintext.len() + NONCE_SIZE + TAG_SIZE`
    /// bytes, `nonce` exactly `NONCE_SIZE` and `key` exactly `KEY_SIZE`.
    fn encrypt(
        ciphertext: &mut [u8],
        plaintext: &[u8],
        nonce: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<(), SchemeError>;

    /// Decrypt and verify `ciphertext` into `plaintext`.
    ///
    /// On [`SchemeError::AuthenticationFailed`] the plaintext buffer is left
    /// all zero.
    fn decrypt(
        plaintext: &mut [u8],
        ciphertext: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<(), SchemeError>;

    /// Ciphertext length for a plaintext of `plaintext_len` bytes.
    fn ciphertext_len(plaintext_len: usize) -> usize {
        plaintext_len + Self::NONCE_SIZE + Self::TAG_SIZE
    }

    /// Plaintext length for a ciphertext, or `None` if it is too short.
    fn plaintext_len(ciphertext_len: usize) -> Option<usize> {
        ciphertext_len.checked_sub(Self::NONCE_SIZE + Self::TAG_SIZE)
    }

    /// Encrypt into a freshly allocated buffer.
    fn seal(
        plaintext: &[u8],
        nonce: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>, SchemeError> {
        let mut ciphertext = vec![0u8; Self::ciphertext_len(plaintext.len())];
        Self::encrypt(&mut ciphertext, plaintext, nonce, key, associated_data)?;
        Ok(ciphertext)
    }

    /// Decrypt into a freshly allocated buffer that is zeroized on drop.
    fn open(
        ciphertext: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, SchemeError> {
        let overhead = Self::NONCE_SIZE + Self::TAG_SIZE;
        validation::at_least("ciphertext", ciphertext.len(), overhead)?;

        let mut plaintext = Zeroizing::new(vec![0u8; ciphertext.len() - overhead]);
        Self::decrypt(&mut plaintext, ciphertext, key, associated_data)?;
        Ok(plaintext)
    }
}

/// Runtime selector for one of the four schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeId {
    /// Tag-masked nonce over AEGIS-256
    Hn1,
    /// AES-masked nonce and ciphertext prefix over AES-256-GCM
    Hn2,
    /// Synthetic nonce over AEGIS-256
    Hn3,
    /// Nonce-bound tag over XChaCha20 and BLAKE2b
    Hn4,
}

impl SchemeId {
    /// Every scheme, in numeric order.
    pub const ALL: [Self; 4] = [Self::Hn1, Self::Hn2, Self::Hn3, Self::Hn4];

    /// Short scheme name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hn1 => Hn1::NAME,
            Self::Hn2 => Hn2::NAME,
            Self::Hn3 => Hn3::NAME,
            Self::Hn4 => Hn4::NAME,
        }
    }

    /// Master key size in bytes.
    pub fn key_size(self) -> usize {
        match self {
            Self::Hn1 => Hn1::KEY_SIZE,
            Self::Hn2 => Hn2::KEY_SIZE,
            Self::Hn3 => Hn3::KEY_SIZE,
            Self::Hn4 => Hn4::KEY_SIZE,
        }
    }

    /// Caller nonce size in bytes.
    pub fn nonce_size(self) -> usize {
        match self {
            Self::Hn1 => Hn1::NONCE_SIZE,
            Self::Hn2 => Hn2::NONCE_SIZE,
            Self::Hn3 => Hn3::NONCE_SIZE,
            Self::Hn4 => Hn4::NONCE_SIZE,
        }
    }

    /// Tag size in bytes.
    pub fn tag_size(self) -> usize {
        match self {
            Self::Hn1 => Hn1::TAG_SIZE,
            Self::Hn2 => Hn2::TAG_SIZE,
            Self::Hn3 => Hn3::TAG_SIZE,
            Self::Hn4 => Hn4::TAG_SIZE,
        }
    }

    /// Bytes added to every plaintext.
    pub fn overhead(self) -> usize {
        self.nonce_size() + self.tag_size()
    }

    /// See [`Scheme::encrypt`].
    pub fn encrypt(
        self,
        ciphertext: &mut [u8],
        plaintext: &[u8],
        nonce: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<(), SchemeError> {
        match self {
            Self::Hn1 => Hn1::encrypt(ciphertext, plaintext, nonce, key, associated_data),
            Self::Hn2 => Hn2::encrypt(ciphertext, plaintext, nonce, key, associated_data),
            Self::Hn3 => Hn3::encrypt(ciphertext, plaintext, nonce, key, associated_data),
            Self::Hn4 => Hn4::encrypt(ciphertext, plaintext, nonce, key, associated_data),
        }
    }

    /// See [`Scheme::decrypt`].
    pub fn decrypt(
        self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<(), SchemeError> {
        match self {
            Self::Hn1 => Hn1::decrypt(plaintext, ciphertext, key, associated_data),
            Self::Hn2 => Hn2::decrypt(plaintext, ciphertext, key, associated_data),
            Self::Hn3 => Hn3::decrypt(plaintext, ciphertext, key, associated_data),
            Self::Hn4 => Hn4::decrypt(plaintext, ciphertext, key, associated_data),
        }
    }

    /// See [`Scheme::seal`].
    pub fn seal(
        self,
        plaintext: &[u8],
        nonce: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>, SchemeError> {
        match self {
            Self::Hn1 => Hn1::seal(plaintext, nonce, key, associated_data),
            Self::Hn2 => Hn2::seal(plaintext, nonce, key, associated_data),
            Self::Hn3 => Hn3::seal(plaintext, nonce, key, associated_data),
            Self::Hn4 => Hn4::seal(plaintext, nonce, key, associated_data),
        }
    }

    /// See [`Scheme::open`].
    pub fn open(
        self,
        ciphertext: &[u8],
        key: &[u8],
        associated_data: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, SchemeError> {
        match self {
            Self::Hn1 => Hn1::open(ciphertext, key, associated_data),
            Self::Hn2 => Hn2::open(ciphertext, key, associated_data),
            Self::Hn3 => Hn3::open(ciphertext, key, associated_data),
            Self::Hn4 => Hn4::open(ciphertext, key, associated_data),
        }
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scheme name that is not one of `hn1` .. `hn4`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scheme: {0}")]
pub struct UnknownScheme(pub String);

impl FromStr for SchemeId {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownScheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_scheme_constants() {
        let sizes = SchemeId::ALL.map(|id| (id.key_size(), id.nonce_size(), id.tag_size()));

        assert_eq!(sizes, [(32, 32, 32), (32, 12, 16), (32, 32, 32), (32, 24, 32)]);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("hn1".parse::<SchemeId>().unwrap(), SchemeId::Hn1);
        assert_eq!("HN4".parse::<SchemeId>().unwrap(), SchemeId::Hn4);
        assert_eq!("Hn2".parse::<SchemeId>().unwrap(), SchemeId::Hn2);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!("hn5".parse::<SchemeId>(), Err(UnknownScheme("hn5".to_string())));
        assert!("".parse::<SchemeId>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for id in SchemeId::ALL {
            assert_eq!(id.to_string().parse::<SchemeId>().unwrap(), id);
        }
    }

    #[test]
    fn seal_open_dispatch() {
        for id in SchemeId::ALL {
            let key = vec![0x11; id.key_size()];
            let nonce = vec![0x22; id.nonce_size()];

            let ciphertext = id.seal(b"dispatch", &nonce, &key, b"ad").unwrap();
            assert_eq!(ciphertext.len(), 8 + id.overhead());

            let plaintext = id.open(&ciphertext, &key, b"ad").unwrap();
            assert_eq!(plaintext.as_slice(), b"dispatch");
        }
    }

    #[test]
    fn open_rejects_short_ciphertext() {
        for id in SchemeId::ALL {
            let key = vec![0u8; id.key_size()];
            let short = vec![0u8; id.overhead() - 1];

            assert!(matches!(
                id.open(&short, &key, &[]),
                Err(SchemeError::InvalidLength { parameter: "ciphertext", .. })
            ));
        }
    }

    #[test]
    fn plaintext_len_inverts_ciphertext_len() {
        assert_eq!(Hn2::plaintext_len(Hn2::ciphertext_len(5)), Some(5));
        assert_eq!(Hn2::plaintext_len(27), None);
    }
}
