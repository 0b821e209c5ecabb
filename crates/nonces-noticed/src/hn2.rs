//! HN2: AES-256-GCM with an AES-masked first block
//!
//! After a normal AES-256-GCM encryption, the first 16 bytes of the output
//! (`nonce || first 4 ciphertext bytes`) are replaced by their AES-256
//! encryption under `prfKey`. One block cipher call per direction hides the
//! nonce.
//!
//! ```text
//! [ AES(prfKey, nonce || c[..4]) (16) ][ c[4..] ][ GCM tag (16) ]
//! ```
//!
//! When the plaintext is shorter than 4 bytes the masked block borrows
//! leading tag bytes instead; decryption splices them back byte for byte.

use aes::{
    Aes256, Block,
    cipher::{BlockDecrypt, BlockEncrypt},
};
use aes_gcm::{
    Aes256Gcm, Nonce, Tag,
    aead::{AeadInPlace, KeyInit},
};
use zeroize::{Zeroize, Zeroizing};

use crate::{error::SchemeError, scheme::Scheme, subkeys::SubkeyPair, validation};

/// AES-256 key size (32 bytes)
pub const KEY_SIZE: usize = 32;

/// AES-GCM nonce size (12 bytes)
pub const NONCE_SIZE: usize = 12;

/// AES-GCM tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// AES block size (16 bytes)
const BLOCK_SIZE: usize = 16;

/// Largest plaintext AES-GCM accepts (2^36 - 32 bytes)
const MAX_PLAINTEXT_SIZE: u64 = (1 << 36) - 32;

const INFO: &[u8] = b"HN2[AES-GCM,32,AES,SplitFirst]";

const _: () = assert!(BLOCK_SIZE >= NONCE_SIZE);
const _: () = assert!(NONCE_SIZE + TAG_SIZE >= BLOCK_SIZE);

/// Encrypt with HN2.
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
    check_plaintext_limit(plaintext.len())?;

    let subkeys = SubkeyPair::expand_hkdf_sha256(INFO, key);
    let (enc_key, prf_key) = (subkeys.first(), subkeys.second());

    let (body, tag) = ciphertext.split_at_mut(NONCE_SIZE + plaintext.len());
    let inner = &mut body[NONCE_SIZE..];
    inner.copy_from_slice(plaintext);

    let cipher = Aes256Gcm::new(enc_key.into());
    let Ok(gcm_tag) =
        cipher.encrypt_in_place_detached(Nonce::from_slice(nonce), associated_data, inner)
    else {
        unreachable!("plaintext length checked against the AES-GCM limit");
    };
    tag.copy_from_slice(&gcm_tag);

    let mut block = Zeroizing::new([0u8; BLOCK_SIZE]);
    block[..NONCE_SIZE].copy_from_slice(nonce);
    block[NONCE_SIZE..].copy_from_slice(&ciphertext[NONCE_SIZE..BLOCK_SIZE]);

    Aes256::new(prf_key.into()).encrypt_block(Block::from_mut_slice(&mut block[..]));
    ciphertext[..BLOCK_SIZE].copy_from_slice(&block[..]);

    Ok(())
}

/// Decrypt with HN2.
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
    check_plaintext_limit(plaintext.len())?;
    let key = validation::array::<KEY_SIZE>("key", key)?;

    let subkeys = SubkeyPair::expand_hkdf_sha256(INFO, key);
    let (enc_key, prf_key) = (subkeys.first(), subkeys.second());

    // Unmask the first block in a copy so the tail can be spliced back on
    let mut full = Zeroizing::new(ciphertext.to_vec());
    Aes256::new(prf_key.into()).decrypt_block(Block::from_mut_slice(&mut full[..BLOCK_SIZE]));

    let (nonce, rest) = full.split_at(NONCE_SIZE);
    let (inner, tag) = rest.split_at(plaintext.len());

    plaintext.copy_from_slice(inner);
    let cipher = Aes256Gcm::new(enc_key.into());
    let result = cipher.decrypt_in_place_detached(
        Nonce::from_slice(nonce),
        associated_data,
        plaintext,
        Tag::from_slice(tag),
    );
    if result.is_err() {
        plaintext.zeroize();
        return Err(SchemeError::AuthenticationFailed);
    }

    Ok(())
}

/// Reject messages AES-GCM cannot process in either direction.
fn check_plaintext_limit(len: usize) -> Result<(), SchemeError> {
    let max = usize::try_from(MAX_PLAINTEXT_SIZE).unwrap_or(usize::MAX);
    validation::at_most("plaintext", len, max)
}

/// HN2 as a [`Scheme`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Hn2;

impl Scheme for Hn2 {
    const NAME: &'static str = "HN2";
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

#[cfg(test)]
mod tests {
    use aes_gcm::aead::Aead;

    use super::*;
    use crate::{error::LengthRequirement, scheme::SchemeId, test_support::vector};

    #[test]
    fn encrypt_matches_known_answer() {
        let v = vector(SchemeId::Hn2);
        let mut ciphertext = vec![0u8; v.ciphertext.len()];

        encrypt(&mut ciphertext, &v.plaintext, &v.nonce, &v.key, &v.associated_data).unwrap();

        assert_eq!(ciphertext, v.ciphertext);
    }

    #[test]
    fn decrypt_matches_known_answer() {
        let v = vector(SchemeId::Hn2);
        let mut plaintext = vec![0u8; v.plaintext.len()];

        decrypt(&mut plaintext, &v.ciphertext, &v.key, &v.associated_data).unwrap();

        assert_eq!(plaintext, v.plaintext);
    }

    #[test]
    fn tampered_inputs_fail_and_leave_zeros() {
        let v = vector(SchemeId::Hn2);
        let mut plaintext = vec![0u8; v.plaintext.len()];
        let mut inputs = [v.ciphertext, v.key, v.associated_data];

        for i in 0..inputs.len() {
            inputs[i][0] = inputs[i][0].wrapping_add(1);
            let result = decrypt(&mut plaintext, &inputs[0], &inputs[1], &inputs[2]);
            assert_eq!(result, Err(SchemeError::AuthenticationFailed));
            inputs[i][0] = inputs[i][0].wrapping_sub(1);
        }

        assert!(plaintext.iter().all(|&b| b == 0));
    }

    #[test]
    fn only_first_block_differs_from_plain_gcm() {
        let v = vector(SchemeId::Hn2);
        let mut ciphertext = vec![0u8; v.ciphertext.len()];
        encrypt(&mut ciphertext, &v.plaintext, &v.nonce, &v.key, &v.associated_data).unwrap();

        let key: &[u8; KEY_SIZE] = v.key.as_slice().try_into().unwrap();
        let subkeys = SubkeyPair::expand_hkdf_sha256(INFO, key);
        let gcm = Aes256Gcm::new(subkeys.first().into())
            .encrypt(
                Nonce::from_slice(&v.nonce),
                aes_gcm::aead::Payload { msg: &v.plaintext, aad: &v.associated_data },
            )
            .unwrap();

        assert_eq!(&ciphertext[BLOCK_SIZE..], &gcm[BLOCK_SIZE - NONCE_SIZE..]);
        assert_ne!(&ciphertext[..NONCE_SIZE], v.nonce.as_slice());
    }

    #[test]
    fn short_plaintexts_borrow_tag_bytes() {
        let key = [0x5Au8; KEY_SIZE];
        let nonce = [0xA5u8; NONCE_SIZE];

        for len in 0..=(BLOCK_SIZE - NONCE_SIZE + 1) {
            let message = vec![0x33u8; len];
            let mut ciphertext = vec![0u8; len + NONCE_SIZE + TAG_SIZE];
            encrypt(&mut ciphertext, &message, &nonce, &key, b"ad").unwrap();

            let mut plaintext = vec![0u8; len];
            decrypt(&mut plaintext, &ciphertext, &key, b"ad").unwrap();
            assert_eq!(plaintext, message, "length {len}");
        }
    }

    #[test]
    fn plaintext_limit_applies_to_both_directions() {
        let Ok(max) = usize::try_from(MAX_PLAINTEXT_SIZE) else {
            return;
        };

        assert!(check_plaintext_limit(max).is_ok());
        assert_eq!(
            check_plaintext_limit(max + 1),
            Err(SchemeError::InvalidLength {
                parameter: "plaintext",
                expected: LengthRequirement::AtMost(max),
                actual: max + 1,
            })
        );
    }

    #[test]
    fn encrypt_rejects_bad_lengths() {
        let cases = [
            // (ciphertext, plaintext, nonce, key)
            (NONCE_SIZE + TAG_SIZE, 1, NONCE_SIZE, KEY_SIZE),
            (NONCE_SIZE + TAG_SIZE, 0, NONCE_SIZE + 1, KEY_SIZE),
            (NONCE_SIZE + TAG_SIZE, 0, NONCE_SIZE - 1, KEY_SIZE),
            (NONCE_SIZE + TAG_SIZE, 0, NONCE_SIZE, KEY_SIZE + 1),
            (NONCE_SIZE + TAG_SIZE, 0, NONCE_SIZE, KEY_SIZE - 1),
        ];

        for (c, p, n, k) in cases {
            let mut ciphertext = vec![0u8; c];
            let result = encrypt(&mut ciphertext, &vec![0u8; p], &vec![0u8; n], &vec![0u8; k], &[]);
            assert!(matches!(result, Err(SchemeError::InvalidLength { .. })), "{c} {p} {n} {k}");
            assert!(ciphertext.iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn decrypt_rejects_bad_lengths() {
        let cases = [
            // (plaintext, ciphertext, key)
            (1, NONCE_SIZE + TAG_SIZE, KEY_SIZE),
            (0, NONCE_SIZE + TAG_SIZE, KEY_SIZE + 1),
            (0, NONCE_SIZE + TAG_SIZE, KEY_SIZE - 1),
            (0, NONCE_SIZE + TAG_SIZE - 1, KEY_SIZE),
        ];

        for (p, c, k) in cases {
            let result = decrypt(&mut vec![0u8; p], &vec![0u8; c], &vec![0u8; k], &[]);
            assert!(matches!(result, Err(SchemeError::InvalidLength { .. })), "{p} {c} {k}");
        }
    }
}
