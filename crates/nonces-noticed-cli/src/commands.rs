//! Command implementations
//!
//! Each command takes hex strings and returns hex output, so the binary only
//! parses arguments and prints.

use nonces_noticed::{SchemeError, SchemeId, known_answer};
use zeroize::Zeroizing;

use crate::error::CliError;

/// Outcome of a passing self-test for one scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfTestReport {
    /// Scheme that was tested
    pub scheme: SchemeId,
    /// Size of the known-answer ciphertext in bytes
    pub ciphertext_len: usize,
}

/// Encrypt a hex plaintext and return the hex ciphertext.
pub fn encrypt(
    scheme: SchemeId,
    key: &str,
    nonce: &str,
    associated_data: &str,
    plaintext: &str,
) -> Result<String, CliError> {
    let key = decode("key", key)?;
    let nonce = decode("nonce", nonce)?;
    let associated_data = decode("ad", associated_data)?;
    let plaintext = decode("plaintext", plaintext)?;

    let ciphertext = scheme
        .seal(&plaintext, &nonce, &key, &associated_data)
        .map_err(|source| CliError::Scheme { scheme, source })?;

    tracing::debug!(%scheme, plaintext_len = plaintext.len(), "encrypted");
    Ok(hex::encode(ciphertext))
}

/// Decrypt a hex ciphertext and return the hex plaintext.
pub fn decrypt(
    scheme: SchemeId,
    key: &str,
    associated_data: &str,
    ciphertext: &str,
) -> Result<Zeroizing<String>, CliError> {
    let key = decode("key", key)?;
    let associated_data = decode("ad", associated_data)?;
    let ciphertext = decode("ciphertext", ciphertext)?;

    let plaintext = scheme
        .open(&ciphertext, &key, &associated_data)
        .map_err(|source| CliError::Scheme { scheme, source })?;

    tracing::debug!(%scheme, plaintext_len = plaintext.len(), "decrypted");
    Ok(Zeroizing::new(hex::encode(&plaintext[..])))
}

/// Run the known-answer and tamper checks for each scheme in `schemes`.
///
/// Stops at the first failing scheme.
pub fn self_test(schemes: &[SchemeId]) -> Result<Vec<SelfTestReport>, CliError> {
    schemes.iter().map(|&scheme| self_test_one(scheme)).collect()
}

fn self_test_one(scheme: SchemeId) -> Result<SelfTestReport, CliError> {
    let vector = known_answer(scheme);

    let ciphertext =
        encrypt(scheme, vector.key, vector.nonce, vector.associated_data, vector.plaintext)?;
    if ciphertext != vector.ciphertext {
        return Err(CliError::KnownAnswerMismatch { scheme, check: "encrypt" });
    }

    let plaintext = decrypt(scheme, vector.key, vector.associated_data, vector.ciphertext)?;
    if plaintext.as_str() != vector.plaintext {
        return Err(CliError::KnownAnswerMismatch { scheme, check: "decrypt" });
    }

    let mut tampered = decode("ciphertext", vector.ciphertext)?;
    if let Some(last) = tampered.last_mut() {
        *last ^= 0x01;
    }
    let key = decode("key", vector.key)?;
    let associated_data = decode("ad", vector.associated_data)?;
    match scheme.open(&tampered, &key, &associated_data) {
        Err(SchemeError::AuthenticationFailed) => {},
        Ok(_) => return Err(CliError::TamperAccepted { scheme }),
        Err(source) => return Err(CliError::Scheme { scheme, source }),
    }

    tracing::info!(%scheme, "self-test passed");
    Ok(SelfTestReport { scheme, ciphertext_len: tampered.len() })
}

fn decode(field: &'static str, value: &str) -> Result<Zeroizing<Vec<u8>>, CliError> {
    hex::decode(value.trim())
        .map(Zeroizing::new)
        .map_err(|source| CliError::InvalidHex { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_reproduces_known_answers() {
        for scheme in SchemeId::ALL {
            let v = known_answer(scheme);
            let ciphertext =
                encrypt(scheme, v.key, v.nonce, v.associated_data, v.plaintext).unwrap();
            assert_eq!(ciphertext, v.ciphertext, "{scheme}");
        }
    }

    #[test]
    fn decrypt_round_trips_encrypt() {
        let key = "42".repeat(32);
        let nonce = "24".repeat(SchemeId::Hn4.nonce_size());

        let ciphertext = encrypt(SchemeId::Hn4, &key, &nonce, "cafe", "68656c6c6f").unwrap();
        let plaintext = decrypt(SchemeId::Hn4, &key, "cafe", &ciphertext).unwrap();

        assert_eq!(plaintext.as_str(), "68656c6c6f");
    }

    #[test]
    fn empty_associated_data_is_allowed() {
        let key = "01".repeat(32);
        let nonce = "02".repeat(SchemeId::Hn2.nonce_size());

        let ciphertext = encrypt(SchemeId::Hn2, &key, &nonce, "", "").unwrap();

        assert_eq!(ciphertext.len(), 2 * SchemeId::Hn2.overhead());
    }

    #[test]
    fn wrong_associated_data_fails_authentication() {
        let v = known_answer(SchemeId::Hn1);
        let result = decrypt(SchemeId::Hn1, v.key, "00", v.ciphertext);

        assert!(matches!(
            result,
            Err(CliError::Scheme { source: SchemeError::AuthenticationFailed, .. })
        ));
    }

    #[test]
    fn bad_hex_names_the_field() {
        let result = encrypt(SchemeId::Hn1, "not hex", "", "", "");

        assert!(matches!(result, Err(CliError::InvalidHex { field: "key", .. })));
    }

    #[test]
    fn short_key_is_a_scheme_error() {
        let nonce = "00".repeat(SchemeId::Hn3.nonce_size());
        let result = encrypt(SchemeId::Hn3, "0011", &nonce, "", "");

        let Err(CliError::Scheme { source, .. }) = &result else {
            panic!("expected a scheme error, got {result:?}");
        };
        assert!(matches!(source, SchemeError::InvalidLength { parameter: "key", .. }));
    }

    #[test]
    fn self_test_passes_for_all_schemes() {
        let reports = self_test(&SchemeId::ALL).unwrap();

        assert_eq!(reports.len(), SchemeId::ALL.len());
        for (report, scheme) in reports.iter().zip(SchemeId::ALL) {
            assert_eq!(report.scheme, scheme);
            assert_eq!(report.ciphertext_len, known_answer(scheme).ciphertext.len() / 2);
        }
    }
}
