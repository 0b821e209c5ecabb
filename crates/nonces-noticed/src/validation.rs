//! Input length checks shared by every scheme.
//!
//! All checks run before any key material is derived.

use crate::error::{LengthRequirement, SchemeError};

/// Fail unless `actual == expected`.
pub(crate) fn exact(
    parameter: &'static str,
    actual: usize,
    expected: usize,
) -> Result<(), SchemeError> {
    if actual != expected {
        return Err(SchemeError::InvalidLength {
            parameter,
            expected: LengthRequirement::Exactly(expected),
            actual,
        });
    }
    Ok(())
}

/// Fail unless `actual >= min`.
pub(crate) fn at_least(
    parameter: &'static str,
    actual: usize,
    min: usize,
) -> Result<(), SchemeError> {
    if actual < min {
        return Err(SchemeError::InvalidLength {
            parameter,
            expected: LengthRequirement::AtLeast(min),
            actual,
        });
    }
    Ok(())
}

/// Fail unless `actual <= max`.
pub(crate) fn at_most(
    parameter: &'static str,
    actual: usize,
    max: usize,
) -> Result<(), SchemeError> {
    if actual > max {
        return Err(SchemeError::InvalidLength {
            parameter,
            expected: LengthRequirement::AtMost(max),
            actual,
        });
    }
    Ok(())
}

/// Borrow `bytes` as a fixed-size array.
pub(crate) fn array<'a, const N: usize>(
    parameter: &'static str,
    bytes: &'a [u8],
) -> Result<&'a [u8; N], SchemeError> {
    <&[u8; N]>::try_from(bytes).map_err(|_| SchemeError::InvalidLength {
        parameter,
        expected: LengthRequirement::Exactly(N),
        actual: bytes.len(),
    })
}
