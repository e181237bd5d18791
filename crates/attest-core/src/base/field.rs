//! Text boundary for field elements.
//!
//! Members and proof fields arrive as decimal strings (the form emitted by
//! JavaScript `BigInt::toString`) or `0x`-prefixed hex. Every value is parsed
//! into the canonical field representation here; values at or above the field
//! modulus are rejected instead of being reduced.
//!
//! The conversions assume a little-endian `PrimeField::Repr`, which is what the
//! Pasta fields use.

use ff::PrimeField;
use num_bigint::BigUint;
use thiserror::Error;

/// Errors raised when converting text into a field element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldElementError {
    /// The input was empty after trimming.
    #[error("Field element must not be empty")]
    Empty,

    /// The input contains characters that are not digits of its radix.
    #[error("Invalid field element digits: {0:?}")]
    InvalidDigits(String),

    /// The integer does not fit below the field modulus.
    #[error("Value {0} is not a canonical field element (must be below the field modulus)")]
    OutOfField(String),

    /// A path index was neither 0 nor 1.
    #[error("Path index must be 0 or 1, got {0}")]
    InvalidPathIndex(u8),
}

/// Parse a decimal or `0x`-prefixed hex integer into a canonical field element.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns an error if the input is empty, contains non-digit characters, or is
/// not below the field modulus.
pub fn parse_field_element<F: PrimeField>(text: &str) -> Result<F, FieldElementError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FieldElementError::Empty);
    }

    let (digits, radix) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .map_or((trimmed, 10_u32), |hex| (hex, 16_u32));

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(FieldElementError::InvalidDigits(trimmed.to_owned()));
    }

    let value = BigUint::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| FieldElementError::InvalidDigits(trimmed.to_owned()))?;

    from_biguint(&value).ok_or_else(|| FieldElementError::OutOfField(value.to_string()))
}

/// Format a field element as its canonical decimal string.
#[must_use]
pub fn format_field_element<F: PrimeField>(value: &F) -> String {
    BigUint::from_bytes_le(value.to_repr().as_ref()).to_string()
}

/// Format a field element as `0x` followed by big-endian hex digits.
#[must_use]
pub fn field_element_to_hex<F: PrimeField>(value: &F) -> String {
    let mut bytes = value.to_repr().as_ref().to_vec();
    bytes.reverse();
    format!("0x{}", hex::encode(bytes))
}

fn from_biguint<F: PrimeField>(value: &BigUint) -> Option<F> {
    let bytes = value.to_bytes_le();
    let mut repr = F::Repr::default();
    repr.as_mut().get_mut(..bytes.len())?.copy_from_slice(&bytes);
    Option::<F>::from(F::from_repr(repr))
}
