//! Error type shared by the field, scalar and curve arithmetic.

use thiserror::Error;

/// Failures raised by field arithmetic, decoding and point decompression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A multiplicative inverse was requested for zero.
    #[error("inverse of zero requested")]
    InverseOfZero,

    /// The divisor of a checked division was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The value is not a quadratic residue.
    #[error("no square root exists for the given value")]
    NoSquareRoot,

    /// A decoded integer was not below the modulus.
    #[error("value is not canonical for the {0} modulus")]
    NonCanonical(&'static str),

    /// A byte encoding had the wrong size.
    #[error("invalid encoding length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A decimal or hexadecimal string could not be parsed.
    #[error("invalid digits: {0}")]
    InvalidDigits(String),

    /// The field element is not the encoding of any curve point.
    #[error("field element does not encode a curve point")]
    InvalidEncoding,
}
