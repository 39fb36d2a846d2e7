//! Error types for the Schnorr signature scheme.

use curve::CurveError;
use thiserror::Error;

/// Errors that can occur during key handling, signing and verification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchnorrError {
    /// A point at infinity was encountered where a valid curve point was expected.
    ///
    /// This error occurs when:
    /// - The verifying key is the point at infinity
    /// - The signing nonce is zero, so the commitment R would be the point at infinity
    #[error("point at infinity where a curve point was expected")]
    InvalidPoint,

    /// A private key did not decode to exactly 40 bytes.
    #[error("invalid private key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// A signature did not decode to exactly 80 bytes.
    #[error("invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Field, scalar or point arithmetic failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}
