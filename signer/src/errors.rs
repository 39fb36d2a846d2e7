//! Error types for transaction signing.
//!
//! Validation failures are raised before any hashing or signing runs. Provider
//! failures are carried unchanged as the error source.

use curve::CurveError;
use schnorr::SchnorrError;
use thiserror::Error;

use crate::providers::ProviderError;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid private key: {0}")]
    PrivateKey(#[source] SchnorrError),

    #[error("account index mismatch: signer is {expected}, request has {actual}")]
    AccountMismatch { expected: i64, actual: i64 },

    #[error("api key index mismatch: signer is {expected}, request has {actual}")]
    ApiKeyMismatch { expected: u8, actual: u8 },

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

#[derive(Error, Debug)]
pub enum SignerError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("arithmetic failure: {0}")]
    Arithmetic(#[from] CurveError),

    #[error("signature error: {0}")]
    Schnorr(SchnorrError),

    #[error("nonce provider failed: {0}")]
    NonceProvider(#[source] ProviderError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<SchnorrError> for SignerError {
    fn from(err: SchnorrError) -> Self {
        match err {
            SchnorrError::Curve(inner) => SignerError::Arithmetic(inner),
            other => SignerError::Schnorr(other),
        }
    }
}

/// Result type alias using SignerError
pub type Result<T> = std::result::Result<T, SignerError>;
