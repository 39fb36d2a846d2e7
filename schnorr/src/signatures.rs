//! Signature types and challenge hashing for the Schnorr signature scheme.

use curve::{BaseField, Goldilocks, ScalarField, SCALAR_BYTES};
use serde::{Deserialize, Serialize};

use crate::constants::SIG_SIZE;
use crate::errors::SchnorrError;
use crate::poseidon2::hash_to_quintic_extension;

/// A Schnorr signature consisting of a response and a challenge scalar.
///
/// The signature is a pair `(s, e)` where:
/// - `s = k - e * sk` is the response for the signing nonce `k`
/// - `e = H(encode(k * G) || msg)` is the Fiat-Shamir challenge
///
/// # Structure
///
/// Since `s * G + e * pk = k * G`, a verifier recomputes the commitment from
/// `(s, e)` and checks that it hashes back to `e`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// The response scalar s = k - e * sk
    pub s: ScalarField,
    /// The challenge scalar e
    pub e: ScalarField,
}

impl Signature {
    /// Wire encoding: `s` then `e`, 40 little-endian bytes each.
    pub fn to_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        out[..SCALAR_BYTES].copy_from_slice(&self.s.to_bytes_le());
        out[SCALAR_BYTES..].copy_from_slice(&self.e.to_bytes_le());
        out
    }

    /// Parses the 80-byte wire encoding. Both halves must be canonical scalars.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        if bytes.len() != SIG_SIZE {
            return Err(SchnorrError::InvalidSignatureLength {
                expected: SIG_SIZE,
                actual: bytes.len(),
            });
        }
        let (s, e) = bytes.split_at(SCALAR_BYTES);
        Ok(Self {
            s: ScalarField::from_bytes_le(s)?,
            e: ScalarField::from_bytes_le(e)?,
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// Computes the Fiat-Shamir challenge `e = H(R || msg)`.
///
/// The ten Goldilocks coefficients of the encoded commitment and the message
/// hash are absorbed by the Poseidon2 sponge; the five squeezed elements are
/// read as a 320-bit little-endian integer and reduced modulo the group order.
pub(crate) fn hash_challenge(r: &BaseField, msg: &BaseField) -> ScalarField {
    let mut preimage = [Goldilocks::ZERO; 10];
    preimage[..5].copy_from_slice(r.coeffs());
    preimage[5..].copy_from_slice(msg.coeffs());

    ScalarField::from_fp5(&hash_to_quintic_extension(&preimage))
}
