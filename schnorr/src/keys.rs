//! Signing and verifying keys for the Schnorr signature scheme.

use core::fmt;

use curve::{Affine, BaseField, Group, RandomField, ScalarField};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{PK_SIZE, SK_SIZE};
use crate::errors::SchnorrError;
use crate::signatures::{hash_challenge, Signature};

/// A secret signing key for creating Schnorr signatures.
///
/// The signing key is a scalar modulo the group order of the Fp5 curve.
/// It must be kept secret and protected from unauthorized access; its `Debug`
/// output is redacted.
///
/// # Example
///
/// ```
/// use schnorr::SigningKey;
///
/// let mut rng = rand::rng();
/// let signing_key = SigningKey::random(&mut rng);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKey {
    scalar: ScalarField,
}

/// A public verifying key for verifying Schnorr signatures.
///
/// The verifying key is the point `sk * G` on the curve. On the wire it is the
/// 40-byte encoding of that point. Serde goes through the same encoding and
/// rejects elements that do not decode to a finite curve point.
///
/// # Example
///
/// ```
/// use schnorr::SigningKey;
///
/// let mut rng = rand::rng();
/// let signing_key = SigningKey::random(&mut rng);
/// let verifying_key = signing_key.verifying_key();
/// assert_eq!(verifying_key.to_bytes().len(), 40);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BaseField", into = "BaseField")]
pub struct VerifyingKey {
    point: Affine,
}

impl SigningKey {
    /// Generates a random signing key using the provided random number generator.
    ///
    /// # Arguments
    ///
    /// * `rng` - A cryptographically secure random number generator
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            scalar: ScalarField::random(rng),
        }
    }

    /// Wraps an existing scalar.
    pub fn from_scalar(scalar: ScalarField) -> Self {
        Self { scalar }
    }

    /// Reads a key from exactly 40 little-endian bytes, reducing modulo the
    /// group order.
    ///
    /// # Errors
    ///
    /// Returns [`SchnorrError::InvalidKeyLength`] for any other length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        if bytes.len() != SK_SIZE {
            return Err(SchnorrError::InvalidKeyLength {
                expected: SK_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            scalar: ScalarField::from_bytes_le_reduced(bytes),
        })
    }

    /// Reads a key from hex, with or without a `0x` prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use schnorr::SigningKey;
    ///
    /// let key = SigningKey::from_hex(&format!("0x{}", "11".repeat(40))).unwrap();
    /// assert!(SigningKey::from_hex("abcd").is_err());
    /// # let _ = key;
    /// ```
    pub fn from_hex(hex_str: &str) -> Result<Self, SchnorrError> {
        let trimmed = hex_str.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> [u8; SK_SIZE] {
        self.scalar.to_bytes_le()
    }

    /// Derives the public verifying key from this signing key.
    ///
    /// The verifying key is computed as `sk * G` where `G` is the generator
    /// of the curve and `sk` is the secret scalar.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            point: <Affine as Group>::mul_generator(&self.scalar),
        }
    }

    /// Signs a message hash with a freshly sampled nonce.
    ///
    /// # Arguments
    ///
    /// * `rng` - A cryptographically secure random number generator for the nonce
    /// * `msg` - The message hash, an Fp5 element (usually a Poseidon2 digest)
    ///
    /// # Example
    ///
    /// ```
    /// use curve::{BaseField, Goldilocks};
    /// use schnorr::{hash_to_quintic_extension, SigningKey};
    ///
    /// let mut rng = rand::rng();
    /// let signing_key = SigningKey::random(&mut rng);
    /// let message = hash_to_quintic_extension(&[Goldilocks::new(1), Goldilocks::new(2)]);
    /// let signature = signing_key.sign(&mut rng, &message).expect("signing failed");
    /// assert!(signing_key.verifying_key().verify(&message, &signature).unwrap());
    /// ```
    pub fn sign<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        msg: &BaseField,
    ) -> Result<Signature, SchnorrError> {
        let nonce = ScalarField::random(rng);
        self.sign_with_nonce(msg, &nonce)
    }

    /// Signs a message hash with a caller-provided nonce `k`.
    ///
    /// The signature is computed as:
    /// 1. `R = encode(k * G)`
    /// 2. `e = H(R || msg)` using Poseidon2, reduced to a scalar
    /// 3. `s = k - e * sk`
    ///
    /// A nonce must never be reused across messages: two signatures with the
    /// same `k` reveal the key.
    ///
    /// # Errors
    ///
    /// Returns [`SchnorrError::InvalidPoint`] for a zero nonce.
    pub fn sign_with_nonce(
        &self,
        msg: &BaseField,
        nonce: &ScalarField,
    ) -> Result<Signature, SchnorrError> {
        if nonce.is_zero() {
            return Err(SchnorrError::InvalidPoint);
        }

        let r = <Affine as Group>::mul_generator(nonce).encode();
        let e = hash_challenge(&r, msg);
        let s = *nonce - e * self.scalar;

        Ok(Signature { s, e })
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

impl VerifyingKey {
    /// The underlying curve point.
    pub fn point(&self) -> Affine {
        self.point
    }

    /// The single-element encoding of the key.
    pub fn encoded(&self) -> BaseField {
        self.point.encode()
    }

    pub fn to_bytes(&self) -> [u8; PK_SIZE] {
        self.point.to_bytes_le()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn to_prefixed_hex(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Decodes a 40-byte encoded key.
    ///
    /// # Errors
    ///
    /// Fails when the bytes are not a canonical field element, do not encode a
    /// curve point, or encode the point at infinity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        Self::from_encoded(&BaseField::from_bytes_le(bytes)?)
    }

    /// Decodes a key from its single-element encoding.
    pub fn from_encoded(w: &BaseField) -> Result<Self, SchnorrError> {
        let point = Affine::decode(w)?;
        if point.is_infinity() {
            return Err(SchnorrError::InvalidPoint);
        }
        Ok(Self { point })
    }

    /// Verifies a signature on a message hash.
    ///
    /// Recomputes `R' = encode(s * G + e * pk)` and accepts when
    /// `H(R' || msg)` equals `e`.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the signature is valid
    /// - `Ok(false)` if the signature is invalid
    /// - `Err(SchnorrError::InvalidPoint)` if the verifying key is the point at infinity
    pub fn verify(&self, msg: &BaseField, sig: &Signature) -> Result<bool, SchnorrError> {
        if self.point.is_infinity() {
            return Err(SchnorrError::InvalidPoint);
        }

        let commitment = <Affine as Group>::mul_generator(&sig.s) + self.point * sig.e;
        let e = hash_challenge(&commitment.encode(), msg);

        Ok(e == sig.e)
    }
}

impl TryFrom<BaseField> for VerifyingKey {
    type Error = SchnorrError;

    fn try_from(w: BaseField) -> Result<Self, Self::Error> {
        Self::from_encoded(&w)
    }
}

impl From<VerifyingKey> for BaseField {
    fn from(key: VerifyingKey) -> Self {
        key.encoded()
    }
}

impl From<&SigningKey> for VerifyingKey {
    /// Converts a reference to a signing key into a verifying key.
    ///
    /// This is equivalent to calling `signing_key.verifying_key()`.
    fn from(sk: &SigningKey) -> Self {
        sk.verifying_key()
    }
}
