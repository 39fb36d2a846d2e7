//! Schnorr signature scheme over the Goldilocks Fp5 elliptic curve.
//!
//! This library implements a Schnorr signature scheme using:
//! - The curve y^2 = x^3 + A*x + B over GF(p^5), p = 2^64 - 2^32 + 1
//! - The Poseidon2 sponge over Goldilocks for message hashing and the
//!   Fiat-Shamir challenge
//! - Messages given as Fp5 hashes of Goldilocks element sequences
//!
//! # Overview
//!
//! A signature is the pair `(s, e)` with `e = H(encode(k * G) || msg)` and
//! `s = k - e * sk`. Anyone holding the public key recomputes the commitment
//! as `s * G + e * pk` and checks that it hashes back to `e`.
//!
//! # Example
//!
//! ```
//! use curve::Goldilocks;
//! use schnorr::{hash_to_quintic_extension, Signature, SigningKey, VerifyingKey};
//!
//! // Generate a random signing key
//! let mut rng = rand::rng();
//! let signing_key = SigningKey::random(&mut rng);
//!
//! // Derive the corresponding verifying key
//! let verifying_key = VerifyingKey::from(&signing_key);
//!
//! // Hash a message to an Fp5 element
//! let message = hash_to_quintic_extension(&[
//!     Goldilocks::new(1),
//!     Goldilocks::new(2),
//!     Goldilocks::new(3),
//! ]);
//!
//! // Sign, serialize and verify
//! let signature = signing_key.sign(&mut rng, &message).expect("signing failed");
//! let wire = signature.to_bytes();
//! let parsed = Signature::from_bytes(&wire).expect("80 bytes");
//! assert!(verifying_key.verify(&message, &parsed).expect("verification failed"));
//! ```
//!
//! # Security Considerations
//!
//! - Always use a cryptographically secure random number generator (CSRNG)
//! - Each signature must use a fresh random nonce
//! - Protect the signing key from unauthorized access
//! - Scalar multiplication is a plain double-and-add and is not constant time

mod constants;
mod errors;
mod keys;
pub mod poseidon2;
mod signatures;

#[cfg(test)]
mod tests;

pub use constants::{PK_SIZE, POSEIDON2_RATE, POSEIDON2_WIDTH, SIG_SIZE, SK_SIZE};
pub use errors::SchnorrError;
pub use keys::{SigningKey, VerifyingKey};
pub use poseidon2::{hash_to_field, hash_to_quintic_extension, permute};
pub use signatures::Signature;
