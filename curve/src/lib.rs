//! Elliptic curve group over the Goldilocks degree-5 extension field.
//!
//! This crate provides the Goldilocks prime field, its quintic extension, the
//! scalar field of the curve, affine curve points with the single-element
//! point encoding, and helpers for random sampling. The curve parameters and
//! generator are fixed to the values in the `affine` module.

mod affine;
mod basefield;
mod errors;
mod goldilocks;
mod group;
mod random;
mod scalarfield;

pub use affine::Affine;
pub use basefield::{BaseField, BASE_FIELD_BYTES};
pub use errors::CurveError;
pub use goldilocks::Goldilocks;
pub use group::{Group, ScalarBits};
pub use random::RandomField;
pub use scalarfield::{ScalarField, SCALAR_BYTES};
