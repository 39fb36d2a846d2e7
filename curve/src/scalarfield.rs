//! Scalar field of the curve, i.e. integers modulo the prime group order
//! n = 0x7ffffffd800000077ffffff1000000167fffffe6cfb80639e8885c39d724a09ce80fd996948bffe1
//!
//! This implementation uses Montgomery form for efficient modular arithmetic.
//! The field element is represented as [u64; 5] in little-endian order.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::basefield::BaseField;
use crate::errors::CurveError;
use crate::group::ScalarBits;

/// Size of the little-endian scalar encoding.
pub const SCALAR_BYTES: usize = 40;

/// Scalar field element for the curve
/// Represented in Montgomery form with [u64; 5]
#[derive(Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[u64; 5]", into = "[u64; 5]")]
pub struct ScalarField {
    /// Montgomery form: value * R mod n, where R = 2^320
    limbs: [u64; 5],
}

// Group order n
const MODULUS: [u64; 5] = [
    0xe80fd996948bffe1,
    0xe8885c39d724a09c,
    0x7fffffe6cfb80639,
    0x7ffffff100000016,
    0x7ffffffd80000007,
];

// R = 2^320 mod n
const R: [u64; 5] = [
    0x2fe04cd2d6e8003e,
    0x2eef478c51b6bec6,
    0x00000032608ff38c,
    0x0000001dffffffd3,
    0x00000004fffffff1,
];

// R^2 = 2^640 mod n
const R2: [u64; 5] = [
    0xa01001dce33dc739,
    0x6c3228d33f62accf,
    0xd1d796cc91cf8525,
    0xaadfff5d1574c1d8,
    0x4aca13b28ca251f5,
];

// -n^{-1} mod 2^64
const MU: u64 = 0xd78bef72057b7bdf;

impl ScalarField {
    pub const ZERO: Self = ScalarField { limbs: [0; 5] };

    /// One element (in Montgomery form: R mod n)
    pub const ONE: Self = ScalarField { limbs: R };

    /// The group order as little-endian limbs.
    pub const MODULUS: [u64; 5] = MODULUS;

    /// Create a new scalar from a u64 value
    #[inline]
    pub fn from_canonical_u64(val: u64) -> Self {
        Self::from_canonical_limbs([val, 0, 0, 0, 0])
    }

    /// Converts canonical limbs (already below n) into Montgomery form.
    #[inline]
    fn from_canonical_limbs(limbs: [u64; 5]) -> Self {
        montgomery_mul(ScalarField { limbs }, ScalarField { limbs: R2 })
    }

    /// Strict conversion from little-endian limbs.
    pub fn from_limbs(limbs: [u64; 5]) -> Result<Self, CurveError> {
        if is_canonical(limbs) {
            Ok(Self::from_canonical_limbs(limbs))
        } else {
            Err(CurveError::NonCanonical("scalar"))
        }
    }

    /// Canonical little-endian limbs of the value.
    #[inline]
    pub fn to_canonical_limbs(&self) -> [u64; 5] {
        montgomery_mul(*self, ScalarField { limbs: [1, 0, 0, 0, 0] }).limbs
    }

    /// Reduces an arbitrary non-negative integer modulo n.
    pub fn from_biguint(value: &BigUint) -> Self {
        let reduced = value % modulus_biguint();
        let mut limbs = [0u64; 5];
        for (limb, digit) in limbs.iter_mut().zip(reduced.iter_u64_digits()) {
            *limb = digit;
        }
        Self::from_canonical_limbs(limbs)
    }

    /// Interprets the five coefficients as a 320-bit little-endian integer and
    /// reduces it modulo n.
    pub fn from_fp5(element: &BaseField) -> Self {
        Self::from_bytes_le_reduced(&element.to_bytes_le())
    }

    /// Little-endian bytes of any length, reduced modulo n.
    pub fn from_bytes_le_reduced(bytes: &[u8]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_le(bytes))
    }

    /// Decodes exactly 40 little-endian bytes holding a value below n.
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != SCALAR_BYTES {
            return Err(CurveError::InvalidLength {
                expected: SCALAR_BYTES,
                actual: bytes.len(),
            });
        }

        let mut limbs = [0u64; 5];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(word);
        }
        Self::from_limbs(limbs)
    }

    pub fn to_bytes_le(&self) -> [u8; SCALAR_BYTES] {
        let mut out = [0u8; SCALAR_BYTES];
        for (chunk, limb) in out.chunks_exact_mut(8).zip(self.to_canonical_limbs()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        out
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.to_bytes_le())
    }

    /// Check if this scalar is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0; 5]
    }
}

fn modulus_biguint() -> BigUint {
    let mut bytes = Vec::with_capacity(SCALAR_BYTES);
    for limb in MODULUS {
        bytes.extend_from_slice(&limb.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}

/// Helper: Add two 320-bit numbers mod n
#[inline]
const fn add_mod(a: [u64; 5], b: [u64; 5]) -> [u64; 5] {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);
    let (r4, carry) = carrying_add(a[4], b[4], carry);

    // Subtract modulus if we overflowed or result >= n
    let (s0, borrow) = r0.overflowing_sub(MODULUS[0]);
    let (s1, borrow) = borrowing_sub(r1, MODULUS[1], borrow);
    let (s2, borrow) = borrowing_sub(r2, MODULUS[2], borrow);
    let (s3, borrow) = borrowing_sub(r3, MODULUS[3], borrow);
    let (s4, borrow) = borrowing_sub(r4, MODULUS[4], borrow);

    if carry || !borrow {
        [s0, s1, s2, s3, s4]
    } else {
        [r0, r1, r2, r3, r4]
    }
}

/// Helper: Subtract two 320-bit numbers mod n
#[inline]
const fn sub_mod(a: [u64; 5], b: [u64; 5]) -> [u64; 5] {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);
    let (r4, borrow) = borrowing_sub(a[4], b[4], borrow);

    // Add modulus if we underflowed
    if borrow {
        let (r0, carry) = r0.overflowing_add(MODULUS[0]);
        let (r1, carry) = carrying_add(r1, MODULUS[1], carry);
        let (r2, carry) = carrying_add(r2, MODULUS[2], carry);
        let (r3, carry) = carrying_add(r3, MODULUS[3], carry);
        let (r4, _) = carrying_add(r4, MODULUS[4], carry);
        [r0, r1, r2, r3, r4]
    } else {
        [r0, r1, r2, r3, r4]
    }
}

#[inline]
const fn neg_mod(a: [u64; 5]) -> [u64; 5] {
    if a[0] == 0 && a[1] == 0 && a[2] == 0 && a[3] == 0 && a[4] == 0 {
        return [0; 5];
    }
    sub_mod(MODULUS, a)
}

#[inline]
const fn is_canonical(limbs: [u64; 5]) -> bool {
    let (_, borrow) = limbs[0].overflowing_sub(MODULUS[0]);
    let (_, borrow) = borrowing_sub(limbs[1], MODULUS[1], borrow);
    let (_, borrow) = borrowing_sub(limbs[2], MODULUS[2], borrow);
    let (_, borrow) = borrowing_sub(limbs[3], MODULUS[3], borrow);
    let (_, borrow) = borrowing_sub(limbs[4], MODULUS[4], borrow);
    borrow
}

#[inline]
const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

#[inline]
const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// Montgomery multiplication: (a * b * R^{-1}) mod n
#[inline]
fn montgomery_mul(a: ScalarField, b: ScalarField) -> ScalarField {
    let mut t = [0u64; 10];

    for i in 0..5 {
        let mut carry = 0u128;
        for j in 0..5 {
            let product = (a.limbs[i] as u128) * (b.limbs[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 5] = carry as u64;
    }

    for i in 0..5 {
        let k = t[i].wrapping_mul(MU);
        let mut carry = 0u128;

        for j in 0..5 {
            let product = (k as u128) * (MODULUS[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }

        for j in 5..10 - i {
            let sum = (t[i + j] as u128) + carry;
            t[i + j] = sum as u64;
            carry = sum >> 64;
        }
    }

    // n < 2^319, so the high half is below 2n and one subtraction suffices
    let result = [t[5], t[6], t[7], t[8], t[9]];
    if is_canonical(result) {
        ScalarField { limbs: result }
    } else {
        ScalarField {
            limbs: sub_mod(result, MODULUS),
        }
    }
}

impl ScalarBits for ScalarField {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 5] {
        self.to_canonical_limbs()
    }
}

impl TryFrom<[u64; 5]> for ScalarField {
    type Error = CurveError;

    fn try_from(limbs: [u64; 5]) -> Result<Self, Self::Error> {
        Self::from_limbs(limbs)
    }
}

impl From<ScalarField> for [u64; 5] {
    fn from(value: ScalarField) -> Self {
        value.to_canonical_limbs()
    }
}

impl Distribution<ScalarField> for StandardUniform {
    /// Samples 512 bits and reduces them, leaving a bias below 2^-190.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ScalarField {
        let mut wide = [0u8; 64];
        rng.fill_bytes(&mut wide);
        ScalarField::from_bytes_le_reduced(&wide)
    }
}

// Arithmetic operations
impl Add for ScalarField {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        ScalarField {
            limbs: add_mod(self.limbs, rhs.limbs),
        }
    }
}

impl AddAssign for ScalarField {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ScalarField {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        ScalarField {
            limbs: sub_mod(self.limbs, rhs.limbs),
        }
    }
}

impl SubAssign for ScalarField {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for ScalarField {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        ScalarField {
            limbs: neg_mod(self.limbs),
        }
    }
}

impl Mul for ScalarField {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        montgomery_mul(self, rhs)
    }
}

impl MulAssign for ScalarField {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Sum for ScalarField {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

// Display and Debug
impl Display for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_limbs();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}{:016x}",
            canonical[4], canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl Debug for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarField({})", self)
    }
}

impl Hash for ScalarField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}
