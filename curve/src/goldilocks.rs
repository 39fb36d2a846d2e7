//! The Goldilocks prime field, p = 2^64 - 2^32 + 1.
//!
//! Elements are stored canonically as a `u64` in `[0, p)`. Products are reduced
//! with the usual `2^64 = 2^32 - 1 (mod p)` folding trick, so no division is
//! ever performed.

use core::fmt::{self, Debug, Display, Formatter};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::str::FromStr;
use num_bigint::{BigInt, BigUint};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::CurveError;

/// Element of the Goldilocks field.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Goldilocks(u64);

// p - 1 = 2^32 * (2^32 - 1)
const TWO_ADICITY: u32 = 32;
const ODD_FACTOR: u64 = 0xffff_ffff;

// Smallest quadratic non-residue; 2, 3 and 5 are all squares mod p.
const QUADRATIC_NON_RESIDUE: Goldilocks = Goldilocks(7);

impl Goldilocks {
    /// Field modulus.
    pub const ORDER: u64 = 0xffff_ffff_0000_0001;
    /// `2^64 mod p`.
    pub const EPSILON: u64 = 0xffff_ffff;

    pub const ZERO: Self = Goldilocks(0);
    pub const ONE: Self = Goldilocks(1);
    pub const TWO: Self = Goldilocks(2);
    pub const NEG_ONE: Self = Goldilocks(Self::ORDER - 1);

    /// Reduces an arbitrary `u64` into the field.
    #[inline]
    pub const fn new(value: u64) -> Self {
        if value >= Self::ORDER {
            Goldilocks(value - Self::ORDER)
        } else {
            Goldilocks(value)
        }
    }

    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        Goldilocks(value as u64)
    }

    /// Embeds a signed integer by reinterpreting its two's-complement bits as
    /// a `u64` and reducing.
    #[inline]
    pub const fn from_i64(value: i64) -> Self {
        Self::new(value as u64)
    }

    /// Strict constructor: fails for values `>= p`.
    pub const fn from_canonical_u64(value: u64) -> Result<Self, CurveError> {
        if value < Self::ORDER {
            Ok(Goldilocks(value))
        } else {
            Err(CurveError::NonCanonical("goldilocks"))
        }
    }

    /// Parses a (possibly negative) decimal integer and reduces it mod p.
    pub fn from_decimal_str(s: &str) -> Result<Self, CurveError> {
        let value: BigInt = s
            .trim()
            .parse()
            .map_err(|_| CurveError::InvalidDigits(s.to_string()))?;
        let order = BigInt::from(Self::ORDER);
        let reduced = ((value % &order) + &order) % &order;
        let limb = u64::try_from(&reduced).map_err(|_| CurveError::InvalidDigits(s.to_string()))?;
        Ok(Goldilocks(limb))
    }

    /// Parses a hexadecimal integer (optional `0x` prefix) and reduces it mod p.
    pub fn from_hex_str(s: &str) -> Result<Self, CurveError> {
        let digits = s.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);
        let value = BigUint::parse_bytes(digits.as_bytes(), 16)
            .ok_or_else(|| CurveError::InvalidDigits(s.to_string()))?;
        let reduced = value % Self::ORDER;
        let limb = u64::try_from(&reduced).map_err(|_| CurveError::InvalidDigits(s.to_string()))?;
        Ok(Goldilocks(limb))
    }

    /// Decodes exactly 8 little-endian bytes holding a canonical value.
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self, CurveError> {
        let raw: [u8; 8] = bytes.try_into().map_err(|_| CurveError::InvalidLength {
            expected: 8,
            actual: bytes.len(),
        })?;
        Self::from_canonical_u64(u64::from_le_bytes(raw))
    }

    #[inline]
    pub const fn to_bytes_le(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    #[inline]
    pub const fn as_canonical_u64(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_one(&self) -> bool {
        self.0 == 1
    }

    #[inline]
    pub const fn is_even(&self) -> bool {
        self.0 & 1 == 0
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Square-and-multiply exponentiation.
    pub fn exp_u64(&self, power: u64) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;
        let mut bits = power;

        while bits > 0 {
            if bits & 1 == 1 {
                result *= base;
            }
            base = base.square();
            bits >>= 1;
        }

        result
    }

    /// Computes `self^(2^n)` by repeated squaring.
    pub fn exp_power_of_2(&self, n: usize) -> Self {
        let mut result = *self;
        for _ in 0..n {
            result = result.square();
        }
        result
    }

    /// Inverse via Fermat, `None` for zero.
    pub fn try_inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(self.exp_u64(Self::ORDER - 2))
    }

    pub fn inverse(&self) -> Result<Self, CurveError> {
        self.try_inverse().ok_or(CurveError::InverseOfZero)
    }

    /// Legendre symbol as a field element: `0`, `1` or `p - 1`.
    pub fn legendre(&self) -> Self {
        self.exp_u64((Self::ORDER - 1) / 2)
    }

    /// Tonelli-Shanks square root. Zero maps to zero; non-residues give `None`.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::ZERO);
        }
        if self.legendre() != Self::ONE {
            return None;
        }

        let mut m = TWO_ADICITY;
        let mut c = QUADRATIC_NON_RESIDUE.exp_u64(ODD_FACTOR);
        let mut t = self.exp_u64(ODD_FACTOR);
        let mut r = self.exp_u64((ODD_FACTOR + 1) / 2);

        while !t.is_one() {
            // least i with t^(2^i) == 1; i < m because t has order dividing 2^(m-1)
            let mut i = 0;
            let mut probe = t;
            while !probe.is_one() {
                probe = probe.square();
                i += 1;
            }

            let b = c.exp_power_of_2((m - i - 1) as usize);
            r *= b;
            c = b.square();
            t *= c;
            m = i;
        }

        Some(r)
    }

    pub fn checked_sqrt(&self) -> Result<Self, CurveError> {
        self.sqrt().ok_or(CurveError::NoSquareRoot)
    }
}

/// Folds a 128-bit product into a canonical field element.
#[inline]
const fn reduce128(x: u128) -> u64 {
    let x_lo = x as u64;
    let x_hi = (x >> 64) as u64;
    let x_hi_hi = x_hi >> 32;
    let x_hi_lo = x_hi & Goldilocks::EPSILON;

    let (mut t0, borrow) = x_lo.overflowing_sub(x_hi_hi);
    if borrow {
        t0 = t0.wrapping_sub(Goldilocks::EPSILON);
    }
    let t1 = x_hi_lo * Goldilocks::EPSILON;

    let (sum, carry) = t0.overflowing_add(t1);
    let sum = sum.wrapping_add(Goldilocks::EPSILON * carry as u64);

    if sum >= Goldilocks::ORDER {
        sum - Goldilocks::ORDER
    } else {
        sum
    }
}

impl TryFrom<u64> for Goldilocks {
    type Error = CurveError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_canonical_u64(value)
    }
}

impl From<Goldilocks> for u64 {
    fn from(value: Goldilocks) -> Self {
        value.0
    }
}

impl From<u32> for Goldilocks {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl From<bool> for Goldilocks {
    fn from(value: bool) -> Self {
        Goldilocks(value as u64)
    }
}

impl FromStr for Goldilocks {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl Add for Goldilocks {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let sum = self.0 as u128 + rhs.0 as u128;
        if sum >= Self::ORDER as u128 {
            Goldilocks((sum - Self::ORDER as u128) as u64)
        } else {
            Goldilocks(sum as u64)
        }
    }
}

impl AddAssign for Goldilocks {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Goldilocks {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        if self.0 >= rhs.0 {
            Goldilocks(self.0 - rhs.0)
        } else {
            Goldilocks(self.0 + (Self::ORDER - rhs.0))
        }
    }
}

impl SubAssign for Goldilocks {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Goldilocks {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl Mul for Goldilocks {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Goldilocks(reduce128(self.0 as u128 * rhs.0 as u128))
    }
}

impl MulAssign for Goldilocks {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Sum for Goldilocks {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for Goldilocks {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl Distribution<Goldilocks> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Goldilocks {
        loop {
            let candidate: u64 = rng.random();
            if candidate < Goldilocks::ORDER {
                return Goldilocks(candidate);
            }
        }
    }
}

impl Display for Goldilocks {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for Goldilocks {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Goldilocks({})", self.0)
    }
}
