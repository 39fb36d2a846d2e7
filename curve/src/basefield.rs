//! Quintic extension GF(p^5) = GF(p)[z] / (z^5 - 3) over Goldilocks.
//!
//! This is the coordinate field of the curve. Elements are five coefficients
//! in the power basis, lowest degree first.

use core::fmt::{self, Debug, Display, Formatter};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::CurveError;
use crate::goldilocks::Goldilocks;

/// Size of the canonical little-endian encoding.
pub const BASE_FIELD_BYTES: usize = 40;

/// Element of the degree-5 extension field.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseField(pub [Goldilocks; 5]);

impl BaseField {
    /// Non-residue defining the extension: z^5 = W.
    pub const W: Goldilocks = Goldilocks::new(3);
    /// Fifth root of unity used by the Frobenius map, z^p = DTH_ROOT * z.
    pub const DTH_ROOT: Goldilocks = Goldilocks::new(1041288259238279555);

    pub const ZERO: Self = BaseField([Goldilocks::ZERO; 5]);
    pub const ONE: Self = Self::from_base(Goldilocks::ONE);
    pub const TWO: Self = Self::from_base(Goldilocks::TWO);

    #[inline]
    pub const fn new(coeffs: [Goldilocks; 5]) -> Self {
        BaseField(coeffs)
    }

    /// Builds an element from raw limbs, reducing each one.
    pub const fn from_u64_array(limbs: [u64; 5]) -> Self {
        BaseField([
            Goldilocks::new(limbs[0]),
            Goldilocks::new(limbs[1]),
            Goldilocks::new(limbs[2]),
            Goldilocks::new(limbs[3]),
            Goldilocks::new(limbs[4]),
        ])
    }

    /// Embeds a base field element as the constant polynomial.
    #[inline]
    pub const fn from_base(value: Goldilocks) -> Self {
        BaseField([
            value,
            Goldilocks::ZERO,
            Goldilocks::ZERO,
            Goldilocks::ZERO,
            Goldilocks::ZERO,
        ])
    }

    #[inline]
    pub const fn coeffs(&self) -> &[Goldilocks; 5] {
        &self.0
    }

    pub fn to_u64_array(&self) -> [u64; 5] {
        self.0.map(|c| c.as_canonical_u64())
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Goldilocks::is_zero)
    }

    pub fn is_one(&self) -> bool {
        *self == Self::ONE
    }

    /// Decodes 40 little-endian bytes, coefficient 0 first; every coefficient
    /// must be canonical.
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != BASE_FIELD_BYTES {
            return Err(CurveError::InvalidLength {
                expected: BASE_FIELD_BYTES,
                actual: bytes.len(),
            });
        }

        let mut coeffs = [Goldilocks::ZERO; 5];
        for (coeff, chunk) in coeffs.iter_mut().zip(bytes.chunks_exact(8)) {
            *coeff = Goldilocks::from_bytes_le(chunk)?;
        }
        Ok(BaseField(coeffs))
    }

    pub fn to_bytes_le(&self) -> [u8; BASE_FIELD_BYTES] {
        let mut out = [0u8; BASE_FIELD_BYTES];
        for (chunk, coeff) in out.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&coeff.to_bytes_le());
        }
        out
    }

    /// Multiplies every coefficient by a base field scalar.
    pub fn scale(&self, factor: Goldilocks) -> Self {
        BaseField(self.0.map(|c| c * factor))
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    pub fn square(&self) -> Self {
        let [a0, a1, a2, a3, a4] = self.0;
        let w = Self::W;
        let double_w = w.double();

        let c0 = a0.square() + double_w * (a1 * a4 + a2 * a3);
        let c1 = (a0 * a1).double() + w * ((a2 * a4).double() + a3.square());
        let c2 = (a0 * a2).double() + a1.square() + double_w * (a3 * a4);
        let c3 = (a0 * a3 + a1 * a2).double() + w * a4.square();
        let c4 = (a0 * a4 + a1 * a3).double() + a2.square();

        BaseField([c0, c1, c2, c3, c4])
    }

    /// Computes `self^(2^n)`.
    pub fn exp_power_of_2(&self, n: usize) -> Self {
        let mut result = *self;
        for _ in 0..n {
            result = result.square();
        }
        result
    }

    /// The p-power Frobenius map.
    pub fn frobenius(&self) -> Self {
        self.repeated_frobenius(1)
    }

    /// Applies the Frobenius map `count` times; only `count mod 5` matters.
    pub fn repeated_frobenius(&self, count: usize) -> Self {
        let count = count % 5;
        if count == 0 {
            return *self;
        }

        let z0 = Self::DTH_ROOT.exp_u64(count as u64);
        let mut factor = Goldilocks::ONE;
        let mut out = self.0;
        for coeff in out.iter_mut() {
            *coeff *= factor;
            factor *= z0;
        }
        BaseField(out)
    }

    /// Reduces `self * rhs` to its constant term, which is the whole product
    /// when `rhs` is chosen so that the result lies in the base field.
    fn constant_term_of_product(&self, rhs: &Self) -> Goldilocks {
        let [a0, a1, a2, a3, a4] = self.0;
        let [b0, b1, b2, b3, b4] = rhs.0;
        a0 * b0 + Self::W * (a1 * b4 + a2 * b3 + a3 * b2 + a4 * b1)
    }

    /// Inverse through the norm map; zero maps to zero.
    pub fn inverse_or_zero(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }

        let d = self.frobenius();
        let e = d * d.frobenius();
        let f = e * e.repeated_frobenius(2);

        // self * f is the norm of self, which lies in the base field
        let g = self.constant_term_of_product(&f);
        match g.try_inverse() {
            Some(g_inv) => f.scale(g_inv),
            None => Self::ZERO,
        }
    }

    pub fn try_inverse(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.inverse_or_zero())
        }
    }

    pub fn inverse(&self) -> Result<Self, CurveError> {
        self.try_inverse().ok_or(CurveError::InverseOfZero)
    }

    /// Division that reports a zero divisor instead of yielding zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, CurveError> {
        if rhs.is_zero() {
            return Err(CurveError::DivisionByZero);
        }
        Ok(*self * rhs.inverse_or_zero())
    }

    /// Legendre symbol: `0` for zero, `1` for squares, `p - 1` otherwise.
    pub fn legendre(&self) -> Goldilocks {
        let frob1 = self.frobenius();
        let frob2 = frob1.frobenius();
        let frob1_frob2 = frob1 * frob2;
        let frob3_frob4 = frob1_frob2.repeated_frobenius(2);

        // norm of self, a base field value
        let norm = (*self * frob1_frob2 * frob3_frob4).0[0];

        // norm^((p-1)/2) with (p-1)/2 = 2^63 - 2^31
        let norm_31 = norm.exp_power_of_2(31);
        let norm_63 = norm_31.exp_power_of_2(32);
        match norm_31.try_inverse() {
            Some(inv) => norm_63 * inv,
            None => Goldilocks::ZERO,
        }
    }

    /// Square root, or `None` when `self` is not a square.
    pub fn sqrt(&self) -> Option<Self> {
        let v = self.exp_power_of_2(31);
        let d = *self * v.exp_power_of_2(32) * v.inverse_or_zero();
        let e = (d * d.repeated_frobenius(2)).frobenius();
        let f = e.square();

        let g = self.constant_term_of_product(&f);
        let s = g.sqrt()?;
        Some(e.inverse_or_zero().scale(s))
    }

    pub fn checked_sqrt(&self) -> Result<Self, CurveError> {
        self.sqrt().ok_or(CurveError::NoSquareRoot)
    }

    /// Square root with a fixed sign: the root is negated when `sgn0` holds.
    pub fn canonical_sqrt(&self) -> Option<Self> {
        let root = self.sqrt()?;
        if root.sgn0() {
            Some(-root)
        } else {
            Some(root)
        }
    }

    /// Sign predicate. A zero leading coefficient counts as even, so this
    /// holds iff the constant coefficient is even, zero included.
    pub fn sgn0(&self) -> bool {
        let mut sign = false;
        let mut zero = true;
        for coeff in &self.0 {
            sign |= zero && coeff.is_even();
            zero &= coeff.is_zero();
        }
        sign
    }
}

impl From<Goldilocks> for BaseField {
    fn from(value: Goldilocks) -> Self {
        Self::from_base(value)
    }
}

impl Add for BaseField {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0) {
            *a += b;
        }
        BaseField(out)
    }
}

impl AddAssign for BaseField {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for BaseField {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0) {
            *a -= b;
        }
        BaseField(out)
    }
}

impl SubAssign for BaseField {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for BaseField {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        BaseField(self.0.map(|c| -c))
    }
}

impl Mul for BaseField {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let [a0, a1, a2, a3, a4] = self.0;
        let [b0, b1, b2, b3, b4] = rhs.0;
        let w = Self::W;

        let c0 = a0 * b0 + w * (a1 * b4 + a2 * b3 + a3 * b2 + a4 * b1);
        let c1 = a0 * b1 + a1 * b0 + w * (a2 * b4 + a3 * b3 + a4 * b2);
        let c2 = a0 * b2 + a1 * b1 + a2 * b0 + w * (a3 * b4 + a4 * b3);
        let c3 = a0 * b3 + a1 * b2 + a2 * b1 + a3 * b0 + w * (a4 * b4);
        let c4 = a0 * b4 + a1 * b3 + a2 * b2 + a3 * b1 + a4 * b0;

        BaseField([c0, c1, c2, c3, c4])
    }
}

impl MulAssign for BaseField {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Division by zero yields zero; use `checked_div` to surface it.
#[allow(clippy::suspicious_arithmetic_impl)]
impl Div for BaseField {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inverse_or_zero()
    }
}

impl Sum for BaseField {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Distribution<BaseField> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BaseField {
        BaseField(core::array::from_fn(|_| StandardUniform.sample(rng)))
    }
}

impl Display for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [c0, c1, c2, c3, c4] = self.0;
        write!(f, "[{c0}, {c1}, {c2}, {c3}, {c4}]")
    }
}

impl Debug for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BaseField({self})")
    }
}
