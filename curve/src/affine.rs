// E(GF(p^5)) : y^2 = x^3 + A*x + B, p = 2^64 - 2^32 + 1, GF(p^5) = GF(p)[z]/(z^5 - 3)
// Short Weierstrass form of the double-odd curve y^2 = x(x^2 + a*x + b), a = 2, b = 263*z,
// obtained with x -> x + a/3:
//   A = (3b - a^2)/3 = 263*z - 4/3
//   B = a(2a^2 - 9b)/27 = 16/27 - (526/3)*z
// Group order n (prime, 319 bits):
//   0x7ffffffd800000077ffffff1000000167fffffe6cfb80639e8885c39d724a09ce80fd996948bffe1

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

use crate::basefield::BaseField;
use crate::errors::CurveError;
use crate::goldilocks::Goldilocks;
use crate::{Group, ScalarField};

/// `A` coefficient of the short Weierstrass equation.
const CURVE_A: BaseField = BaseField::from_u64_array([6148914689804861439, 263, 0, 0, 0]);

/// `B` coefficient of the short Weierstrass equation.
const CURVE_B: BaseField =
    BaseField::from_u64_array([15713893096167979237, 6148914689804861265, 0, 0, 0]);

/// `a` of the double-odd model.
const DOUBLE_ODD_A: BaseField = BaseField::from_u64_array([2, 0, 0, 0, 0]);

/// `b` of the double-odd model.
const DOUBLE_ODD_B: BaseField = BaseField::from_u64_array([0, 263, 0, 0, 0]);

/// `a/3`, the x-offset between the two models and the pole of the encoding.
const A_THIRD: BaseField = BaseField::from_u64_array([6148914689804861441, 0, 0, 0, 0]);

const GENERATOR_X: BaseField = BaseField::from_u64_array([
    11712523173042564207,
    14090224426659529053,
    13197813503519687414,
    16280770174934269299,
    15998333998318935536,
]);

const GENERATOR_Y: BaseField = BaseField::from_u64_array([
    14639054205878357578,
    17426078571020221072,
    2548978194165003307,
    8663895577921260088,
    9793640284382595140,
]);

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
///
/// Serialized as its encoding; deserializing decodes, so only curve points
/// come back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BaseField", into = "BaseField")]
pub struct Affine {
    /// The x-coordinate of the point (Fp5 element)
    pub x: BaseField,
    /// The y-coordinate of the point (Fp5 element)
    pub y: BaseField,
    /// Whether this point is the point at infinity (identity element)
    pub is_infinity: bool,
}

impl Affine {
    /// The point at infinity (identity element)
    pub const INFINITY: Self = Affine {
        x: BaseField::ZERO,
        y: BaseField::ZERO,
        is_infinity: true,
    };

    /// The fixed generator, whose encoding is the constant 4.
    pub const GENERATOR: Self = Affine {
        x: GENERATOR_X,
        y: GENERATOR_Y,
        is_infinity: false,
    };

    /// Create a new affine point.
    pub fn new(x: BaseField, y: BaseField) -> Self {
        Affine {
            x,
            y,
            is_infinity: false,
        }
    }

    pub fn curve_a() -> BaseField {
        CURVE_A
    }

    pub fn curve_b() -> BaseField {
        CURVE_B
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.is_infinity
    }

    /// Check if a point is on the curve: y^2 = x^3 + A*x + B.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity {
            return true;
        }

        let y2 = self.y.square();
        let x3 = self.x.square() * self.x;
        let rhs = x3 + CURVE_A * self.x + CURVE_B;

        y2 == rhs
    }

    pub fn generator() -> Self {
        Self::GENERATOR
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        if self.is_infinity {
            return *self;
        }

        // If y = 0, then 2P = O
        if self.y.is_zero() {
            return Self::INFINITY;
        }

        // λ = (3x^2 + A) / (2y)
        let x2 = self.x.square();
        let numerator = x2 + x2 + x2 + CURVE_A;
        let lambda = numerator / self.y.double();

        // x_r = λ^2 - 2x
        let x_r = lambda.square() - self.x - self.x;

        // y_r = λ(x - x_r) - y
        let y_r = lambda * (self.x - x_r) - self.y;

        Affine::new(x_r, y_r)
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        if self.is_infinity {
            return *self;
        }
        Affine::new(self.x, -self.y)
    }

    /// Compresses the point to the single field element `y / (a/3 - x)`.
    ///
    /// This is `-y/x` in double-odd coordinates. The point at infinity maps to
    /// zero.
    pub fn encode(&self) -> BaseField {
        if self.is_infinity {
            return BaseField::ZERO;
        }
        self.y / (A_THIRD - self.x)
    }

    /// Inverse of [`Affine::encode`]. Zero decodes to the point at infinity.
    pub fn decode(w: &BaseField) -> Result<Self, CurveError> {
        if w.is_zero() {
            return Ok(Self::INFINITY);
        }

        // In double-odd coordinates x satisfies x^2 - (w^2 - a) x + b = 0.
        let e = w.square() - DOUBLE_ODD_A;
        let delta = e.square() - DOUBLE_ODD_B.scale(Goldilocks::new(4));
        let r = delta.sqrt().ok_or(CurveError::InvalidEncoding)?;

        let half = Goldilocks::TWO.inverse()?;
        let x1 = (e + r).scale(half);
        let x2 = (e - r).scale(half);

        // Exactly one root is a square; the group element uses that one.
        let x = if x1.legendre() == Goldilocks::ONE { x1 } else { x2 };
        let y = -(*w * x);

        Ok(Affine::new(x + A_THIRD, y))
    }

    pub fn to_bytes_le(&self) -> [u8; 40] {
        self.encode().to_bytes_le()
    }

    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self, CurveError> {
        Self::decode(&BaseField::from_bytes_le(bytes)?)
    }
}

impl TryFrom<BaseField> for Affine {
    type Error = CurveError;

    fn try_from(w: BaseField) -> Result<Self, Self::Error> {
        Self::decode(&w)
    }
}

impl From<Affine> for BaseField {
    fn from(point: Affine) -> Self {
        point.encode()
    }
}

impl Group for Affine {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity
    }

    #[inline]
    fn generator() -> Self {
        Self::GENERATOR
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        if self.is_infinity {
            return other;
        }
        if other.is_infinity {
            return self;
        }

        if self.x == other.x {
            if self.y == other.y {
                return self.double();
            } else {
                return Self::INFINITY;
            }
        }

        // λ = (y2 - y1) / (x2 - x1)
        let lambda = (other.y - self.y) / (other.x - self.x);

        // x_r = λ^2 - x1 - x2
        let x_r = lambda.square() - self.x - other.x;

        // y_r = λ(x1 - x_r) - y1
        let y_r = lambda * (self.x - x_r) - self.y;

        Affine::new(x_r, y_r)
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: &ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Affine> for ScalarField {
    type Output = Affine;

    fn mul(self, point: Affine) -> Affine {
        <Affine as Group>::scalar_mul(&point, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RandomField;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_infinity() {
        let inf = Affine::INFINITY;
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve());
    }

    #[test]
    fn test_curve_constants() {
        let third = Goldilocks::new(3).inverse().unwrap();
        assert_eq!(DOUBLE_ODD_A.scale(third), A_THIRD);
        // A = b - a^2/3
        assert_eq!(CURVE_A, DOUBLE_ODD_B - DOUBLE_ODD_A.square().scale(third));
        // B = a(2a^2 - 9b)/27
        let numerator = DOUBLE_ODD_A
            * (DOUBLE_ODD_A.square().double() - DOUBLE_ODD_B.scale(Goldilocks::new(9)));
        assert_eq!(CURVE_B, numerator.scale(Goldilocks::new(27).inverse().unwrap()));
    }

    #[test]
    fn test_generator_on_curve() {
        let g = Affine::generator();
        assert!(g.is_on_curve(), "Generator point is not on the curve");
        assert!(!g.is_infinity());
        assert_eq!(g.encode(), BaseField::from_u64_array([4, 0, 0, 0, 0]));
    }

    #[test]
    fn test_generator_has_prime_order() {
        let g = Affine::generator();
        let n_minus_one = -ScalarField::ONE;
        assert_eq!(g * n_minus_one, -g);
        assert_eq!(g * n_minus_one + g, Affine::INFINITY);
    }

    #[test]
    fn test_point_addition_with_infinity() {
        let g = Affine::generator();
        let inf = Affine::INFINITY;

        assert_eq!(g + inf, g);
        assert_eq!(inf + g, g);
        assert_eq!(inf + inf, inf);
    }

    #[test]
    fn test_point_doubling() {
        let g = Affine::generator();
        let g2 = g.double();

        assert!(g2.is_on_curve(), "Doubled point is not on the curve");
        assert_eq!(g + g, g2);
    }

    #[test]
    fn test_point_negation() {
        let g = Affine::generator();
        let neg_g = g.negate();

        assert!(neg_g.is_on_curve());
        assert_eq!(g + neg_g, Affine::INFINITY);
        assert_eq!(g - g, Affine::INFINITY);
    }

    #[test]
    fn test_scalar_multiplication() {
        let g = Affine::generator();
        let scalar = ScalarField::from_canonical_u64(5);
        let result = g.scalar_mul(&scalar);

        // 5*G = G + G + G + G + G
        let expected = g + g + g + g + g;
        assert_eq!(result, expected);
        assert!(result.is_on_curve());
    }

    #[test]
    fn test_scalar_mul_zero_and_one() {
        let g = Affine::generator();
        assert_eq!(g.scalar_mul(&ScalarField::ZERO), Affine::INFINITY);
        assert_eq!(g.scalar_mul(&ScalarField::ONE), g);
    }

    #[test]
    fn test_scalar_distributes() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = Affine::generator();
        for _ in 0..3 {
            let a = ScalarField::random(&mut rng);
            let b = ScalarField::random(&mut rng);

            let left = g.scalar_mul(&(a + b));
            let right = g.scalar_mul(&a) + g.scalar_mul(&b);
            assert_eq!(left, right);
            assert!(left.is_on_curve());
        }
    }

    #[test]
    fn test_mul_u64() {
        let g = Affine::generator();
        assert_eq!(g.mul_u64(42), g.scalar_mul(&ScalarField::from_canonical_u64(42)));
        assert_eq!(g.mul_u64(0), Affine::INFINITY);
        assert_eq!(<Affine as Group>::mul_generator(&ScalarField::from_canonical_u64(3)), g.mul_u64(3));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        let g = Affine::generator();
        let mut points = vec![g, g.double(), g.mul_u64(5)];
        points.push(g * ScalarField::random(&mut rng));

        for point in points {
            let decoded = Affine::decode(&point.encode()).unwrap();
            assert_eq!(decoded, point);
            assert_eq!(Affine::from_bytes_le(&point.to_bytes_le()).unwrap(), point);
        }

        assert_eq!(Affine::decode(&BaseField::ZERO).unwrap(), Affine::INFINITY);
        assert_eq!(Affine::INFINITY.encode(), BaseField::ZERO);
    }

    #[test]
    fn test_known_encoding() {
        let two_g = Affine::generator().double();
        let expected = BaseField::from_u64_array([
            0x7f191312fe874c38,
            0x8f54439d7e451b4e,
            0xd8c1e50ec06700c0,
            0xe53b10ab085e8972,
            0x8cbcd5b9d4d33643,
        ]);
        assert_eq!(two_g.encode(), expected);
    }

    #[test]
    fn test_decode_rejects_some_elements() {
        // Roughly half of all field elements are not valid encodings.
        let rejected = (1..40u64)
            .map(|c| Affine::decode(&BaseField::from_u64_array([c, 1, 0, 0, 0])))
            .filter(|res| matches!(res, Err(CurveError::InvalidEncoding)))
            .count();
        assert!(rejected > 0);
    }

    #[test]
    fn test_try_from_encoding() {
        let g = Affine::GENERATOR;
        assert_eq!(Affine::try_from(BaseField::from(g)), Ok(g));
        assert_eq!(Affine::try_from(BaseField::ZERO), Ok(Affine::INFINITY));

        let bad = (1..40u64)
            .map(|c| BaseField::from_u64_array([c, 1, 0, 0, 0]))
            .find(|w| Affine::decode(w).is_err())
            .unwrap();
        assert_eq!(Affine::try_from(bad), Err(CurveError::InvalidEncoding));
    }

    #[test]
    fn test_identity() {
        let id = <Affine as Group>::identity();
        assert!(id.is_identity());
        assert_eq!(id, Affine::INFINITY);

        let g = Affine::generator();
        assert_eq!(g + id, g);
        assert_eq!(id + g, g);
    }
}
