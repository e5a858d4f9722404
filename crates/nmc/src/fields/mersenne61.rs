//! This module implements the prime field of the Mersenne prime 2^61 - 1.

use std::ops::{Add, Mul, Neg};

use rand::{distributions::Standard, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::Field;

/// The field modulus, 2^61 - 1.
pub const MODULUS: u64 = (1 << 61) - 1;

/// A field element of the prime field with modulus 2^61 - 1.
///
/// The inner value is always kept in canonical form, i.e. strictly below the
/// modulus.
#[derive(Copy, Clone, Debug, PartialOrd, Ord, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mersenne61(u64);

impl Mersenne61 {
    /// Creates a new field element, reducing the input modulo 2^61 - 1.
    pub fn new(value: u64) -> Self {
        Self(value % MODULUS)
    }

    /// Creates a field element from a signed integer, mapping negative
    /// values to their additive inverse.
    pub fn from_signed(value: i128) -> Self {
        Self(value.rem_euclid(MODULUS as i128) as u64)
    }

    /// Returns the canonical integer representation of this element.
    pub fn into_inner(self) -> u64 {
        self.0
    }

    fn pow(self, mut exponent: u64) -> Self {
        let mut base = self;
        let mut result = Self(1);
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            exponent >>= 1;
        }
        result
    }
}

impl Distribution<Mersenne61> for Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Mersenne61 {
        // Rejection sampling over the 61-bit range. Only the single value
        // equal to the modulus is rejected.
        loop {
            let value = rng.gen::<u64>() >> 3;
            if value < MODULUS {
                return Mersenne61(value);
            }
        }
    }
}

impl Add for Mersenne61 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let sum = self.0 + rhs.0;
        Self(if sum >= MODULUS { sum - MODULUS } else { sum })
    }
}

impl Mul for Mersenne61 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self((u128::from(self.0) * u128::from(rhs.0) % u128::from(MODULUS)) as u64)
    }
}

impl Neg for Mersenne61 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.0 == 0 {
            self
        } else {
            Self(MODULUS - self.0)
        }
    }
}

impl Field for Mersenne61 {
    const BIT_SIZE: u32 = 61;

    fn zero() -> Self {
        Self(0)
    }

    fn one() -> Self {
        Self(1)
    }

    fn two_pow(rhs: u32) -> Self {
        // 2^61 is congruent to 1 modulo 2^61 - 1.
        Self(1u64 << (rhs % 61))
    }

    fn inverse(self) -> Self {
        self.pow(MODULUS - 2)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    use super::{Mersenne61, MODULUS};
    use crate::fields::{tests::test_field_basic, Field, UniformRand};

    #[test]
    fn test_mersenne61_basic() {
        test_field_basic::<Mersenne61>();
        assert_eq!(Mersenne61::new(0), Mersenne61::zero());
        assert_eq!(Mersenne61::new(1), Mersenne61::one());
        assert_eq!(Mersenne61::new(MODULUS), Mersenne61::zero());
    }

    #[test]
    fn test_mersenne61_two_pow_wraps() {
        assert_eq!(Mersenne61::two_pow(0), Mersenne61::one());
        assert_eq!(Mersenne61::two_pow(60), Mersenne61::new(1 << 60));
        assert_eq!(Mersenne61::two_pow(61), Mersenne61::one());
        assert_eq!(Mersenne61::two_pow(62), Mersenne61::new(2));
    }

    #[test]
    fn test_mersenne61_from_signed() {
        assert_eq!(Mersenne61::from_signed(5), Mersenne61::new(5));
        assert_eq!(Mersenne61::from_signed(-1), Mersenne61::new(MODULUS - 1));
        assert_eq!(
            Mersenne61::from_signed(-2 * i128::from(MODULUS)),
            Mersenne61::zero()
        );
    }

    #[test]
    fn test_mersenne61_inverse() {
        let mut rng = ChaCha12Rng::from_seed([1; 32]);
        for _ in 0..32 {
            let a = loop {
                let a = Mersenne61::rand(&mut rng);
                if a != Mersenne61::zero() {
                    break a;
                }
            };
            assert_eq!(a * a.inverse(), Mersenne61::one());
        }
    }
}
