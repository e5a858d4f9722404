//! Types for working with finite fields.

pub mod mersenne61;

use std::{
    fmt::Debug,
    ops::{Add, Mul, Neg},
};

use rand::{distributions::Standard, prelude::Distribution, Rng};
use serde::{de::DeserializeOwned, Serialize};

/// A trait for finite fields.
pub trait Field:
    Add<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Copy
    + Clone
    + Debug
    + 'static
    + Send
    + Sync
    + UniformRand
    + PartialOrd
    + Ord
    + PartialEq
    + Eq
    + Serialize
    + DeserializeOwned
{
    /// The number of bits of a field element.
    const BIT_SIZE: u32;

    /// Return the additive identity element.
    fn zero() -> Self;

    /// Return the multiplicative identity element.
    fn one() -> Self;

    /// Return a field element from a power of two.
    fn two_pow(rhs: u32) -> Self;

    /// Return the multiplicative inverse.
    fn inverse(self) -> Self;
}

/// A trait for sampling random elements of the field.
///
/// This is helpful, because we do not need to import other traits since this
/// is a supertrait of field (which is not possible with `Standard` and
/// `Distribution`).
pub trait UniformRand: Sized {
    /// Return a random field element.
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl<T> UniformRand for T
where
    Standard: Distribution<T>,
{
    #[inline]
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.sample(Standard)
    }
}

#[cfg(test)]
mod tests {
    use super::Field;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    pub(crate) fn test_field_basic<T: Field>() {
        let mut rng = ChaCha12Rng::from_seed([0; 32]);
        let a = loop {
            let a = T::rand(&mut rng);
            if a != T::zero() {
                break a;
            }
        };

        let zero = T::zero();
        let one = T::one();

        assert_eq!(a + zero, a);
        assert_eq!(a * zero, zero);
        assert_eq!(a * one, a);
        assert_eq!(a * a.inverse(), one);
        assert_eq!(one.inverse(), one);
        assert_eq!(a + -a, zero);
    }
}
