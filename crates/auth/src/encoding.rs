//! Sparse circuit encoding of biometric descriptors.
//!
//! The circuit evaluated by the node set is a sum of products: two
//! single-factor anchor terms holding each role's sum of squares, followed
//! by one two-factor term per descriptor component. With registration
//! coefficients `x_i` and authentication coefficients `-2 * y_i` the
//! bilinear evaluation resolves to the squared Euclidean distance
//! `sum(x_i^2) - 2 * sum(x_i * y_i) + sum(y_i^2)`; the legacy match variant
//! uses `-y_i` instead, yielding the raw similarity
//! `sum(x_i^2) + sum(y_i^2) - sum(x_i * y_i)`.

use std::collections::BTreeMap;

use nmc::{fields::mersenne61::MODULUS, Coordinate, Mersenne61};

use crate::{
    codec,
    config::{AuthConfig, ScoringVariant},
    error::AuthError,
    role::Role,
};

/// First circuit term holding a descriptor component; terms 0 and 1 are the
/// per-role anchors.
pub(crate) const COMPONENT_BASE: usize = 2;

/// Per-role budget for the quantized sum of squares.
///
/// Keeping each role's sum of squares at or below (p - 1) / 4 bounds the
/// bilinear result of both scoring variants strictly below the modulus, so
/// the revealed integer never wraps.
const SQUARE_SUM_BUDGET: i128 = ((MODULUS - 1) / 4) as i128;

/// The quantized, role-specific contribution of a descriptor to the scoring
/// polynomial. Values are secret and never leave the client unmasked.
#[derive(Debug)]
pub(crate) struct Encoding {
    values: BTreeMap<Coordinate, i64>,
}

impl Encoding {
    /// Encodes a descriptor for role `R` under the given configuration.
    pub(crate) fn new<R: Role>(
        descriptor: &[f64],
        config: &AuthConfig,
    ) -> Result<Self, AuthError> {
        if descriptor.is_empty() {
            return Err(AuthError::EmptyDescriptor);
        }

        let precision = config.precision();
        let mut quantized = Vec::with_capacity(descriptor.len());
        for (index, &component) in descriptor.iter().enumerate() {
            if !component.is_finite() {
                return Err(AuthError::NonFiniteInput { index });
            }
            quantized.push(codec::quantize(component, precision));
        }

        // Encode-time overflow invariant, not a runtime check delegated to
        // the engine: an absurd component saturates the quantizer and fails
        // the budget here.
        let mut square_sum: i128 = 0;
        for &quantum in &quantized {
            square_sum += i128::from(quantum) * i128::from(quantum);
            if square_sum > SQUARE_SUM_BUDGET {
                return Err(AuthError::FieldOverflow);
            }
        }

        let mut values = BTreeMap::new();
        values.insert(Coordinate::new(R::ANCHOR_TERM, 0), square_sum as i64);
        for (index, &quantum) in quantized.iter().enumerate() {
            let coefficient = if R::COLUMN == 0 {
                quantum
            } else {
                match config.variant() {
                    ScoringVariant::EuclideanDistance => -2 * quantum,
                    ScoringVariant::MatchScore => -quantum,
                }
            };
            values.insert(Coordinate::new(COMPONENT_BASE + index, R::COLUMN), coefficient);
        }

        Ok(Self { values })
    }

    /// The coordinates this encoding occupies.
    pub(crate) fn coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.values.keys()
    }

    /// The encoding as field elements, ready for masking.
    pub(crate) fn to_field(&self) -> BTreeMap<Coordinate, Mersenne61> {
        self.values
            .iter()
            .map(|(&coordinate, &value)| (coordinate, Mersenne61::from_signed(i128::from(value))))
            .collect()
    }
}
