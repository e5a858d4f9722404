//! A computation party holding secret preprocessing material.

use std::collections::BTreeMap;

use crate::{
    fields::Field,
    signature::{Coordinate, Signature},
    NmcError,
};

/// Secret material installed on a node by [`preprocess`](crate::preprocess).
#[derive(Clone)]
pub(crate) struct Material<F> {
    /// This node's multiplicative mask contribution per coordinate.
    pub(crate) masks: BTreeMap<Coordinate, F>,
    /// This node's additive share of the product of inverted combined masks,
    /// per term.
    pub(crate) lambdas: Vec<F>,
}

/// A computation party.
///
/// A node hands out its per-coordinate masks on request and computes one
/// additive share of the circuit result from broadcast masked factors. It is
/// never shown an unmasked encoding.
pub struct Node<F> {
    material: Option<Material<F>>,
}

impl<F> std::fmt::Debug for Node<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node").finish_non_exhaustive()
    }
}

impl<F> Default for Node<F> {
    fn default() -> Self {
        Self { material: None }
    }
}

impl<F: Field> Node<F> {
    /// Creates a node without preprocessing material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether preprocessing material is installed.
    pub fn is_preprocessed(&self) -> bool {
        self.material.is_some()
    }

    pub(crate) fn install(&mut self, material: Material<F>) {
        self.material = Some(material);
    }

    /// Returns this node's masks for the requested coordinates.
    pub fn masks<'a>(
        &self,
        coordinates: impl IntoIterator<Item = &'a Coordinate>,
    ) -> Result<BTreeMap<Coordinate, F>, NmcError> {
        let material = self.material.as_ref().ok_or(NmcError::NotPreprocessed)?;
        coordinates
            .into_iter()
            .map(|&coordinate| {
                material
                    .masks
                    .get(&coordinate)
                    .map(|&mask| (coordinate, mask))
                    .ok_or(NmcError::UnknownCoordinate(coordinate))
            })
            .collect()
    }

    /// Computes this node's additive share of the circuit result.
    ///
    /// `factors` are the broadcast masked factor maps; together they must
    /// cover every coordinate of `signature`. Safe to call repeatedly with
    /// factors of independent sessions within one preprocessing epoch.
    pub fn compute(
        &self,
        signature: &Signature,
        factors: &[&BTreeMap<Coordinate, F>],
    ) -> Result<F, NmcError> {
        let material = self.material.as_ref().ok_or(NmcError::NotPreprocessed)?;
        if material.lambdas.len() != signature.terms() {
            return Err(NmcError::SignatureMismatch {
                expected: material.lambdas.len(),
                actual: signature.terms(),
            });
        }

        let mut merged: BTreeMap<Coordinate, F> = BTreeMap::new();
        for map in factors {
            merged.extend(map.iter().map(|(&coordinate, &value)| (coordinate, value)));
        }

        let mut share = F::zero();
        for (term, &width) in signature.widths().iter().enumerate() {
            let mut product = material.lambdas[term];
            for factor in 0..width {
                let coordinate = Coordinate::new(term, factor);
                let value = merged
                    .get(&coordinate)
                    .ok_or(NmcError::MissingFactor(coordinate))?;
                product = product * *value;
            }
            share = share + product;
        }
        Ok(share)
    }
}
