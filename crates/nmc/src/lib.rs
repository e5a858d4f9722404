//! A minimal engine for masked n-party computation of sum-of-products
//! expressions over a prime field.
//!
//! A circuit is described by a [`Signature`]: the number of factors of every
//! term of the sum. During [`preprocess`] every node is dealt a random
//! multiplicative mask per [`Coordinate`] and an additive share of the
//! product of the inverted combined masks per term. A client blinds each of
//! its factors with the combined mask of all nodes ([`masked_factors`]) and
//! broadcasts the result; each node then computes one additive share of the
//! circuit result ([`Node::compute`]), and the shares of all nodes sum to the
//! plain evaluation. Masked factors are computationally indistinguishable
//! from random without every node's secrets.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod fields;
mod node;
mod signature;

pub use fields::{mersenne61::Mersenne61, Field};
pub use node::Node;
pub use signature::{Coordinate, Signature};

use std::collections::BTreeMap;

use rand::{CryptoRng, Rng};

use node::Material;

/// An error in the masked computation engine.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum NmcError {
    #[error("node set is empty")]
    EmptyNodeSet,
    #[error("node has not been preprocessed")]
    NotPreprocessed,
    #[error("no preprocessing material for coordinate ({}, {})", .0.term, .0.factor)]
    UnknownCoordinate(Coordinate),
    #[error("masked factor missing for coordinate ({}, {})", .0.term, .0.factor)]
    MissingFactor(Coordinate),
    #[error("signature has {actual} terms but preprocessing installed {expected}")]
    SignatureMismatch { expected: usize, actual: usize },
}

/// Runs the preprocessing phase for a node set.
///
/// Installs fresh masks and lambda shares for `signature` on every node. The
/// material of the individual nodes is correlated, so all parties of a set
/// must be preprocessed together.
pub fn preprocess<'a, F, R, I>(signature: &Signature, nodes: I, rng: &mut R) -> Result<(), NmcError>
where
    F: Field,
    R: Rng + CryptoRng,
    I: IntoIterator<Item = &'a mut Node<F>>,
{
    let mut nodes: Vec<&'a mut Node<F>> = nodes.into_iter().collect();
    if nodes.is_empty() {
        return Err(NmcError::EmptyNodeSet);
    }

    let mut materials: Vec<Material<F>> = (0..nodes.len())
        .map(|_| Material {
            masks: BTreeMap::new(),
            lambdas: Vec::new(),
        })
        .collect();

    for (term, &width) in signature.widths().iter().enumerate() {
        let mut lambda = F::one();
        for factor in 0..width {
            let coordinate = Coordinate::new(term, factor);
            let mut combined = F::one();
            for material in materials.iter_mut() {
                let mask = random_nonzero::<F, _>(rng);
                combined = combined * mask;
                material.masks.insert(coordinate, mask);
            }
            lambda = lambda * combined.inverse();
        }

        // Additive sharing of the term's lambda across the node set.
        let mut rest = F::zero();
        for material in materials.iter_mut().skip(1) {
            let share = F::rand(rng);
            rest = rest + share;
            material.lambdas.push(share);
        }
        materials[0].lambdas.push(lambda + -rest);
    }

    for (node, material) in nodes.iter_mut().zip(materials) {
        node.install(material);
    }
    Ok(())
}

/// Blinds an encoding with the combined masks of all nodes.
///
/// The result is independent of the order of the per-node mask maps and is
/// safe to broadcast to every node.
pub fn masked_factors<F: Field>(
    encoding: &BTreeMap<Coordinate, F>,
    masks: &[&BTreeMap<Coordinate, F>],
) -> Result<BTreeMap<Coordinate, F>, NmcError> {
    encoding
        .iter()
        .map(|(&coordinate, &value)| {
            let mut masked = value;
            for node_masks in masks {
                let mask = node_masks
                    .get(&coordinate)
                    .ok_or(NmcError::UnknownCoordinate(coordinate))?;
                masked = masked * *mask;
            }
            Ok((coordinate, masked))
        })
        .collect()
}

fn random_nonzero<F: Field, R: Rng + CryptoRng>(rng: &mut R) -> F {
    // Zero has no inverse and would void the blinding.
    loop {
        let value = F::rand(rng);
        if value != F::zero() {
            break value;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    use super::*;

    fn preprocessed(signature: &Signature, parties: usize) -> Vec<Node<Mersenne61>> {
        let mut rng = ChaCha12Rng::from_seed([0; 32]);
        let mut nodes: Vec<Node<Mersenne61>> = (0..parties).map(|_| Node::new()).collect();
        preprocess(signature, nodes.iter_mut(), &mut rng).unwrap();
        nodes
    }

    /// Two clients covering a `[1, 1, 2, 2]` circuit. The plain evaluation
    /// is 7 + 5 + 3 * 2 + 11 * 4 = 62.
    fn factor_maps() -> (
        BTreeMap<Coordinate, Mersenne61>,
        BTreeMap<Coordinate, Mersenne61>,
    ) {
        let left = BTreeMap::from([
            (Coordinate::new(0, 0), Mersenne61::new(7)),
            (Coordinate::new(2, 0), Mersenne61::new(3)),
            (Coordinate::new(3, 0), Mersenne61::new(11)),
        ]);
        let right = BTreeMap::from([
            (Coordinate::new(1, 0), Mersenne61::new(5)),
            (Coordinate::new(2, 1), Mersenne61::new(2)),
            (Coordinate::new(3, 1), Mersenne61::new(4)),
        ]);
        (left, right)
    }

    #[test]
    fn test_shares_sum_to_plain_evaluation() {
        let signature = Signature::new(vec![1, 1, 2, 2]);
        let nodes = preprocessed(&signature, 3);
        let (left, right) = factor_maps();

        let left_masks: Vec<_> = nodes.iter().map(|n| n.masks(left.keys()).unwrap()).collect();
        let right_masks: Vec<_> = nodes
            .iter()
            .map(|n| n.masks(right.keys()).unwrap())
            .collect();

        let left_refs: Vec<_> = left_masks.iter().collect();
        let right_refs: Vec<_> = right_masks.iter().collect();
        let token_left = masked_factors(&left, &left_refs).unwrap();
        let token_right = masked_factors(&right, &right_refs).unwrap();

        let mut sum = Mersenne61::zero();
        for node in &nodes {
            sum = sum + node.compute(&signature, &[&token_left, &token_right]).unwrap();
        }
        assert_eq!(sum, Mersenne61::new(62));
    }

    #[test]
    fn test_masked_factors_is_node_order_independent() {
        let signature = Signature::new(vec![1, 1, 2, 2]);
        let nodes = preprocessed(&signature, 3);
        let (left, _) = factor_maps();

        let masks: Vec<_> = nodes.iter().map(|n| n.masks(left.keys()).unwrap()).collect();
        let refs: Vec<_> = masks.iter().collect();
        let mut reversed = refs.clone();
        reversed.reverse();

        assert_eq!(
            masked_factors(&left, &refs).unwrap(),
            masked_factors(&left, &reversed).unwrap()
        );
    }

    #[test]
    fn test_compute_before_preprocess() {
        let node = Node::<Mersenne61>::new();
        let signature = Signature::new(vec![1]);
        let err = node.compute(&signature, &[]).unwrap_err();
        assert!(matches!(err, NmcError::NotPreprocessed));
    }

    #[test]
    fn test_masks_before_preprocess() {
        let node = Node::<Mersenne61>::new();
        let coordinate = Coordinate::new(0, 0);
        let err = node.masks([&coordinate]).unwrap_err();
        assert!(matches!(err, NmcError::NotPreprocessed));
    }

    #[test]
    fn test_masks_unknown_coordinate() {
        let signature = Signature::new(vec![1, 1]);
        let nodes = preprocessed(&signature, 2);
        let coordinate = Coordinate::new(9, 0);
        let err = nodes[0].masks([&coordinate]).unwrap_err();
        assert!(matches!(err, NmcError::UnknownCoordinate(c) if c == coordinate));
    }

    #[test]
    fn test_compute_missing_factor() {
        let signature = Signature::new(vec![1, 1]);
        let nodes = preprocessed(&signature, 2);
        let factors = BTreeMap::from([(Coordinate::new(0, 0), Mersenne61::one())]);
        let err = nodes[0].compute(&signature, &[&factors]).unwrap_err();
        assert!(matches!(err, NmcError::MissingFactor(c) if c == Coordinate::new(1, 0)));
    }

    #[test]
    fn test_preprocess_empty_node_set() {
        let mut rng = ChaCha12Rng::from_seed([0; 32]);
        let err = preprocess(
            &Signature::new(vec![1]),
            std::iter::empty::<&mut Node<Mersenne61>>(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, NmcError::EmptyNodeSet));
    }

    #[test]
    fn test_compute_signature_length_mismatch() {
        let signature = Signature::new(vec![1, 1]);
        let nodes = preprocessed(&signature, 2);
        let longer = Signature::new(vec![1, 1, 2]);
        let err = nodes[0].compute(&longer, &[]).unwrap_err();
        assert!(matches!(
            err,
            NmcError::SignatureMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }
}
