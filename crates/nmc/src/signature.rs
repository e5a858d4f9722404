//! The shape of a masked sum-of-products circuit.

use serde::{Deserialize, Serialize};

/// A coordinate of a circuit: a term index together with the index of a
/// factor within that term.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Index of the term in the sum.
    pub term: usize,
    /// Index of the factor within the term.
    pub factor: usize,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(term: usize, factor: usize) -> Self {
        Self { term, factor }
    }
}

/// The shape descriptor of a circuit: the number of factors of every term of
/// the sum-of-products expression, in term order.
///
/// All parties of a node set must preprocess and compute with an identical
/// signature. The engine does not cross-validate signatures between nodes; a
/// value-level mismatch silently corrupts results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(Vec<usize>);

impl Signature {
    /// Creates a signature from per-term factor counts.
    pub fn new(widths: Vec<usize>) -> Self {
        Self(widths)
    }

    /// Returns the number of terms.
    pub fn terms(&self) -> usize {
        self.0.len()
    }

    /// Returns the per-term factor counts.
    pub fn widths(&self) -> &[usize] {
        &self.0
    }
}
