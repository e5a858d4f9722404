//! Request, mask, token, and share containers.

use std::{collections::BTreeMap, marker::PhantomData};

use serde::{Deserialize, Serialize};

use nmc::{Coordinate, Mersenne61};

use crate::role::Role;

/// The set of coordinates a descriptor encoding needs masks for.
///
/// A request carries positions only, never values, and is safe to send to
/// every node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Request<R> {
    coordinates: Vec<Coordinate>,
    _role: PhantomData<R>,
}

impl<R: Role> Request<R> {
    pub(crate) fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            coordinates,
            _role: PhantomData,
        }
    }

    /// The requested coordinates.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }
}

/// One node's blinding masks for a request.
#[derive(Clone, Serialize, Deserialize)]
pub struct Masks<R> {
    masks: BTreeMap<Coordinate, Mersenne61>,
    _role: PhantomData<R>,
}

impl<R: Role> Masks<R> {
    pub(crate) fn new(masks: BTreeMap<Coordinate, Mersenne61>) -> Self {
        Self {
            masks,
            _role: PhantomData,
        }
    }

    pub(crate) fn inner(&self) -> &BTreeMap<Coordinate, Mersenne61> {
        &self.masks
    }
}

impl<R> std::fmt::Debug for Masks<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Masks").finish_non_exhaustive()
    }
}

/// The masked encoding of a descriptor.
///
/// A token is safe to broadcast to all nodes; it is meant for a single
/// logical use per authentication attempt.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token<R> {
    factors: BTreeMap<Coordinate, Mersenne61>,
    _role: PhantomData<R>,
}

impl<R: Role> Token<R> {
    pub(crate) fn new(factors: BTreeMap<Coordinate, Mersenne61>) -> Self {
        Self {
            factors,
            _role: PhantomData,
        }
    }

    pub(crate) fn factors(&self) -> &BTreeMap<Coordinate, Mersenne61> {
        &self.factors
    }
}

/// One node's additive share of the revealed score.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Share(pub(crate) Mersenne61);

impl Share {
    /// Returns the underlying field element.
    pub fn to_inner(self) -> Mersenne61 {
        self.0
    }
}

impl std::fmt::Debug for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Share").field(&"..").finish()
    }
}
