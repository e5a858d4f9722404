//! Client-side workflow orchestration.

use rand::{CryptoRng, Rng};

use nmc::{Field, Mersenne61, Signature};

use crate::{
    codec,
    config::{AuthConfig, ScoringVariant},
    encoding::Encoding,
    error::AuthError,
    node::AuthNode,
    role::{Authentication, Registration, Role},
    token::{Masks, Request, Share, Token},
};

/// Builds the circuit signature for descriptors of the given length: two
/// single-factor anchor terms followed by one two-factor term per
/// component.
///
/// The identical signature must be used at preprocessing and at every
/// subsequent authentication for that descriptor length.
pub fn descriptor_signature(length: usize) -> Signature {
    let mut widths = vec![1, 1];
    widths.resize(length + 2, 2);
    Signature::new(widths)
}

/// A preprocessed registration/authentication workflow for descriptors of a
/// fixed length.
///
/// Registration and authentication sub-flows may interleave and repeat
/// arbitrarily once the node set is preprocessed.
#[derive(Debug, Clone)]
pub struct Workflow {
    config: AuthConfig,
    signature: Signature,
    length: usize,
}

impl Workflow {
    /// Runs the preprocessing phase for `nodes` and returns a workflow for
    /// descriptors of `length` components.
    ///
    /// Every node of a set must be preprocessed together; reusing nodes
    /// across sets, or with a different length, corrupts results.
    pub fn preprocess<R: Rng + CryptoRng>(
        config: AuthConfig,
        length: usize,
        nodes: &mut [AuthNode],
        rng: &mut R,
    ) -> Result<Self, AuthError> {
        if length == 0 {
            return Err(AuthError::EmptyDescriptor);
        }

        let signature = descriptor_signature(length);
        nmc::preprocess(&signature, nodes.iter_mut().map(|node| &mut node.engine), rng)?;
        for node in nodes.iter_mut() {
            node.signature = Some(signature.clone());
        }

        tracing::debug!(length, nodes = nodes.len(), "preprocessed node set");

        Ok(Self {
            config,
            signature,
            length,
        })
    }

    /// Returns the circuit signature of this workflow.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Returns the descriptor length fixed at preprocessing time.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Encodes a descriptor into a registration request.
    ///
    /// The request holds coordinates only and is sent to every node so that
    /// masks can be generated for exactly those positions.
    pub fn registration_request(
        &self,
        descriptor: &[f64],
    ) -> Result<Request<Registration>, AuthError> {
        self.request::<Registration>(descriptor)
    }

    /// Encodes a descriptor into an authentication request.
    pub fn authentication_request(
        &self,
        descriptor: &[f64],
    ) -> Result<Request<Authentication>, AuthError> {
        self.request::<Authentication>(descriptor)
    }

    /// Masks a descriptor into a registration token.
    ///
    /// `masks` must hold the response of every node of the set, in any
    /// order.
    pub fn registration_token(
        &self,
        masks: &[Masks<Registration>],
        descriptor: &[f64],
    ) -> Result<Token<Registration>, AuthError> {
        self.token::<Registration>(masks, descriptor)
    }

    /// Masks a descriptor into an authentication token.
    pub fn authentication_token(
        &self,
        masks: &[Masks<Authentication>],
        descriptor: &[f64],
    ) -> Result<Token<Authentication>, AuthError> {
        self.token::<Authentication>(masks, descriptor)
    }

    /// Combines the shares of all nodes into the final score: a Euclidean
    /// distance or a 0..=100 match score, depending on the configured
    /// [`ScoringVariant`].
    ///
    /// Exactly one share from every preprocessed node must be supplied.
    /// This layer performs no quorum detection; a partial share set reveals
    /// an undefined value, not an error.
    pub fn reveal(&self, shares: &[Share]) -> f64 {
        let sum = shares
            .iter()
            .fold(Mersenne61::zero(), |acc, share| acc + share.0);
        let squared = codec::dequantize_squared(sum.into_inner(), self.config.precision());
        match self.config.variant() {
            ScoringVariant::EuclideanDistance => squared.sqrt(),
            ScoringVariant::MatchScore => (50.0 * (3.0 - squared)).clamp(0.0, 100.0),
        }
    }

    fn request<R: Role>(&self, descriptor: &[f64]) -> Result<Request<R>, AuthError> {
        let encoding = self.encode::<R>(descriptor)?;
        Ok(Request::new(encoding.coordinates().copied().collect()))
    }

    fn token<R: Role>(
        &self,
        masks: &[Masks<R>],
        descriptor: &[f64],
    ) -> Result<Token<R>, AuthError> {
        let encoding = self.encode::<R>(descriptor)?;
        let mask_maps: Vec<_> = masks.iter().map(Masks::inner).collect();
        let factors = nmc::masked_factors(&encoding.to_field(), &mask_maps)?;
        Ok(Token::new(factors))
    }

    fn encode<R: Role>(&self, descriptor: &[f64]) -> Result<Encoding, AuthError> {
        if descriptor.len() != self.length {
            return Err(AuthError::DimensionMismatch {
                expected: self.length,
                actual: descriptor.len(),
            });
        }
        Encoding::new::<R>(descriptor, &self.config)
    }
}
