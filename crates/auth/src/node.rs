//! The per-party node adapter.

use nmc::{Mersenne61, Signature};

use crate::{
    error::AuthError,
    role::{Authentication, Registration, Role},
    token::{Masks, Request, Share, Token},
};

/// A computation party of the authentication workflow.
///
/// Wraps a masked-computation engine node together with the circuit
/// signature installed at preprocessing time. The signature is an explicit
/// field: every operation fails with [`AuthError::NotPreprocessed`] before
/// preprocessing.
#[derive(Debug, Default)]
pub struct AuthNode {
    pub(crate) engine: nmc::Node<Mersenne61>,
    pub(crate) signature: Option<Signature>,
}

impl AuthNode {
    /// Creates a node without preprocessing material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the node is ready to serve a workflow.
    pub fn is_preprocessed(&self) -> bool {
        self.signature.is_some()
    }

    /// Returns this node's blinding masks for a request.
    pub fn masks<R: Role>(&self, request: &Request<R>) -> Result<Masks<R>, AuthError> {
        if self.signature.is_none() {
            return Err(AuthError::NotPreprocessed);
        }
        let masks = self.engine.masks(request.coordinates())?;
        Ok(Masks::new(masks))
    }

    /// Computes this node's share of the score for a registration and an
    /// authentication token.
    ///
    /// Token pairs of many independent sessions may be served within one
    /// preprocessing epoch, as long as the descriptor length is unchanged;
    /// no re-preprocessing is required per attempt.
    pub fn authenticate(
        &self,
        registration: &Token<Registration>,
        authentication: &Token<Authentication>,
    ) -> Result<Share, AuthError> {
        let signature = self.signature.as_ref().ok_or(AuthError::NotPreprocessed)?;
        tracing::trace!("computing share for token pair");
        let share = self
            .engine
            .compute(signature, &[registration.factors(), authentication.factors()])?;
        Ok(Share(share))
    }
}
