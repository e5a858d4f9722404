//! Privacy-preserving biometric authentication over a masked n-party
//! computation engine.
//!
//! A client registers a biometric descriptor and later authenticates
//! against it, while a set of mutually distrusting nodes jointly computes
//! the score without any single party seeing a descriptor in the clear.
//! This crate converts real-valued descriptors into fixed-point sparse
//! circuit encodings for the [`nmc`] engine and orchestrates the
//! request/mask/token/reveal lifecycle; the engine itself never learns that
//! it is scoring biometrics.
//!
//! ```
//! use biomask::{AuthConfig, AuthNode, Workflow};
//! use rand::rngs::OsRng;
//!
//! # fn main() -> Result<(), biomask::AuthError> {
//! // Three parties support the workflow.
//! let mut nodes = vec![AuthNode::new(), AuthNode::new(), AuthNode::new()];
//! let workflow = Workflow::preprocess(AuthConfig::default(), 3, &mut nodes, &mut OsRng)?;
//!
//! // Registration: request masks from every node, then derive a token.
//! let descriptor = [0.5, 0.3, 0.7];
//! let request = workflow.registration_request(&descriptor)?;
//! let masks = nodes
//!     .iter()
//!     .map(|node| node.masks(&request))
//!     .collect::<Result<Vec<_>, _>>()?;
//! let registered = workflow.registration_token(&masks, &descriptor)?;
//!
//! // Authentication: the same dance for the candidate descriptor.
//! let candidate = [0.1, 0.4, 0.8];
//! let request = workflow.authentication_request(&candidate)?;
//! let masks = nodes
//!     .iter()
//!     .map(|node| node.masks(&request))
//!     .collect::<Result<Vec<_>, _>>()?;
//! let token = workflow.authentication_token(&masks, &candidate)?;
//!
//! // Every node contributes one additive share of the distance.
//! let shares = nodes
//!     .iter()
//!     .map(|node| node.authenticate(&registered, &token))
//!     .collect::<Result<Vec<_>, _>>()?;
//! let distance = workflow.reveal(&shares);
//! assert!((distance - 0.18f64.sqrt()).abs() < 0.01);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod codec;
mod config;
mod encoding;
mod error;
mod node;
mod role;
mod token;
mod workflow;

pub use config::{AuthConfig, AuthConfigBuilder, AuthConfigBuilderError, ScoringVariant};
pub use error::AuthError;
pub use node::AuthNode;
pub use role::{Authentication, Registration, Role};
pub use token::{Masks, Request, Share, Token};
pub use workflow::{descriptor_signature, Workflow};
