//! Type-level workflow roles.

use serde::{Deserialize, Serialize};

/// A workflow role: the side of the bilinear scoring function a descriptor
/// is encoded for.
///
/// Roles are type-level markers so that registration and authentication
/// requests, masks, and tokens cannot be interchanged. Implemented only by
/// [`Registration`] and [`Authentication`]; the constants pin the circuit
/// layout and must not be redefined.
pub trait Role: Send + Sync + 'static {
    /// The circuit term holding this role's anchor (sum of squares).
    const ANCHOR_TERM: usize;
    /// The factor column of this role's component coefficients.
    const COLUMN: usize;
}

/// The registration role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Registration;

/// The authentication role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Authentication;

impl Role for Registration {
    const ANCHOR_TERM: usize = 0;
    const COLUMN: usize = 0;
}

impl Role for Authentication {
    const ANCHOR_TERM: usize = 1;
    const COLUMN: usize = 1;
}
