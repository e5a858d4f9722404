use nmc::NmcError;

/// An error in the biometric encoding and orchestration layer.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("descriptor length must be at least 1")]
    EmptyDescriptor,
    #[error("descriptor has {actual} components but the node set was preprocessed for {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("descriptor component {index} is not finite")]
    NonFiniteInput { index: usize },
    #[error("quantized descriptor exceeds the field's safe range")]
    FieldOverflow,
    #[error("node has not been preprocessed")]
    NotPreprocessed,
    #[error(transparent)]
    Nmc(#[from] NmcError),
}
