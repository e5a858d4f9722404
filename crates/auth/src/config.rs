//! Workflow configuration.

use derive_builder::Builder;

/// Upper bound on the fixed-point precision.
///
/// An accumulated squared term carries twice the fractional bits, so the
/// bound keeps the rescaling divisor well inside an `f64` and leaves the
/// square-sum budget of the encoder reachable for realistic descriptors.
const MAX_PRECISION: u32 = 24;

/// The scoring function evaluated by the node set.
///
/// Selected once per deployment; both the encoders and [`reveal`] must use
/// the same variant.
///
/// [`reveal`]: crate::Workflow::reveal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringVariant {
    /// True Euclidean distance between the registered and the
    /// authenticating descriptor. The production default: small means
    /// similar, with well-defined thresholding semantics.
    #[default]
    EuclideanDistance,
    /// Legacy unnormalized similarity score, rescaled into a 0..=100
    /// percentage-like range. Meaningful for approximately unit-norm
    /// descriptors, where a self-match scores 100.
    MatchScore,
}

/// Authentication workflow configuration.
#[derive(Debug, Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct AuthConfig {
    /// Number of fractional bits retained when quantizing descriptor
    /// components.
    #[builder(default = "16")]
    precision: u32,
    /// The scoring function variant.
    #[builder(default)]
    variant: ScoringVariant,
}

impl AuthConfig {
    /// Creates a new builder.
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    /// Returns the fixed-point precision.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Returns the scoring variant.
    pub fn variant(&self) -> ScoringVariant {
        self.variant
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            precision: 16,
            variant: ScoringVariant::default(),
        }
    }
}

impl AuthConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(precision) = self.precision {
            if precision == 0 || precision > MAX_PRECISION {
                return Err(format!("precision must be in 1..={MAX_PRECISION}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthConfig, ScoringVariant};

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.precision(), 16);
        assert_eq!(config.variant(), ScoringVariant::EuclideanDistance);
    }

    #[test]
    fn test_builder_rejects_out_of_range_precision() {
        assert!(AuthConfig::builder().precision(0).build().is_err());
        assert!(AuthConfig::builder().precision(25).build().is_err());
        assert!(AuthConfig::builder().precision(24).build().is_ok());
    }
}
