//! Aggregation configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::logging::Environment;
use crate::domain::aggregation::KAnonymityThreshold;

/// Aggregation engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Minimum group size for any stored or displayed aggregate
    #[serde(default = "default_k_anonymity_threshold")]
    pub k_anonymity_threshold: u32,
}

impl AggregationConfig {
    /// Configured threshold as a validated domain value
    pub fn threshold(&self) -> Result<KAnonymityThreshold, ValidationError> {
        KAnonymityThreshold::new(self.k_anonymity_threshold)
            .map_err(|e| ValidationError::InvalidThreshold(e.to_string()))
    }

    /// Validate aggregation configuration
    ///
    /// Production may raise the threshold but never lower it below the default.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let threshold = self.threshold()?;
        let minimum = KAnonymityThreshold::DEFAULT;
        if *environment == Environment::Production && threshold < minimum {
            return Err(ValidationError::ThresholdBelowProductionMinimum(
                threshold.value(),
                minimum.value(),
            ));
        }
        Ok(())
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            k_anonymity_threshold: default_k_anonymity_threshold(),
        }
    }
}

fn default_k_anonymity_threshold() -> u32 {
    KAnonymityThreshold::DEFAULT.value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_is_seven() {
        let config = AggregationConfig::default();
        assert_eq!(config.threshold().unwrap().value(), 7);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = AggregationConfig {
            k_anonymity_threshold: 0,
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_lower_threshold_allowed_outside_production() {
        let config = AggregationConfig {
            k_anonymity_threshold: 3,
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Staging).is_ok());
    }

    #[test]
    fn test_lower_threshold_rejected_in_production() {
        let config = AggregationConfig {
            k_anonymity_threshold: 5,
        };
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::ThresholdBelowProductionMinimum(5, 7))
        ));
    }

    #[test]
    fn test_higher_threshold_allowed_in_production() {
        let config = AggregationConfig {
            k_anonymity_threshold: 10,
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }
}
