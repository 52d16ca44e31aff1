//! K-anonymity threshold value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minimum number of responses a demographic slice needs before any
/// statistic about it may be stored or shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct KAnonymityThreshold(u32);

impl KAnonymityThreshold {
    /// Production threshold.
    pub const DEFAULT: KAnonymityThreshold = KAnonymityThreshold(7);

    /// Upper bound accepted from configuration.
    pub const MAX: u32 = 1000;

    /// Creates a threshold, rejecting 0 and absurdly large values.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 || value > Self::MAX {
            return Err(ValidationError::ThresholdOutOfRange {
                value,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// True when a group of `n` responses may be exposed.
    pub fn admits(&self, n: u32) -> bool {
        n >= self.0
    }
}

impl Default for KAnonymityThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for KAnonymityThreshold {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<KAnonymityThreshold> for u32 {
    fn from(threshold: KAnonymityThreshold) -> Self {
        threshold.0
    }
}

impl fmt::Display for KAnonymityThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
