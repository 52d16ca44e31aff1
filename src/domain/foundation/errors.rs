//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised while building domain values from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("k-anonymity threshold must be between 1 and {max}, got {value}")]
    ThresholdOutOfRange { value: u32, max: u32 },

    #[error("Unknown demographic field '{0}'")]
    UnknownDemographicField(String),

    #[error("Malformed slice key '{key}': {reason}")]
    MalformedSliceKey { key: String, reason: &'static str },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn malformed_slice_key(key: impl Into<String>, reason: &'static str) -> Self {
        ValidationError::MalformedSliceKey {
            key: key.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_names_the_field() {
        let err = ValidationError::empty_field("survey_id");
        assert_eq!(err.to_string(), "Field 'survey_id' cannot be empty");
    }

    #[test]
    fn threshold_out_of_range_reports_bounds() {
        let err = ValidationError::ThresholdOutOfRange { value: 0, max: 1000 };
        assert_eq!(
            err.to_string(),
            "k-anonymity threshold must be between 1 and 1000, got 0"
        );
    }

    #[test]
    fn malformed_slice_key_quotes_input() {
        let err = ValidationError::malformed_slice_key("department", "missing ':' separator");
        assert_eq!(
            err.to_string(),
            "Malformed slice key 'department': missing ':' separator"
        );
    }
}
