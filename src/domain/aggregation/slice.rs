//! Slice keys and demographic slice generation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::KAnonymityThreshold;
use crate::domain::culture::{DemographicField, ResponseRecord, PREFER_NOT_TO_SAY};
use crate::domain::foundation::ValidationError;

const WHOLE_ORG_KEY: &str = "whole_org";
const WHOLE_ORG_LABEL: &str = "Whole Organization";

/// Identifies the group of responses an aggregate describes.
///
/// Stored as text: `whole_org` or `<field>:<value>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SliceKey {
    WholeOrg,
    Demographic {
        field: DemographicField,
        value: String,
    },
}

impl SliceKey {
    /// Creates a demographic slice key.
    pub fn demographic(field: DemographicField, value: impl Into<String>) -> Self {
        SliceKey::Demographic {
            field,
            value: value.into(),
        }
    }

    /// True for the whole-organization slice.
    pub fn is_whole_org(&self) -> bool {
        matches!(self, SliceKey::WholeOrg)
    }

    /// Human-readable label, e.g. `Department: Engineering`.
    pub fn label(&self) -> String {
        match self {
            SliceKey::WholeOrg => WHOLE_ORG_LABEL.to_string(),
            SliceKey::Demographic { field, value } => format!("{}: {}", field.label(), value),
        }
    }
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceKey::WholeOrg => write!(f, "{}", WHOLE_ORG_KEY),
            SliceKey::Demographic { field, value } => write!(f, "{}:{}", field.key(), value),
        }
    }
}

impl FromStr for SliceKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == WHOLE_ORG_KEY {
            return Ok(SliceKey::WholeOrg);
        }
        let (field, value) = s
            .split_once(':')
            .ok_or_else(|| ValidationError::malformed_slice_key(s, "missing ':' separator"))?;
        if value.is_empty() {
            return Err(ValidationError::malformed_slice_key(s, "empty value"));
        }
        Ok(SliceKey::demographic(field.parse()?, value))
    }
}

impl TryFrom<String> for SliceKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SliceKey> for String {
    fn from(key: SliceKey) -> Self {
        key.to_string()
    }
}

/// A candidate grouping for aggregation; computed, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicSlice {
    pub field: DemographicField,
    pub label: String,
    pub value: String,
    /// Responses holding this value, scored or not.
    pub count: u32,
    /// `count` over all responses in the survey.
    pub participation_rate: f64,
}

impl DemographicSlice {
    /// Key of the aggregate this slice produces.
    pub fn key(&self) -> SliceKey {
        SliceKey::demographic(self.field, self.value.clone())
    }

    /// True when `response` belongs to this slice.
    pub fn contains(&self, response: &ResponseRecord) -> bool {
        response.demographics.get(self.field) == Some(self.value.as_str())
    }
}

/// Tallies demographic answers and returns every (field, value) pair
/// reaching the threshold.
///
/// All responses are tallied, including unscored ones. Empty answers and
/// `prefer-not-to-say` are never counted. Output is ordered by field, then
/// value.
pub fn generate_slices(
    responses: &[ResponseRecord],
    threshold: KAnonymityThreshold,
) -> Vec<DemographicSlice> {
    let total = responses.len();
    let mut slices = Vec::new();

    for field in DemographicField::all() {
        let mut tally: BTreeMap<&str, u32> = BTreeMap::new();
        for response in responses {
            match response.demographics.get(*field) {
                Some(value) if !value.is_empty() && value != PREFER_NOT_TO_SAY => {
                    *tally.entry(value).or_insert(0) += 1;
                }
                _ => {}
            }
        }

        slices.extend(
            tally
                .into_iter()
                .filter(|(_, count)| threshold.admits(*count))
                .map(|(value, count)| DemographicSlice {
                    field: *field,
                    label: field.label().to_string(),
                    value: value.to_string(),
                    count,
                    participation_rate: f64::from(count) / total as f64,
                }),
        );
    }

    slices
}
