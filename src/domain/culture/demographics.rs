//! Demographic fields and the per-response demographics record.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Sentinel answer for respondents who declined to disclose a field.
///
/// Never forms a slice of its own.
pub const PREFER_NOT_TO_SAY: &str = "prefer-not-to-say";

/// The demographic fields that may be sliced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DemographicField {
    Department,
    Team,
    Tenure,
    Location,
    Gender,
    LaborUnit,
    RaceEthnicity,
}

impl DemographicField {
    /// Returns all sliceable fields in slicing order.
    pub fn all() -> &'static [DemographicField] {
        &[
            DemographicField::Department,
            DemographicField::Team,
            DemographicField::Tenure,
            DemographicField::Location,
            DemographicField::Gender,
            DemographicField::LaborUnit,
            DemographicField::RaceEthnicity,
        ]
    }

    /// Returns the key used in stored demographics and slice keys.
    pub fn key(&self) -> &'static str {
        match self {
            DemographicField::Department => "department",
            DemographicField::Team => "team",
            DemographicField::Tenure => "tenure",
            DemographicField::Location => "location",
            DemographicField::Gender => "gender",
            DemographicField::LaborUnit => "laborUnit",
            DemographicField::RaceEthnicity => "raceEthnicity",
        }
    }

    /// Returns the human-readable label used in slice labels.
    pub fn label(&self) -> &'static str {
        match self {
            DemographicField::Department => "Department",
            DemographicField::Team => "Team",
            DemographicField::Tenure => "Tenure",
            DemographicField::Location => "Location",
            DemographicField::Gender => "Gender",
            DemographicField::LaborUnit => "Labor Unit",
            DemographicField::RaceEthnicity => "Race Ethnicity",
        }
    }
}

impl fmt::Display for DemographicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for DemographicField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DemographicField::all()
            .iter()
            .find(|field| field.key() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownDemographicField(s.to_string()))
    }
}

/// Free-form demographic answers of one respondent (field key -> value).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Demographics(BTreeMap<String, String>);

impl Demographics {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: DemographicField, value: impl Into<String>) -> Self {
        self.0.insert(field.key().to_string(), value.into());
        self
    }

    /// Returns the answer for a sliceable field, if present.
    pub fn get(&self, field: DemographicField) -> Option<&str> {
        self.0.get(field.key()).map(String::as_str)
    }

    /// Returns true when no answers are recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses demographics from their stored text form.
    ///
    /// Anything that is not a JSON object yields an empty record.
    pub fn parse_stored(text: &str) -> Self {
        serde_json::from_str::<JsonValue>(text)
            .map(|value| Self::from_json(&value))
            .unwrap_or_default()
    }

    /// Reads demographics from a JSON object.
    ///
    /// Numbers and booleans are kept as their text; nested values and nulls
    /// are dropped.
    pub fn from_json(value: &JsonValue) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let answers = object
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    JsonValue::String(s) => s.clone(),
                    JsonValue::Number(n) => n.to_string(),
                    JsonValue::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key.clone(), text))
            })
            .collect();
        Self(answers)
    }
}
