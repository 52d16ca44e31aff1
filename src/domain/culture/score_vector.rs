//! ScoreVector value object - one point allocation across the four dimensions.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::CultureDimension;

/// Scores keyed by culture dimension.
///
/// Upstream allocations sum to 100, but that is not enforced here: the
/// aggregation only needs per-dimension values, and absent values count as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreVector {
    #[serde(rename = "Clan", default)]
    pub clan: f64,
    #[serde(rename = "Adhocracy", default)]
    pub adhocracy: f64,
    #[serde(rename = "Market", default)]
    pub market: f64,
    #[serde(rename = "Hierarchy", default)]
    pub hierarchy: f64,
}

impl ScoreVector {
    /// Creates a vector from explicit values in canonical order.
    pub fn new(clan: f64, adhocracy: f64, market: f64, hierarchy: f64) -> Self {
        Self {
            clan,
            adhocracy,
            market,
            hierarchy,
        }
    }

    /// Builds a vector by evaluating `f` for every dimension.
    pub fn from_fn(mut f: impl FnMut(CultureDimension) -> f64) -> Self {
        Self {
            clan: f(CultureDimension::Clan),
            adhocracy: f(CultureDimension::Adhocracy),
            market: f(CultureDimension::Market),
            hierarchy: f(CultureDimension::Hierarchy),
        }
    }

    /// Returns the value for a dimension.
    pub fn get(&self, dimension: CultureDimension) -> f64 {
        match dimension {
            CultureDimension::Clan => self.clan,
            CultureDimension::Adhocracy => self.adhocracy,
            CultureDimension::Market => self.market,
            CultureDimension::Hierarchy => self.hierarchy,
        }
    }

    /// Iterates `(dimension, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CultureDimension, f64)> + '_ {
        CultureDimension::all().iter().map(move |d| (*d, self.get(*d)))
    }

    /// Parses a vector from its stored text form.
    ///
    /// Returns `None` when the text is blank, not JSON, or not a JSON object;
    /// the response is then treated as missing this vector.
    pub fn parse_stored(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        let value: JsonValue = serde_json::from_str(text).ok()?;
        Self::from_json(&value)
    }

    /// Reads a vector from a JSON object, treating unusable dimension values as 0.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self::from_fn(|dimension| {
            object
                .get(dimension.key())
                .and_then(numeric_value)
                .unwrap_or(0.0)
        }))
    }
}

fn numeric_value(value: &JsonValue) -> Option<f64> {
    let number = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_well_formed_vector() {
        let v = ScoreVector::parse_stored(
            r#"{"Clan":40,"Adhocracy":30,"Market":20,"Hierarchy":10}"#,
        )
        .unwrap();
        assert_eq!(v, ScoreVector::new(40.0, 30.0, 20.0, 10.0));
    }

    #[test]
    fn missing_dimensions_count_as_zero() {
        let v = ScoreVector::parse_stored(r#"{"Clan":55.5}"#).unwrap();
        assert_eq!(v.clan, 55.5);
        assert_eq!(v.adhocracy, 0.0);
        assert_eq!(v.market, 0.0);
        assert_eq!(v.hierarchy, 0.0);
    }

    #[test]
    fn malformed_dimension_values_count_as_zero() {
        let v = ScoreVector::from_json(&json!({
            "Clan": "25",
            "Adhocracy": "lots",
            "Market": null,
            "Hierarchy": [1, 2]
        }))
        .unwrap();
        assert_eq!(v, ScoreVector::new(25.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn non_finite_strings_count_as_zero() {
        let v = ScoreVector::from_json(&json!({"Clan": "NaN", "Market": "inf"})).unwrap();
        assert_eq!(v.clan, 0.0);
        assert_eq!(v.market, 0.0);
    }

    #[test]
    fn invalid_text_is_treated_as_missing() {
        assert!(ScoreVector::parse_stored("").is_none());
        assert!(ScoreVector::parse_stored("not json").is_none());
        assert!(ScoreVector::parse_stored("[40, 30, 20, 10]").is_none());
        assert!(ScoreVector::parse_stored("null").is_none());
    }

    #[test]
    fn iter_follows_canonical_order() {
        let v = ScoreVector::new(1.0, 2.0, 3.0, 4.0);
        let values: Vec<f64> = v.iter().map(|(_, value)| value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn serializes_with_dimension_keys() {
        let v = ScoreVector::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["Clan"], 1.0);
        assert_eq!(json["Hierarchy"], 4.0);
    }
}
