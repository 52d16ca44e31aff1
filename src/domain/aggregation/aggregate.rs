//! Persisted aggregate rows and their read-time view.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{SliceKey, SliceScores};
use crate::domain::culture::{CultureDimension, ScoreVector};
use crate::domain::foundation::{AggregateId, SurveyId};

/// Averaged scores for one slice of one survey, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRecord {
    pub id: AggregateId,
    pub survey_id: SurveyId,
    pub slice_key: SliceKey,
    pub slice_label: String,
    pub current: ScoreVector,
    pub preferred: ScoreVector,
    pub delta: ScoreVector,
    pub n: u32,
}

impl AggregateRecord {
    /// Creates a record for `key` with a fresh identifier.
    pub fn new(survey_id: SurveyId, key: SliceKey, scores: SliceScores) -> Self {
        let slice_label = key.label();
        Self {
            id: AggregateId::new(),
            survey_id,
            slice_key: key,
            slice_label,
            current: scores.current,
            preferred: scores.preferred,
            delta: scores.delta,
            n: scores.n,
        }
    }

    /// Display order: slice key text, then label.
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        a.slice_key
            .to_string()
            .cmp(&b.slice_key.to_string())
            .then_with(|| a.slice_label.cmp(&b.slice_label))
    }
}

/// Per-dimension alignment between current and preferred culture.
///
/// 1 means no gap, 0 means a gap of 100 points or more.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CongruenceIndicators(ScoreVector);

impl CongruenceIndicators {
    /// Derives indicators from a delta vector: `max(0, 1 - |delta| / 100)`.
    pub fn from_delta(delta: &ScoreVector) -> Self {
        Self(ScoreVector::from_fn(|d| {
            (1.0 - delta.get(d).abs() / 100.0).clamp(0.0, 1.0)
        }))
    }

    /// Returns the indicator for a dimension.
    pub fn get(&self, dimension: CultureDimension) -> f64 {
        self.0.get(dimension)
    }
}

/// An aggregate as handed to dashboards and report generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateData {
    #[serde(flatten)]
    pub record: AggregateRecord,
    /// `n` over the survey's total response count.
    pub participation_rate: f64,
    pub congruence_indicators: CongruenceIndicators,
}

impl AggregateData {
    /// Annotates a record with read-time indicators.
    pub fn from_record(record: AggregateRecord, total_responses: u64) -> Self {
        let participation_rate = if total_responses == 0 {
            0.0
        } else {
            f64::from(record.n) / total_responses as f64
        };
        let congruence_indicators = CongruenceIndicators::from_delta(&record.delta);
        Self {
            record,
            participation_rate,
            congruence_indicators,
        }
    }

    /// Dimensions ordered by absolute gap, largest first.
    ///
    /// Recommendation logic works down this list; ties keep canonical order.
    pub fn largest_gaps(&self) -> Vec<(CultureDimension, f64)> {
        let mut gaps: Vec<(CultureDimension, f64)> = self.record.delta.iter().collect();
        gaps.sort_by(|a, b| b.1.abs().partial_cmp(&a.1.abs()).unwrap_or(Ordering::Equal));
        gaps
    }
}
