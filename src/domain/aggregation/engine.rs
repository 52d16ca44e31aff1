//! Aggregation engine - turns a survey's responses into privacy-safe aggregates.

use serde::Serialize;
use tracing::debug;

use super::{generate_slices, AggregateRecord, KAnonymityThreshold, SliceKey, SliceScores};
use crate::domain::culture::SurveyResponses;

/// A slice candidate dropped after joining on scored responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSlice {
    pub key: SliceKey,
    /// Responses tallied for the candidate, scored or not.
    pub tallied: u32,
    /// Scored responses left after the join.
    pub scored: u32,
}

/// The complete replacement set of aggregates for one survey.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationOutcome {
    pub records: Vec<AggregateRecord>,
    pub skipped: Vec<SkippedSlice>,
}

impl AggregationOutcome {
    /// `n` of the whole-organization aggregate, if one was produced.
    pub fn whole_org_n(&self) -> Option<u32> {
        self.records
            .iter()
            .find(|r| r.slice_key.is_whole_org())
            .map(|r| r.n)
    }

    /// Number of demographic slice aggregates produced.
    pub fn slice_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !r.slice_key.is_whole_org())
            .count()
    }
}

/// Pure computation of whole-organization and demographic slice aggregates.
///
/// Every demographic aggregate it returns has `n` at or above the
/// configured threshold. Candidates are tallied over all responses; the
/// threshold is then re-applied to the scored responses of each candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationEngine {
    threshold: KAnonymityThreshold,
}

impl AggregationEngine {
    pub fn new(threshold: KAnonymityThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> KAnonymityThreshold {
        self.threshold
    }

    /// Computes every aggregate for the survey.
    pub fn compute(&self, survey: &SurveyResponses) -> AggregationOutcome {
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        if let Some(scores) = SliceScores::compute(survey.scored()) {
            records.push(AggregateRecord::new(
                survey.survey_id.clone(),
                SliceKey::WholeOrg,
                scores,
            ));
        }

        for slice in generate_slices(&survey.responses, self.threshold) {
            let members = survey.scored().filter(|r| slice.contains(r));
            match SliceScores::compute(members) {
                Some(scores) if self.threshold.admits(scores.n) => {
                    records.push(AggregateRecord::new(
                        survey.survey_id.clone(),
                        slice.key(),
                        scores,
                    ));
                }
                other => {
                    let scored = other.map(|s| s.n).unwrap_or(0);
                    debug!(
                        survey_id = %survey.survey_id,
                        slice_key = %slice.key(),
                        tallied = slice.count,
                        scored,
                        "Skipping slice below threshold after scored-response join"
                    );
                    skipped.push(SkippedSlice {
                        key: slice.key(),
                        tallied: slice.count,
                        scored,
                    });
                }
            }
        }

        AggregationOutcome { records, skipped }
    }
}
