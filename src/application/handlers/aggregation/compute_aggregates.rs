//! ComputeAggregatesHandler - Command handler for recomputing a survey's aggregates.
//!
//! Loads every response of the survey, runs the aggregation engine and
//! replaces the stored aggregate set in one atomic step. Recomputes of the
//! same survey are serialized.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::SurveyLocks;
use crate::domain::aggregation::{AggregateRecord, AggregationEngine, SkippedSlice};
use crate::domain::foundation::SurveyId;
use crate::ports::{AggregateRepository, AggregationError, SurveyResponseReader};

/// Command to recompute all aggregates of a survey.
#[derive(Debug, Clone)]
pub struct ComputeAggregatesCommand {
    pub survey_id: SurveyId,
}

/// Result of a successful recompute.
#[derive(Debug, Clone)]
pub struct ComputeAggregatesResult {
    pub survey_id: SurveyId,
    /// The stored replacement set.
    pub records: Vec<AggregateRecord>,
    /// `n` of the whole-organization aggregate; `None` when no response was scored.
    pub whole_org_n: Option<u32>,
    /// Number of demographic slices stored.
    pub slice_count: usize,
    /// Candidates dropped after the scored-response join.
    pub skipped: Vec<SkippedSlice>,
    pub computed_at: DateTime<Utc>,
}

/// Handler for recomputing aggregates.
pub struct ComputeAggregatesHandler {
    reader: Arc<dyn SurveyResponseReader>,
    repository: Arc<dyn AggregateRepository>,
    engine: AggregationEngine,
    locks: SurveyLocks,
}

impl ComputeAggregatesHandler {
    pub fn new(
        reader: Arc<dyn SurveyResponseReader>,
        repository: Arc<dyn AggregateRepository>,
        engine: AggregationEngine,
    ) -> Self {
        Self {
            reader,
            repository,
            engine,
            locks: SurveyLocks::new(),
        }
    }

    /// Shares locks with other handler instances in the same process.
    pub fn with_locks(mut self, locks: SurveyLocks) -> Self {
        self.locks = locks;
        self
    }

    pub async fn handle(
        &self,
        cmd: ComputeAggregatesCommand,
    ) -> Result<ComputeAggregatesResult, AggregationError> {
        let _guard = self.locks.acquire(&cmd.survey_id).await;

        // 1. Load the survey with every response
        let survey = self
            .reader
            .load_survey_with_responses(&cmd.survey_id)
            .await?
            .ok_or_else(|| AggregationError::SurveyNotFound(cmd.survey_id.clone()))?;

        // 2. Compute whole-org and slice aggregates
        let outcome = self.engine.compute(&survey);

        // 3. Replace the stored set atomically
        self.repository
            .replace_for_survey(&cmd.survey_id, &outcome.records)
            .await?;

        let whole_org_n = outcome.whole_org_n();
        let slice_count = outcome.slice_count();

        info!(
            survey_id = %cmd.survey_id,
            responses = survey.responses.len(),
            whole_org_n = ?whole_org_n,
            slices = slice_count,
            skipped = outcome.skipped.len(),
            threshold = %self.engine.threshold(),
            "Recomputed survey aggregates"
        );

        Ok(ComputeAggregatesResult {
            survey_id: cmd.survey_id,
            records: outcome.records,
            whole_org_n,
            slice_count,
            skipped: outcome.skipped,
            computed_at: Utc::now(),
        })
    }
}
