//! GetAggregatesHandler - Query handler for a survey's displayable aggregates.
//!
//! Returns privacy-safe aggregates annotated with participation rate and
//! congruence indicators, computed at read time.

use std::sync::Arc;

use tracing::warn;

use crate::domain::aggregation::{AggregateData, AggregateRecord, KAnonymityThreshold};
use crate::domain::foundation::SurveyId;
use crate::ports::{AggregateRepository, AggregationError, SurveyResponseReader};

/// Query for the aggregates of one survey.
#[derive(Debug, Clone)]
pub struct GetAggregatesQuery {
    pub survey_id: SurveyId,
}

/// Result of a successful aggregates query; empty means "no data yet".
pub type GetAggregatesResult = Vec<AggregateData>;

/// Handler for reading aggregates.
#[derive(Clone)]
pub struct GetAggregatesHandler {
    reader: Arc<dyn SurveyResponseReader>,
    repository: Arc<dyn AggregateRepository>,
    threshold: KAnonymityThreshold,
}

impl GetAggregatesHandler {
    pub fn new(
        reader: Arc<dyn SurveyResponseReader>,
        repository: Arc<dyn AggregateRepository>,
        threshold: KAnonymityThreshold,
    ) -> Self {
        Self {
            reader,
            repository,
            threshold,
        }
    }

    pub async fn handle(
        &self,
        query: GetAggregatesQuery,
    ) -> Result<GetAggregatesResult, AggregationError> {
        // Aggregates of a vanished survey are orphans and stay invisible.
        let Some(total_responses) = self.reader.count_responses(&query.survey_id).await? else {
            return Ok(Vec::new());
        };

        let mut records = self
            .repository
            .find_by_survey(&query.survey_id, self.threshold.value())
            .await?;

        let before = records.len();
        records.retain(|r| self.threshold.admits(r.n));
        if records.len() != before {
            warn!(
                survey_id = %query.survey_id,
                dropped = before - records.len(),
                "Store returned aggregates below the k-anonymity threshold"
            );
        }

        records.sort_by(AggregateRecord::display_order);

        Ok(records
            .into_iter()
            .map(|record| AggregateData::from_record(record, total_responses))
            .collect())
    }
}
