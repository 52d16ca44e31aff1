//! In-Memory Survey Store Adapter
//!
//! Holds surveys, responses and aggregates in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::aggregation::AggregateRecord;
use crate::domain::culture::{ResponseRecord, SurveyResponses};
use crate::domain::foundation::SurveyId;
use crate::ports::{AggregateRepository, AggregationError, SurveyResponseReader};

/// In-memory implementation of both survey ports
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveyStore {
    surveys: Arc<RwLock<HashMap<SurveyId, Vec<ResponseRecord>>>>,
    aggregates: Arc<RwLock<HashMap<SurveyId, Vec<AggregateRecord>>>>,
}

impl InMemorySurveyStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a survey with no responses
    pub async fn add_survey(&self, survey_id: SurveyId) {
        self.surveys.write().await.entry(survey_id).or_default();
    }

    /// Append a response, registering its survey if needed
    pub async fn add_response(&self, response: ResponseRecord) {
        self.surveys
            .write()
            .await
            .entry(response.survey_id.clone())
            .or_default()
            .push(response);
    }

    /// Remove a survey and its responses; its aggregates are left orphaned
    pub async fn remove_survey(&self, survey_id: &SurveyId) {
        self.surveys.write().await.remove(survey_id);
    }

    /// Number of stored aggregates for a survey, regardless of `n`
    pub async fn aggregate_count(&self, survey_id: &SurveyId) -> usize {
        self.aggregates
            .read()
            .await
            .get(survey_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl SurveyResponseReader for InMemorySurveyStore {
    async fn load_survey_with_responses(
        &self,
        survey_id: &SurveyId,
    ) -> Result<Option<SurveyResponses>, AggregationError> {
        let surveys = self.surveys.read().await;
        Ok(surveys
            .get(survey_id)
            .map(|responses| SurveyResponses::new(survey_id.clone(), responses.clone())))
    }

    async fn count_responses(&self, survey_id: &SurveyId) -> Result<Option<u64>, AggregationError> {
        let surveys = self.surveys.read().await;
        Ok(surveys.get(survey_id).map(|responses| responses.len() as u64))
    }
}

#[async_trait]
impl AggregateRepository for InMemorySurveyStore {
    async fn replace_for_survey(
        &self,
        survey_id: &SurveyId,
        records: &[AggregateRecord],
    ) -> Result<(), AggregationError> {
        // Single write guard: readers never see the intermediate empty set.
        let mut aggregates = self.aggregates.write().await;
        aggregates.insert(survey_id.clone(), records.to_vec());
        Ok(())
    }

    async fn delete_for_survey(&self, survey_id: &SurveyId) -> Result<(), AggregationError> {
        self.aggregates.write().await.remove(survey_id);
        Ok(())
    }

    async fn create(&self, record: &AggregateRecord) -> Result<(), AggregationError> {
        let mut aggregates = self.aggregates.write().await;
        let rows = aggregates.entry(record.survey_id.clone()).or_default();
        if rows.iter().any(|r| r.slice_key == record.slice_key) {
            return Err(AggregationError::InvalidInput(format!(
                "Aggregate {} already exists for survey {}",
                record.slice_key, record.survey_id
            )));
        }
        rows.push(record.clone());
        Ok(())
    }

    async fn find_by_survey(
        &self,
        survey_id: &SurveyId,
        min_n: u32,
    ) -> Result<Vec<AggregateRecord>, AggregationError> {
        let aggregates = self.aggregates.read().await;
        let mut rows: Vec<AggregateRecord> = aggregates
            .get(survey_id)
            .map(|rows| rows.iter().filter(|r| r.n >= min_n).cloned().collect())
            .unwrap_or_default();
        rows.sort_by(AggregateRecord::display_order);
        Ok(rows)
    }
}
