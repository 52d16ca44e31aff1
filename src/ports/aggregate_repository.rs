use async_trait::async_trait;

use crate::domain::aggregation::AggregateRecord;
use crate::domain::foundation::SurveyId;

/// Persistence port for computed aggregates.
#[async_trait]
pub trait AggregateRepository: Send + Sync {
    /// Atomically replaces every aggregate of the survey with `records`.
    ///
    /// Readers observe either the old set or the new set, never an empty
    /// intermediate state.
    async fn replace_for_survey(
        &self,
        survey_id: &SurveyId,
        records: &[AggregateRecord],
    ) -> Result<(), AggregationError>;

    /// Deletes every aggregate of the survey.
    async fn delete_for_survey(&self, survey_id: &SurveyId) -> Result<(), AggregationError>;

    /// Inserts a single aggregate.
    async fn create(&self, record: &AggregateRecord) -> Result<(), AggregationError>;

    /// Aggregates of the survey with `n >= min_n`, ordered by slice key then label.
    async fn find_by_survey(
        &self,
        survey_id: &SurveyId,
        min_n: u32,
    ) -> Result<Vec<AggregateRecord>, AggregationError>;
}

/// Errors that can occur while computing or reading aggregates
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("Survey not found: {0}")]
    SurveyNotFound(SurveyId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for AggregationError {
    fn from(err: sqlx::Error) -> Self {
        AggregationError::Database(err.to_string())
    }
}
