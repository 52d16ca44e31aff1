use async_trait::async_trait;

use super::AggregationError;
use crate::domain::culture::SurveyResponses;
use crate::domain::foundation::SurveyId;

/// Read-only port for survey responses
#[async_trait]
pub trait SurveyResponseReader: Send + Sync {
    /// Loads the survey with all of its responses, or `None` if it does not exist.
    async fn load_survey_with_responses(
        &self,
        survey_id: &SurveyId,
    ) -> Result<Option<SurveyResponses>, AggregationError>;

    /// Total responses submitted to the survey, or `None` if it does not exist.
    async fn count_responses(&self, survey_id: &SurveyId) -> Result<Option<u64>, AggregationError>;
}
