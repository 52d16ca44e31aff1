//! GetLeadershipComparisonHandler - Query handler pairing the leadership slice
//! with the whole organization.

use std::sync::Arc;

use super::{GetAggregatesHandler, GetAggregatesQuery};
use crate::domain::aggregation::{LeadershipComparison, LeadershipSliceMatcher};
use crate::domain::foundation::SurveyId;
use crate::ports::AggregationError;

/// Query for the leadership comparison of one survey.
#[derive(Debug, Clone)]
pub struct GetLeadershipComparisonQuery {
    pub survey_id: SurveyId,
}

/// Handler for the leadership comparison.
///
/// Which slice counts as "leadership" is decided by the injected matcher.
pub struct GetLeadershipComparisonHandler {
    aggregates: GetAggregatesHandler,
    matcher: Arc<dyn LeadershipSliceMatcher>,
}

impl GetLeadershipComparisonHandler {
    pub fn new(aggregates: GetAggregatesHandler, matcher: Arc<dyn LeadershipSliceMatcher>) -> Self {
        Self {
            aggregates,
            matcher,
        }
    }

    pub async fn handle(
        &self,
        query: GetLeadershipComparisonQuery,
    ) -> Result<LeadershipComparison, AggregationError> {
        let aggregates = self
            .aggregates
            .handle(GetAggregatesQuery {
                survey_id: query.survey_id,
            })
            .await?;

        Ok(LeadershipComparison::from_aggregates(
            aggregates,
            self.matcher.as_ref(),
        ))
    }
}
