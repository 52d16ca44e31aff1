//! PostgreSQL implementation of SurveyResponseReader.
//!
//! Score vectors and demographics are stored as serialized text and are
//! parsed into typed records here, before reaching the domain.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::warn;

use crate::domain::culture::{StoredResponse, SurveyResponses};
use crate::domain::foundation::SurveyId;
use crate::ports::{AggregationError, SurveyResponseReader};

/// PostgreSQL implementation of SurveyResponseReader.
#[derive(Clone)]
pub struct PostgresSurveyResponseReader {
    pool: PgPool,
}

impl PostgresSurveyResponseReader {
    /// Creates a new PostgresSurveyResponseReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn survey_exists(&self, survey_id: &SurveyId) -> Result<bool, AggregationError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM surveys WHERE id = $1")
            .bind(survey_id.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }
}

#[async_trait]
impl SurveyResponseReader for PostgresSurveyResponseReader {
    async fn load_survey_with_responses(
        &self,
        survey_id: &SurveyId,
    ) -> Result<Option<SurveyResponses>, AggregationError> {
        if !self.survey_exists(survey_id).await? {
            return Ok(None);
        }

        let rows = sqlx::query(
            r#"
            SELECT id, survey_id, now_scores, preferred_scores, demographics
            FROM survey_responses
            WHERE survey_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(survey_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut responses = Vec::with_capacity(rows.len());
        for row in rows {
            let stored = StoredResponse {
                id: row.get("id"),
                survey_id: row.get("survey_id"),
                now_scores: row.get("now_scores"),
                preferred_scores: row.get("preferred_scores"),
                demographics: row.get("demographics"),
            };
            match stored.parse() {
                Ok(response) => responses.push(response),
                Err(e) => warn!(survey_id = %survey_id, error = %e, "Skipping unreadable response row"),
            }
        }

        Ok(Some(SurveyResponses::new(survey_id.clone(), responses)))
    }

    async fn count_responses(&self, survey_id: &SurveyId) -> Result<Option<u64>, AggregationError> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT (SELECT COUNT(*) FROM survey_responses r WHERE r.survey_id = s.id)
            FROM surveys s
            WHERE s.id = $1
            "#,
        )
        .bind(survey_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(count,)| count.max(0) as u64))
    }
}
