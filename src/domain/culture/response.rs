//! Survey responses - typed records and their stored text form.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Demographics, ScoreVector};
use crate::domain::foundation::{ResponseId, SurveyId, ValidationError};

/// One employee's completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub id: ResponseId,
    pub survey_id: SurveyId,
    /// Current-state perception.
    pub now_scores: Option<ScoreVector>,
    /// Desired-state perception.
    pub preferred_scores: Option<ScoreVector>,
    pub demographics: Demographics,
}

impl ResponseRecord {
    /// Creates a fully scored response.
    pub fn scored(
        id: ResponseId,
        survey_id: SurveyId,
        now_scores: ScoreVector,
        preferred_scores: ScoreVector,
        demographics: Demographics,
    ) -> Self {
        Self {
            id,
            survey_id,
            now_scores: Some(now_scores),
            preferred_scores: Some(preferred_scores),
            demographics,
        }
    }

    /// True when both score vectors are present; only these responses are averaged.
    pub fn is_scored(&self) -> bool {
        self.now_scores.is_some() && self.preferred_scores.is_some()
    }
}

/// A response row as persisted, with serialized text columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredResponse {
    pub id: String,
    pub survey_id: String,
    pub now_scores: Option<String>,
    pub preferred_scores: Option<String>,
    pub demographics: Option<String>,
}

impl StoredResponse {
    /// Converts the stored row into a typed record.
    ///
    /// Unreadable score text marks that vector as missing and unreadable
    /// demographics become empty; only invalid identifiers are rejected.
    pub fn parse(self) -> Result<ResponseRecord, ValidationError> {
        let id = ResponseId::new(self.id)?;
        let survey_id = SurveyId::new(self.survey_id)?;

        let now_scores = parse_scores(&id, "now_scores", self.now_scores.as_deref());
        let preferred_scores =
            parse_scores(&id, "preferred_scores", self.preferred_scores.as_deref());
        let demographics = self
            .demographics
            .as_deref()
            .map(Demographics::parse_stored)
            .unwrap_or_default();

        Ok(ResponseRecord {
            id,
            survey_id,
            now_scores,
            preferred_scores,
            demographics,
        })
    }
}

fn parse_scores(id: &ResponseId, column: &str, text: Option<&str>) -> Option<ScoreVector> {
    let text = text?;
    let parsed = ScoreVector::parse_stored(text);
    if parsed.is_none() {
        debug!(response_id = %id, column, "Unreadable score vector, treating as missing");
    }
    parsed
}

/// A survey together with every response submitted to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyResponses {
    pub survey_id: SurveyId,
    pub responses: Vec<ResponseRecord>,
}

impl SurveyResponses {
    pub fn new(survey_id: SurveyId, responses: Vec<ResponseRecord>) -> Self {
        Self {
            survey_id,
            responses,
        }
    }

    /// Responses carrying both score vectors.
    pub fn scored(&self) -> impl Iterator<Item = &ResponseRecord> {
        self.responses.iter().filter(|r| r.is_scored())
    }
}
