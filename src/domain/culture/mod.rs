//! Culture assessment vocabulary.
//!
//! OCAI dimensions, score vectors, demographic answers and the response
//! records the aggregation engine consumes.

mod demographics;
mod dimension;
mod response;
mod score_vector;

pub use demographics::{DemographicField, Demographics, PREFER_NOT_TO_SAY};
pub use dimension::CultureDimension;
pub use response::{ResponseRecord, StoredResponse, SurveyResponses};
pub use score_vector::ScoreVector;
