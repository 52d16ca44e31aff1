//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers and validation errors that form the
//! vocabulary shared by the culture and aggregation modules.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::{AggregateId, ResponseId, SurveyId};
