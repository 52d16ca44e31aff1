//! PostgreSQL adapters - Database implementations for the survey ports.
//!
//! - `PostgresSurveyResponseReader` - Loads surveys and parses stored responses
//! - `PostgresAggregateRepository` - Transactional aggregate replacement and queries

mod aggregate_repository;
mod survey_response_reader;

pub use aggregate_repository::PostgresAggregateRepository;
pub use survey_response_reader::PostgresSurveyResponseReader;
