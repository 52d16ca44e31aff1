//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the storage collaborator. Adapters implement these ports.
//!
//! - `SurveyResponseReader` - Loads surveys and their raw responses
//! - `AggregateRepository` - Persists and queries computed aggregates

mod aggregate_repository;
mod survey_response_reader;

pub use aggregate_repository::{AggregateRepository, AggregationError};
pub use survey_response_reader::SurveyResponseReader;
