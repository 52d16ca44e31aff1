//! In-memory adapters for tests and local development.

mod survey_store;

pub use survey_store::InMemorySurveyStore;
