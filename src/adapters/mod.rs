//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory survey store (tests, development)
//! - `postgres` - PostgreSQL-backed reader and aggregate repository

pub mod memory;
pub mod postgres;

pub use memory::InMemorySurveyStore;
pub use postgres::{PostgresAggregateRepository, PostgresSurveyResponseReader};
