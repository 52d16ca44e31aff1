//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, validation errors)
//! - `culture` - OCAI dimensions, score vectors, demographics and responses
//! - `aggregation` - Slice generation, scoring, k-anonymity and leadership comparison

pub mod aggregation;
pub mod culture;
pub mod foundation;
