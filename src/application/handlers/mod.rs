//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod aggregation;

pub use aggregation::{
    ComputeAggregatesCommand, ComputeAggregatesHandler, ComputeAggregatesResult,
    GetAggregatesHandler, GetAggregatesQuery, GetAggregatesResult,
    GetLeadershipComparisonHandler, GetLeadershipComparisonQuery, SurveyLocks,
};
