//! Aggregation handlers.
//!
//! `ComputeAggregatesHandler` rebuilds a survey's aggregates; the query
//! handlers serve them to dashboards and report generators.

mod compute_aggregates;
mod get_aggregates;
mod get_leadership_comparison;
mod survey_locks;

pub use compute_aggregates::{
    ComputeAggregatesCommand, ComputeAggregatesHandler, ComputeAggregatesResult,
};
pub use get_aggregates::{GetAggregatesHandler, GetAggregatesQuery, GetAggregatesResult};
pub use get_leadership_comparison::{
    GetLeadershipComparisonHandler, GetLeadershipComparisonQuery,
};
pub use survey_locks::SurveyLocks;
