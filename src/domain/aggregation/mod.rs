//! Aggregation - privacy-filtered culture statistics.
//!
//! Pure domain services with no I/O:
//! - `SliceScores` - mean/delta computation shared by every aggregate
//! - `generate_slices` - demographic candidates gated by `KAnonymityThreshold`
//! - `AggregationEngine` - whole-org plus slice aggregates for one survey
//! - `AggregateData` / `CongruenceIndicators` - read-time view for consumers
//! - `LeadershipComparison` - leadership slice vs. whole organization

mod aggregate;
mod engine;
mod leadership;
mod scoring;
mod slice;
mod threshold;

pub use aggregate::{AggregateData, AggregateRecord, CongruenceIndicators};
pub use engine::{AggregationEngine, AggregationOutcome, SkippedSlice};
pub use leadership::{LaborUnitLeadershipMatcher, LeadershipComparison, LeadershipSliceMatcher};
pub use scoring::{round2, SliceScores};
pub use slice::{generate_slices, DemographicSlice, SliceKey};
pub use threshold::KAnonymityThreshold;
