//! Leadership vs. whole-organization comparison.

use serde::{Deserialize, Serialize};

use super::AggregateData;
use crate::domain::culture::DemographicField;

/// Decides which aggregate represents the leadership group.
pub trait LeadershipSliceMatcher: Send + Sync {
    fn is_leadership(&self, aggregate: &AggregateData) -> bool;
}

/// Matches a labor-unit slice whose label mentions "leadership".
///
/// The slice key must contain `laborUnit` and the label must contain
/// `leadership`, ignoring case.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaborUnitLeadershipMatcher;

impl LeadershipSliceMatcher for LaborUnitLeadershipMatcher {
    fn is_leadership(&self, aggregate: &AggregateData) -> bool {
        aggregate
            .record
            .slice_key
            .to_string()
            .contains(DemographicField::LaborUnit.key())
            && aggregate
                .record
                .slice_label
                .to_lowercase()
                .contains("leadership")
    }
}

/// Leadership slice alongside the whole organization. Either may be absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LeadershipComparison {
    pub leadership: Option<AggregateData>,
    pub overall: Option<AggregateData>,
}

impl LeadershipComparison {
    /// Picks the first leadership match and the whole-org aggregate.
    pub fn from_aggregates(
        aggregates: Vec<AggregateData>,
        matcher: &dyn LeadershipSliceMatcher,
    ) -> Self {
        let mut comparison = Self::default();
        for aggregate in aggregates {
            if aggregate.record.slice_key.is_whole_org() {
                if comparison.overall.is_none() {
                    comparison.overall = Some(aggregate);
                }
            } else if comparison.leadership.is_none() && matcher.is_leadership(&aggregate) {
                comparison.leadership = Some(aggregate);
            }
        }
        comparison
    }
}
