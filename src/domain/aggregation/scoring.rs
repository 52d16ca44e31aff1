//! Mean score computation shared by whole-organization and slice aggregates.

use serde::{Deserialize, Serialize};

use crate::domain::culture::{CultureDimension, ResponseRecord, ScoreVector};

/// Rounds to two decimals, half-up on the hundredths digit.
///
/// Ties go towards positive infinity, so `-0.125` becomes `-0.12`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Averaged scores for one group of responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceScores {
    pub current: ScoreVector,
    pub preferred: ScoreVector,
    /// `round2(preferred - current)` per dimension.
    pub delta: ScoreVector,
    /// Number of responses averaged.
    pub n: u32,
}

impl SliceScores {
    /// Averages every scored response in `responses`.
    ///
    /// Responses missing either vector are ignored. Returns `None` when no
    /// scored response remains.
    pub fn compute<'a>(responses: impl IntoIterator<Item = &'a ResponseRecord>) -> Option<Self> {
        let mut now_sum = [0.0_f64; 4];
        let mut preferred_sum = [0.0_f64; 4];
        let mut n: u32 = 0;

        for response in responses {
            let (Some(now), Some(preferred)) = (&response.now_scores, &response.preferred_scores)
            else {
                continue;
            };
            for (i, dimension) in CultureDimension::all().iter().enumerate() {
                now_sum[i] += now.get(*dimension);
                preferred_sum[i] += preferred.get(*dimension);
            }
            n += 1;
        }

        if n == 0 {
            return None;
        }

        let count = f64::from(n);
        let current = mean_vector(&now_sum, count);
        let preferred = mean_vector(&preferred_sum, count);
        let delta = ScoreVector::from_fn(|d| round2(preferred.get(d) - current.get(d)));

        Some(Self {
            current,
            preferred,
            delta,
            n,
        })
    }
}

fn mean_vector(sums: &[f64; 4], count: f64) -> ScoreVector {
    ScoreVector::new(
        round2(sums[0] / count),
        round2(sums[1] / count),
        round2(sums[2] / count),
        round2(sums[3] / count),
    )
}
