//! Per-survey async locks serializing aggregate recomputation.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::SurveyId;

/// Hands out one lock per survey; recomputes of different surveys never wait
/// on each other.
#[derive(Debug, Clone, Default)]
pub struct SurveyLocks {
    locks: Arc<Mutex<HashMap<SurveyId, Arc<Mutex<()>>>>>,
}

impl SurveyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the survey.
    pub async fn acquire(&self, survey_id: &SurveyId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Entries nobody holds or waits on are dropped.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(survey_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of surveys with a live lock entry.
    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
