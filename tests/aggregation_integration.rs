//! Integration tests for survey aggregation.
//!
//! Drives the command and query handlers end to end against the in-memory
//! survey store.

use std::sync::Arc;

use culture_insights::adapters::InMemorySurveyStore;
use culture_insights::application::{
    ComputeAggregatesCommand, ComputeAggregatesHandler, GetAggregatesHandler, GetAggregatesQuery,
    GetLeadershipComparisonHandler, GetLeadershipComparisonQuery, SurveyLocks,
};
use culture_insights::domain::aggregation::{
    AggregateRecord, AggregationEngine, KAnonymityThreshold, LaborUnitLeadershipMatcher, SliceKey,
    SliceScores,
};
use culture_insights::domain::culture::{
    CultureDimension, DemographicField, Demographics, ResponseRecord, ScoreVector,
    PREFER_NOT_TO_SAY,
};
use culture_insights::domain::foundation::{ResponseId, SurveyId};
use culture_insights::ports::{AggregateRepository, AggregationError};

// =============================================================================
// Test Fixtures
// =============================================================================

struct Harness {
    store: Arc<InMemorySurveyStore>,
    compute: ComputeAggregatesHandler,
    aggregates: GetAggregatesHandler,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(InMemorySurveyStore::new());
        let threshold = KAnonymityThreshold::DEFAULT;
        Self {
            compute: ComputeAggregatesHandler::new(
                store.clone(),
                store.clone(),
                AggregationEngine::new(threshold),
            ),
            aggregates: GetAggregatesHandler::new(store.clone(), store.clone(), threshold),
            store,
        }
    }

    async fn recompute(&self, survey_id: &SurveyId) -> Result<Vec<AggregateRecord>, AggregationError> {
        self.compute
            .handle(ComputeAggregatesCommand {
                survey_id: survey_id.clone(),
            })
            .await
            .map(|result| result.records)
    }

    async fn get(&self, survey_id: &SurveyId) -> Vec<culture_insights::domain::aggregation::AggregateData> {
        self.aggregates
            .handle(GetAggregatesQuery {
                survey_id: survey_id.clone(),
            })
            .await
            .unwrap()
    }

    fn leadership(&self) -> GetLeadershipComparisonHandler {
        GetLeadershipComparisonHandler::new(
            self.aggregates.clone(),
            Arc::new(LaborUnitLeadershipMatcher),
        )
    }
}

fn s1() -> SurveyId {
    SurveyId::new("S1").unwrap()
}

fn response(
    survey_id: &SurveyId,
    id: &str,
    now: ScoreVector,
    preferred: ScoreVector,
    demographics: Demographics,
) -> ResponseRecord {
    ResponseRecord::scored(
        ResponseId::new(id).unwrap(),
        survey_id.clone(),
        now,
        preferred,
        demographics,
    )
}

/// 8 Engineering responses with identical scores plus 2 Sales responses.
async fn seed_example(store: &InMemorySurveyStore) {
    let survey_id = s1();
    for i in 0..8 {
        store
            .add_response(response(
                &survey_id,
                &format!("eng-{}", i),
                ScoreVector::new(40.0, 30.0, 20.0, 10.0),
                ScoreVector::new(20.0, 40.0, 20.0, 20.0),
                Demographics::new().with(DemographicField::Department, "Engineering"),
            ))
            .await;
    }
    for i in 0..2 {
        store
            .add_response(response(
                &survey_id,
                &format!("sales-{}", i),
                ScoreVector::new(10.0, 25.0, 40.0, 25.0),
                ScoreVector::new(10.0, 25.0, 40.0, 25.0),
                Demographics::new().with(DemographicField::Department, "Sales"),
            ))
            .await;
    }
}

// =============================================================================
// Compute
// =============================================================================

#[tokio::test]
async fn example_survey_yields_whole_org_and_engineering() {
    let harness = Harness::new();
    seed_example(&harness.store).await;

    let records = harness.recompute(&s1()).await.unwrap();
    assert_eq!(records.len(), 2);

    let data = harness.get(&s1()).await;
    let keys: Vec<String> = data.iter().map(|d| d.record.slice_key.to_string()).collect();
    assert_eq!(keys, vec!["department:Engineering", "whole_org"]);

    let engineering = &data[0];
    assert_eq!(engineering.record.n, 8);
    assert_eq!(engineering.record.current.clan, 40.0);
    assert_eq!(engineering.record.preferred.clan, 20.0);
    assert_eq!(engineering.record.delta.clan, -20.0);
    assert!((engineering.participation_rate - 0.8).abs() < 1e-9);
    assert!((engineering.congruence_indicators.get(CultureDimension::Clan) - 0.8).abs() < 1e-9);

    let whole = &data[1];
    assert_eq!(whole.record.n, 10);
    assert_eq!(whole.record.slice_label, "Whole Organization");
    assert_eq!(whole.record.current.clan, 34.0);
    assert!((whole.participation_rate - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn recompute_is_idempotent_apart_from_ids() {
    let harness = Harness::new();
    seed_example(&harness.store).await;

    let first = harness.recompute(&s1()).await.unwrap();
    let second = harness.recompute(&s1()).await.unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_ne!(a.id, b.id);
        assert_eq!(a.slice_key, b.slice_key);
        assert_eq!(a.slice_label, b.slice_label);
        assert_eq!(a.current, b.current);
        assert_eq!(a.preferred, b.preferred);
        assert_eq!(a.delta, b.delta);
        assert_eq!(a.n, b.n);
    }
    assert_eq!(harness.store.aggregate_count(&s1()).await, 2);
}

#[tokio::test]
async fn recompute_replaces_stale_slices() {
    let harness = Harness::new();
    seed_example(&harness.store).await;
    harness.recompute(&s1()).await.unwrap();

    for i in 0..5 {
        harness
            .store
            .add_response(response(
                &s1(),
                &format!("late-sales-{}", i),
                ScoreVector::new(25.0, 25.0, 25.0, 25.0),
                ScoreVector::new(25.0, 25.0, 25.0, 25.0),
                Demographics::new().with(DemographicField::Department, "Sales"),
            ))
            .await;
    }
    harness.recompute(&s1()).await.unwrap();

    let keys: Vec<String> = harness
        .get(&s1())
        .await
        .iter()
        .map(|d| d.record.slice_key.to_string())
        .collect();
    assert_eq!(
        keys,
        vec!["department:Engineering", "department:Sales", "whole_org"]
    );
}

#[tokio::test]
async fn prefer_not_to_say_never_forms_a_slice() {
    let harness = Harness::new();
    for i in 0..9 {
        harness
            .store
            .add_response(response(
                &s1(),
                &format!("r-{}", i),
                ScoreVector::new(25.0, 25.0, 25.0, 25.0),
                ScoreVector::new(25.0, 25.0, 25.0, 25.0),
                Demographics::new().with(DemographicField::Gender, PREFER_NOT_TO_SAY),
            ))
            .await;
    }

    let records = harness.recompute(&s1()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].slice_key.is_whole_org());
}

#[tokio::test]
async fn unknown_survey_is_not_found() {
    let harness = Harness::new();
    let result = harness.recompute(&SurveyId::new("missing").unwrap()).await;
    assert!(matches!(result, Err(AggregationError::SurveyNotFound(_))));
}

#[tokio::test]
async fn survey_without_responses_stores_nothing() {
    let harness = Harness::new();
    harness.store.add_survey(s1()).await;

    let records = harness.recompute(&s1()).await.unwrap();
    assert!(records.is_empty());
    assert!(harness.get(&s1()).await.is_empty());
}

#[tokio::test]
async fn congruence_stays_within_unit_interval() {
    let harness = Harness::new();
    for i in 0..7 {
        harness
            .store
            .add_response(response(
                &s1(),
                &format!("r-{}", i),
                ScoreVector::new(100.0, 0.0, 0.0, 0.0),
                ScoreVector::new(0.0, 100.0, 0.0, 0.0),
                Demographics::new(),
            ))
            .await;
    }
    harness.recompute(&s1()).await.unwrap();

    let data = harness.get(&s1()).await;
    assert_eq!(data.len(), 1);
    for dimension in CultureDimension::all() {
        let value = data[0].congruence_indicators.get(*dimension);
        assert!((0.0..=1.0).contains(&value));
    }
    assert_eq!(data[0].congruence_indicators.get(CultureDimension::Clan), 0.0);
    assert_eq!(data[0].congruence_indicators.get(CultureDimension::Market), 1.0);
}

// =============================================================================
// Read path
// =============================================================================

#[tokio::test]
async fn directly_inserted_small_aggregate_is_hidden() {
    let harness = Harness::new();
    seed_example(&harness.store).await;
    harness.recompute(&s1()).await.unwrap();

    let tiny = AggregateRecord::new(
        s1(),
        SliceKey::demographic(DemographicField::Team, "Tiny"),
        SliceScores {
            current: ScoreVector::new(25.0, 25.0, 25.0, 25.0),
            preferred: ScoreVector::new(25.0, 25.0, 25.0, 25.0),
            delta: ScoreVector::default(),
            n: 3,
        },
    );
    harness.store.create(&tiny).await.unwrap();
    assert_eq!(harness.store.aggregate_count(&s1()).await, 3);

    let data = harness.get(&s1()).await;
    assert!(data.iter().all(|d| d.record.n >= 7));
    assert_eq!(data.len(), 2);
}

#[tokio::test]
async fn unknown_survey_reads_as_empty() {
    let harness = Harness::new();
    assert!(harness.get(&SurveyId::new("missing").unwrap()).await.is_empty());
}

#[tokio::test]
async fn orphaned_aggregates_are_invisible() {
    let harness = Harness::new();
    seed_example(&harness.store).await;
    harness.recompute(&s1()).await.unwrap();

    harness.store.remove_survey(&s1()).await;
    assert!(harness.get(&s1()).await.is_empty());
}

// =============================================================================
// Leadership comparison
// =============================================================================

#[tokio::test]
async fn leadership_comparison_pairs_slice_with_whole_org() {
    let harness = Harness::new();
    for i in 0..7 {
        harness
            .store
            .add_response(response(
                &s1(),
                &format!("lead-{}", i),
                ScoreVector::new(10.0, 20.0, 50.0, 20.0),
                ScoreVector::new(30.0, 30.0, 20.0, 20.0),
                Demographics::new().with(DemographicField::LaborUnit, "Senior Leadership"),
            ))
            .await;
        harness
            .store
            .add_response(response(
                &s1(),
                &format!("staff-{}", i),
                ScoreVector::new(30.0, 20.0, 30.0, 20.0),
                ScoreVector::new(40.0, 20.0, 20.0, 20.0),
                Demographics::new().with(DemographicField::LaborUnit, "Frontline"),
            ))
            .await;
    }
    harness.recompute(&s1()).await.unwrap();

    let comparison = harness
        .leadership()
        .handle(GetLeadershipComparisonQuery { survey_id: s1() })
        .await
        .unwrap();

    let leadership = comparison.leadership.unwrap();
    assert_eq!(
        leadership.record.slice_key.to_string(),
        "laborUnit:Senior Leadership"
    );
    assert_eq!(leadership.record.n, 7);
    assert_eq!(comparison.overall.unwrap().record.n, 14);
}

#[tokio::test]
async fn leadership_comparison_without_data_is_empty() {
    let harness = Harness::new();
    seed_example(&harness.store).await;
    harness.recompute(&s1()).await.unwrap();

    let comparison = harness
        .leadership()
        .handle(GetLeadershipComparisonQuery { survey_id: s1() })
        .await
        .unwrap();

    assert!(comparison.leadership.is_none());
    assert!(comparison.overall.is_some());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_recomputes_leave_one_consistent_set() {
    let store = Arc::new(InMemorySurveyStore::new());
    seed_example(&store).await;

    let locks = SurveyLocks::new();
    let mut tasks = Vec::new();
    for _ in 0..8 {
        let handler = ComputeAggregatesHandler::new(
            store.clone(),
            store.clone(),
            AggregationEngine::default(),
        )
        .with_locks(locks.clone());
        tasks.push(tokio::spawn(async move {
            handler
                .handle(ComputeAggregatesCommand { survey_id: s1() })
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(store.aggregate_count(&s1()).await, 2);
}
