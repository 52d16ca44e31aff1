//! PostgreSQL implementation of AggregateRepository.
//!
//! One row per slice in `survey_aggregates`, with one column per dimension
//! for current, preferred and delta scores.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::warn;
use uuid::Uuid;

use crate::domain::aggregation::{AggregateRecord, SliceKey};
use crate::domain::culture::ScoreVector;
use crate::domain::foundation::{AggregateId, SurveyId};
use crate::ports::{AggregateRepository, AggregationError};

/// PostgreSQL implementation of AggregateRepository.
#[derive(Clone)]
pub struct PostgresAggregateRepository {
    pool: PgPool,
}

impl PostgresAggregateRepository {
    /// Creates a new PostgresAggregateRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AggregateRepository for PostgresAggregateRepository {
    async fn replace_for_survey(
        &self,
        survey_id: &SurveyId,
        records: &[AggregateRecord],
    ) -> Result<(), AggregationError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AggregationError::Database(format!("Failed to begin transaction: {}", e))
        })?;

        // Serializes recomputes of the same survey across processes.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(survey_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AggregationError::Database(format!("Failed to lock survey: {}", e)))?;

        sqlx::query("DELETE FROM survey_aggregates WHERE survey_id = $1")
            .bind(survey_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AggregationError::Database(format!("Failed to delete aggregates: {}", e)))?;

        for record in records {
            insert_aggregate(&mut tx, record).await?;
        }

        tx.commit().await.map_err(|e| {
            AggregationError::Database(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    async fn delete_for_survey(&self, survey_id: &SurveyId) -> Result<(), AggregationError> {
        sqlx::query("DELETE FROM survey_aggregates WHERE survey_id = $1")
            .bind(survey_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AggregationError::Database(format!("Failed to delete aggregates: {}", e)))?;

        Ok(())
    }

    async fn create(&self, record: &AggregateRecord) -> Result<(), AggregationError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AggregationError::Database(format!("Failed to begin transaction: {}", e))
        })?;

        insert_aggregate(&mut tx, record).await?;

        tx.commit().await.map_err(|e| {
            AggregationError::Database(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_survey(
        &self,
        survey_id: &SurveyId,
        min_n: u32,
    ) -> Result<Vec<AggregateRecord>, AggregationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, survey_id, slice_key, slice_label,
                   current_clan, current_adhocracy, current_market, current_hierarchy,
                   preferred_clan, preferred_adhocracy, preferred_market, preferred_hierarchy,
                   delta_clan, delta_adhocracy, delta_market, delta_hierarchy,
                   n
            FROM survey_aggregates
            WHERE survey_id = $1 AND n >= $2
            ORDER BY slice_key COLLATE "C" ASC, slice_label COLLATE "C" ASC
            "#,
        )
        .bind(survey_id.as_str())
        .bind(i64::from(min_n))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AggregationError::Database(format!("Failed to fetch aggregates: {}", e)))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match row_to_aggregate(&row) {
                Ok(record) => records.push(record),
                Err(e) => warn!(survey_id = %survey_id, error = %e, "Skipping unreadable aggregate row"),
            }
        }

        Ok(records)
    }
}

async fn insert_aggregate(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    record: &AggregateRecord,
) -> Result<(), AggregationError> {
    let n = i32::try_from(record.n)
        .map_err(|_| AggregationError::InvalidInput(format!("n out of range: {}", record.n)))?;

    sqlx::query(
        r#"
        INSERT INTO survey_aggregates (
            id, survey_id, slice_key, slice_label,
            current_clan, current_adhocracy, current_market, current_hierarchy,
            preferred_clan, preferred_adhocracy, preferred_market, preferred_hierarchy,
            delta_clan, delta_adhocracy, delta_market, delta_hierarchy,
            n
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        "#,
    )
    .bind(record.id.as_uuid())
    .bind(record.survey_id.as_str())
    .bind(record.slice_key.to_string())
    .bind(&record.slice_label)
    .bind(record.current.clan)
    .bind(record.current.adhocracy)
    .bind(record.current.market)
    .bind(record.current.hierarchy)
    .bind(record.preferred.clan)
    .bind(record.preferred.adhocracy)
    .bind(record.preferred.market)
    .bind(record.preferred.hierarchy)
    .bind(record.delta.clan)
    .bind(record.delta.adhocracy)
    .bind(record.delta.market)
    .bind(record.delta.hierarchy)
    .bind(n)
    .execute(&mut **tx)
    .await
    .map_err(|e| AggregationError::Database(format!("Failed to insert aggregate: {}", e)))?;

    Ok(())
}

fn row_to_aggregate(row: &sqlx::postgres::PgRow) -> Result<AggregateRecord, AggregationError> {
    let id: Uuid = row.get("id");
    let survey_id: String = row.get("survey_id");
    let slice_key: String = row.get("slice_key");
    let n: i32 = row.get("n");

    Ok(AggregateRecord {
        id: AggregateId::from_uuid(id),
        survey_id: SurveyId::new(survey_id)
            .map_err(|e| AggregationError::InvalidInput(e.to_string()))?,
        slice_key: slice_key
            .parse::<SliceKey>()
            .map_err(|e| AggregationError::InvalidInput(e.to_string()))?,
        slice_label: row.get("slice_label"),
        current: scores_from_row(row, "current"),
        preferred: scores_from_row(row, "preferred"),
        delta: scores_from_row(row, "delta"),
        n: u32::try_from(n)
            .map_err(|_| AggregationError::InvalidInput(format!("negative n: {}", n)))?,
    })
}

fn scores_from_row(row: &sqlx::postgres::PgRow, prefix: &str) -> ScoreVector {
    ScoreVector::new(
        row.get(format!("{}_clan", prefix).as_str()),
        row.get(format!("{}_adhocracy", prefix).as_str()),
        row.get(format!("{}_market", prefix).as_str()),
        row.get(format!("{}_hierarchy", prefix).as_str()),
    )
}
