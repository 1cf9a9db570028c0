// src/db/wellindex_repo.rs

use sqlx::PgPool;

use crate::{
    common::{error::AppError, params::ListParams},
    models::wellindex::{WellIndex, WellIndexInfo, WellIndexPayload},
};

#[derive(Clone)]
pub struct WellIndexRepository {
    pool: PgPool,
}

impl WellIndexRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filter_user: Option<i32>,
        params: &ListParams,
    ) -> Result<Vec<WellIndexInfo>, AppError> {
        let indexes = sqlx::query_as::<_, WellIndexInfo>(
            r#"
            SELECT w.id AS wellindex_id,
                   r.name AS ranch_name,
                   w.index_value,
                   w.created_at,
                   w.updated_at
            FROM well_indexes w
            JOIN ranches r ON r.id = w.ranch_id
            WHERE ($1::int4 IS NULL OR EXISTS (
                    SELECT 1 FROM user_ranches ur
                    WHERE ur.ranch_id = r.id AND ur.user_id = $1))
              AND ($2::timestamptz IS NULL OR w.created_at >= $2)
              AND ($3::timestamptz IS NULL OR w.created_at < $3)
            ORDER BY w.id
            LIMIT $4
            "#,
        )
        .bind(filter_user)
        .bind(params.start_bound())
        .bind(params.end_bound())
        .bind(params.limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(indexes)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<WellIndex>, AppError> {
        let index = sqlx::query_as::<_, WellIndex>("SELECT * FROM well_indexes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(index)
    }

    pub async fn create(&self, payload: &WellIndexPayload) -> Result<WellIndex, AppError> {
        sqlx::query_as::<_, WellIndex>(
            r#"
            INSERT INTO well_indexes (ranch_id, index_value, created_at, updated_at)
            VALUES ($1, $2, now(), now())
            RETURNING *
            "#,
        )
        .bind(payload.ranch_id)
        .bind(payload.index_value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Rancho não encontrado.");
                }
            }
            e.into()
        })
    }

    pub async fn update(
        &self,
        id: i32,
        payload: &WellIndexPayload,
    ) -> Result<Option<WellIndex>, AppError> {
        let index = sqlx::query_as::<_, WellIndex>(
            r#"
            UPDATE well_indexes
            SET ranch_id = $2, index_value = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.ranch_id)
        .bind(payload.index_value)
        .fetch_optional(&self.pool)
        .await?;
        Ok(index)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM well_indexes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
