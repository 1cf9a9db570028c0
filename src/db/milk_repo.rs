// src/db/milk_repo.rs

use sqlx::PgPool;

use crate::{
    common::{error::AppError, params::ListParams},
    models::milk::{DairyMilk, DairyMilkInfo, DairyMilkPayload},
};

#[derive(Clone)]
pub struct MilkRepository {
    pool: PgPool,
}

impl MilkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filter_user: Option<i32>,
        params: &ListParams,
    ) -> Result<Vec<DairyMilkInfo>, AppError> {
        let records = sqlx::query_as::<_, DairyMilkInfo>(
            r#"
            SELECT r.name AS ranch_name,
                   m.id AS dairy_milk_id,
                   m.milk_quality,
                   m.milk_quantity,
                   m.created_at,
                   m.updated_at
            FROM dairy_milk m
            JOIN ranches r ON r.id = m.ranch_id
            WHERE ($1::int4 IS NULL OR EXISTS (
                    SELECT 1 FROM user_ranches ur
                    WHERE ur.ranch_id = r.id AND ur.user_id = $1))
              AND ($2::timestamptz IS NULL OR m.created_at >= $2)
              AND ($3::timestamptz IS NULL OR m.created_at < $3)
            ORDER BY m.id
            LIMIT $4
            "#,
        )
        .bind(filter_user)
        .bind(params.start_bound())
        .bind(params.end_bound())
        .bind(params.limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<DairyMilk>, AppError> {
        let record = sqlx::query_as::<_, DairyMilk>("SELECT * FROM dairy_milk WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    pub async fn create(&self, payload: &DairyMilkPayload) -> Result<DairyMilk, AppError> {
        sqlx::query_as::<_, DairyMilk>(
            r#"
            INSERT INTO dairy_milk (ranch_id, milk_quality, milk_quantity, created_at, updated_at)
            VALUES ($1, $2, $3, now(), now())
            RETURNING *
            "#,
        )
        .bind(payload.ranch_id)
        .bind(payload.milk_quality)
        .bind(payload.milk_quantity)
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
        payload: &DairyMilkPayload,
    ) -> Result<Option<DairyMilk>, AppError> {
        let record = sqlx::query_as::<_, DairyMilk>(
            r#"
            UPDATE dairy_milk
            SET ranch_id = $2, milk_quality = $3, milk_quantity = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.ranch_id)
        .bind(payload.milk_quality)
        .bind(payload.milk_quantity)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    // A checagem de existência é real: 0 linhas afetadas vira 404 no handler
    pub async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM dairy_milk WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
