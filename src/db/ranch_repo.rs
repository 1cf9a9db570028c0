// src/db/ranch_repo.rs

use sqlx::PgPool;

use crate::{
    common::{error::AppError, params::ListParams},
    models::ranch::{Ranch, RanchPayload, UserRanch},
};

#[derive(Clone)]
pub struct RanchRepository {
    pool: PgPool,
}

impl RanchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lista ranchos segundo o predicado de escopo: `Some(user_id)` restringe
    /// aos ranchos associados ao usuário via user_ranches; `None` (admin)
    /// devolve todas as linhas.
    pub async fn list(
        &self,
        filter_user: Option<i32>,
        params: &ListParams,
    ) -> Result<Vec<Ranch>, AppError> {
        let ranches = sqlx::query_as::<_, Ranch>(
            r#"
            SELECT r.*
            FROM ranches r
            WHERE ($1::int4 IS NULL OR EXISTS (
                    SELECT 1 FROM user_ranches ur
                    WHERE ur.ranch_id = r.id AND ur.user_id = $1))
              AND ($2::timestamptz IS NULL OR r.created_at >= $2)
              AND ($3::timestamptz IS NULL OR r.created_at < $3)
            ORDER BY r.id
            LIMIT $4
            "#,
        )
        .bind(filter_user)
        .bind(params.start_bound())
        .bind(params.end_bound())
        .bind(params.limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(ranches)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Ranch>, AppError> {
        let ranch = sqlx::query_as::<_, Ranch>("SELECT * FROM ranches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ranch)
    }

    pub async fn create(&self, payload: &RanchPayload) -> Result<Ranch, AppError> {
        let ranch = sqlx::query_as::<_, Ranch>(
            r#"
            INSERT INTO ranches (name, farm_code, primary_species, herd_size, annual_yield,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, now(), now())
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.farm_code)
        .bind(&payload.primary_species)
        .bind(payload.herd_size)
        .bind(payload.annual_yield)
        .fetch_one(&self.pool)
        .await?;
        Ok(ranch)
    }

    pub async fn update(&self, id: i32, payload: &RanchPayload) -> Result<Option<Ranch>, AppError> {
        let ranch = sqlx::query_as::<_, Ranch>(
            r#"
            UPDATE ranches
            SET name = $2, farm_code = $3, primary_species = $4, herd_size = $5,
                annual_yield = $6, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.farm_code)
        .bind(&payload.primary_species)
        .bind(payload.herd_size)
        .bind(payload.annual_yield)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ranch)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM ranches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // O esquema permite N donos por rancho, mas a associação recusa um
    // segundo dono na prática.
    pub async fn ranch_has_owner(&self, ranch_id: i32) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM user_ranches WHERE ranch_id = $1)",
        )
        .bind(ranch_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    pub async fn associate_user(
        &self,
        user_id: i32,
        ranch_id: i32,
    ) -> Result<UserRanch, AppError> {
        sqlx::query_as::<_, UserRanch>(
            r#"
            INSERT INTO user_ranches (user_id, ranch_id, created_at)
            VALUES ($1, $2, now())
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(ranch_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::RanchAlreadyAssigned;
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Rancho não encontrado.");
                }
            }
            e.into()
        })
    }
}
