// src/db/animal_repo.rs

use sqlx::PgPool;

use crate::{
    common::{error::AppError, params::ListParams},
    models::animal::{Animal, AnimalInfo, AnimalPayload, HealthRecord, HealthRecordPayload},
};

#[derive(Clone)]
pub struct AnimalRepository {
    pool: PgPool,
}

impl AnimalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listagem com o nome do rancho dono. O predicado `$1` é o escopo de
    /// posse devolvido pela política: NULL para admin, id do usuário para
    /// os demais papéis.
    pub async fn list(
        &self,
        filter_user: Option<i32>,
        params: &ListParams,
    ) -> Result<Vec<AnimalInfo>, AppError> {
        let animals = sqlx::query_as::<_, AnimalInfo>(
            r#"
            SELECT r.name AS ranch_name,
                   a.id AS animal_id,
                   a.tag AS animal_tag,
                   a.age AS animal_age,
                   a.species AS animal_type,
                   a.status AS animal_status,
                   a.created_at,
                   a.updated_at
            FROM animals a
            JOIN ranches r ON r.id = a.ranch_id
            WHERE ($1::int4 IS NULL OR EXISTS (
                    SELECT 1 FROM user_ranches ur
                    WHERE ur.ranch_id = r.id AND ur.user_id = $1))
              AND ($2::timestamptz IS NULL OR a.created_at >= $2)
              AND ($3::timestamptz IS NULL OR a.created_at < $3)
            ORDER BY a.id
            LIMIT $4
            "#,
        )
        .bind(filter_user)
        .bind(params.start_bound())
        .bind(params.end_bound())
        .bind(params.limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(animals)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Animal>, AppError> {
        let animal = sqlx::query_as::<_, Animal>("SELECT * FROM animals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(animal)
    }

    pub async fn create(&self, payload: &AnimalPayload) -> Result<Animal, AppError> {
        sqlx::query_as::<_, Animal>(
            r#"
            INSERT INTO animals (ranch_id, tag, species, age, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, now(), now())
            RETURNING *
            "#,
        )
        .bind(payload.ranch_id)
        .bind(&payload.tag)
        .bind(&payload.species)
        .bind(payload.age)
        .bind(payload.status)
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
        payload: &AnimalPayload,
    ) -> Result<Option<Animal>, AppError> {
        let animal = sqlx::query_as::<_, Animal>(
            r#"
            UPDATE animals
            SET ranch_id = $2, tag = $3, species = $4, age = $5, status = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.ranch_id)
        .bind(&payload.tag)
        .bind(&payload.species)
        .bind(payload.age)
        .bind(payload.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(animal)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM animals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ---
    // Registros de saúde (sub-recurso)
    // ---

    // Intervalo inclusivo sobre recorded_at (o momento do exame), não sobre
    // os carimbos de criação.
    pub async fn health_records(
        &self,
        animal_id: i32,
        params: &ListParams,
    ) -> Result<Vec<HealthRecord>, AppError> {
        let records = sqlx::query_as::<_, HealthRecord>(
            r#"
            SELECT *
            FROM health_records
            WHERE animal_id = $1
              AND ($2::timestamptz IS NULL OR recorded_at >= $2)
              AND ($3::timestamptz IS NULL OR recorded_at < $3)
            ORDER BY recorded_at
            LIMIT $4
            "#,
        )
        .bind(animal_id)
        .bind(params.start_bound())
        .bind(params.end_bound())
        .bind(params.limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn create_health_record(
        &self,
        payload: &HealthRecordPayload,
    ) -> Result<HealthRecord, AppError> {
        sqlx::query_as::<_, HealthRecord>(
            r#"
            INSERT INTO health_records
                (animal_id, head_injury, skin_conditions, abscess, arthritis,
                 swollen_hooves, mastitis, fibrosis, asymmetry,
                 mammary_skin_conditions, cmt_a, cmt_d, recorded_at,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, now(), now())
            RETURNING *
            "#,
        )
        .bind(payload.animal_id)
        .bind(payload.head_injury)
        .bind(payload.skin_conditions)
        .bind(payload.abscess)
        .bind(payload.arthritis)
        .bind(payload.swollen_hooves)
        .bind(payload.mastitis)
        .bind(payload.fibrosis)
        .bind(payload.asymmetry)
        .bind(&payload.mammary_skin_conditions)
        .bind(payload.cmt_a)
        .bind(payload.cmt_d)
        .bind(payload.recorded_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Animal não encontrado.");
                }
            }
            e.into()
        })
    }

    pub async fn delete_health_record(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM health_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
