// src/db/collar_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{error::AppError, params::ListParams},
    models::collar::{
        Collar, CollarInfo, CollarPayload, CollarPingPayload, CollarPingRecord, WithoutCollarInfo,
    },
};

#[derive(Clone)]
pub struct CollarRepository {
    pool: PgPool,
}

impl CollarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cadeia de joins colar -> animal -> rancho, com o escopo de posse
    /// aplicado sobre o rancho.
    pub async fn list(
        &self,
        filter_user: Option<i32>,
        params: &ListParams,
    ) -> Result<Vec<CollarInfo>, AppError> {
        let collars = sqlx::query_as::<_, CollarInfo>(
            r#"
            SELECT a.tag AS animal_tag,
                   r.name AS ranch_name,
                   c.animal_id AS animal_id,
                   c.id AS collar_id,
                   c.dev_eui AS collar_dev_eui,
                   c.created_at,
                   c.updated_at
            FROM collars c
            JOIN animals a ON a.id = c.animal_id
            JOIN ranches r ON r.id = a.ranch_id
            WHERE ($1::int4 IS NULL OR EXISTS (
                    SELECT 1 FROM user_ranches ur
                    WHERE ur.ranch_id = r.id AND ur.user_id = $1))
              AND ($2::timestamptz IS NULL OR c.created_at >= $2)
              AND ($3::timestamptz IS NULL OR c.created_at < $3)
            ORDER BY c.id
            LIMIT $4
            "#,
        )
        .bind(filter_user)
        .bind(params.start_bound())
        .bind(params.end_bound())
        .bind(params.limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(collars)
    }

    /// Animais do escopo que ainda não têm colar (anti-join). Resultado
    /// vazio é resposta válida, não erro.
    pub async fn animals_without_collar(
        &self,
        filter_user: Option<i32>,
    ) -> Result<Vec<WithoutCollarInfo>, AppError> {
        let animals = sqlx::query_as::<_, WithoutCollarInfo>(
            r#"
            SELECT a.id AS animal_id,
                   a.tag AS animal_tag,
                   r.name AS ranch_name,
                   a.species AS animal_type
            FROM animals a
            JOIN ranches r ON r.id = a.ranch_id
            LEFT JOIN collars c ON c.animal_id = a.id
            WHERE c.id IS NULL
              AND ($1::int4 IS NULL OR EXISTS (
                    SELECT 1 FROM user_ranches ur
                    WHERE ur.ranch_id = r.id AND ur.user_id = $1))
            ORDER BY a.id
            "#,
        )
        .bind(filter_user)
        .fetch_all(&self.pool)
        .await?;
        Ok(animals)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Collar>, AppError> {
        let collar = sqlx::query_as::<_, Collar>("SELECT * FROM collars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(collar)
    }

    pub async fn create(&self, payload: &CollarPayload) -> Result<Collar, AppError> {
        sqlx::query_as::<_, Collar>(
            r#"
            INSERT INTO collars (animal_id, dev_eui, created_at, updated_at)
            VALUES ($1, $2, now(), now())
            RETURNING *
            "#,
        )
        .bind(payload.animal_id)
        .bind(&payload.collar_dev_eui)
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

    pub async fn update(
        &self,
        id: i32,
        payload: &CollarPayload,
    ) -> Result<Option<Collar>, AppError> {
        let collar = sqlx::query_as::<_, Collar>(
            r#"
            UPDATE collars
            SET animal_id = $2, dev_eui = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.animal_id)
        .bind(&payload.collar_dev_eui)
        .fetch_optional(&self.pool)
        .await?;
        Ok(collar)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM collars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ---
    // Pings de GPS (sub-recurso)
    // ---

    pub async fn create_ping(
        &self,
        payload: &CollarPingPayload,
    ) -> Result<CollarPingRecord, AppError> {
        sqlx::query_as::<_, CollarPingRecord>(
            r#"
            INSERT INTO collar_gps_data
                (collar_id, coordinates, temperature, battery_percentage, altitude,
                 humidity, timestamp, created_at, updated_at)
            VALUES ($1, ST_SetSRID(ST_MakePoint($2, $3), 4326), $4, $5, $6, $7, $8, now(), now())
            RETURNING id, collar_id,
                      ST_X(coordinates) AS longitude,
                      ST_Y(coordinates) AS latitude,
                      temperature, battery_percentage, altitude, humidity, timestamp
            "#,
        )
        .bind(payload.collar_id)
        .bind(payload.longitude)
        .bind(payload.latitude)
        .bind(payload.temperature)
        .bind(payload.battery_percentage)
        .bind(payload.altitude)
        .bind(payload.humidity)
        .bind(payload.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Colar não encontrado.");
                }
            }
            e.into()
        })
    }

    /// Insere um ponto de trajeto dentro de uma transação do chamador
    /// (lote do upload de KML).
    pub async fn insert_track_point<'e, E>(
        &self,
        executor: E,
        collar_id: i32,
        longitude: f64,
        latitude: f64,
        altitude: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO collar_gps_data
                (collar_id, coordinates, temperature, battery_percentage, altitude,
                 humidity, timestamp, created_at, updated_at)
            VALUES ($1, ST_SetSRID(ST_MakePoint($2, $3), 4326), 0, 0, $4, 0, $5, now(), now())
            "#,
        )
        .bind(collar_id)
        .bind(longitude)
        .bind(latitude)
        .bind(altitude)
        .bind(timestamp)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Pings de um colar, ordenados no tempo (a rota é remontada a partir
    /// desta ordem).
    pub async fn pings(
        &self,
        collar_id: i32,
        params: &ListParams,
    ) -> Result<Vec<CollarPingRecord>, AppError> {
        let pings = sqlx::query_as::<_, CollarPingRecord>(
            r#"
            SELECT id, collar_id,
                   ST_X(coordinates) AS longitude,
                   ST_Y(coordinates) AS latitude,
                   temperature, battery_percentage, altitude, humidity, timestamp
            FROM collar_gps_data
            WHERE collar_id = $1
              AND ($2::timestamptz IS NULL OR timestamp >= $2)
              AND ($3::timestamptz IS NULL OR timestamp < $3)
            ORDER BY timestamp
            LIMIT $4
            "#,
        )
        .bind(collar_id)
        .bind(params.start_bound())
        .bind(params.end_bound())
        .bind(params.limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(pings)
    }
}
