// src/db/station_repo.rs

use sqlx::PgPool;

use crate::{
    common::{error::AppError, params::ListParams},
    models::station::{StationPayload, StationReading, StationReadingPayload, StationRecord},
};

// A geometria das estações fica em `geometry(Point, 4326)`; a escrita monta
// o ponto com ST_MakePoint(lon, lat) e a leitura desmonta com ST_X/ST_Y.
#[derive(Clone)]
pub struct StationRepository {
    pool: PgPool,
}

impl StationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Estações visíveis para o usuário: as vinculadas (via station_ranches)
    /// a algum rancho associado a ele, ou todas para o escopo de admin.
    pub async fn list(
        &self,
        filter_user: Option<i32>,
        params: &ListParams,
    ) -> Result<Vec<StationRecord>, AppError> {
        let stations = sqlx::query_as::<_, StationRecord>(
            r#"
            SELECT s.id, s.name,
                   ST_X(s.location) AS longitude,
                   ST_Y(s.location) AS latitude,
                   s.created_at, s.updated_at
            FROM stations s
            WHERE ($1::int4 IS NULL OR EXISTS (
                    SELECT 1
                    FROM station_ranches sr
                    JOIN user_ranches ur ON ur.ranch_id = sr.ranch_id
                    WHERE sr.station_id = s.id AND ur.user_id = $1))
              AND ($2::timestamptz IS NULL OR s.created_at >= $2)
              AND ($3::timestamptz IS NULL OR s.created_at < $3)
            ORDER BY s.id
            LIMIT $4
            "#,
        )
        .bind(filter_user)
        .bind(params.start_bound())
        .bind(params.end_bound())
        .bind(params.limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(stations)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<StationRecord>, AppError> {
        let station = sqlx::query_as::<_, StationRecord>(
            r#"
            SELECT id, name,
                   ST_X(location) AS longitude,
                   ST_Y(location) AS latitude,
                   created_at, updated_at
            FROM stations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(station)
    }

    pub async fn create(&self, payload: &StationPayload) -> Result<StationRecord, AppError> {
        let station = sqlx::query_as::<_, StationRecord>(
            r#"
            INSERT INTO stations (name, location, created_at, updated_at)
            VALUES ($1, ST_SetSRID(ST_MakePoint($2, $3), 4326), now(), now())
            RETURNING id, name,
                      ST_X(location) AS longitude,
                      ST_Y(location) AS latitude,
                      created_at, updated_at
            "#,
        )
        .bind(&payload.station_name)
        .bind(payload.longitude)
        .bind(payload.latitude)
        .fetch_one(&self.pool)
        .await?;
        Ok(station)
    }

    pub async fn update(
        &self,
        id: i32,
        payload: &StationPayload,
    ) -> Result<Option<StationRecord>, AppError> {
        let station = sqlx::query_as::<_, StationRecord>(
            r#"
            UPDATE stations
            SET name = $2,
                location = ST_SetSRID(ST_MakePoint($3, $4), 4326),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name,
                      ST_X(location) AS longitude,
                      ST_Y(location) AS latitude,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.station_name)
        .bind(payload.longitude)
        .bind(payload.latitude)
        .fetch_optional(&self.pool)
        .await?;
        Ok(station)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM stations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // Ponte station_ranches: uma estação pode servir vários ranchos
    pub async fn attach_ranch(&self, station_id: i32, ranch_id: i32) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO station_ranches (station_id, ranch_id, created_at) VALUES ($1, $2, now())",
        )
        .bind(station_id)
        .bind(ranch_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::StationAlreadyLinked;
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Estação ou rancho não encontrado.");
                }
            }
            e.into()
        })?;
        Ok(())
    }

    // ---
    // Leituras da estação (sub-recurso)
    // ---

    pub async fn readings(
        &self,
        station_id: i32,
        params: &ListParams,
    ) -> Result<Vec<StationReading>, AppError> {
        let readings = sqlx::query_as::<_, StationReading>(
            r#"
            SELECT *
            FROM station_data
            WHERE station_id = $1
              AND ($2::timestamptz IS NULL OR timestamp >= $2)
              AND ($3::timestamptz IS NULL OR timestamp < $3)
            ORDER BY timestamp
            LIMIT $4
            "#,
        )
        .bind(station_id)
        .bind(params.start_bound())
        .bind(params.end_bound())
        .bind(params.limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(readings)
    }

    pub async fn create_reading(
        &self,
        payload: &StationReadingPayload,
    ) -> Result<StationReading, AppError> {
        sqlx::query_as::<_, StationReading>(
            r#"
            INSERT INTO station_data
                (station_id, timestamp, temperature, humidity, precipitation, pressure,
                 wind_speed, wind_direction, solar_radiation, pm1, pm2_5, pm10, co2, aqi,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, now(), now())
            RETURNING *
            "#,
        )
        .bind(payload.station_id)
        .bind(payload.timestamp)
        .bind(payload.temperature)
        .bind(payload.humidity)
        .bind(payload.precipitation)
        .bind(payload.pressure)
        .bind(payload.wind_speed)
        .bind(payload.wind_direction)
        .bind(payload.solar_radiation)
        .bind(payload.pm1)
        .bind(payload.pm2_5)
        .bind(payload.pm10)
        .bind(payload.co2)
        .bind(payload.aqi)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Estação não encontrada.");
                }
            }
            e.into()
        })
    }
}
