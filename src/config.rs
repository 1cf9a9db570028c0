// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        AnimalRepository, CollarRepository, MilkRepository, RanchRepository, StationRepository,
        UserRepository, WellIndexRepository,
    },
    services::{auth::AuthService, kml::KmlService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    pub user_repo: UserRepository,
    pub ranch_repo: RanchRepository,
    pub animal_repo: AnimalRepository,
    pub station_repo: StationRepository,
    pub collar_repo: CollarRepository,
    pub milk_repo: MilkRepository,
    pub wellindex_repo: WellIndexRepository,

    pub auth_service: AuthService,
    pub kml_service: KmlService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let ranch_repo = RanchRepository::new(db_pool.clone());
        let animal_repo = AnimalRepository::new(db_pool.clone());
        let station_repo = StationRepository::new(db_pool.clone());
        let collar_repo = CollarRepository::new(db_pool.clone());
        let milk_repo = MilkRepository::new(db_pool.clone());
        let wellindex_repo = WellIndexRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let kml_service = KmlService::new(collar_repo.clone(), db_pool.clone());

        Ok(Self {
            db_pool,
            user_repo,
            ranch_repo,
            animal_repo,
            station_repo,
            collar_repo,
            milk_repo,
            wellindex_repo,
            auth_service,
            kml_service,
        })
    }
}
