//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/token", post(handlers::auth::login));

    // Operações administrativas (remoção de usuário, troca de papel)
    let admin_routes = Router::new()
        .route("/{user_id}", delete(handlers::admin::delete_user))
        .route("/role/{username}", put(handlers::admin::change_role));

    let ranch_routes = Router::new()
        .route(
            "/",
            get(handlers::ranch::list_ranches).post(handlers::ranch::create_ranch),
        )
        .route("/assign", post(handlers::ranch::assign_ranch))
        .route(
            "/{ranch_id}",
            get(handlers::ranch::get_ranch)
                .put(handlers::ranch::update_ranch)
                .delete(handlers::ranch::delete_ranch),
        );

    let animal_routes = Router::new()
        .route(
            "/",
            get(handlers::animal::list_animals).post(handlers::animal::create_animal),
        )
        .route(
            "/healthrecord",
            get(handlers::animal::list_health_records)
                .post(handlers::animal::create_health_record),
        )
        .route(
            "/healthrecord/{record_id}",
            delete(handlers::animal::delete_health_record),
        )
        .route(
            "/{animal_id}",
            get(handlers::animal::get_animal)
                .put(handlers::animal::update_animal)
                .delete(handlers::animal::delete_animal),
        );

    let station_routes = Router::new()
        .route(
            "/",
            get(handlers::station::list_stations).post(handlers::station::create_station),
        )
        .route(
            "/data",
            get(handlers::station::list_readings).post(handlers::station::create_reading),
        )
        .route("/{station_id}/ranch", post(handlers::station::attach_ranch))
        .route(
            "/{station_id}",
            get(handlers::station::get_station)
                .put(handlers::station::update_station)
                .delete(handlers::station::delete_station),
        );

    let collar_routes = Router::new()
        .route(
            "/",
            get(handlers::collar::list_collars).post(handlers::collar::create_collar),
        )
        .route(
            "/without_collar",
            get(handlers::collar::list_animals_without_collar),
        )
        .route(
            "/data",
            get(handlers::collar::list_pings_geojson).post(handlers::collar::create_ping),
        )
        .route("/data/route", get(handlers::collar::get_route_geojson))
        // O mesmo upload do /kml, no caminho alternativo do colar
        .route("/data/upload-xml", post(handlers::kml::upload_kml))
        .route(
            "/{collar_id}",
            get(handlers::collar::get_collar)
                .put(handlers::collar::update_collar)
                .delete(handlers::collar::delete_collar),
        );

    let milk_routes = Router::new()
        .route(
            "/",
            get(handlers::milk::list_dairy_milk).post(handlers::milk::create_dairy_milk),
        )
        .route(
            "/{dairy_milk_id}",
            put(handlers::milk::update_dairy_milk).delete(handlers::milk::delete_dairy_milk),
        );

    let wellindex_routes = Router::new()
        .route(
            "/",
            get(handlers::wellindex::list_wellindex).post(handlers::wellindex::create_wellindex),
        )
        .route(
            "/{wellindex_id}",
            put(handlers::wellindex::update_wellindex)
                .delete(handlers::wellindex::delete_wellindex),
        );

    let kml_routes = Router::new().route("/upload_kml", post(handlers::kml::upload_kml));

    // Tudo fora de /auth exige bearer token
    let protected_routes = Router::new()
        .nest("/admin", admin_routes)
        .nest("/ranch", ranch_routes)
        .nest("/animal", animal_routes)
        .nest("/station", station_routes)
        .nest("/collar", collar_routes)
        .nest("/milk", milk_routes)
        .nest("/wellindex", wellindex_routes)
        .nest("/kml", kml_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .nest("/auth", auth_routes)
        .merge(protected_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
