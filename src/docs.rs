// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Admin ---
        handlers::admin::delete_user,
        handlers::admin::change_role,

        // --- Ranch ---
        handlers::ranch::list_ranches,
        handlers::ranch::get_ranch,
        handlers::ranch::create_ranch,
        handlers::ranch::update_ranch,
        handlers::ranch::delete_ranch,
        handlers::ranch::assign_ranch,

        // --- Animal ---
        handlers::animal::list_animals,
        handlers::animal::get_animal,
        handlers::animal::create_animal,
        handlers::animal::update_animal,
        handlers::animal::delete_animal,
        handlers::animal::list_health_records,
        handlers::animal::create_health_record,
        handlers::animal::delete_health_record,

        // --- Station ---
        handlers::station::list_stations,
        handlers::station::get_station,
        handlers::station::create_station,
        handlers::station::update_station,
        handlers::station::delete_station,
        handlers::station::attach_ranch,
        handlers::station::list_readings,
        handlers::station::create_reading,

        // --- Collar ---
        handlers::collar::list_collars,
        handlers::collar::list_animals_without_collar,
        handlers::collar::get_collar,
        handlers::collar::create_collar,
        handlers::collar::update_collar,
        handlers::collar::delete_collar,
        handlers::collar::create_ping,
        handlers::collar::list_pings_geojson,
        handlers::collar::get_route_geojson,

        // --- DairyMilk ---
        handlers::milk::list_dairy_milk,
        handlers::milk::create_dairy_milk,
        handlers::milk::update_dairy_milk,
        handlers::milk::delete_dairy_milk,

        // --- WellIndex ---
        handlers::wellindex::list_wellindex,
        handlers::wellindex::create_wellindex,
        handlers::wellindex::update_wellindex,
        handlers::wellindex::delete_wellindex,

        // --- Kml ---
        handlers::kml::upload_kml,
    ),
    components(
        schemas(
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginPayload,
            models::auth::Token,
            models::auth::ChangeRolePayload,

            models::ranch::Ranch,
            models::ranch::UserRanch,
            models::ranch::RanchPayload,
            models::ranch::AssignRanchPayload,

            models::animal::Animal,
            models::animal::AnimalInfo,
            models::animal::AnimalPayload,
            models::animal::HealthRecord,
            models::animal::HealthRecordPayload,

            models::station::StationInfo,
            models::station::StationPayload,
            models::station::AttachRanchPayload,
            models::station::StationReading,
            models::station::StationReadingPayload,

            models::collar::Collar,
            models::collar::CollarInfo,
            models::collar::WithoutCollarInfo,
            models::collar::CollarPayload,
            models::collar::CollarPingPayload,
            models::collar::TrackUploadSummary,

            models::milk::DairyMilk,
            models::milk::DairyMilkInfo,
            models::milk::DairyMilkPayload,

            models::wellindex::WellIndex,
            models::wellindex::WellIndexInfo,
            models::wellindex::WellIndexPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Registro e emissão de tokens"),
        (name = "Admin", description = "Gestão de usuários e papéis"),
        (name = "Ranch", description = "Ranchos e associações de posse"),
        (name = "Animal", description = "Rebanho e registros de saúde"),
        (name = "Station", description = "Estações meteorológicas e leituras"),
        (name = "Collar", description = "Colares GPS e telemetria"),
        (name = "DairyMilk", description = "Registros de leite por rancho"),
        (name = "WellIndex", description = "Índice de bem-estar por rancho"),
        (name = "Kml", description = "Upload de trajetos KML")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
