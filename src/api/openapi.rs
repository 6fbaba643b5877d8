//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, equipment, equipment_types, health, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Telinv API",
        version = "0.1.0",
        description = "Telecom Equipment Inventory REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Equipment
        equipment::list_equipment,
        equipment::create_equipment,
        equipment::get_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::restore_equipment,
        // Equipment types
        equipment_types::list_equipment_types,
        equipment_types::get_equipment_type,
        equipment_types::create_equipment_type,
        equipment_types::update_equipment_type,
        equipment_types::delete_equipment_type,
        // Stats
        stats::get_equipment_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentDetail,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::Visibility,
            crate::models::equipment::SerialError,
            crate::models::equipment::ValidationReport,
            equipment::IntakeResponse,
            // Equipment types
            crate::models::equipment_type::EquipmentType,
            crate::models::equipment_type::EquipmentTypeWithCount,
            crate::models::equipment_type::CreateEquipmentType,
            crate::models::equipment_type::UpdateEquipmentType,
            // Stats
            stats::EquipmentStatsResponse,
            stats::TypeStatEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "equipment", description = "Equipment record management"),
        (name = "equipment-types", description = "Equipment type management"),
        (name = "stats", description = "Inventory statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
