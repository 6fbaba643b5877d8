//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedUser;

/// Inventory statistics response
#[derive(Serialize, ToSchema)]
pub struct EquipmentStatsResponse {
    /// Number of active equipment records
    pub total_equipment: i64,
    /// Number of soft-deleted equipment records
    pub total_deleted: i64,
    /// Active records; always `all rows - total_deleted`
    pub total_active: i64,
    /// Number of equipment types
    pub total_types: i64,
    /// Per-type breakdown
    pub type_statistics: Vec<TypeStatEntry>,
}

/// Per-type statistics entry
#[derive(Serialize, ToSchema)]
pub struct TypeStatEntry {
    pub id: i32,
    pub name: String,
    pub serial_mask: String,
    /// Number of active equipment units of this type
    pub equipment_count: i64,
}

/// Get inventory statistics
#[utoipa::path(
    get,
    path = "/equipment/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inventory statistics", body = EquipmentStatsResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_equipment_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<EquipmentStatsResponse>> {
    let stats = state.services.stats.get_equipment_stats().await?;
    Ok(Json(stats))
}
