//! Equipment endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::equipment::{
        CreateEquipment, Equipment, EquipmentDetail, EquipmentQuery, UpdateEquipment, Visibility,
    },
};

use super::AuthenticatedUser;

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// List of items
    pub items: Vec<T>,
    /// Total number of items
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

/// Batch intake response
#[derive(Serialize, ToSchema)]
pub struct IntakeResponse {
    pub message: String,
    /// Number of created records
    pub count: usize,
    /// Created records, in request order
    pub data: Vec<Equipment>,
}

/// List equipment with search, filters and pagination
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(EquipmentQuery),
    responses(
        (status = 200, description = "List of equipment", body = PaginatedResponse<EquipmentDetail>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<PaginatedResponse<EquipmentDetail>>> {
    let (items, total) = state.services.equipment.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Create equipment records from one or many serial numbers.
///
/// All-or-nothing: if any serial is rejected, the response is a validation
/// report listing every offending serial and nothing is written.
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = IntakeResponse),
        (status = 400, description = "Validation report", body = crate::models::equipment::ValidationReport),
        (status = 404, description = "Equipment type not found")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<IntakeResponse>)> {
    let created = state.services.equipment.intake(data).await?;

    Ok((
        StatusCode::CREATED,
        Json(IntakeResponse {
            message: format!("Created {} equipment record(s)", created.len()),
            count: created.len(),
            data: created,
        }),
    ))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentDetail),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentDetail>> {
    let equipment = state
        .services
        .equipment
        .get_by_id(id, Visibility::ActiveOnly)
        .await?;
    Ok(Json(equipment))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = EquipmentDetail),
        (status = 400, description = "Serial number does not match mask"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<EquipmentDetail>> {
    let equipment = state.services.equipment.update(id, data).await?;
    Ok(Json(equipment))
}

/// Soft-delete equipment. The record keeps blocking its serial number and
/// can be restored later.
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment soft-deleted", body = Equipment),
        (status = 404, description = "No active equipment with this ID")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.soft_delete(id).await?;
    Ok(Json(equipment))
}

/// Restore a soft-deleted equipment record
#[utoipa::path(
    post,
    path = "/equipment/{id}/restore",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment restored", body = Equipment),
        (status = 400, description = "Equipment is not deleted"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn restore_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.restore(id).await?;
    Ok(Json(equipment))
}
