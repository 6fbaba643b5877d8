//! Equipment type endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::equipment_type::{
        CreateEquipmentType, EquipmentType, EquipmentTypeQuery, EquipmentTypeWithCount,
        UpdateEquipmentType,
    },
};

use super::{equipment::PaginatedResponse, AuthenticatedUser};

/// List equipment types with filters and pagination
#[utoipa::path(
    get,
    path = "/equipment/types",
    tag = "equipment-types",
    security(("bearer_auth" = [])),
    params(EquipmentTypeQuery),
    responses(
        (status = 200, description = "List of equipment types", body = PaginatedResponse<EquipmentTypeWithCount>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_equipment_types(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<EquipmentTypeQuery>,
) -> AppResult<Json<PaginatedResponse<EquipmentTypeWithCount>>> {
    let (items, total) = state.services.equipment_types.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get an equipment type by ID
#[utoipa::path(
    get,
    path = "/equipment/types/{id}",
    tag = "equipment-types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment type ID")),
    responses(
        (status = 200, description = "Equipment type details", body = EquipmentType),
        (status = 404, description = "Equipment type not found")
    )
)]
pub async fn get_equipment_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentType>> {
    let equipment_type = state.services.equipment_types.get_by_id(id).await?;
    Ok(Json(equipment_type))
}

/// Create an equipment type
#[utoipa::path(
    post,
    path = "/equipment/types",
    tag = "equipment-types",
    security(("bearer_auth" = [])),
    request_body = CreateEquipmentType,
    responses(
        (status = 201, description = "Equipment type created", body = EquipmentType),
        (status = 400, description = "Invalid or too long field")
    )
)]
pub async fn create_equipment_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateEquipmentType>,
) -> AppResult<(StatusCode, Json<EquipmentType>)> {
    let created = state.services.equipment_types.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an equipment type
#[utoipa::path(
    put,
    path = "/equipment/types/{id}",
    tag = "equipment-types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment type ID")),
    request_body = UpdateEquipmentType,
    responses(
        (status = 200, description = "Equipment type updated", body = EquipmentType),
        (status = 400, description = "Invalid or too long field"),
        (status = 404, description = "Equipment type not found")
    )
)]
pub async fn update_equipment_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipmentType>,
) -> AppResult<Json<EquipmentType>> {
    let updated = state.services.equipment_types.update(id, data).await?;
    Ok(Json(updated))
}

/// Delete an equipment type.
///
/// Destructive: permanently removes every equipment record of this type,
/// including soft-deleted ones. This cannot be undone.
#[utoipa::path(
    delete,
    path = "/equipment/types/{id}",
    tag = "equipment-types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment type ID")),
    responses(
        (status = 204, description = "Equipment type and all its equipment deleted"),
        (status = 404, description = "Equipment type not found")
    )
)]
pub async fn delete_equipment_type(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.equipment_types.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
