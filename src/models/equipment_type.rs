//! Equipment type model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Equipment type record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentType {
    pub id: i32,
    /// Human-readable label, e.g. "TP-Link TL-WR74"
    pub name: String,
    /// Serial number mask, e.g. "XXAAAAAXAA"
    pub serial_mask: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equipment type list entry with its active equipment count
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EquipmentTypeWithCount {
    pub id: i32,
    pub name: String,
    pub serial_mask: String,
    /// Number of active (not soft-deleted) equipment units of this type
    pub equipment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create equipment type request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipmentType {
    #[validate(length(max = 255, code = "too_long", message = "name exceeds 255 characters"))]
    pub name: String,
    #[validate(length(max = 50, code = "too_long", message = "serial_mask exceeds 50 characters"))]
    pub serial_mask: String,
}

/// Update equipment type request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipmentType {
    #[validate(length(max = 255, code = "too_long", message = "name exceeds 255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 50, code = "too_long", message = "serial_mask exceeds 50 characters"))]
    pub serial_mask: Option<String>,
}

/// Equipment type query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentTypeQuery {
    /// Exact name match
    pub name: Option<String>,
    /// Exact mask match
    pub serial_mask: Option<String>,
    /// Substring search across name and mask
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
