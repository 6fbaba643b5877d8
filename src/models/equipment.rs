//! Equipment model and lifecycle types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub equipment_type_id: i32,
    pub serial_number: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Null while the record is active; set by soft delete
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Equipment {
    /// Whether the record has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Equipment record joined with its type's name and mask
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EquipmentDetail {
    pub id: i32,
    pub equipment_type_id: i32,
    pub equipment_type_name: String,
    pub equipment_type_mask: String,
    pub serial_number: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Which deletion states a store query sees. Every query takes this
/// explicitly; there is no implicit default scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only records with `deleted_at` null
    #[default]
    ActiveOnly,
    /// Only soft-deleted records
    DeletedOnly,
    /// All records regardless of deletion state
    All,
}

impl Visibility {
    /// SQL predicate on the equipment row, or None for no restriction
    pub fn predicate(self) -> Option<&'static str> {
        match self {
            Visibility::ActiveOnly => Some("e.deleted_at IS NULL"),
            Visibility::DeletedOnly => Some("e.deleted_at IS NOT NULL"),
            Visibility::All => None,
        }
    }
}

/// Create equipment request: one or many serial numbers against one type
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    pub equipment_type_id: i32,
    #[validate(length(min = 1, message = "serial_numbers must contain at least one serial number"))]
    pub serial_numbers: Vec<String>,
    /// Note applied to every created record
    pub note: Option<String>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    pub equipment_type_id: Option<i32>,
    #[validate(length(max = 100, code = "too_long", message = "serial_number exceeds 100 characters"))]
    pub serial_number: Option<String>,
    pub note: Option<String>,
}

/// Equipment query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Filter by equipment type ID
    pub equipment_type: Option<i32>,
    /// Exact equipment type name
    pub equipment_type_name: Option<String>,
    /// Exact serial number
    pub serial_number: Option<String>,
    /// Exact note
    pub note: Option<String>,
    /// Substring match on equipment type name
    pub equipment_type_name_contains: Option<String>,
    /// Substring match on serial number
    pub serial_number_contains: Option<String>,
    /// Substring match on note
    pub note_contains: Option<String>,
    /// Records created at or after this instant (RFC 3339)
    pub created_after: Option<DateTime<Utc>>,
    /// Records created at or before this instant (RFC 3339)
    pub created_before: Option<DateTime<Utc>>,
    /// Free-text search across serial number, note and type name
    pub search: Option<String>,
    /// Sort field: created_at, updated_at or serial_number, `-` prefix for
    /// descending (default: -created_at)
    pub ordering: Option<String>,
    /// Deletion-state view (default: active_only)
    pub visibility: Option<Visibility>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Validation failure for one serial number in a batch intake request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SerialError {
    pub serial_number: String,
    /// Every reason this serial was rejected
    pub errors: Vec<String>,
}

/// Aggregated batch intake validation failure. Rendered verbatim as the
/// response body so callers can fix every issue in one round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationReport {
    pub message: String,
    pub validation_errors: Vec<SerialError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_predicates() {
        assert_eq!(
            Visibility::ActiveOnly.predicate(),
            Some("e.deleted_at IS NULL")
        );
        assert_eq!(
            Visibility::DeletedOnly.predicate(),
            Some("e.deleted_at IS NOT NULL")
        );
        assert_eq!(Visibility::All.predicate(), None);
    }

    #[test]
    fn test_visibility_defaults_to_active() {
        assert_eq!(Visibility::default(), Visibility::ActiveOnly);
    }

    #[test]
    fn test_is_deleted_tracks_timestamp() {
        let mut equipment = Equipment {
            id: 1,
            equipment_type_id: 1,
            serial_number: "123".to_string(),
            note: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            deleted_at: None,
        };
        assert!(!equipment.is_deleted());

        equipment.deleted_at = Some(chrono::Utc::now());
        assert!(equipment.is_deleted());
    }
}
