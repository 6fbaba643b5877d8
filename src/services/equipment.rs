//! Equipment service: record lifecycle and batch intake

use std::collections::HashSet;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, Equipment, EquipmentDetail, EquipmentQuery, SerialError, UpdateEquipment,
        ValidationReport, Visibility,
    },
    repository::Repository,
    serial::{validate_serial, SerialMask},
};

/// Validation phase of batch intake. Checks every serial in input order and
/// collects every applicable reason per serial; performs no writes. Returns
/// the accepted serials, or the full report if any serial was rejected.
///
/// Within-batch duplicates are detected against the accepted set, so only
/// the first clean occurrence of a serial stays clean.
fn plan_intake(
    mask: &SerialMask,
    existing: &HashSet<String>,
    serials: &[String],
) -> Result<Vec<String>, ValidationReport> {
    let mut accepted: Vec<String> = Vec::new();
    let mut rejected: Vec<SerialError> = Vec::new();

    for serial in serials {
        let mut errors = Vec::new();

        if !mask.matches(serial) {
            errors.push(format!("does not match mask {}", mask.as_str()));
        }

        if existing.contains(serial) {
            errors.push("already exists in database".to_string());
        }

        if accepted.contains(serial) {
            errors.push("duplicates within current request".to_string());
        }

        if errors.is_empty() {
            accepted.push(serial.clone());
        } else {
            rejected.push(SerialError {
                serial_number: serial.clone(),
                errors,
            });
        }
    }

    if rejected.is_empty() {
        Ok(accepted)
    } else {
        Err(ValidationReport {
            message: "Serial number validation failed".to_string(),
            validation_errors: rejected,
        })
    }
}

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn search(&self, query: &EquipmentQuery) -> AppResult<(Vec<EquipmentDetail>, i64)> {
        let visibility = query.visibility.unwrap_or_default();
        self.repository.equipment.search(query, visibility).await
    }

    pub async fn get_by_id(&self, id: i32, visibility: Visibility) -> AppResult<EquipmentDetail> {
        self.repository.equipment.get_by_id(id, visibility).await
    }

    /// Batch intake: validate every serial against the type's mask, the
    /// store and the request itself, then commit all rows atomically.
    /// Any rejection aborts the whole request with zero writes.
    pub async fn intake(&self, data: CreateEquipment) -> AppResult<Vec<Equipment>> {
        data.validate()?;
        if data.serial_numbers.iter().any(|s| s.chars().count() > 100) {
            return Err(AppError::FieldTooLong(
                "serial_number exceeds 100 characters".to_string(),
            ));
        }

        let equipment_type = self
            .repository
            .equipment_types
            .get_by_id(data.equipment_type_id)
            .await?;
        let mask = SerialMask::compile(&equipment_type.serial_mask);

        let existing = self
            .repository
            .equipment
            .existing_serials(equipment_type.id, &data.serial_numbers)
            .await?;

        let accepted = plan_intake(&mask, &existing, &data.serial_numbers)
            .map_err(AppError::SerialValidation)?;

        self.repository
            .equipment
            .insert_batch(equipment_type.id, &accepted, data.note.as_deref())
            .await
    }

    /// Update an active equipment record, re-validating the serial against
    /// the (possibly new) type's mask and the uniqueness invariant
    pub async fn update(&self, id: i32, data: UpdateEquipment) -> AppResult<EquipmentDetail> {
        data.validate()?;

        let current = self
            .repository
            .equipment
            .get_row(id, Visibility::ActiveOnly)
            .await?;

        let type_id = data.equipment_type_id.unwrap_or(current.equipment_type_id);
        let serial = data
            .serial_number
            .clone()
            .unwrap_or_else(|| current.serial_number.clone());

        let equipment_type = self.repository.equipment_types.get_by_id(type_id).await?;
        if !validate_serial(&serial, &equipment_type.serial_mask) {
            return Err(AppError::Validation(format!(
                "Serial number does not match mask {}",
                equipment_type.serial_mask
            )));
        }

        let identity_changed =
            type_id != current.equipment_type_id || serial != current.serial_number;
        if identity_changed
            && self
                .repository
                .equipment
                .exists(type_id, &serial, Some(id))
                .await?
        {
            return Err(AppError::Conflict(
                "Equipment with this serial number already exists".to_string(),
            ));
        }

        self.repository
            .equipment
            .update(
                id,
                data.equipment_type_id,
                data.serial_number.as_deref(),
                data.note.as_deref(),
            )
            .await?;

        self.repository.equipment.get_by_id(id, Visibility::All).await
    }

    /// Soft-delete an active record; an already-deleted record reports not
    /// found since the default view excludes it
    pub async fn soft_delete(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.soft_delete(id).await
    }

    /// Restore a soft-deleted record
    pub async fn restore(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.restore(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(m: &str) -> SerialMask {
        SerialMask::compile(m)
    }

    fn serials(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plan_accepts_valid_serials_in_order() {
        let accepted = plan_intake(
            &mask("NNN"),
            &HashSet::new(),
            &serials(&["123", "456", "789"]),
        )
        .unwrap();
        assert_eq!(accepted, serials(&["123", "456", "789"]));
    }

    #[test]
    fn test_plan_rejects_mask_violation() {
        let report = plan_intake(&mask("NNN"), &HashSet::new(), &serials(&["12a"])).unwrap_err();
        assert_eq!(report.validation_errors.len(), 1);
        assert_eq!(report.validation_errors[0].serial_number, "12a");
        assert_eq!(
            report.validation_errors[0].errors,
            vec!["does not match mask NNN".to_string()]
        );
    }

    #[test]
    fn test_plan_rejects_existing_serial() {
        let existing: HashSet<String> = ["123".to_string()].into_iter().collect();
        let report = plan_intake(&mask("NNN"), &existing, &serials(&["123"])).unwrap_err();
        assert_eq!(
            report.validation_errors[0].errors,
            vec!["already exists in database".to_string()]
        );
    }

    #[test]
    fn test_plan_rejects_duplicate_within_request() {
        let report =
            plan_intake(&mask("NNN"), &HashSet::new(), &serials(&["123", "123"])).unwrap_err();
        // the first occurrence is clean, only the repeat is reported
        assert_eq!(report.validation_errors.len(), 1);
        assert_eq!(report.validation_errors[0].serial_number, "123");
        assert_eq!(
            report.validation_errors[0].errors,
            vec!["duplicates within current request".to_string()]
        );
    }

    #[test]
    fn test_plan_collects_multiple_reasons_per_serial() {
        let existing: HashSet<String> = ["12a".to_string()].into_iter().collect();
        let report = plan_intake(&mask("NNN"), &existing, &serials(&["12a"])).unwrap_err();
        assert_eq!(
            report.validation_errors[0].errors,
            vec![
                "does not match mask NNN".to_string(),
                "already exists in database".to_string(),
            ]
        );
    }

    #[test]
    fn test_plan_one_rejection_discards_valid_serials() {
        let result = plan_intake(&mask("NNN"), &HashSet::new(), &serials(&["123", "bad"]));
        let report = result.unwrap_err();
        // "123" was valid but the batch as a whole is rejected
        assert_eq!(report.validation_errors.len(), 1);
        assert_eq!(report.validation_errors[0].serial_number, "bad");
    }

    #[test]
    fn test_plan_mixed_failures() {
        let existing: HashSet<String> = ["1ABCDEF2GH".to_string()].into_iter().collect();
        let report = plan_intake(
            &mask("XXAAAAAXAA"),
            &existing,
            &serials(&["1ABCDEF2GH", "invalid123", "1ABCDEF2GH"]),
        )
        .unwrap_err();

        assert_eq!(report.validation_errors.len(), 3);
        assert_eq!(
            report.validation_errors[0].errors,
            vec!["already exists in database".to_string()]
        );
        assert_eq!(
            report.validation_errors[1].serial_number,
            "invalid123".to_string()
        );
        assert_eq!(
            report.validation_errors[1].errors,
            vec!["does not match mask XXAAAAAXAA".to_string()]
        );
        // the repeat also already exists; it never entered the accepted set,
        // so it is not a within-request duplicate
        assert_eq!(
            report.validation_errors[2].errors,
            vec!["already exists in database".to_string()]
        );
    }

    #[test]
    fn test_plan_duplicate_of_accepted_serial_gets_single_reason() {
        let report = plan_intake(
            &mask("NNN"),
            &HashSet::new(),
            &serials(&["111", "222", "111", "111"]),
        )
        .unwrap_err();
        assert_eq!(report.validation_errors.len(), 2);
        for entry in &report.validation_errors {
            assert_eq!(entry.serial_number, "111");
            assert_eq!(
                entry.errors,
                vec!["duplicates within current request".to_string()]
            );
        }
    }

    #[test]
    fn test_plan_empty_input_is_accepted_as_empty() {
        let accepted = plan_intake(&mask("NNN"), &HashSet::new(), &[]).unwrap();
        assert!(accepted.is_empty());
    }
}
