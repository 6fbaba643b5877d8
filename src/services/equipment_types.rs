//! Equipment types service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment_type::{
        CreateEquipmentType, EquipmentType, EquipmentTypeQuery, EquipmentTypeWithCount,
        UpdateEquipmentType,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentTypesService {
    repository: Repository,
}

impl EquipmentTypesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn search(
        &self,
        query: &EquipmentTypeQuery,
    ) -> AppResult<(Vec<EquipmentTypeWithCount>, i64)> {
        self.repository.equipment_types.search(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentType> {
        self.repository.equipment_types.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateEquipmentType) -> AppResult<EquipmentType> {
        data.validate()?;
        if data.name.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        if data.serial_mask.is_empty() {
            return Err(AppError::Validation("serial_mask must not be empty".to_string()));
        }
        self.repository.equipment_types.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateEquipmentType) -> AppResult<EquipmentType> {
        data.validate()?;
        if data.name.as_deref() == Some("") {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        if data.serial_mask.as_deref() == Some("") {
            return Err(AppError::Validation("serial_mask must not be empty".to_string()));
        }
        self.repository.equipment_types.update(id, &data).await
    }

    /// Delete an equipment type together with every equipment record of that
    /// type, soft-deleted ones included. This is irreversible.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment_types.delete(id).await
    }
}
