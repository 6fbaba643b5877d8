//! Inventory statistics service

use crate::{
    api::stats::{EquipmentStatsResponse, TypeStatEntry},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Inventory-wide counts plus a per-type breakdown. The active count is
    /// the exact complement of the deleted count within all rows.
    pub async fn get_equipment_stats(&self) -> AppResult<EquipmentStatsResponse> {
        let total_all = self.repository.equipment.count_all().await?;
        let total_deleted = self.repository.equipment.count_deleted().await?;
        let total_active = total_all - total_deleted;
        let total_types = self.repository.equipment_types.count().await?;

        let type_statistics = self
            .repository
            .equipment_types
            .list_with_counts()
            .await?
            .into_iter()
            .map(|t| TypeStatEntry {
                id: t.id,
                name: t.name,
                serial_mask: t.serial_mask,
                equipment_count: t.equipment_count,
            })
            .collect();

        Ok(EquipmentStatsResponse {
            total_equipment: total_active,
            total_deleted,
            total_active,
            total_types,
            type_statistics,
        })
    }
}
