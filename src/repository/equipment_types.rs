//! Equipment types repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment_type::{
        CreateEquipmentType, EquipmentType, EquipmentTypeQuery, EquipmentTypeWithCount,
        UpdateEquipmentType,
    },
};

#[derive(Clone)]
pub struct EquipmentTypesRepository {
    pool: Pool<Postgres>,
}

impl EquipmentTypesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get an equipment type by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentType> {
        sqlx::query_as::<_, EquipmentType>("SELECT * FROM equipment_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment type {} not found", id)))
    }

    /// List equipment types with filters and pagination
    pub async fn search(
        &self,
        query: &EquipmentTypeQuery,
    ) -> AppResult<(Vec<EquipmentTypeWithCount>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref name) = query.name {
            params.push(name.clone());
            conditions.push(format!("et.name = ${}", params.len()));
        }

        if let Some(ref mask) = query.serial_mask {
            params.push(mask.clone());
            conditions.push(format!("et.serial_mask = ${}", params.len()));
        }

        if let Some(ref search) = query.search {
            params.push(format!("%{}%", search));
            conditions.push(format!(
                "(et.name ILIKE ${} OR et.serial_mask ILIKE ${})",
                params.len(),
                params.len()
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM equipment_types et {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            r#"
            SELECT et.id, et.name, et.serial_mask,
                   (SELECT COUNT(*) FROM equipment e
                    WHERE e.equipment_type_id = et.id AND e.deleted_at IS NULL) AS equipment_count,
                   et.created_at, et.updated_at
            FROM equipment_types et
            {}
            ORDER BY et.name
            LIMIT {} OFFSET {}
            "#,
            where_clause, per_page, offset
        );

        let mut select_builder = sqlx::query_as::<_, EquipmentTypeWithCount>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let types = select_builder.fetch_all(&self.pool).await?;

        Ok((types, total))
    }

    /// Create an equipment type
    pub async fn create(&self, data: &CreateEquipmentType) -> AppResult<EquipmentType> {
        let row = sqlx::query_as::<_, EquipmentType>(
            r#"
            INSERT INTO equipment_types (name, serial_mask)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial_mask)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an equipment type
    pub async fn update(&self, id: i32, data: &UpdateEquipmentType) -> AppResult<EquipmentType> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.serial_mask, "serial_mask");

        let query = format!(
            "UPDATE equipment_types SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, EquipmentType>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.serial_mask);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment type {} not found", id)))
    }

    /// Delete an equipment type. The foreign key cascade removes every
    /// equipment row of this type, soft-deleted rows included.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment type {} not found", id)));
        }
        Ok(())
    }

    /// All equipment types with their active equipment counts (for stats)
    pub async fn list_with_counts(&self) -> AppResult<Vec<EquipmentTypeWithCount>> {
        let types = sqlx::query_as::<_, EquipmentTypeWithCount>(
            r#"
            SELECT et.id, et.name, et.serial_mask,
                   (SELECT COUNT(*) FROM equipment e
                    WHERE e.equipment_type_id = et.id AND e.deleted_at IS NULL) AS equipment_count,
                   et.created_at, et.updated_at
            FROM equipment_types et
            ORDER BY et.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(types)
    }

    /// Total number of equipment types (for stats)
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment_types")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
