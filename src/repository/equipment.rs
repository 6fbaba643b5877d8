//! Equipment repository
//!
//! Every read takes an explicit [`Visibility`] so callers always state which
//! deletion states they want to see.

use std::collections::HashSet;

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, EquipmentDetail, EquipmentQuery, Visibility},
};

const DETAIL_COLUMNS: &str = r#"
    e.id, e.equipment_type_id, et.name AS equipment_type_name,
    et.serial_mask AS equipment_type_mask, e.serial_number, e.note,
    e.created_at, e.updated_at, e.deleted_at
"#;

/// Resolve the `ordering` query value against the sortable-column whitelist.
/// Unknown values fall back to the default ordering.
fn order_clause(ordering: Option<&str>) -> &'static str {
    match ordering {
        Some("created_at") => "e.created_at ASC",
        Some("updated_at") => "e.updated_at ASC",
        Some("-updated_at") => "e.updated_at DESC",
        Some("serial_number") => "e.serial_number ASC",
        Some("-serial_number") => "e.serial_number DESC",
        _ => "e.created_at DESC",
    }
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get an equipment record by ID under the given visibility
    pub async fn get_by_id(&self, id: i32, visibility: Visibility) -> AppResult<EquipmentDetail> {
        let mut query = format!(
            "SELECT {} FROM equipment e JOIN equipment_types et ON et.id = e.equipment_type_id WHERE e.id = $1",
            DETAIL_COLUMNS
        );
        if let Some(predicate) = visibility.predicate() {
            query.push_str(" AND ");
            query.push_str(predicate);
        }

        sqlx::query_as::<_, EquipmentDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Get the bare equipment row by ID under the given visibility
    pub async fn get_row(&self, id: i32, visibility: Visibility) -> AppResult<Equipment> {
        let mut query = "SELECT e.* FROM equipment e WHERE e.id = $1".to_string();
        if let Some(predicate) = visibility.predicate() {
            query.push_str(" AND ");
            query.push_str(predicate);
        }

        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Search equipment with filters, ordering and pagination
    pub async fn search(
        &self,
        query: &EquipmentQuery,
        visibility: Visibility,
    ) -> AppResult<(Vec<EquipmentDetail>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(predicate) = visibility.predicate() {
            conditions.push(predicate.to_string());
        }

        if let Some(type_id) = query.equipment_type {
            conditions.push(format!("e.equipment_type_id = {}", type_id));
        }

        if let Some(ref name) = query.equipment_type_name {
            params.push(name.clone());
            conditions.push(format!("et.name = ${}", params.len()));
        }

        if let Some(ref serial) = query.serial_number {
            params.push(serial.clone());
            conditions.push(format!("e.serial_number = ${}", params.len()));
        }

        if let Some(ref note) = query.note {
            params.push(note.clone());
            conditions.push(format!("e.note = ${}", params.len()));
        }

        if let Some(ref name) = query.equipment_type_name_contains {
            params.push(format!("%{}%", name));
            conditions.push(format!("et.name ILIKE ${}", params.len()));
        }

        if let Some(ref serial) = query.serial_number_contains {
            params.push(format!("%{}%", serial));
            conditions.push(format!("e.serial_number ILIKE ${}", params.len()));
        }

        if let Some(ref note) = query.note_contains {
            params.push(format!("%{}%", note));
            conditions.push(format!("COALESCE(e.note, '') ILIKE ${}", params.len()));
        }

        if let Some(after) = query.created_after {
            params.push(after.to_rfc3339());
            conditions.push(format!("e.created_at >= ${}::timestamptz", params.len()));
        }

        if let Some(before) = query.created_before {
            params.push(before.to_rfc3339());
            conditions.push(format!("e.created_at <= ${}::timestamptz", params.len()));
        }

        if let Some(ref search) = query.search {
            params.push(format!("%{}%", search));
            let n = params.len();
            conditions.push(format!(
                "(e.serial_number ILIKE ${} OR COALESCE(e.note, '') ILIKE ${} OR et.name ILIKE ${})",
                n, n, n
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!(
            "SELECT COUNT(*) FROM equipment e JOIN equipment_types et ON et.id = e.equipment_type_id {}",
            where_clause
        );
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            r#"
            SELECT {}
            FROM equipment e
            JOIN equipment_types et ON et.id = e.equipment_type_id
            {}
            ORDER BY {}
            LIMIT {} OFFSET {}
            "#,
            DETAIL_COLUMNS,
            where_clause,
            order_clause(query.ordering.as_deref()),
            per_page,
            offset
        );

        let mut select_builder = sqlx::query_as::<_, EquipmentDetail>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let equipment = select_builder.fetch_all(&self.pool).await?;

        Ok((equipment, total))
    }

    /// Check whether a (type, serial) pair exists in any deletion state,
    /// optionally excluding one record (for updates)
    pub async fn exists(
        &self,
        type_id: i32,
        serial: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM equipment WHERE equipment_type_id = $1 AND serial_number = $2 AND id != $3)",
            )
            .bind(type_id)
            .bind(serial)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM equipment WHERE equipment_type_id = $1 AND serial_number = $2)",
            )
            .bind(type_id)
            .bind(serial)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(exists)
    }

    /// Which of the given serials already exist for this type, in any
    /// deletion state
    pub async fn existing_serials(
        &self,
        type_id: i32,
        serials: &[String],
    ) -> AppResult<HashSet<String>> {
        let rows: Vec<String> = sqlx::query_scalar(
            "SELECT serial_number FROM equipment WHERE equipment_type_id = $1 AND serial_number = ANY($2)",
        )
        .bind(type_id)
        .bind(serials)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    /// Insert a batch of equipment rows in one transaction. Either every row
    /// persists or none does; a uniqueness race lost at commit time aborts
    /// the whole batch with a duplicate error.
    pub async fn insert_batch(
        &self,
        type_id: i32,
        serials: &[String],
        note: Option<&str>,
    ) -> AppResult<Vec<Equipment>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(serials.len());

        for serial in serials {
            let result = sqlx::query_as::<_, Equipment>(
                r#"
                INSERT INTO equipment (equipment_type_id, serial_number, note)
                VALUES ($1, $2, $3)
                RETURNING *
                "#,
            )
            .bind(type_id)
            .bind(serial)
            .bind(note)
            .fetch_one(&mut *tx)
            .await;

            match result {
                Ok(row) => created.push(row),
                Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    return Err(AppError::Conflict(format!(
                        "Equipment with serial number {} already exists",
                        serial
                    )));
                }
                Err(e) => return Err(e.into()),
            }
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Update an equipment row
    pub async fn update(
        &self,
        id: i32,
        type_id: Option<i32>,
        serial: Option<&str>,
        note: Option<&str>,
    ) -> AppResult<Equipment> {
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

        add_field!(type_id, "equipment_type_id");
        add_field!(serial, "serial_number");
        add_field!(note, "note");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = {} AND deleted_at IS NULL RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(type_id);
        bind_field!(serial);
        bind_field!(note);

        let result = builder.fetch_optional(&self.pool).await;

        match result {
            Ok(Some(row)) => Ok(row),
            Ok(None) => Err(AppError::NotFound(format!("Equipment {} not found", id))),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                "Equipment with this serial number already exists".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Soft-delete an active record. The `deleted_at IS NULL` guard makes
    /// the update a compare-and-swap: an already-deleted record is invisible
    /// here and reports not found.
    pub async fn soft_delete(&self, id: i32) -> AppResult<Equipment> {
        let now = Utc::now();
        sqlx::query_as::<_, Equipment>(
            "UPDATE equipment SET deleted_at = $1, updated_at = $1 WHERE id = $2 AND deleted_at IS NULL RETURNING *",
        )
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Restore a soft-deleted record. Looks across all states: a missing row
    /// is not found, an active row is not actionable.
    pub async fn restore(&self, id: i32) -> AppResult<Equipment> {
        let now = Utc::now();
        let restored = sqlx::query_as::<_, Equipment>(
            "UPDATE equipment SET deleted_at = NULL, updated_at = $1 WHERE id = $2 AND deleted_at IS NOT NULL RETURNING *",
        )
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = restored {
            return Ok(row);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        if exists {
            Err(AppError::NotActionable("Equipment is not deleted".to_string()))
        } else {
            Err(AppError::NotFound(format!("Equipment {} not found", id)))
        }
    }

    /// Total number of equipment rows in any state (for stats)
    pub async fn count_all(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of soft-deleted equipment rows (for stats)
    pub async fn count_deleted(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE deleted_at IS NOT NULL")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause_whitelist() {
        assert_eq!(order_clause(Some("created_at")), "e.created_at ASC");
        assert_eq!(order_clause(Some("-serial_number")), "e.serial_number DESC");
        assert_eq!(order_clause(Some("updated_at")), "e.updated_at ASC");
    }

    #[test]
    fn test_order_clause_default() {
        assert_eq!(order_clause(None), "e.created_at DESC");
        assert_eq!(order_clause(Some("-created_at")), "e.created_at DESC");
        // arbitrary input must never reach the SQL string
        assert_eq!(order_clause(Some("id; DROP TABLE equipment")), "e.created_at DESC");
    }
}
