//! Database access. Runtime-checked queries only; rows map through local
//! structs into the core wire models.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use content_studio_core::section::model::{
    ContentSection, NewSectionEntry, ReorderRequest, SectionEntry,
};

#[derive(Debug, FromRow)]
struct ContentSectionRow {
    id: Uuid,
    section_key: String,
    title: String,
    description: Option<String>,
    content: Value,
    defaults: Option<Value>,
    updated_at: DateTime<Utc>,
}

impl From<ContentSectionRow> for ContentSection {
    fn from(row: ContentSectionRow) -> Self {
        ContentSection {
            id: row.id,
            section: row.section_key,
            title: row.title,
            description: row.description,
            content: row.content,
            defaults: row.defaults,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct SectionEntryRow {
    id: Uuid,
    key: String,
    name: String,
    icon: String,
    enabled: bool,
    position: i32,
}

impl From<SectionEntryRow> for SectionEntry {
    fn from(row: SectionEntryRow) -> Self {
        SectionEntry {
            id: row.id,
            key: row.key,
            name: row.name,
            icon: row.icon,
            enabled: row.enabled,
            position: row.position,
        }
    }
}

pub async fn list_sections(pool: &PgPool) -> sqlx::Result<Vec<ContentSection>> {
    let rows = sqlx::query_as::<_, ContentSectionRow>(
        "SELECT id, section_key, title, description, content, defaults, updated_at
         FROM content_sections
         ORDER BY section_key",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Replace a section's content wholesale. Returns the new `updated_at`, or
/// `None` when no row matches the id/key pair.
pub async fn replace_section_content(
    pool: &PgPool,
    id: Uuid,
    section_key: &str,
    content: &Value,
) -> sqlx::Result<Option<DateTime<Utc>>> {
    sqlx::query_scalar::<_, DateTime<Utc>>(
        "UPDATE content_sections
         SET content = $1, updated_at = now()
         WHERE id = $2 AND section_key = $3
         RETURNING updated_at",
    )
    .bind(content)
    .bind(id)
    .bind(section_key)
    .fetch_optional(pool)
    .await
}

pub async fn list_registry(pool: &PgPool) -> sqlx::Result<Vec<SectionEntry>> {
    let rows = sqlx::query_as::<_, SectionEntryRow>(
        "SELECT id, key, name, icon, enabled, position
         FROM section_registry
         ORDER BY position",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Insert a registry entry at the end of the list.
pub async fn create_registry_entry(
    pool: &PgPool,
    entry: &NewSectionEntry,
) -> sqlx::Result<SectionEntry> {
    let row = sqlx::query_as::<_, SectionEntryRow>(
        "INSERT INTO section_registry (key, name, icon, enabled, position)
         VALUES ($1, $2, $3, $4,
                 COALESCE((SELECT MAX(position) + 1 FROM section_registry), 0))
         RETURNING id, key, name, icon, enabled, position",
    )
    .bind(&entry.key)
    .bind(&entry.name)
    .bind(&entry.icon)
    .bind(entry.enabled)
    .fetch_one(pool)
    .await?;
    Ok(row.into())
}

/// Update a registry entry. Returns false when the id is unknown.
pub async fn update_registry_entry(pool: &PgPool, entry: &SectionEntry) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE section_registry
         SET key = $1, name = $2, icon = $3, enabled = $4, position = $5
         WHERE id = $6",
    )
    .bind(&entry.key)
    .bind(&entry.name)
    .bind(&entry.icon)
    .bind(entry.enabled)
    .bind(entry.position)
    .bind(entry.id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a registry entry. Returns false when the id is unknown.
pub async fn delete_registry_entry(pool: &PgPool, id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM section_registry WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Apply a full position renumbering in one transaction.
pub async fn reorder_registry(pool: &PgPool, request: &ReorderRequest) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for item in &request.new_order {
        sqlx::query("UPDATE section_registry SET position = $1 WHERE id = $2")
            .bind(item.position)
            .bind(item.id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}
