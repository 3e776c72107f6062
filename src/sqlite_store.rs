//! SQLite-backed [`SegmentStore`] implementation.
//!
//! Maps each store operation onto the `segments` table created by
//! [`migrate`](crate::migrate). Tag and media lists are stored as JSON text.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use keepsake_core::error::{DecodeError, StoreError};
use keepsake_core::models::SegmentRow;
use keepsake_core::store::{FetchedRow, SegmentStore};

const SELECT_COLUMNS: &str = "SELECT id, group_id, position, segment_count, content, title, \
     tags_json, entry_date, place, owner_id, visibility, media_json, created_at, updated_at \
     FROM segments";

/// SQLite implementation of the [`SegmentStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Decode one row. Only an unreadable `id` or `group_id` fails the whole
/// fetch; any other bad column is reported against the row's group.
fn decode_row(row: &SqliteRow) -> Result<FetchedRow, StoreError> {
    let id: String = row.try_get("id").map_err(StoreError::backend)?;
    let group_id: String = row.try_get("group_id").map_err(StoreError::backend)?;

    let decoded = decode_fields(row, &id, &group_id);
    if let Err(reason) = &decoded {
        tracing::warn!(id = %id, group_id = %group_id, reason = %reason, "undecodable segment row");
    }
    Ok(decoded.map_err(|reason| DecodeError {
        id,
        group_id,
        reason,
    }))
}

fn decode_fields(row: &SqliteRow, id: &str, group_id: &str) -> Result<SegmentRow, String> {
    let position: i64 = row.try_get("position").map_err(column_err)?;
    let position =
        u32::try_from(position).map_err(|_| format!("position {} out of range", position))?;
    let segment_count: i64 = row.try_get("segment_count").map_err(column_err)?;
    let segment_count = u32::try_from(segment_count)
        .map_err(|_| format!("segment_count {} out of range", segment_count))?;

    let tags_json: String = row.try_get("tags_json").map_err(column_err)?;
    let tags: Vec<String> =
        serde_json::from_str(&tags_json).map_err(|e| format!("tags_json: {}", e))?;

    let media_json: Option<String> = row.try_get("media_json").map_err(column_err)?;
    let media: Option<Vec<String>> = media_json
        .map(|m| serde_json::from_str(&m))
        .transpose()
        .map_err(|e| format!("media_json: {}", e))?;

    Ok(SegmentRow {
        id: id.to_string(),
        group_id: group_id.to_string(),
        position,
        segment_count,
        content: row.try_get("content").map_err(column_err)?,
        title: row.try_get("title").map_err(column_err)?,
        tags,
        date: row.try_get("entry_date").map_err(column_err)?,
        place: row.try_get("place").map_err(column_err)?,
        owner_id: row.try_get("owner_id").map_err(column_err)?,
        visibility: row.try_get("visibility").map_err(column_err)?,
        media,
        created_at: row.try_get("created_at").map_err(column_err)?,
        updated_at: row.try_get("updated_at").map_err(column_err)?,
    })
}

fn column_err(e: sqlx::Error) -> String {
    e.to_string()
}

fn to_json(values: &[String]) -> Result<String, StoreError> {
    serde_json::to_string(values).map_err(StoreError::backend)
}

#[async_trait]
impl SegmentStore for SqliteStore {
    async fn insert_segments(&self, rows: &[SegmentRow]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;

        for row in rows {
            let media_json = row.media.as_deref().map(to_json).transpose()?;
            sqlx::query(
                r#"
                INSERT INTO segments (id, group_id, position, segment_count, content, title,
                                      tags_json, entry_date, place, owner_id, visibility,
                                      media_json, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&row.id)
            .bind(&row.group_id)
            .bind(i64::from(row.position))
            .bind(i64::from(row.segment_count))
            .bind(&row.content)
            .bind(&row.title)
            .bind(to_json(&row.tags)?)
            .bind(&row.date)
            .bind(&row.place)
            .bind(&row.owner_id)
            .bind(&row.visibility)
            .bind(media_json)
            .bind(row.created_at)
            .bind(row.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::backend)?;
        }

        tx.commit().await.map_err(StoreError::backend)?;
        Ok(())
    }

    async fn fetch_segments(
        &self,
        owner_id: &str,
        group_id: Option<&str>,
    ) -> Result<Vec<FetchedRow>, StoreError> {
        let rows = match group_id {
            Some(group_id) => {
                let sql = format!(
                    "{} WHERE owner_id = ? AND group_id = ? ORDER BY group_id ASC, position ASC",
                    SELECT_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(owner_id)
                    .bind(group_id)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "{} WHERE owner_id = ? ORDER BY group_id ASC, position ASC",
                    SELECT_COLUMNS
                );
                sqlx::query(&sql).bind(owner_id).fetch_all(&self.pool).await
            }
        }
        .map_err(StoreError::backend)?;

        rows.iter().map(decode_row).collect()
    }

    async fn delete_group(&self, owner_id: &str, group_id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM segments WHERE owner_id = ? AND group_id = ?")
            .bind(owner_id)
            .bind(group_id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DbConfig, SegmentingConfig};
    use crate::{db, migrate};
    use keepsake_core::models::MemoryDraft;
    use keepsake_core::split::SplitLimits;
    use keepsake_core::{GroupError, MemoryService, ServiceError};
    use tempfile::TempDir;

    async fn open_store() -> (TempDir, SqliteStore) {
        let tmp = TempDir::new().unwrap();
        let config = Config {
            db: DbConfig {
                path: tmp.path().join("data").join("keepsake.sqlite"),
                busy_timeout_ms: 5000,
            },
            segmenting: SegmentingConfig::default(),
        };
        let pool = db::connect(&config).await.unwrap();
        migrate::apply_schema(&pool).await.unwrap();
        (tmp, SqliteStore::new(pool))
    }

    async fn fetch_ok(store: &SqliteStore, owner: &str, group: Option<&str>) -> Vec<SegmentRow> {
        store
            .fetch_segments(owner, group)
            .await
            .unwrap()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    async fn insert_bad_tags_row(store: &SqliteStore, id: &str, group: &str) {
        sqlx::query(
            "INSERT INTO segments (id, group_id, position, segment_count, content, title, tags_json, owner_id, created_at, updated_at) \
             VALUES (?, ?, 1, 1, 'x', 't', 'not json', 'u1', 0, 0)",
        )
        .bind(id)
        .bind(group)
        .execute(store.pool())
        .await
        .unwrap();
    }

    fn row(owner: &str, group: &str, position: u32, count: u32) -> SegmentRow {
        SegmentRow {
            id: format!("{}-{}-{}", owner, group, position),
            group_id: group.to_string(),
            position,
            segment_count: count,
            content: format!("body {}", position),
            title: "Title".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            date: Some("2023-01-02".to_string()),
            place: None,
            owner_id: owner.to_string(),
            visibility: "private".to_string(),
            media: Some(vec!["photo-1.jpg".to_string()]),
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch_round_trip() {
        let (_tmp, store) = open_store().await;
        let rows = vec![row("u1", "g", 2, 2), row("u1", "g", 1, 2)];
        store.insert_segments(&rows).await.unwrap();

        let fetched = fetch_ok(&store, "u1", Some("g")).await;
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0], rows[1]);
        assert_eq!(fetched[1], rows[0]);
    }

    #[tokio::test]
    async fn test_fetch_orders_by_group_then_position() {
        let (_tmp, store) = open_store().await;
        store
            .insert_segments(&[
                row("u1", "b", 1, 1),
                row("u1", "a", 2, 2),
                row("u1", "a", 1, 2),
                row("u2", "a", 1, 1),
            ])
            .await
            .unwrap();

        let fetched = fetch_ok(&store, "u1", None).await;
        let keys: Vec<(&str, u32)> = fetched
            .iter()
            .map(|r| (r.group_id.as_str(), r.position))
            .collect();
        assert_eq!(keys, vec![("a", 1), ("a", 2), ("b", 1)]);
    }

    #[tokio::test]
    async fn test_failed_insert_writes_nothing() {
        let (_tmp, store) = open_store().await;
        // Duplicate position violates the unique constraint mid-batch.
        let mut dup = row("u1", "g", 1, 2);
        dup.id = "other".to_string();
        let result = store
            .insert_segments(&[row("u1", "g", 1, 2), dup])
            .await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
        assert!(fetch_ok(&store, "u1", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_scoped_and_idempotent() {
        let (_tmp, store) = open_store().await;
        store
            .insert_segments(&[row("u1", "g", 1, 2), row("u1", "g", 2, 2), row("u2", "g", 1, 1)])
            .await
            .unwrap();

        assert_eq!(store.delete_group("u1", "g").await.unwrap(), 2);
        assert_eq!(store.delete_group("u1", "g").await.unwrap(), 0);
        assert_eq!(fetch_ok(&store, "u2", None).await.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_tags_reported_as_decode_error() {
        let (_tmp, store) = open_store().await;
        insert_bad_tags_row(&store, "bad", "g").await;

        let fetched = store.fetch_segments("u1", None).await.unwrap();
        assert_eq!(fetched.len(), 1);
        let err = fetched[0].as_ref().unwrap_err();
        assert_eq!(err.id, "bad");
        assert_eq!(err.group_id, "g");
        assert!(err.reason.starts_with("tags_json"));
    }

    #[tokio::test]
    async fn test_corrupt_group_does_not_hide_healthy_ones() {
        let (_tmp, store) = open_store().await;
        let service = MemoryService::new(store);
        service
            .save_memory(MemoryDraft {
                owner_id: "u1".to_string(),
                title: "Harvest".to_string(),
                content: "Apples everywhere.".to_string(),
                visibility: "private".to_string(),
                group_id: Some("aa".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        insert_bad_tags_row(service.store(), "bad", "zz").await;

        let memories = service.list_memories("u1").await.unwrap();
        assert_eq!(memories.len(), 1);
        assert_eq!(memories[0].group_id, "aa");
        assert_eq!(memories[0].content, "Apples everywhere.");

        let err = service.get_memory("u1", "zz").await.unwrap_err();
        assert!(matches!(err, ServiceError::Group(GroupError::Decode(_))));
    }

    #[tokio::test]
    async fn test_service_over_sqlite() {
        let (_tmp, store) = open_store().await;
        let service = MemoryService::new(store).with_limits(SplitLimits::new(50, 10).unwrap());
        let content = (0..6)
            .map(|i| format!("Entry line number {}.", i))
            .collect::<Vec<_>>()
            .join("\n\n");

        let rows = service
            .save_memory(MemoryDraft {
                owner_id: "u1".to_string(),
                title: "Winter".to_string(),
                content: content.clone(),
                visibility: "private".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(rows.len() > 1);
        let group_id = rows[0].group_id.clone();

        let memories = service.list_memories("u1").await.unwrap();
        assert_eq!(memories.len(), 1);
        assert_eq!(memories[0].title, "Winter");
        assert_eq!(memories[0].content, content);

        assert_eq!(
            service.delete_memory("u1", &group_id).await.unwrap(),
            rows.len() as u64
        );
        assert!(service.get_memory("u1", &group_id).await.unwrap().is_none());
    }
}
