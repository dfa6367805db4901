//! The content mirror: existence checks, ownership, and the active flag.

use rusqlite::{params, Connection, OptionalExtension};

use verdict_core::errors::VerdictResult;
use verdict_core::models::{ContentItem, ContentType};

use crate::to_storage_err;

pub fn upsert_content(conn: &Connection, item: &ContentItem) -> VerdictResult<()> {
    conn.execute(
        "INSERT INTO content_items (content_type, id, owner_id, active)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (content_type, id)
         DO UPDATE SET owner_id = excluded.owner_id, active = excluded.active",
        params![
            item.content_type.as_str(),
            item.id,
            item.owner_id,
            item.active as i32
        ],
    )
    .map_err(|e| to_storage_err(format!("upsert_content: {e}")))?;
    Ok(())
}

pub fn get_content(
    conn: &Connection,
    content_type: ContentType,
    id: &str,
) -> VerdictResult<Option<ContentItem>> {
    conn.query_row(
        "SELECT owner_id, active FROM content_items WHERE content_type = ?1 AND id = ?2",
        params![content_type.as_str(), id],
        |row| {
            Ok(ContentItem {
                content_type,
                id: id.to_string(),
                owner_id: row.get(0)?,
                active: row.get::<_, i32>(1)? != 0,
            })
        },
    )
    .optional()
    .map_err(|e| to_storage_err(format!("get_content: {e}")))
}

/// Returns the number of rows changed (0 when the item does not exist).
pub fn set_active(
    conn: &Connection,
    content_type: ContentType,
    id: &str,
    active: bool,
) -> VerdictResult<usize> {
    conn.execute(
        "UPDATE content_items SET active = ?3 WHERE content_type = ?1 AND id = ?2",
        params![content_type.as_str(), id, active as i32],
    )
    .map_err(|e| to_storage_err(format!("set_active: {e}")))
}
