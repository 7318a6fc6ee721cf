//! Content sources: pasted study notes awaiting card generation

use chrono::Utc;
use rusqlite::{params, Connection, Result};

use super::cards::parse_utc;

#[derive(Debug, Clone)]
pub struct ContentSource {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub generated: bool,
    pub created_at: chrono::DateTime<Utc>,
}

pub fn insert_source(conn: &Connection, title: &str, body: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO content_sources (title, body, generated, created_at) VALUES (?1, ?2, 0, ?3)",
        params![title, body, Utc::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_source_by_id(conn: &Connection, id: i64) -> Result<Option<ContentSource>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, body, generated, created_at FROM content_sources WHERE id = ?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_source(row)?))
    } else {
        Ok(None)
    }
}

pub fn list_sources(conn: &Connection) -> Result<Vec<ContentSource>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, body, generated, created_at FROM content_sources ORDER BY created_at DESC",
    )?;
    let sources = stmt
        .query_map([], row_to_source)?
        .collect::<Result<Vec<_>>>()?;
    Ok(sources)
}

pub fn mark_source_generated(conn: &Connection, id: i64) -> Result<()> {
    conn.execute(
        "UPDATE content_sources SET generated = 1 WHERE id = ?1",
        params![id],
    )?;
    Ok(())
}

fn row_to_source(row: &rusqlite::Row) -> Result<ContentSource> {
    let created_at: String = row.get(4)?;
    Ok(ContentSource {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        generated: row.get::<_, i64>(3)? != 0,
        created_at: parse_utc(&created_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::stats::{count_content_sources, count_ungenerated_sources};
    use crate::testing::TestEnv;

    #[test]
    fn test_backlog_tracking() {
        let env = TestEnv::new().unwrap();
        let id = insert_source(&env.conn, "Diabetes notes", "Metformin is first line.").unwrap();

        assert_eq!(count_content_sources(&env.conn).unwrap(), 1);
        assert_eq!(count_ungenerated_sources(&env.conn).unwrap(), 1);

        mark_source_generated(&env.conn, id).unwrap();
        assert_eq!(count_ungenerated_sources(&env.conn).unwrap(), 0);

        let source = get_source_by_id(&env.conn, id).unwrap().unwrap();
        assert!(source.generated);
    }

    #[test]
    fn test_list_sources() {
        let env = TestEnv::new().unwrap();
        insert_source(&env.conn, "One", "body one").unwrap();
        insert_source(&env.conn, "Two", "body two").unwrap();
        assert_eq!(list_sources(&env.conn).unwrap().len(), 2);
    }
}
