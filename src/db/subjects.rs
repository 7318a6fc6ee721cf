//! Subject tracking

use chrono::Utc;
use rusqlite::{params, Connection, Result};

use crate::domain::Subject;

use super::cards::parse_utc;

/// Subject row joined with its card counts, for the subjects page
#[derive(Debug, Clone)]
pub struct SubjectOverview {
    pub id: i64,
    pub name: String,
    pub card_count: i64,
    pub due_count: i64,
}

pub fn insert_subject(conn: &Connection, subject: &Subject) -> Result<i64> {
    conn.execute(
        "INSERT INTO subjects (name, created_at) VALUES (?1, ?2)",
        params![subject.name, subject.created_at.to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_subject_by_id(conn: &Connection, id: i64) -> Result<Option<Subject>> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM subjects WHERE id = ?1")?;
    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        let created_at: String = row.get(2)?;
        Ok(Some(Subject {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: parse_utc(&created_at),
        }))
    } else {
        Ok(None)
    }
}

pub fn get_subjects_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM subjects", [], |row| row.get(0))
}

pub fn list_subjects_with_counts(conn: &Connection) -> Result<Vec<SubjectOverview>> {
    let now = Utc::now().to_rfc3339();
    let mut stmt = conn.prepare(
        r#"
    SELECT s.id, s.name,
           COUNT(f.id),
           COALESCE(SUM(CASE WHEN f.next_review <= ?1 THEN 1 ELSE 0 END), 0)
    FROM subjects s
    LEFT JOIN flashcards f ON f.subject_id = s.id
    GROUP BY s.id
    ORDER BY s.name
    "#,
    )?;

    let subjects = stmt
        .query_map(params![now], |row| {
            Ok(SubjectOverview {
                id: row.get(0)?,
                name: row.get(1)?,
                card_count: row.get(2)?,
                due_count: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(subjects)
}

/// Delete a subject and everything owned by it. Review state lives on the
/// card rows, so it goes with them.
pub fn delete_subject(conn: &Connection, id: i64) -> Result<()> {
    conn.execute(
        "DELETE FROM review_logs WHERE card_id IN (SELECT id FROM flashcards WHERE subject_id = ?1)",
        params![id],
    )?;
    conn.execute("DELETE FROM flashcards WHERE subject_id = ?1", params![id])?;
    conn.execute("DELETE FROM subjects WHERE id = ?1", params![id])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::cards::{get_total_cards, insert_card};
    use crate::db::reviews::insert_review_log;
    use crate::domain::{Flashcard, ReviewLog};
    use crate::testing::TestEnv;

    #[test]
    fn test_insert_and_count() {
        let env = TestEnv::new().unwrap();
        assert_eq!(get_subjects_count(&env.conn).unwrap(), 0);

        insert_subject(&env.conn, &Subject::new("Cardiology".into())).unwrap();
        insert_subject(&env.conn, &Subject::new("Anatomy".into())).unwrap();
        assert_eq!(get_subjects_count(&env.conn).unwrap(), 2);
    }

    #[test]
    fn test_overview_counts() {
        let env = TestEnv::new().unwrap();
        let id = insert_subject(&env.conn, &Subject::new("Cardiology".into())).unwrap();
        insert_card(&env.conn, &Flashcard::new(id, "q1".into(), "a1".into())).unwrap();
        insert_card(&env.conn, &Flashcard::new(id, "q2".into(), "a2".into())).unwrap();

        let overview = list_subjects_with_counts(&env.conn).unwrap();
        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].card_count, 2);
        assert_eq!(overview[0].due_count, 2);
    }

    #[test]
    fn test_delete_cascades_to_cards_and_logs() {
        let env = TestEnv::new().unwrap();
        let id = insert_subject(&env.conn, &Subject::new("Cardiology".into())).unwrap();
        let card_id =
            insert_card(&env.conn, &Flashcard::new(id, "q".into(), "a".into())).unwrap();
        insert_review_log(&env.conn, &ReviewLog::new(card_id, 4)).unwrap();

        delete_subject(&env.conn, id).unwrap();

        assert_eq!(get_subjects_count(&env.conn).unwrap(), 0);
        assert_eq!(get_total_cards(&env.conn).unwrap(), 0);
        let logs: i64 = env
            .conn
            .query_row("SELECT COUNT(*) FROM review_logs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(logs, 0);
    }
}
