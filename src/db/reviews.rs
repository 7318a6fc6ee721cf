//! Review logging

use rusqlite::{params, Connection, Result};

use crate::domain::ReviewLog;

pub fn insert_review_log(conn: &Connection, log: &ReviewLog) -> Result<i64> {
    conn.execute(
        "INSERT INTO review_logs (card_id, quality, reviewed_at) VALUES (?1, ?2, ?3)",
        params![log.card_id, log.quality, log.reviewed_at.to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_total_reviews(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM review_logs", [], |row| row.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::cards::insert_card;
    use crate::db::subjects::insert_subject;
    use crate::domain::{Flashcard, Subject};
    use crate::testing::TestEnv;

    #[test]
    fn test_insert_and_count() {
        let env = TestEnv::new().unwrap();
        assert_eq!(get_total_reviews(&env.conn).unwrap(), 0);

        // Logs reference a real card; the foreign key is enforced
        let subject_id = insert_subject(&env.conn, &Subject::new("Cardiology".into())).unwrap();
        let card_id =
            insert_card(&env.conn, &Flashcard::new(subject_id, "q".into(), "a".into())).unwrap();

        insert_review_log(&env.conn, &ReviewLog::new(card_id, 4)).unwrap();
        insert_review_log(&env.conn, &ReviewLog::new(card_id, 1)).unwrap();
        assert_eq!(get_total_reviews(&env.conn).unwrap(), 2);
    }
}
