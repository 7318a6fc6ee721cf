//! Flashcard CRUD and due-card queries

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::Flashcard;

pub fn insert_card(conn: &Connection, card: &Flashcard) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO flashcards (subject_id, front, back, ease_factor, interval_days,
                            repetitions, next_review, total_reviews, correct_reviews, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    "#,
        params![
            card.subject_id,
            card.front,
            card.back,
            card.ease_factor,
            card.interval_days,
            card.repetitions,
            card.next_review.to_rfc3339(),
            card.total_reviews,
            card.correct_reviews,
            card.created_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_card_by_id(conn: &Connection, id: i64) -> Result<Option<Flashcard>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, subject_id, front, back, ease_factor, interval_days, repetitions,
           next_review, total_reviews, correct_reviews, created_at
    FROM flashcards WHERE id = ?1
    "#,
    )?;

    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_card(row)?))
    } else {
        Ok(None)
    }
}

/// Cards due at `now`, oldest due date first. This is the session snapshot
/// query: a study session calls it once at session start and then works
/// through the fixed sequence.
pub fn get_due_cards(conn: &Connection, now: DateTime<Utc>, limit: usize) -> Result<Vec<Flashcard>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, subject_id, front, back, ease_factor, interval_days, repetitions,
           next_review, total_reviews, correct_reviews, created_at
    FROM flashcards
    WHERE next_review <= ?1
    ORDER BY next_review ASC
    LIMIT ?2
    "#,
    )?;

    let cards = stmt
        .query_map(params![now.to_rfc3339(), limit as i64], row_to_card)?
        .collect::<Result<Vec<_>>>()?;
    Ok(cards)
}

pub fn get_due_count(conn: &Connection, now: DateTime<Utc>) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM flashcards WHERE next_review <= ?1",
        params![now.to_rfc3339()],
        |row| row.get(0),
    )
}

pub fn get_total_cards(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM flashcards", [], |row| row.get(0))
}

/// Earliest upcoming review, for the "all caught up" dashboard state
pub fn get_next_review_time(conn: &Connection) -> Result<Option<DateTime<Utc>>> {
    let next: Option<String> = conn.query_row(
        "SELECT MIN(next_review) FROM flashcards",
        [],
        |row| row.get(0),
    )?;

    Ok(next.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}

/// Persist the scheduler's output for one card. The single mutation point
/// for review state.
pub fn update_card_after_review(
    conn: &Connection,
    card_id: i64,
    ease_factor: f64,
    interval_days: i64,
    repetitions: i64,
    next_review: DateTime<Utc>,
    correct: bool,
) -> Result<()> {
    conn.execute(
        r#"
    UPDATE flashcards
    SET ease_factor = ?1,
        interval_days = ?2,
        repetitions = ?3,
        next_review = ?4,
        total_reviews = total_reviews + 1,
        correct_reviews = correct_reviews + ?5
    WHERE id = ?6
    "#,
        params![
            ease_factor,
            interval_days,
            repetitions,
            next_review.to_rfc3339(),
            if correct { 1 } else { 0 },
            card_id,
        ],
    )?;
    Ok(())
}

pub(super) fn row_to_card(row: &rusqlite::Row) -> Result<Flashcard> {
    let next_review_str: String = row.get(7)?;
    let created_at_str: String = row.get(10)?;

    Ok(Flashcard {
        id: row.get(0)?,
        subject_id: row.get(1)?,
        front: row.get(2)?,
        back: row.get(3)?,
        ease_factor: row.get(4)?,
        interval_days: row.get(5)?,
        repetitions: row.get(6)?,
        next_review: parse_utc(&next_review_str),
        total_reviews: row.get(8)?,
        correct_reviews: row.get(9)?,
        created_at: parse_utc(&created_at_str),
    })
}

pub(super) fn parse_utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::subjects::insert_subject;
    use crate::domain::Subject;
    use crate::testing::TestEnv;
    use chrono::Duration;

    fn setup_card(env: &TestEnv) -> i64 {
        let subject_id = insert_subject(&env.conn, &Subject::new("Pharmacology".into())).unwrap();
        insert_card(
            &env.conn,
            &Flashcard::new(subject_id, "MOA of metformin?".into(), "Inhibits hepatic gluconeogenesis".into()),
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_get_card() {
        let env = TestEnv::new().unwrap();
        let id = setup_card(&env);

        let card = get_card_by_id(&env.conn, id).unwrap().unwrap();
        assert_eq!(card.front, "MOA of metformin?");
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.interval_days, 0);
        assert!((card.ease_factor - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_card_is_due() {
        let env = TestEnv::new().unwrap();
        setup_card(&env);

        let now = Utc::now();
        assert_eq!(get_due_count(&env.conn, now).unwrap(), 1);
        assert_eq!(get_due_cards(&env.conn, now, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_update_after_review_clears_due() {
        let env = TestEnv::new().unwrap();
        let id = setup_card(&env);
        let now = Utc::now();

        update_card_after_review(&env.conn, id, 2.5, 1, 1, now + Duration::days(1), true).unwrap();

        assert_eq!(get_due_count(&env.conn, now).unwrap(), 0);
        let card = get_card_by_id(&env.conn, id).unwrap().unwrap();
        assert_eq!(card.repetitions, 1);
        assert_eq!(card.total_reviews, 1);
        assert_eq!(card.correct_reviews, 1);

        let next = get_next_review_time(&env.conn).unwrap().unwrap();
        assert!(next > now);
    }

    #[test]
    fn test_due_order_is_oldest_first() {
        let env = TestEnv::new().unwrap();
        let subject_id = insert_subject(&env.conn, &Subject::new("Anatomy".into())).unwrap();
        let now = Utc::now();

        let mut old = Flashcard::new(subject_id, "older".into(), "a".into());
        old.next_review = now - Duration::days(3);
        let mut recent = Flashcard::new(subject_id, "newer".into(), "b".into());
        recent.next_review = now - Duration::days(1);

        insert_card(&env.conn, &recent).unwrap();
        insert_card(&env.conn, &old).unwrap();

        let due = get_due_cards(&env.conn, now, 10).unwrap();
        assert_eq!(due[0].front, "older");
        assert_eq!(due[1].front, "newer");
    }
}
