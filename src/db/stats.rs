//! Aggregate stats and learner-snapshot assembly

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result};

use crate::advisor::LearnerSnapshot;

use super::cards::{get_due_count, get_total_cards};
use super::profile::get_profile;
use super::quiz::count_answers_since;
use super::reviews::get_total_reviews;
use super::subjects::get_subjects_count;

/// (total_cards, total_reviews, cards_learned)
pub fn get_total_stats(conn: &Connection) -> Result<(i64, i64, i64)> {
    let total_cards = get_total_cards(conn)?;
    let total_reviews = get_total_reviews(conn)?;
    let cards_learned: i64 = conn.query_row(
        "SELECT COUNT(*) FROM flashcards WHERE repetitions > 0",
        [],
        |row| row.get(0),
    )?;
    Ok((total_cards, total_reviews, cards_learned))
}

pub fn count_content_sources(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM content_sources", [], |row| row.get(0))
}

pub fn count_ungenerated_sources(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM content_sources WHERE generated = 0",
        [],
        |row| row.get(0),
    )
}

/// Assemble the advisor's snapshot from independent reads. No atomicity
/// across the reads: a slightly stale field is fine for an advisory
/// recommendation.
pub fn load_learner_snapshot(conn: &Connection, now: DateTime<Utc>) -> Result<LearnerSnapshot> {
    let profile = get_profile(conn)?;
    let day_start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();

    Ok(LearnerSnapshot {
        onboarding_complete: profile.onboarding_complete,
        subjects_count: get_subjects_count(conn)? as u32,
        flashcards_due: get_due_count(conn, now)? as u32,
        total_flashcards: get_total_cards(conn)? as u32,
        questions_answered_today: count_answers_since(conn, day_start)? as u32,
        last_study_at: profile.last_study_at,
        has_content_sources: count_content_sources(conn)? > 0,
        content_backlog_count: count_ungenerated_sources(conn)? as u32,
    })
}
