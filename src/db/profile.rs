//! Learner profile: onboarding flag, XP, and study streak.
//!
//! These replace what the hosted backend exposed as `add_user_xp` and
//! `update_user_streak` remote procedures. Callers run them inside the same
//! transaction as the review or quiz-answer write, so the award is applied
//! exactly once with the activity that earned it.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result};

use super::cards::parse_utc;

#[derive(Debug, Clone)]
pub struct Profile {
    pub onboarding_complete: bool,
    pub xp: i64,
    pub streak_days: i64,
    pub last_study_at: Option<DateTime<Utc>>,
}

pub fn get_profile(conn: &Connection) -> Result<Profile> {
    conn.query_row(
        "SELECT onboarding_complete, xp, streak_days, last_study_at FROM profile WHERE id = 1",
        [],
        |row| {
            let last_study_at: Option<String> = row.get(3)?;
            Ok(Profile {
                onboarding_complete: row.get::<_, i64>(0)? != 0,
                xp: row.get(1)?,
                streak_days: row.get(2)?,
                last_study_at: last_study_at.as_deref().map(parse_utc),
            })
        },
    )
}

pub fn set_onboarding_complete(conn: &Connection) -> Result<()> {
    conn.execute("UPDATE profile SET onboarding_complete = 1 WHERE id = 1", [])?;
    Ok(())
}

pub fn add_xp(conn: &Connection, amount: u32) -> Result<()> {
    conn.execute(
        "UPDATE profile SET xp = xp + ?1 WHERE id = 1",
        params![amount as i64],
    )?;
    Ok(())
}

/// Advance the study streak for activity at `now` and stamp
/// `last_study_at`. Consecutive calendar days (UTC) extend the streak,
/// repeated activity on the same day keeps it, anything else resets to 1.
/// Returns the new streak length.
pub fn update_streak(conn: &Connection, now: DateTime<Utc>) -> Result<i64> {
    let row: Option<(i64, Option<String>)> = conn
        .query_row(
            "SELECT streak_days, last_study_at FROM profile WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (streak, last_study_at) = row.unwrap_or((0, None));
    let new_streak = match last_study_at.as_deref().map(parse_utc) {
        None => 1,
        Some(last) => {
            let gap_days = (now.date_naive() - last.date_naive()).num_days();
            match gap_days {
                0 => streak.max(1),
                1 => streak + 1,
                _ => 1,
            }
        }
    };

    conn.execute(
        "UPDATE profile SET streak_days = ?1, last_study_at = ?2 WHERE id = 1",
        params![new_streak, now.to_rfc3339()],
    )?;
    Ok(new_streak)
}
