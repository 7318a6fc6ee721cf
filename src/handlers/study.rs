//! Flashcard review session handlers.
//!
//! A session enumerates its due cards once at session start and carries the
//! remaining queue through the review form. A demoted card is not
//! re-inserted into the running session; it comes back tomorrow.

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use axum::Form;
use chrono::Utc;
use serde::Deserialize;

use crate::config;
use crate::db::{self, DbPool, LogOnError};
use crate::domain::{Flashcard, ReviewLog, ReviewQuality};
use crate::srs;

use super::db_error_page;

#[derive(Template)]
#[template(path = "study.html")]
pub struct StudyTemplate {
  pub has_card: bool,
  pub card_id: i64,
  pub front: String,
  pub back: String,
  pub queue: String,
  pub remaining: usize,
}

#[derive(Template)]
#[template(path = "card.html")]
pub struct CardTemplate {
  pub card_id: i64,
  pub front: String,
  pub back: String,
  pub queue: String,
  pub remaining: usize,
}

#[derive(Template)]
#[template(path = "session_done.html")]
pub struct SessionDoneTemplate {}

#[derive(Deserialize)]
pub struct ReviewForm {
  pub card_id: i64,
  pub quality: u8,
  #[serde(default)]
  pub queue: String,
}

fn queue_string(cards: &[Flashcard]) -> String {
  cards
    .iter()
    .map(|c| c.id.to_string())
    .collect::<Vec<_>>()
    .join(",")
}

pub async fn study_start(State(pool): State<DbPool>) -> Html<String> {
  let conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page(),
  };

  // Session snapshot: taken once, not re-queried mid-session
  let due = db::get_due_cards(&conn, Utc::now(), config::SESSION_CARD_LIMIT)
    .log_warn_default("Failed to get due cards");

  let template = if let Some(card) = due.first() {
    StudyTemplate {
      has_card: true,
      card_id: card.id,
      front: card.front.clone(),
      back: card.back.clone(),
      queue: queue_string(&due[1..]),
      remaining: due.len() - 1,
    }
  } else {
    StudyTemplate {
      has_card: false,
      card_id: 0,
      front: String::new(),
      back: String::new(),
      queue: String::new(),
      remaining: 0,
    }
  };

  Html(template.render().unwrap_or_default())
}

pub async fn submit_review(State(pool): State<DbPool>, Form(form): Form<ReviewForm>) -> Html<String> {
  let now = Utc::now();
  let mut conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page(),
  };

  if let Ok(Some(card)) = db::get_card_by_id(&conn, form.card_id) {
    let result = match srs::schedule(
      form.quality,
      card.ease_factor,
      card.interval_days,
      card.repetitions,
      now,
    ) {
      Ok(result) => result,
      Err(e) => {
        tracing::warn!("Rejected review for card {}: {}", form.card_id, e);
        return Html("<p>Invalid rating.</p>".to_string());
      }
    };

    let correct = ReviewQuality::from_u8(form.quality)
      .map(|q| q.is_correct())
      .unwrap_or(form.quality >= 3);

    // Card state, review log, XP and streak commit together
    let applied = (|| -> rusqlite::Result<()> {
      let tx = conn.transaction()?;
      db::update_card_after_review(
        &tx,
        card.id,
        result.ease_factor,
        result.interval_days,
        result.repetitions,
        result.next_review,
        correct,
      )?;
      db::insert_review_log(&tx, &ReviewLog::new(card.id, form.quality))?;
      if correct {
        db::add_xp(&tx, config::XP_PER_CARD)?;
      }
      db::update_streak(&tx, now)?;
      tx.commit()
    })();
    applied.log_warn("Failed to persist review");
  }

  // Advance through the session queue fixed at session start
  let mut ids: Vec<i64> = form
    .queue
    .split(',')
    .filter_map(|s| s.trim().parse().ok())
    .collect();

  while !ids.is_empty() {
    let next_id = ids.remove(0);
    if let Ok(Some(next_card)) = db::get_card_by_id(&conn, next_id) {
      let template = CardTemplate {
        card_id: next_card.id,
        front: next_card.front.clone(),
        back: next_card.back.clone(),
        queue: ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(","),
        remaining: ids.len(),
      };
      return Html(template.render().unwrap_or_default());
    }
    // Card deleted mid-session: skip it
  }

  Html(SessionDoneTemplate {}.render().unwrap_or_default())
}
