pub mod onboarding;
pub mod quiz;
pub mod sources;
pub mod study;
pub mod subjects;

use askama::Template;
use axum::{extract::State, response::Html};
use chrono::{DateTime, Utc};

use crate::advisor::{self, RecommendedAction};
use crate::db::{self, DbPool, LogOnError};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
  pub recommendation: RecommendedAction,
  pub due_count: i64,
  pub total_cards: i64,
  pub cards_learned: i64,
  pub total_reviews: i64,
  pub xp: i64,
  pub streak_days: i64,
  pub next_review: Option<String>,
}

fn format_relative_time(dt: DateTime<Utc>) -> String {
  let now = Utc::now();
  let duration = dt.signed_duration_since(now);

  let minutes = duration.num_minutes();
  let hours = duration.num_hours();
  let days = duration.num_days();

  if minutes < 1 {
    "now".to_string()
  } else if minutes < 60 {
    format!("in {} minute{}", minutes, if minutes == 1 { "" } else { "s" })
  } else if hours < 24 {
    format!("in {} hour{}", hours, if hours == 1 { "" } else { "s" })
  } else if days == 1 {
    "tomorrow".to_string()
  } else {
    format!("in {} days", days)
  }
}

pub(crate) fn db_error_page() -> Html<String> {
  Html("<h1>Database Error</h1><p>Please refresh the page.</p>".to_string())
}

/// Dashboard: assemble the learner snapshot, run the advisor, render the
/// single next-best-action card alongside the aggregate stats.
pub async fn index(State(pool): State<DbPool>) -> Html<String> {
  let conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page(),
  };

  let now = Utc::now();
  let snapshot = match db::load_learner_snapshot(&conn, now).log_warn("Failed to load snapshot") {
    Some(snapshot) => snapshot,
    None => return db_error_page(),
  };
  let recommendation = advisor::recommend(&snapshot, now);

  let (total_cards, total_reviews, cards_learned) =
    db::get_total_stats(&conn).unwrap_or((0, 0, 0));
  let profile = db::get_profile(&conn).log_warn("Failed to load profile");
  let (xp, streak_days) = profile.map(|p| (p.xp, p.streak_days)).unwrap_or((0, 0));

  let next_review = if snapshot.flashcards_due == 0 {
    db::get_next_review_time(&conn)
      .ok()
      .flatten()
      .map(format_relative_time)
  } else {
    None
  };

  let template = IndexTemplate {
    recommendation,
    due_count: snapshot.flashcards_due as i64,
    total_cards,
    cards_learned,
    total_reviews,
    xp,
    streak_days,
    next_review,
  };

  Html(template.render().unwrap_or_default())
}

pub use onboarding::{complete_onboarding, onboarding_page};
pub use quiz::{quiz_start, submit_answer};
pub use sources::{add_source, generate_from_source, sources_page};
pub use study::{study_start, submit_review};
pub use subjects::{create_flashcard, create_subject, delete_subject, subjects_page};
