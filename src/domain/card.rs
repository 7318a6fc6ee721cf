use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A flashcard plus its spaced-repetition review state. The SM-2 fields
/// live on the card row and are mutated exactly once per review submission;
/// they are deleted with the card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
  pub id: i64,
  pub subject_id: i64,
  pub front: String,
  pub back: String,

  // SM-2 review state
  pub ease_factor: f64,
  pub interval_days: i64,
  pub repetitions: i64,
  pub next_review: DateTime<Utc>,

  // Stats
  pub total_reviews: i64,
  pub correct_reviews: i64,

  pub created_at: DateTime<Utc>,
}

impl Flashcard {
  /// New card with the initial review state: due now, ease factor 2.5.
  pub fn new(subject_id: i64, front: String, back: String) -> Self {
    let now = Utc::now();
    Self {
      id: 0,
      subject_id,
      front,
      back,
      ease_factor: 2.5,
      interval_days: 0,
      repetitions: 0,
      next_review: now,
      total_reviews: 0,
      correct_reviews: 0,
      created_at: now,
    }
  }
}
