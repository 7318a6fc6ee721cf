use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

const MIN_EASE_FACTOR: f64 = 1.3;

/// Rejected scheduler input. Any of these is a bug at the call site, not a
/// runtime condition to retry.
#[derive(Debug, Error, PartialEq)]
pub enum SrsError {
  #[error("quality must be in 1..=5, got {0}")]
  QualityOutOfRange(u8),
  #[error("interval must be non-negative, got {0}")]
  NegativeInterval(i64),
  #[error("repetitions must be non-negative, got {0}")]
  NegativeRepetitions(i64),
  #[error("ease factor must be finite, got {0}")]
  NonFiniteEaseFactor(f64),
}

#[derive(Debug)]
pub struct Sm2Result {
  pub ease_factor: f64,
  pub interval_days: i64,
  pub repetitions: i64,
  pub next_review: DateTime<Utc>,
}

/// SM-2 scheduling step. Takes the card's current review state plus a
/// quality rating (1=forgot entirely .. 5=trivially easy; below 3 counts as
/// failed recall) and returns the next state. Pure: `now` is passed in and
/// nothing is persisted here.
pub fn schedule(
  quality: u8,
  ease_factor: f64,
  interval_days: i64,
  repetitions: i64,
  now: DateTime<Utc>,
) -> Result<Sm2Result, SrsError> {
  if !(1..=5).contains(&quality) {
    return Err(SrsError::QualityOutOfRange(quality));
  }
  if interval_days < 0 {
    return Err(SrsError::NegativeInterval(interval_days));
  }
  if repetitions < 0 {
    return Err(SrsError::NegativeRepetitions(repetitions));
  }
  if !ease_factor.is_finite() {
    return Err(SrsError::NonFiniteEaseFactor(ease_factor));
  }

  let (new_interval, new_repetitions) = if quality < 3 {
    // Failed recall: demote to "review tomorrow" regardless of prior streak
    (1, 0)
  } else {
    // Interval grows from the ease factor as it stood before this review.
    // Clamped: the output interval is never below one day, even for a
    // zero-interval input.
    let interval = match repetitions {
      0 => 1,
      1 => 3,
      _ => (((interval_days as f64) * ease_factor).round() as i64).max(1),
    };
    (interval, repetitions + 1)
  };

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3.
  // Applied for success and failure alike, using the original quality.
  let q = quality as f64;
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let new_ease_factor = (ease_factor + ease_delta).max(MIN_EASE_FACTOR);

  Ok(Sm2Result {
    ease_factor: new_ease_factor,
    interval_days: new_interval,
    repetitions: new_repetitions,
    next_review: now + Duration::days(new_interval),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn schedule_now(quality: u8, ef: f64, interval: i64, reps: i64) -> Sm2Result {
    schedule(quality, ef, interval, reps, Utc::now()).unwrap()
  }

  #[test]
  fn test_first_review_good() {
    let result = schedule_now(4, 2.5, 0, 0);
    assert_eq!(result.repetitions, 1);
    assert_eq!(result.interval_days, 1);
    assert!((result.ease_factor - 2.5).abs() < 0.01);
  }

  #[test]
  fn test_second_review_good() {
    let result = schedule_now(4, 2.5, 1, 1);
    assert_eq!(result.repetitions, 2);
    assert_eq!(result.interval_days, 3);
  }

  #[test]
  fn test_third_review_good() {
    // round(3 * 2.5) = 8
    let result = schedule_now(4, 2.5, 3, 2);
    assert_eq!(result.repetitions, 3);
    assert_eq!(result.interval_days, 8);
  }

  #[test]
  fn test_failed_review_resets() {
    let result = schedule_now(1, 2.5, 15, 5);
    assert_eq!(result.repetitions, 0);
    assert_eq!(result.interval_days, 1);
    assert!(result.ease_factor < 2.5);
  }

  #[test]
  fn test_forgot_after_single_success() {
    // EF: max(1.3, 2.5 + (0.1 - 4 * (0.08 + 4 * 0.02))) = 2.5 - 0.54 = 1.96
    let result = schedule_now(1, 2.5, 1, 1);
    assert!((result.ease_factor - 1.96).abs() < 1e-9);
    assert_eq!(result.interval_days, 1);
    assert_eq!(result.repetitions, 0);
  }

  #[test]
  fn test_hard_review_counts_as_failure() {
    let result = schedule_now(2, 2.5, 3, 2);
    assert_eq!(result.repetitions, 0);
    assert_eq!(result.interval_days, 1);
  }

  #[test]
  fn test_easy_review_increases_ease() {
    let result = schedule_now(5, 2.5, 1, 1);
    assert!(result.ease_factor > 2.5);
    assert_eq!(result.interval_days, 3);
  }

  #[test]
  fn test_ease_factor_floor() {
    // Repeated failures must not push the ease factor below 1.3
    let mut ef = 2.5;
    let mut interval = 10;
    let mut reps = 5;

    for _ in 0..10 {
      let result = schedule_now(1, ef, interval, reps);
      ef = result.ease_factor;
      interval = result.interval_days;
      reps = result.repetitions;
    }

    assert!((ef - MIN_EASE_FACTOR).abs() < 0.01);
  }

  #[test]
  fn test_ease_factor_floor_all_qualities() {
    for quality in 1..=5u8 {
      for ef in [1.3, 1.5, 2.5, 3.0] {
        let result = schedule_now(quality, ef, 4, 2);
        assert!(result.ease_factor >= MIN_EASE_FACTOR);
      }
    }
  }

  #[test]
  fn test_interval_at_least_one_day() {
    for quality in 1..=5u8 {
      let result = schedule_now(quality, 2.5, 0, 0);
      assert!(result.interval_days >= 1);
    }

    // A zero interval alongside a mature repetition count is inconsistent
    // input; the multiplicative branch must still schedule at least a day out
    for repetitions in 2..=5 {
      let result = schedule_now(4, 2.5, 0, repetitions);
      assert!(result.interval_days >= 1);
    }
  }

  #[test]
  fn test_good_progression() {
    let mut ef = 2.5;
    let mut interval = 0;
    let mut reps = 0;

    // Simulate 5 "Good" reviews
    for i in 0..5 {
      let result = schedule_now(4, ef, interval, reps);
      ef = result.ease_factor;
      interval = result.interval_days;
      reps = result.repetitions;

      match i {
        0 => assert_eq!(interval, 1),
        1 => assert_eq!(interval, 3),
        2 => assert_eq!(interval, 8),
        _ => assert!(interval > 8),
      }
    }
    assert_eq!(reps, 5);
  }

  #[test]
  fn test_next_review_offset() {
    let now = "2026-03-01T09:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let result = schedule(4, 2.5, 1, 1, now).unwrap();
    assert_eq!(result.next_review, now + Duration::days(3));
  }

  #[test]
  fn test_rejects_quality_out_of_range() {
    let now = Utc::now();
    assert_eq!(
      schedule(0, 2.5, 1, 1, now).unwrap_err(),
      SrsError::QualityOutOfRange(0)
    );
    assert_eq!(
      schedule(6, 2.5, 1, 1, now).unwrap_err(),
      SrsError::QualityOutOfRange(6)
    );
  }

  #[test]
  fn test_rejects_negative_state() {
    let now = Utc::now();
    assert_eq!(
      schedule(4, 2.5, -1, 0, now).unwrap_err(),
      SrsError::NegativeInterval(-1)
    );
    assert_eq!(
      schedule(4, 2.5, 0, -3, now).unwrap_err(),
      SrsError::NegativeRepetitions(-3)
    );
  }

  #[test]
  fn test_rejects_non_finite_ease() {
    let err = schedule(4, f64::NAN, 1, 1, Utc::now()).unwrap_err();
    assert!(matches!(err, SrsError::NonFiniteEaseFactor(_)));
  }
}
