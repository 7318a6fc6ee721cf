use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four recall ratings surfaced in the study UI, mapped to SM-2 quality
/// values. Quality 3 is intentionally absent from the UI mapping and remains
/// reachable only through the scheduler API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewQuality {
  Forgot = 1,
  Hard = 2,
  Good = 4,
  Easy = 5,
}

impl ReviewQuality {
  pub fn from_u8(value: u8) -> Option<Self> {
    match value {
      1 => Some(Self::Forgot),
      2 => Some(Self::Hard),
      4 => Some(Self::Good),
      5 => Some(Self::Easy),
      _ => None,
    }
  }

  pub fn as_u8(&self) -> u8 {
    *self as u8
  }

  /// Successful recall under SM-2 means quality >= 3, so Hard still fails.
  pub fn is_correct(&self) -> bool {
    matches!(self, Self::Good | Self::Easy)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLog {
  pub id: i64,
  pub card_id: i64,
  pub quality: u8,
  pub reviewed_at: DateTime<Utc>,
}

impl ReviewLog {
  pub fn new(card_id: i64, quality: u8) -> Self {
    Self {
      id: 0,
      card_id,
      quality,
      reviewed_at: Utc::now(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_quality_mapping() {
    assert_eq!(ReviewQuality::from_u8(1), Some(ReviewQuality::Forgot));
    assert_eq!(ReviewQuality::from_u8(2), Some(ReviewQuality::Hard));
    assert_eq!(ReviewQuality::from_u8(4), Some(ReviewQuality::Good));
    assert_eq!(ReviewQuality::from_u8(5), Some(ReviewQuality::Easy));
  }

  #[test]
  fn test_quality_three_not_in_ui_mapping() {
    assert_eq!(ReviewQuality::from_u8(3), None);
    assert_eq!(ReviewQuality::from_u8(0), None);
    assert_eq!(ReviewQuality::from_u8(6), None);
  }

  #[test]
  fn test_is_correct() {
    assert!(!ReviewQuality::Forgot.is_correct());
    assert!(!ReviewQuality::Hard.is_correct());
    assert!(ReviewQuality::Good.is_correct());
    assert!(ReviewQuality::Easy.is_correct());
  }

  #[test]
  fn test_quality_values() {
    assert_eq!(ReviewQuality::Forgot.as_u8(), 1);
    assert_eq!(ReviewQuality::Hard.as_u8(), 2);
    assert_eq!(ReviewQuality::Good.as_u8(), 4);
    assert_eq!(ReviewQuality::Easy.as_u8(), 5);
  }

  #[test]
  fn test_review_log_new() {
    let log = ReviewLog::new(42, 4);
    assert_eq!(log.id, 0);
    assert_eq!(log.card_id, 42);
    assert_eq!(log.quality, 4);
  }
}
