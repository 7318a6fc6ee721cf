use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A multiple-choice question. `subject_id` is None for the seeded starter
/// bank, which is not tied to any user subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
  pub id: i64,
  pub subject_id: Option<i64>,
  pub stem: String,
  pub choices: [String; 4],
  pub correct_index: usize,
  pub explanation: Option<String>,
}

impl QuizQuestion {
  pub fn is_correct(&self, selected_index: usize) -> bool {
    selected_index == self.correct_index
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAnswer {
  pub id: i64,
  pub question_id: i64,
  pub selected_index: usize,
  pub is_correct: bool,
  pub answered_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_correct() {
    let q = QuizQuestion {
      id: 1,
      subject_id: None,
      stem: "Most common cause of community-acquired pneumonia?".into(),
      choices: [
        "Streptococcus pneumoniae".into(),
        "Klebsiella pneumoniae".into(),
        "Mycoplasma pneumoniae".into(),
        "Staphylococcus aureus".into(),
      ],
      correct_index: 0,
      explanation: None,
    };
    assert!(q.is_correct(0));
    assert!(!q.is_correct(2));
  }
}
