use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
  pub id: i64,
  pub name: String,
  pub created_at: DateTime<Utc>,
}

impl Subject {
  pub fn new(name: String) -> Self {
    Self {
      id: 0,
      name,
      created_at: Utc::now(),
    }
  }
}
