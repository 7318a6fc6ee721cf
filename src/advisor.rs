//! Next-best-action engine for the dashboard.
//!
//! Takes a snapshot of the learner's aggregate progress and picks the single
//! highest-priority study action. Pure rule evaluation: the snapshot is
//! assembled by the db layer (`db::stats::load_learner_snapshot`) and the
//! caller passes `now` explicitly, so identical inputs always produce the
//! same recommendation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config;

/// Aggregate progress snapshot, assembled fresh on each dashboard load from
/// independent reads and discarded afterwards. Counts are unsigned so a
/// malformed (negative) snapshot is unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnerSnapshot {
  pub onboarding_complete: bool,
  pub subjects_count: u32,
  pub flashcards_due: u32,
  pub total_flashcards: u32,
  pub questions_answered_today: u32,
  pub last_study_at: Option<DateTime<Utc>>,
  pub has_content_sources: bool,
  pub content_backlog_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
  Onboarding,
  ReviewDueCards,
  TakeQuiz,
  GenerateContent,
  QuickSession,
  ContinueStudying,
}

impl ActionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Onboarding => "onboarding",
      Self::ReviewDueCards => "review_due_cards",
      Self::TakeQuiz => "take_quiz",
      Self::GenerateContent => "generate_content",
      Self::QuickSession => "quick_session",
      Self::ContinueStudying => "continue_studying",
    }
  }
}

/// A single recommendation, consumed immediately by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedAction {
  pub kind: ActionKind,
  pub title: String,
  pub description: String,
  pub cta_label: &'static str,
  pub route: &'static str,
  pub priority: u8,
  pub estimated_minutes: u32,
  pub xp_reward: u32,
}

/// Pick the highest-priority action for this snapshot.
///
/// Candidates are collected in rule-declaration order and stably sorted by
/// priority, so ties resolve in favor of the earlier rule. Always returns an
/// action: when no rule fires (returning user, onboarding done, nothing due,
/// no subjects) the "add your first subject" fallback applies.
pub fn recommend(snapshot: &LearnerSnapshot, now: DateTime<Utc>) -> RecommendedAction {
  let mut candidates: Vec<RecommendedAction> = Vec::new();

  if !snapshot.onboarding_complete {
    candidates.push(RecommendedAction {
      kind: ActionKind::Onboarding,
      title: "Set up your study plan".into(),
      description: "Tell us what you're preparing for to get a personalized plan.".into(),
      cta_label: "Start setup",
      route: "/onboarding",
      priority: 100,
      estimated_minutes: 5,
      xp_reward: 20,
    });
  }

  // Streak at risk only inside the (20h, 48h) window since the last study
  // activity. Inside 20h it is not urgent yet; past 48h the streak is
  // already gone and the rule goes quiet (kept as-is, see DESIGN.md).
  if let Some(last_study_at) = snapshot.last_study_at {
    let since_last_study = now - last_study_at;
    if since_last_study > Duration::hours(config::STREAK_RISK_MIN_HOURS)
      && since_last_study < Duration::hours(config::STREAK_RISK_MAX_HOURS)
    {
      candidates.push(RecommendedAction {
        kind: ActionKind::QuickSession,
        title: "Keep your streak alive".into(),
        description: "A quick session today keeps your study streak going.".into(),
        cta_label: "Quick session",
        route: "/study",
        priority: 90,
        estimated_minutes: 5,
        xp_reward: 5 * config::XP_PER_CARD,
      });
    }
  }

  if snapshot.flashcards_due > 0 {
    let due = snapshot.flashcards_due;
    candidates.push(RecommendedAction {
      kind: ActionKind::ReviewDueCards,
      title: format!("Review {} due card{}", due, if due == 1 { "" } else { "s" }),
      description: "Cards scheduled by spaced repetition are waiting for you.".into(),
      cta_label: "Start reviewing",
      route: "/study",
      priority: 80,
      estimated_minutes: due.min(config::REVIEW_MINUTES_CAP),
      xp_reward: due * config::XP_PER_CARD,
    });
  }

  if snapshot.questions_answered_today == 0 && snapshot.total_flashcards > 0 {
    candidates.push(RecommendedAction {
      kind: ActionKind::TakeQuiz,
      title: "Test yourself with a quiz".into(),
      description: "You haven't answered any questions today.".into(),
      cta_label: "Take quiz",
      route: "/quiz",
      priority: 60,
      estimated_minutes: 10,
      xp_reward: config::XP_PER_QUIZ_QUESTION,
    });
  }

  if snapshot.has_content_sources && snapshot.content_backlog_count > 0 {
    let backlog = snapshot.content_backlog_count;
    candidates.push(RecommendedAction {
      kind: ActionKind::GenerateContent,
      title: format!(
        "Generate cards from {} source{}",
        backlog,
        if backlog == 1 { "" } else { "s" }
      ),
      description: "Turn your uploaded notes into flashcards.".into(),
      cta_label: "Generate",
      route: "/sources",
      priority: 50,
      estimated_minutes: 2,
      xp_reward: 0,
    });
  }

  if snapshot.subjects_count > 0
    && snapshot.flashcards_due == 0
    && snapshot.questions_answered_today > 0
  {
    candidates.push(RecommendedAction {
      kind: ActionKind::ContinueStudying,
      title: "Keep the momentum going".into(),
      description: "Nothing is due right now; squeeze in some extra practice.".into(),
      cta_label: "More practice",
      route: "/quiz",
      priority: 30,
      estimated_minutes: 10,
      xp_reward: 0,
    });
  }

  // Vec::sort_by is stable, so equal priorities keep rule order
  candidates.sort_by(|a, b| b.priority.cmp(&a.priority));

  candidates.into_iter().next().unwrap_or(RecommendedAction {
    kind: ActionKind::Onboarding,
    title: "Add your first subject".into(),
    description: "Create a subject to start building your deck.".into(),
    cta_label: "Add subject",
    route: "/subjects",
    priority: 100,
    estimated_minutes: 2,
    xp_reward: 0,
  })
}
