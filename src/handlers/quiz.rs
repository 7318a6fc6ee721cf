//! Multiple-choice quiz handlers.

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use axum::Form;
use chrono::Utc;
use rand::Rng;
use serde::Deserialize;

use crate::config;
use crate::db::{self, DbPool, LogOnError};
use crate::domain::QuizAnswer;

use super::db_error_page;

#[derive(Template)]
#[template(path = "quiz.html")]
pub struct QuizTemplate {
  pub has_question: bool,
  pub question_id: i64,
  pub stem: String,
  pub choices: Vec<String>,
}

#[derive(Template)]
#[template(path = "quiz_feedback.html")]
pub struct QuizFeedbackTemplate {
  pub correct: bool,
  pub correct_choice: String,
  pub explanation: String,
}

#[derive(Deserialize)]
pub struct AnswerForm {
  pub question_id: i64,
  pub selected: usize,
}

pub async fn quiz_start(State(pool): State<DbPool>) -> Html<String> {
  let conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page(),
  };

  let count = db::count_questions(&conn).log_warn_default("Failed to count questions");
  let question = if count > 0 {
    let offset = rand::rng().random_range(0..count);
    db::get_question_by_offset(&conn, offset).log_warn("Failed to load question").flatten()
  } else {
    None
  };

  let template = if let Some(question) = question {
    QuizTemplate {
      has_question: true,
      question_id: question.id,
      stem: question.stem.clone(),
      choices: question.choices.to_vec(),
    }
  } else {
    QuizTemplate {
      has_question: false,
      question_id: 0,
      stem: String::new(),
      choices: Vec::new(),
    }
  };

  Html(template.render().unwrap_or_default())
}

pub async fn submit_answer(State(pool): State<DbPool>, Form(form): Form<AnswerForm>) -> Html<String> {
  let now = Utc::now();
  let mut conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page(),
  };

  let Ok(Some(question)) = db::get_question_by_id(&conn, form.question_id) else {
    return Html("<p>Question not found.</p>".to_string());
  };
  let correct = question.is_correct(form.selected);

  let applied = (|| -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    db::insert_answer(
      &tx,
      &QuizAnswer {
        id: 0,
        question_id: question.id,
        selected_index: form.selected,
        is_correct: correct,
        answered_at: now,
      },
    )?;
    if correct {
      db::add_xp(&tx, config::XP_PER_QUIZ_QUESTION)?;
    }
    db::update_streak(&tx, now)?;
    tx.commit()
  })();
  applied.log_warn("Failed to persist answer");

  let template = QuizFeedbackTemplate {
    correct,
    correct_choice: question.choices[question.correct_index].clone(),
    explanation: question.explanation.clone().unwrap_or_default(),
  };
  Html(template.render().unwrap_or_default())
}
