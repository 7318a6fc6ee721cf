//! Subject and flashcard management handlers.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::db::{self, DbPool, LogOnError, SubjectOverview};
use crate::domain::{Flashcard, Subject};

use super::db_error_page;

#[derive(Template)]
#[template(path = "subjects.html")]
pub struct SubjectsTemplate {
  pub subjects: Vec<SubjectOverview>,
}

#[derive(Deserialize)]
pub struct SubjectForm {
  pub name: String,
}

#[derive(Deserialize)]
pub struct CardForm {
  pub subject_id: i64,
  pub front: String,
  pub back: String,
}

pub async fn subjects_page(State(pool): State<DbPool>) -> Html<String> {
  let conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page(),
  };

  let subjects = db::list_subjects_with_counts(&conn).log_warn_default("Failed to list subjects");
  Html(SubjectsTemplate { subjects }.render().unwrap_or_default())
}

pub async fn create_subject(State(pool): State<DbPool>, Form(form): Form<SubjectForm>) -> Response {
  let conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page().into_response(),
  };

  let name = form.name.trim();
  if !name.is_empty() {
    db::insert_subject(&conn, &Subject::new(name.to_string())).log_warn("Failed to add subject");
  }
  Redirect::to("/subjects").into_response()
}

pub async fn delete_subject(State(pool): State<DbPool>, Path(id): Path<i64>) -> Response {
  let conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page().into_response(),
  };

  db::subjects::delete_subject(&conn, id).log_warn("Failed to delete subject");
  Redirect::to("/subjects").into_response()
}

pub async fn create_flashcard(State(pool): State<DbPool>, Form(form): Form<CardForm>) -> Response {
  let conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page().into_response(),
  };

  let front = form.front.trim();
  let back = form.back.trim();
  if !front.is_empty() && !back.is_empty() {
    db::insert_card(
      &conn,
      &Flashcard::new(form.subject_id, front.to_string(), back.to_string()),
    )
    .log_warn("Failed to add flashcard");
  }
  Redirect::to("/subjects").into_response()
}
