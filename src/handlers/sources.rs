//! Content source handlers: paste notes, generate flashcards from them.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::config;
use crate::content;
use crate::db::{self, ContentSource, DbPool, LogOnError, SubjectOverview};
use crate::domain::Flashcard;

use super::db_error_page;

#[derive(Template)]
#[template(path = "sources.html")]
pub struct SourcesTemplate {
  pub sources: Vec<ContentSource>,
  pub subjects: Vec<SubjectOverview>,
}

#[derive(Deserialize)]
pub struct SourceForm {
  pub title: String,
  pub body: String,
}

#[derive(Deserialize)]
pub struct GenerateForm {
  pub subject_id: i64,
}

pub async fn sources_page(State(pool): State<DbPool>) -> Html<String> {
  let conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page(),
  };

  let sources = db::list_sources(&conn).log_warn_default("Failed to list sources");
  let subjects = db::list_subjects_with_counts(&conn).log_warn_default("Failed to list subjects");
  Html(SourcesTemplate { sources, subjects }.render().unwrap_or_default())
}

pub async fn add_source(State(pool): State<DbPool>, Form(form): Form<SourceForm>) -> Response {
  let conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page().into_response(),
  };

  let title = form.title.trim();
  if !title.is_empty() && !form.body.trim().is_empty() {
    db::insert_source(&conn, title, form.body.trim()).log_warn("Failed to add source");
  }
  Redirect::to("/sources").into_response()
}

/// Run the configured generator over one source and attach the drafts to a
/// subject as fresh cards.
pub async fn generate_from_source(
  State(pool): State<DbPool>,
  Path(id): Path<i64>,
  Form(form): Form<GenerateForm>,
) -> Response {
  let mut conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page().into_response(),
  };

  let Ok(Some(source)) = db::get_source_by_id(&conn, id) else {
    return Redirect::to("/sources").into_response();
  };
  let Ok(Some(subject)) = db::get_subject_by_id(&conn, form.subject_id) else {
    tracing::warn!("Generate requested for unknown subject {}", form.subject_id);
    return Redirect::to("/sources").into_response();
  };

  let generator = content::from_provider(&config::load_generator_provider());
  let drafts = generator.generate(&source.body, config::MAX_GENERATED_CARDS);
  tracing::info!(
    "Generated {} draft cards from source '{}' via {}",
    drafts.len(),
    source.title,
    generator.name()
  );

  let applied = (|| -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    for draft in &drafts {
      db::insert_card(
        &tx,
        &Flashcard::new(subject.id, draft.front.clone(), draft.back.clone()),
      )?;
    }
    db::mark_source_generated(&tx, source.id)?;
    tx.commit()
  })();
  applied.log_warn("Failed to persist generated cards");

  Redirect::to("/sources").into_response()
}
