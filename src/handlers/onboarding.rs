//! Onboarding handlers.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::db::{self, DbPool, LogOnError};

use super::db_error_page;

#[derive(Template)]
#[template(path = "onboarding.html")]
pub struct OnboardingTemplate {}

pub async fn onboarding_page() -> Html<String> {
  Html(OnboardingTemplate {}.render().unwrap_or_default())
}

pub async fn complete_onboarding(State(pool): State<DbPool>) -> Response {
  let conn = match db::try_lock(&pool) {
    Ok(conn) => conn,
    Err(_) => return db_error_page().into_response(),
  };

  db::set_onboarding_complete(&conn).log_warn("Failed to complete onboarding");
  Redirect::to("/").into_response()
}
