//! Router construction, shared by `main` and the integration tests.

use axum::{routing::get, routing::post, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::db::DbPool;
use crate::handlers;

pub fn router(pool: DbPool) -> Router {
  Router::new()
    .route("/", get(handlers::index))
    .route("/study", get(handlers::study_start))
    .route("/review", post(handlers::submit_review))
    .route("/quiz", get(handlers::quiz_start))
    .route("/quiz/answer", post(handlers::submit_answer))
    .route("/subjects", get(handlers::subjects_page).post(handlers::create_subject))
    .route("/subjects/{id}/delete", post(handlers::delete_subject))
    .route("/flashcards", post(handlers::create_flashcard))
    .route("/onboarding", get(handlers::onboarding_page))
    .route("/onboarding/complete", post(handlers::complete_onboarding))
    .route("/sources", get(handlers::sources_page).post(handlers::add_source))
    .route("/sources/{id}/generate", post(handlers::generate_from_source))
    .nest_service("/static", ServeDir::new("static"))
    .layer(TraceLayer::new_for_http())
    .with_state(pool)
}
