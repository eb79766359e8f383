//! JSON HTTP API for Mentor.
//!
//! Exposes an axum [`Router`] backed by any [`ContextStore`] and any generator
//! implementing both [`PlanGenerator`] and [`LessonGenerator`]. Tracing, CORS
//! and transport concerns are the caller's responsibility.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET`  | `/` | liveness message |
//! | `POST` | `/start-learning` | [`learning::start`] |
//! | `GET`  | `/plan` | [`learning::current_plan`] |
//! | `POST` | `/explain-topic` | [`lessons::explain`] |
//! | `POST` | `/ask-doubt` | [`lessons::ask_doubt`] |
//! | `POST` | `/get-topic-brief` | [`lessons::topic_brief`] |
//! | `POST` | `/generate-quiz` | [`quiz::generate`] |
//! | `GET`  | `/modules/{id}/notes` | [`modules::notes`] |
//! | `GET`/`POST` | `/modules/{id}/resources` | [`modules::resources`] / [`modules::add_resource`] |

pub mod error;
pub mod etag;
pub mod learning;
pub mod lessons;
pub mod modules;
pub mod quiz;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, post},
};
use mentor_core::{
  generate::{LessonGenerator, PlanGenerator},
  store::ContextStore,
};
use serde_json::{Value, json};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct AppState<S, G> {
  pub store:     Arc<S>,
  pub generator: Arc<G>,
}

impl<S, G> AppState<S, G> {
  pub fn new(store: S, generator: G) -> Self {
    Self { store: Arc::new(store), generator: Arc::new(generator) }
  }
}

// `S` and `G` need not be `Clone`.
impl<S, G> Clone for AppState<S, G> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), generator: Arc::clone(&self.generator) }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(state: AppState<S, G>) -> Router<()>
where
  S: ContextStore + 'static,
  G: PlanGenerator + LessonGenerator + 'static,
{
  Router::new()
    .route("/", get(root))
    // Plan
    .route("/start-learning", post(learning::start::<S, G>))
    .route("/plan", get(learning::current_plan::<S, G>))
    // Lessons
    .route("/explain-topic", post(lessons::explain::<S, G>))
    .route("/ask-doubt", post(lessons::ask_doubt::<S, G>))
    .route("/get-topic-brief", post(lessons::topic_brief::<S, G>))
    .route("/generate-quiz", post(quiz::generate::<S, G>))
    // Annotations
    .route("/modules/{id}/notes", get(modules::notes::<S, G>))
    .route(
      "/modules/{id}/resources",
      get(modules::resources::<S, G>).post(modules::add_resource::<S, G>),
    )
    .with_state(state)
}

/// `GET /`
async fn root() -> Json<Value> {
  Json(json!({ "message": "Mentor learning assistant backend is running" }))
}

/// Reject blank strings at the boundary.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ApiError> {
  if value.trim().is_empty() {
    return Err(ApiError::BadRequest(format!("`{field}` must not be empty")));
  }
  Ok(())
}
