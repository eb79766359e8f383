//! `POST /generate-quiz`

use axum::{Json, extract::State};
use mentor_core::{
  generate::{LessonGenerator, PlanGenerator, QuizRequest},
  quiz::Quiz,
  store::ContextStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

pub const MAX_QUESTIONS: u32 = 20;

fn default_num_questions() -> u32 { 5 }

#[derive(Debug, Deserialize)]
pub struct QuizBody {
  #[serde(default)]
  pub module_id:     i64,
  #[serde(default = "default_num_questions")]
  pub num_questions: u32,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
  pub status: &'static str,
  pub quiz:   Quiz,
}

/// Generate a quiz over the resolved module's objectives.
///
/// A quiz that breaks the four-options rule is treated as a generation
/// failure; nothing is persisted.
pub async fn generate<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<QuizBody>,
) -> Result<Json<QuizResponse>, ApiError>
where
  S: ContextStore,
  G: PlanGenerator + LessonGenerator,
{
  if !(1..=MAX_QUESTIONS).contains(&body.num_questions) {
    return Err(ApiError::BadRequest(format!(
      "`num_questions` must be between 1 and {MAX_QUESTIONS}"
    )));
  }

  let resolved = state.store.resolve(body.module_id).await.map_err(ApiError::store)?;
  let request = match &resolved.module {
    Some(module) => QuizRequest {
      subject:       resolved.subject().to_owned(),
      module_id:     module.id,
      module_title:  module.title.clone(),
      objectives:    module.learning_objectives.clone(),
      num_questions: body.num_questions,
    },
    None => QuizRequest {
      subject:       resolved.subject().to_owned(),
      module_id:     body.module_id,
      module_title:  format!("Phase {}", body.module_id),
      objectives:    Vec::new(),
      num_questions: body.num_questions,
    },
  };

  let quiz = state
    .generator
    .generate_quiz(&request)
    .await
    .map_err(ApiError::generation)?;
  quiz.validate().map_err(ApiError::generation)?;

  tracing::debug!(module_id = quiz.module_id, questions = quiz.questions.len(), "quiz generated");
  Ok(Json(QuizResponse { status: "success", quiz }))
}
