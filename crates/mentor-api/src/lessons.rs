//! Handlers that produce free-form teaching text.

use axum::{Json, extract::State};
use mentor_core::{
  annotation::{NewNote, NoteRole},
  generate::{DoubtRequest, LessonGenerator, LessonRequest, PlanGenerator, note_excerpt},
  store::ContextStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, require};

/// How many recent notes are handed to the tutor as context.
pub const DOUBT_CONTEXT_NOTES: usize = 3;

// ─── Explain ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExplainBody {
  pub topic:     String,
  #[serde(default)]
  pub module_id: i64,
}

#[derive(Debug, Serialize)]
pub struct Explanation {
  pub module_id:      i64,
  pub topic:          String,
  pub explanation_md: String,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
  pub status:      &'static str,
  pub explanation: Explanation,
}

/// `POST /explain-topic`
///
/// The lesson is pitched at the current plan's level. When a module resolves,
/// an excerpt of the lesson is kept as a `teacher` note on it. The response
/// echoes the requested `module_id`, not the resolved one.
pub async fn explain<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<ExplainBody>,
) -> Result<Json<ExplainResponse>, ApiError>
where
  S: ContextStore,
  G: PlanGenerator + LessonGenerator,
{
  require("topic", &body.topic)?;
  let resolved = state.store.resolve(body.module_id).await.map_err(ApiError::store)?;

  let request = LessonRequest { topic: body.topic, level: resolved.level().to_owned() };
  let markdown = state
    .generator
    .explain(&request)
    .await
    .map_err(ApiError::generation)?;

  if let Some(module) = &resolved.module {
    let note = NewNote::new(module.id, note_excerpt(&markdown)).with_role(NoteRole::Teacher);
    state.store.add_note(note).await.map_err(ApiError::store)?;
  }

  Ok(Json(ExplainResponse {
    status:      "success",
    explanation: Explanation {
      module_id:      body.module_id,
      topic:          request.topic,
      explanation_md: markdown,
    },
  }))
}

// ─── Doubts ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DoubtBody {
  pub question:  String,
  #[serde(default)]
  pub module_id: i64,
}

#[derive(Debug, Serialize)]
pub struct DoubtAnswer {
  pub source: &'static str,
  pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct DoubtResponse {
  pub status:   &'static str,
  pub response: DoubtAnswer,
}

/// `POST /ask-doubt`
pub async fn ask_doubt<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<DoubtBody>,
) -> Result<Json<DoubtResponse>, ApiError>
where
  S: ContextStore,
  G: PlanGenerator + LessonGenerator,
{
  require("question", &body.question)?;
  let resolved = state.store.resolve(body.module_id).await.map_err(ApiError::store)?;

  let prior_notes = match &resolved.module {
    Some(module) => state
      .store
      .list_notes(module.id)
      .await
      .map_err(ApiError::store)?
      .into_iter()
      .take(DOUBT_CONTEXT_NOTES)
      .map(|n| n.content)
      .collect(),
    None => Vec::new(),
  };

  let request = DoubtRequest {
    question: body.question,
    subject: resolved.subject().to_owned(),
    module_title: resolved.module.as_ref().map(|m| m.title.clone()),
    prior_notes,
  };
  let answer = state
    .generator
    .answer_doubt(&request)
    .await
    .map_err(ApiError::generation)?;

  Ok(Json(DoubtResponse {
    status:   "success",
    response: DoubtAnswer { source: "llm", answer },
  }))
}

// ─── Topic brief ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TopicBody {
  pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct BriefResponse {
  pub status: &'static str,
  pub brief:  String,
}

/// `POST /get-topic-brief`: stateless; neither reads nor writes the store.
pub async fn topic_brief<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<TopicBody>,
) -> Result<Json<BriefResponse>, ApiError>
where
  S: ContextStore,
  G: PlanGenerator + LessonGenerator,
{
  require("topic", &body.topic)?;
  let brief = state
    .generator
    .topic_brief(&body.topic)
    .await
    .map_err(ApiError::generation)?;
  Ok(Json(BriefResponse { status: "success", brief }))
}
