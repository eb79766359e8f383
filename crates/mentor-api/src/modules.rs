//! Per-module annotation handlers: notes and resources.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};
use mentor_core::{
  annotation::{ModuleNote, NewResource, Resource},
  generate::{LessonGenerator, PlanGenerator},
  store::ContextStore,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, require};

#[derive(Debug, Deserialize)]
pub struct NotesQuery {
  pub q: Option<String>,
}

/// `GET /modules/{id}/notes[?q=…]`: most recent first.
pub async fn notes<S, G>(
  State(state): State<AppState<S, G>>,
  Path(module_id): Path<i64>,
  Query(query): Query<NotesQuery>,
) -> Result<Json<Vec<ModuleNote>>, ApiError>
where
  S: ContextStore,
  G: PlanGenerator + LessonGenerator,
{
  let notes = match query.q.as_deref() {
    Some(q) => state.store.search_notes(module_id, q).await,
    None => state.store.list_notes(module_id).await,
  }
  .map_err(ApiError::store)?;
  Ok(Json(notes))
}

/// `GET /modules/{id}/resources`
pub async fn resources<S, G>(
  State(state): State<AppState<S, G>>,
  Path(module_id): Path<i64>,
) -> Result<Json<Vec<Resource>>, ApiError>
where
  S: ContextStore,
  G: PlanGenerator + LessonGenerator,
{
  let resources = state
    .store
    .list_resources(module_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(resources))
}

#[derive(Debug, Deserialize)]
pub struct ResourceBody {
  pub title:   String,
  pub url:     String,
  #[serde(default)]
  pub snippet: String,
}

/// `POST /modules/{id}/resources`: returns `201 Created`.
pub async fn add_resource<S, G>(
  State(state): State<AppState<S, G>>,
  Path(module_id): Path<i64>,
  Json(body): Json<ResourceBody>,
) -> Result<(StatusCode, Json<Resource>), ApiError>
where
  S: ContextStore,
  G: PlanGenerator + LessonGenerator,
{
  require("title", &body.title)?;
  require("url", &body.url)?;
  let resource = state
    .store
    .add_resource(NewResource {
      module_id,
      title: body.title,
      url: body.url,
      snippet: body.snippet,
    })
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(resource)))
}
