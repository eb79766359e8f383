//! Handlers for starting a plan and reading it back.

use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use mentor_core::{
  generate::{LessonGenerator, PlanGenerator, PlanRequest},
  plan::StudyPlan,
  store::ContextStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  error::ApiError,
  etag::{compute_etag, if_none_match},
  require,
};

/// Longest plan a learner may request, in days.
pub const MAX_TOTAL_DAYS: u32 = 365;

fn default_learner_name() -> String { "Learner".to_owned() }

// ─── Start ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /start-learning`.
#[derive(Debug, Deserialize)]
pub struct StartBody {
  pub subject:      String,
  pub level:        String,
  pub total_days:   u32,
  #[serde(default = "default_learner_name")]
  pub learner_name: String,
}

impl StartBody {
  fn into_request(self) -> Result<PlanRequest, ApiError> {
    require("subject", &self.subject)?;
    require("level", &self.level)?;
    if !(1..=MAX_TOTAL_DAYS).contains(&self.total_days) {
      return Err(ApiError::BadRequest(format!(
        "`total_days` must be between 1 and {MAX_TOTAL_DAYS}"
      )));
    }
    let learner_name = if self.learner_name.trim().is_empty() {
      default_learner_name()
    } else {
      self.learner_name
    };
    Ok(PlanRequest {
      subject: self.subject,
      level: self.level,
      total_days: self.total_days,
      learner_name,
    })
  }
}

#[derive(Debug, Serialize)]
pub struct PlanSummary {
  pub subject:       String,
  pub level:         String,
  pub total_days:    u32,
  pub total_modules: usize,
  pub theme:         String,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
  pub status:     &'static str,
  pub summary:    PlanSummary,
  pub study_plan: StudyPlan,
}

/// `POST /start-learning`: generate a plan and make it the current one.
pub async fn start<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<StartBody>,
) -> Result<Json<StartResponse>, ApiError>
where
  S: ContextStore,
  G: PlanGenerator + LessonGenerator,
{
  let request = body.into_request()?;
  tracing::info!(subject = %request.subject, days = request.total_days, "generating study plan");

  let generated = state
    .generator
    .generate_plan(&request)
    .await
    .map_err(ApiError::generation)?;
  let plan = request.finish(generated).map_err(ApiError::generation)?;

  state.store.save_plan(&plan).await.map_err(ApiError::store)?;

  let summary = PlanSummary {
    subject:       plan.subject.clone(),
    level:         plan.level.clone(),
    total_days:    request.total_days,
    total_modules: plan.modules.len(),
    theme:         request.theme(),
  };
  Ok(Json(StartResponse { status: "success", summary, study_plan: plan }))
}

// ─── Read ────────────────────────────────────────────────────────────────────

/// `GET /plan`: the current plan with an `ETag`; honours `If-None-Match`.
pub async fn current_plan<S, G>(
  State(state): State<AppState<S, G>>,
  headers: HeaderMap,
) -> Result<Response, ApiError>
where
  S: ContextStore,
  G: PlanGenerator + LessonGenerator,
{
  let plan = state
    .store
    .load_plan()
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("no study plan has been generated".to_owned()))?;

  let etag = compute_etag(&plan).map_err(ApiError::store)?;
  if if_none_match(&headers, &etag) {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
  }
  Ok(([(header::ETAG, etag)], Json(plan)).into_response())
}
