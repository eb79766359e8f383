//! Async HTTP client wrapping the Mentor JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use mentor_core::{
  annotation::{ModuleNote, Resource},
  plan::StudyPlan,
  quiz::Quiz,
};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

/// Connection settings for the Mentor API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url:     String,
  pub timeout_secs: u64,
}

// ─── Response shapes ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanSummary {
  pub subject:       String,
  pub level:         String,
  pub total_days:    u32,
  pub total_modules: usize,
  pub theme:         String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Started {
  pub summary:    PlanSummary,
  pub study_plan: StudyPlan,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Explanation {
  pub module_id:      i64,
  pub topic:          String,
  pub explanation_md: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DoubtAnswer {
  pub source: String,
  pub answer: String,
}

#[derive(Deserialize)]
struct ExplainEnvelope {
  explanation: Explanation,
}

#[derive(Deserialize)]
struct DoubtEnvelope {
  response: DoubtAnswer,
}

#[derive(Deserialize)]
struct QuizEnvelope {
  quiz: Quiz,
}

#[derive(Deserialize)]
struct BriefEnvelope {
  brief: String,
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async HTTP client for the Mentor API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
    tracing::debug!(path, "POST");
    let resp = self
      .client
      .post(self.url(path))
      .json(&body)
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    decode(path, resp).await
  }

  async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
    tracing::debug!(path, "GET");
    let resp = self
      .client
      .get(self.url(path))
      .query(query)
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;
    decode(path, resp).await
  }

  // ── Plan ──────────────────────────────────────────────────────────────────

  /// `POST /start-learning`
  pub async fn start(
    &self,
    subject: &str,
    level: &str,
    total_days: u32,
    learner_name: Option<&str>,
  ) -> Result<Started> {
    let mut body = json!({ "subject": subject, "level": level, "total_days": total_days });
    if let Some(name) = learner_name {
      body["learner_name"] = json!(name);
    }
    self.post("/start-learning", body).await
  }

  /// `GET /plan`
  pub async fn plan(&self) -> Result<StudyPlan> { self.get("/plan", &[]).await }

  // ── Lessons ───────────────────────────────────────────────────────────────

  /// `POST /explain-topic`
  pub async fn explain(&self, topic: &str, module_id: i64) -> Result<Explanation> {
    let env: ExplainEnvelope = self
      .post("/explain-topic", json!({ "topic": topic, "module_id": module_id }))
      .await?;
    Ok(env.explanation)
  }

  /// `POST /ask-doubt`
  pub async fn ask(&self, question: &str, module_id: i64) -> Result<DoubtAnswer> {
    let env: DoubtEnvelope = self
      .post("/ask-doubt", json!({ "question": question, "module_id": module_id }))
      .await?;
    Ok(env.response)
  }

  /// `POST /generate-quiz`
  pub async fn quiz(&self, module_id: i64, num_questions: u32) -> Result<Quiz> {
    let env: QuizEnvelope = self
      .post(
        "/generate-quiz",
        json!({ "module_id": module_id, "num_questions": num_questions }),
      )
      .await?;
    Ok(env.quiz)
  }

  /// `POST /get-topic-brief`
  pub async fn brief(&self, topic: &str) -> Result<String> {
    let env: BriefEnvelope = self.post("/get-topic-brief", json!({ "topic": topic })).await?;
    Ok(env.brief)
  }

  // ── Annotations ───────────────────────────────────────────────────────────

  /// `GET /modules/{id}/notes[?q=…]`
  pub async fn notes(&self, module_id: i64, query: Option<&str>) -> Result<Vec<ModuleNote>> {
    let path = format!("/modules/{module_id}/notes");
    match query {
      Some(q) => self.get(&path, &[("q", q)]).await,
      None => self.get(&path, &[]).await,
    }
  }

  /// `GET /modules/{id}/resources`
  pub async fn resources(&self, module_id: i64) -> Result<Vec<Resource>> {
    self.get(&format!("/modules/{module_id}/resources"), &[]).await
  }

  /// `POST /modules/{id}/resources`
  pub async fn add_resource(
    &self,
    module_id: i64,
    title: &str,
    url: &str,
    snippet: Option<&str>,
  ) -> Result<Resource> {
    self
      .post(
        &format!("/modules/{module_id}/resources"),
        json!({ "title": title, "url": url, "snippet": snippet.unwrap_or_default() }),
      )
      .await
  }
}

/// Decode a success body, or turn the server's `{"error": …}` body into an
/// error message.
async fn decode<T: DeserializeOwned>(path: &str, resp: Response) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
      .ok()
      .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
      .unwrap_or(body);
    return Err(anyhow!("{path} → {status}: {message}"));
  }
  resp.json().await.with_context(|| format!("deserialising {path} response"))
}
