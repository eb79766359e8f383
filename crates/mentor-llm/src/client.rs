//! [`ChatClient`]: async chat-completions client implementing the generator
//! traits.

use std::time::Duration;

use mentor_core::{
  generate::{DoubtRequest, LessonGenerator, LessonRequest, PlanGenerator, PlanRequest, QuizRequest},
  plan::StudyPlan,
  quiz::Quiz,
};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Error, Result, prompts};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Connection settings for the chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
  /// API root; `/chat/completions` is appended.
  pub base_url:     String,
  /// Bearer token. Empty means no `Authorization` header.
  pub api_key:      String,
  pub model:        String,
  pub temperature:  f32,
  /// Upper bound for a single generation request.
  pub timeout_secs: u64,
}

impl Default for LlmConfig {
  fn default() -> Self {
    Self {
      base_url:     "https://api.groq.com/openai/v1".to_owned(),
      api_key:      String::new(),
      model:        "llama-3.3-70b-versatile".to_owned(),
      temperature:  0.3,
      timeout_secs: 60,
    }
  }
}

// ─── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
  model:       &'a str,
  temperature: f32,
  messages:    [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
  role:    &'static str,
  content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
  #[serde(default)]
  choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
  message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
  #[serde(default)]
  content: Option<String>,
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Chat-completions client.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ChatClient {
  client: Client,
  config: LlmConfig,
}

impl ChatClient {
  pub fn new(config: LlmConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
  }

  /// Send one system + user exchange and return the assistant's text.
  pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
    let body = ChatRequest {
      model:       &self.config.model,
      temperature: self.config.temperature,
      messages:    [
        ChatMessage { role: "system", content: system },
        ChatMessage { role: "user", content: user },
      ],
    };

    let mut req = self.client.post(self.url()).json(&body);
    if !self.config.api_key.is_empty() {
      req = req.bearer_auth(&self.config.api_key);
    }

    tracing::debug!(model = %self.config.model, "sending chat completion");
    let resp = req.send().await?;

    if !resp.status().is_success() {
      let status = resp.status();
      let body = resp
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_owned());
      tracing::warn!(%status, "chat completion failed");
      return Err(Error::Status { status, body });
    }

    let parsed: ChatResponse = resp.json().await?;
    parsed
      .choices
      .into_iter()
      .next()
      .and_then(|c| c.message.content)
      .filter(|c| !c.trim().is_empty())
      .ok_or(Error::EmptyResponse)
  }

  /// Like [`complete`](Self::complete) but parses the reply as `T`.
  async fn complete_json<T: DeserializeOwned>(&self, system: &str, user: &str) -> Result<T> {
    let raw = self.complete(system, user).await?;
    let json = extract_json(&raw).ok_or(Error::NoJsonObject)?;
    Ok(serde_json::from_str(json)?)
  }
}

/// The outermost `{ ... }` span of a model reply.
///
/// Models often wrap JSON in markdown fences or add a sentence of preamble;
/// both are discarded.
pub fn extract_json(raw: &str) -> Option<&str> {
  let start = raw.find('{')?;
  let end = raw.rfind('}')?;
  (end > start).then(|| &raw[start..=end])
}

// ─── Generator impls ──────────────────────────────────────────────────────────

impl PlanGenerator for ChatClient {
  type Error = Error;

  async fn generate_plan(&self, request: &PlanRequest) -> Result<StudyPlan> {
    self
      .complete_json(prompts::CURRICULUM_SYSTEM, &prompts::plan(request))
      .await
  }

  async fn generate_quiz(&self, request: &QuizRequest) -> Result<Quiz> {
    let mut quiz: Quiz = self
      .complete_json(prompts::CURRICULUM_SYSTEM, &prompts::quiz(request))
      .await?;
    // The model does not get to move the quiz to another module.
    quiz.module_id = request.module_id;
    quiz.module_title.get_or_insert_with(|| request.module_title.clone());
    Ok(quiz)
  }
}

impl LessonGenerator for ChatClient {
  type Error = Error;

  async fn explain(&self, request: &LessonRequest) -> Result<String> {
    self
      .complete(prompts::TEACHER_SYSTEM, &prompts::lesson(request))
      .await
  }

  async fn answer_doubt(&self, request: &DoubtRequest) -> Result<String> {
    self
      .complete(prompts::TUTOR_SYSTEM, &prompts::doubt(request))
      .await
  }

  async fn topic_brief(&self, topic: &str) -> Result<String> {
    self
      .complete(prompts::TEACHER_SYSTEM, &prompts::topic_brief(topic))
      .await
  }
}

#[cfg(test)]
mod tests {
  use axum::{Json, Router, http::StatusCode, routing::post};
  use serde_json::{Value, json};
  use tokio::net::TcpListener;

  use super::*;

  /// Serve a fixed chat-completions reply on an ephemeral port.
  async fn mock_server(content: &'static str) -> String {
    let app = Router::new().route(
      "/chat/completions",
      post(move |Json(body): Json<Value>| async move {
        assert_eq!(body["messages"][0]["role"], "system");
        Json(json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] }))
      }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
  }

  fn client(base_url: String) -> ChatClient {
    ChatClient::new(LlmConfig { base_url, ..LlmConfig::default() }).unwrap()
  }

  #[test]
  fn extract_json_strips_fences_and_preamble() {
    let raw = "Here you go:\n```json\n{\"a\": {\"b\": 1}}\n```";
    assert_eq!(extract_json(raw), Some("{\"a\": {\"b\": 1}}"));
    assert_eq!(extract_json("no json here"), None);
    assert_eq!(extract_json("} backwards {"), None);
  }

  #[tokio::test]
  async fn generate_plan_parses_fenced_json() {
    let base = mock_server(
      "```json\n{\"subject\":\"Python\",\"level\":\"beginner\",\"duration_weeks\":1,\
       \"modules\":[{\"id\":1,\"title\":\"Day 1: Basics\"},{\"id\":2,\"title\":\"Day 2: Loops\"}]}\n```",
    )
    .await;
    let req = PlanRequest {
      subject:      "Python".into(),
      level:        "beginner".into(),
      total_days:   2,
      learner_name: "Ada".into(),
    };
    let plan = client(base).generate_plan(&req).await.unwrap();
    assert_eq!(plan.modules.len(), 2);
    assert_eq!(plan.modules[1].title, "Day 2: Loops");
  }

  #[tokio::test]
  async fn generate_quiz_pins_module_id() {
    let base = mock_server(
      "{\"module_id\": 42, \"questions\": [{\"question\": \"q\", \
       \"options\": [\"a\",\"b\",\"c\",\"d\"], \"answer\": \"a\"}]}",
    )
    .await;
    let req = QuizRequest {
      subject:       "Python".into(),
      module_id:     1,
      module_title:  "Day 1".into(),
      objectives:    vec!["Loops".into()],
      num_questions: 1,
    };
    let quiz = client(base).generate_quiz(&req).await.unwrap();
    assert_eq!(quiz.module_id, 1);
    assert_eq!(quiz.module_title.as_deref(), Some("Day 1"));
  }

  #[tokio::test]
  async fn non_json_plan_reply_is_an_error() {
    let base = mock_server("I cannot help with that.").await;
    let req = PlanRequest {
      subject:      "Python".into(),
      level:        "beginner".into(),
      total_days:   2,
      learner_name: "Ada".into(),
    };
    let err = client(base).generate_plan(&req).await.unwrap_err();
    assert!(matches!(err, Error::NoJsonObject));
  }

  #[tokio::test]
  async fn explain_returns_markdown_verbatim() {
    let base = mock_server("**INTRODUCTION**\nLoops repeat.").await;
    let req = LessonRequest { topic: "loops".into(), level: "beginner".into() };
    let md = client(base).explain(&req).await.unwrap();
    assert_eq!(md, "**INTRODUCTION**\nLoops repeat.");
  }

  #[tokio::test]
  async fn error_status_is_reported() {
    let app = Router::new().route(
      "/chat/completions",
      post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    let err = client(format!("http://{addr}")).topic_brief("loops").await.unwrap_err();
    assert!(matches!(
      err,
      Error::Status { status, ref body } if status == StatusCode::TOO_MANY_REQUESTS && body == "slow down"
    ));
  }
}
