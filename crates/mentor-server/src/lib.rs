//! HTTP server wiring for Mentor.
//!
//! Wraps the [`mentor_api`] router with request tracing and a permissive CORS
//! policy (the browser frontend is served from another origin), and provides
//! the shutdown signal used by the binary.

pub mod settings;

use axum::Router;
use mentor_api::{AppState, api_router};
use mentor_core::{
  generate::{LessonGenerator, PlanGenerator},
  store::ContextStore,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use settings::ServerConfig;

/// The full application router.
pub fn app<S, G>(state: AppState<S, G>) -> Router
where
  S: ContextStore + 'static,
  G: PlanGenerator + LessonGenerator + 'static,
{
  api_router(state)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
  tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use mentor_llm::{ChatClient, LlmConfig};
  use mentor_store_sqlite::SqliteStore;
  use tower::ServiceExt;

  use super::*;

  async fn make_app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let llm = ChatClient::new(LlmConfig::default()).unwrap();
    app(AppState::new(store, llm))
  }

  #[tokio::test]
  async fn root_is_served_with_cors_headers() {
    let req = Request::builder()
      .uri("/")
      .header(header::ORIGIN, "http://localhost:5173")
      .body(Body::empty())
      .unwrap();
    let resp = make_app().await.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
  }

  #[tokio::test]
  async fn preflight_is_answered() {
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/start-learning")
      .header(header::ORIGIN, "http://localhost:5173")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .body(Body::empty())
      .unwrap();
    let resp = make_app().await.oneshot(req).await.unwrap();

    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
  }
}
