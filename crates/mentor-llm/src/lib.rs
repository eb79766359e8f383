//! Generator implementation backed by an OpenAI-compatible chat-completions
//! API (Groq, OpenAI, a local llama.cpp server, ...).
//!
//! [`ChatClient`] implements both [`mentor_core::generate::PlanGenerator`] and
//! [`mentor_core::generate::LessonGenerator`]. Structured outputs (plans,
//! quizzes) are requested as JSON and parsed with serde; free-form outputs are
//! returned as the raw markdown the model produced.

mod client;
mod prompts;

pub mod error;

pub use client::{ChatClient, LlmConfig, extract_json};
pub use error::{Error, Result};
