//! Generator traits: the external capability that writes plans, quizzes and
//! lessons.
//!
//! Implementations are opaque request/response boundaries (typically an LLM
//! behind an HTTP API). This crate only fixes the inputs and outputs; it
//! makes no promise about the quality of the generated text.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{Result, plan::StudyPlan, quiz::Quiz};

/// Hours of study budgeted per day when estimating a plan's total effort.
pub const HOURS_PER_DAY: u32 = 2;

/// Longest prefix of a lesson kept as a module note, in characters.
pub const NOTE_EXCERPT_CHARS: usize = 1500;

// ─── Requests ────────────────────────────────────────────────────────────────

/// What the learner asked for when starting a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
  pub subject:      String,
  pub level:        String,
  pub total_days:   u32,
  pub learner_name: String,
}

impl PlanRequest {
  pub fn theme(&self) -> String {
    format!("Mastering {} in {} Days", self.subject, self.total_days)
  }

  /// Stamp request-derived fields onto a freshly generated plan and check
  /// its invariants.
  ///
  /// The generator's own `learner_name` is overridden, and the
  /// `estimated_total_hours` and `theme` metadata entries are set; any other
  /// metadata the generator produced is kept.
  pub fn finish(&self, mut plan: StudyPlan) -> Result<StudyPlan> {
    plan.learner_name = self.learner_name.clone();
    plan.metadata.insert(
      "estimated_total_hours".to_owned(),
      (self.total_days * HOURS_PER_DAY).to_string(),
    );
    plan.metadata.insert("theme".to_owned(), self.theme());
    plan.validate()?;
    Ok(plan)
  }
}

/// Context for a quiz over one module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
  pub subject:       String,
  pub module_id:     i64,
  pub module_title:  String,
  /// Empty when no module could be resolved.
  pub objectives:    Vec<String>,
  pub num_questions: u32,
}

/// A request for an in-depth lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonRequest {
  pub topic: String,
  pub level: String,
}

/// A learner's question plus whatever context the plan provides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoubtRequest {
  pub question:     String,
  pub subject:      String,
  pub module_title: Option<String>,
  /// Earlier explanations recorded for the module, most recent first.
  pub prior_notes:  Vec<String>,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Produces structured curriculum data.
pub trait PlanGenerator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Generate a study plan. Callers run [`PlanRequest::finish`] on the
  /// result before persisting it.
  fn generate_plan<'a>(
    &'a self,
    request: &'a PlanRequest,
  ) -> impl Future<Output = Result<StudyPlan, Self::Error>> + Send + 'a;

  /// Generate a multiple-choice quiz for one module.
  fn generate_quiz<'a>(
    &'a self,
    request: &'a QuizRequest,
  ) -> impl Future<Output = Result<Quiz, Self::Error>> + Send + 'a;
}

/// Produces free-form markdown teaching material.
pub trait LessonGenerator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn explain<'a>(
    &'a self,
    request: &'a LessonRequest,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  fn answer_doubt<'a>(
    &'a self,
    request: &'a DoubtRequest,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// A short "learning card" for a topic: analogy, example, pitfall.
  fn topic_brief<'a>(
    &'a self,
    topic: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}

/// The first [`NOTE_EXCERPT_CHARS`] characters of `text`, split on a char
/// boundary.
pub fn note_excerpt(text: &str) -> &str {
  match text.char_indices().nth(NOTE_EXCERPT_CHARS) {
    Some((idx, _)) => &text[..idx],
    None => text,
  }
}
