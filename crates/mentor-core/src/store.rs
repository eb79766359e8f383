//! The `ContextStore` trait: persisted plan state and module annotations.
//!
//! The trait is implemented by storage backends (e.g. `mentor-store-sqlite`).
//! Higher layers (`mentor-api`, `mentor-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  annotation::{ModuleNote, NewNote, NewResource, Resource},
  plan::{Resolved, StudyPlan, resolve_module},
};

/// Abstraction over the persisted learning context.
///
/// Holds exactly one "current" study plan (last write wins) plus two
/// append-only logs of notes and resources keyed by module id.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContextStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Plan ──────────────────────────────────────────────────────────────

  /// Persist `plan` as the current plan, atomically replacing any previous
  /// one.
  fn save_plan<'a>(
    &'a self,
    plan: &'a StudyPlan,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Return the current plan.
  ///
  /// A stored value that no longer deserializes as a [`StudyPlan`] is
  /// reported as `Ok(None)`, not as an error.
  fn load_plan(
    &self,
  ) -> impl Future<Output = Result<Option<StudyPlan>, Self::Error>> + Send + '_;

  /// Load the current plan and resolve `module_id` against it.
  ///
  /// See [`resolve_module`] for the fallback rules.
  fn resolve(
    &self,
    module_id: i64,
  ) -> impl Future<Output = Result<Resolved, Self::Error>> + Send + '_ {
    async move { Ok(resolve_module(self.load_plan().await?, module_id)) }
  }

  // ── Notes: append-only ───────────────────────────────────────────────

  /// Append a note. Duplicate content is accepted.
  fn add_note(
    &self,
    note: NewNote,
  ) -> impl Future<Output = Result<ModuleNote, Self::Error>> + Send + '_;

  /// All notes for a module, most recent first.
  fn list_notes(
    &self,
    module_id: i64,
  ) -> impl Future<Output = Result<Vec<ModuleNote>, Self::Error>> + Send + '_;

  /// Notes for a module whose content contains `query` (case-sensitive),
  /// most recent first.
  fn search_notes<'a>(
    &'a self,
    module_id: i64,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<ModuleNote>, Self::Error>> + Send + 'a;

  // ── Resources: append-only ───────────────────────────────────────────

  fn add_resource(
    &self,
    resource: NewResource,
  ) -> impl Future<Output = Result<Resource, Self::Error>> + Send + '_;

  /// All resources for a module, most recent first.
  fn list_resources(
    &self,
    module_id: i64,
  ) -> impl Future<Output = Result<Vec<Resource>, Self::Error>> + Send + '_;
}
