//! Study plan types: the generated curriculum a learner works through.
//!
//! A plan is produced once per "start learning" request and then treated as
//! immutable reference data: later requests look modules up by id but never
//! edit them.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Level assumed when no plan has been generated yet.
pub const DEFAULT_LEVEL: &str = "beginner";

/// Subject assumed when no plan has been generated yet.
pub const DEFAULT_SUBJECT: &str = "General";

fn default_learner_name() -> String { "Learner".to_owned() }

fn default_duration_days() -> u32 { 7 }

// ─── Plan ────────────────────────────────────────────────────────────────────

/// A complete study plan as returned by the plan generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlan {
  pub subject:        String,
  pub level:          String,
  pub duration_weeks: u32,
  #[serde(default = "default_learner_name")]
  pub learner_name:   String,
  #[serde(default)]
  pub modules:        Vec<Module>,
  #[serde(default)]
  pub metadata:       BTreeMap<String, String>,
}

/// One unit of a plan, typically a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
  /// Unique within the owning plan.
  pub id:                  i64,
  pub title:               String,
  #[serde(default = "default_duration_days")]
  pub duration_days:       u32,
  #[serde(default)]
  pub learning_objectives: Vec<String>,
  #[serde(default)]
  pub daily_tasks:         Vec<String>,
  #[serde(default)]
  pub resources:           Vec<String>,
}

impl Module {
  pub fn new(id: i64, title: impl Into<String>) -> Self {
    Self {
      id,
      title: title.into(),
      duration_days: default_duration_days(),
      learning_objectives: Vec::new(),
      daily_tasks: Vec::new(),
      resources: Vec::new(),
    }
  }
}

impl StudyPlan {
  /// Check the structural invariants a generated plan must satisfy before it
  /// is persisted.
  pub fn validate(&self) -> Result<()> {
    let mut seen = HashSet::with_capacity(self.modules.len());
    for module in &self.modules {
      if !seen.insert(module.id) {
        return Err(Error::DuplicateModuleId(module.id));
      }
    }
    Ok(())
  }

  /// The module with the given id, falling back to the first module.
  ///
  /// Returns `None` only when the plan has no modules at all.
  pub fn module_or_first(&self, module_id: i64) -> Option<&Module> {
    self
      .modules
      .iter()
      .find(|m| m.id == module_id)
      .or_else(|| self.modules.first())
  }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// The plan and module a follow-up request should be answered against.
///
/// Both halves may be absent: a learner can ask questions before any plan has
/// been generated, in which case the defaults in [`DEFAULT_LEVEL`] and
/// [`DEFAULT_SUBJECT`] apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
  pub plan:   Option<StudyPlan>,
  pub module: Option<Module>,
}

impl Resolved {
  pub fn level(&self) -> &str {
    self.plan.as_ref().map_or(DEFAULT_LEVEL, |p| p.level.as_str())
  }

  pub fn subject(&self) -> &str {
    self.plan.as_ref().map_or(DEFAULT_SUBJECT, |p| p.subject.as_str())
  }
}

/// Resolve `module_id` against an optional plan.
///
/// - plan absent → both absent
/// - id present in plan → that module
/// - id missing → first module (or none for an empty plan)
pub fn resolve_module(plan: Option<StudyPlan>, module_id: i64) -> Resolved {
  match plan {
    None => Resolved::default(),
    Some(plan) => {
      let module = plan.module_or_first(module_id).cloned();
      Resolved { plan: Some(plan), module }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn python_plan() -> StudyPlan {
    StudyPlan {
      subject:        "Python".into(),
      level:          "beginner".into(),
      duration_weeks: 1,
      learner_name:   "Ada".into(),
      modules:        vec![Module::new(1, "Day 1: Syntax"), Module::new(2, "Day 2: Functions")],
      metadata:       BTreeMap::new(),
    }
  }

  #[test]
  fn resolves_matching_module() {
    let r = resolve_module(Some(python_plan()), 2);
    assert_eq!(r.module.unwrap().id, 2);
  }

  #[test]
  fn unknown_id_falls_back_to_first_module() {
    let r = resolve_module(Some(python_plan()), 99);
    assert!(r.plan.is_some());
    assert_eq!(r.module.unwrap().id, 1);
  }

  #[test]
  fn absent_plan_resolves_to_nothing() {
    let r = resolve_module(None, 1);
    assert!(r.plan.is_none());
    assert!(r.module.is_none());
    assert_eq!(r.level(), "beginner");
    assert_eq!(r.subject(), "General");
  }

  #[test]
  fn empty_plan_has_no_module() {
    let mut plan = python_plan();
    plan.modules.clear();
    let r = resolve_module(Some(plan), 1);
    assert!(r.plan.is_some());
    assert!(r.module.is_none());
    assert_eq!(r.subject(), "Python");
  }

  #[test]
  fn duplicate_module_ids_are_rejected() {
    let mut plan = python_plan();
    plan.modules.push(Module::new(1, "Day 3: Again"));
    assert!(matches!(plan.validate(), Err(Error::DuplicateModuleId(1))));
    assert!(python_plan().validate().is_ok());
  }

  #[test]
  fn missing_optional_fields_take_defaults() {
    let plan: StudyPlan = serde_json::from_str(
      r#"{"subject":"Rust","level":"advanced","duration_weeks":2,
          "modules":[{"id":1,"title":"Ownership"}]}"#,
    )
    .unwrap();
    assert_eq!(plan.learner_name, "Learner");
    assert!(plan.metadata.is_empty());
    assert_eq!(plan.modules[0].duration_days, 7);
    assert!(plan.modules[0].learning_objectives.is_empty());
  }
}
