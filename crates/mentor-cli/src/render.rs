//! Plain-text rendering of API responses for the terminal.

use std::fmt::Write as _;

use mentor_core::{
  annotation::{ModuleNote, Resource},
  plan::StudyPlan,
  quiz::Quiz,
};

/// Letters used to label quiz options.
const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn plan(plan: &StudyPlan) -> String {
  let mut out = String::new();
  let theme = plan.metadata.get("theme").map_or(plan.subject.as_str(), String::as_str);
  let _ = writeln!(out, "# {theme}");
  let _ = writeln!(
    out,
    "{} · {} · {} week(s) · for {}",
    plan.subject, plan.level, plan.duration_weeks, plan.learner_name
  );
  if let Some(hours) = plan.metadata.get("estimated_total_hours") {
    let _ = writeln!(out, "Estimated effort: {hours} h");
  }
  for module in &plan.modules {
    let _ = writeln!(out, "\n## [{}] {}", module.id, module.title);
    for objective in &module.learning_objectives {
      let _ = writeln!(out, "- {objective}");
    }
    for task in &module.daily_tasks {
      let _ = writeln!(out, "  * {task}");
    }
  }
  out
}

pub fn quiz(quiz: &Quiz) -> String {
  let mut out = String::new();
  let title = quiz.module_title.as_deref().unwrap_or("Quiz");
  let _ = writeln!(out, "# {title}");
  for (i, q) in quiz.questions.iter().enumerate() {
    let _ = writeln!(out, "\n{}. {}", i + 1, q.question);
    for (label, option) in OPTION_LABELS.iter().zip(&q.options) {
      let marker = if *option == q.answer { "*" } else { " " };
      let _ = writeln!(out, "  {marker}{label}) {option}");
    }
    if let Some(explanation) = &q.explanation {
      let _ = writeln!(out, "   {explanation}");
    }
  }
  out
}

pub fn notes(notes: &[ModuleNote]) -> String {
  if notes.is_empty() {
    return "(no notes)\n".to_owned();
  }
  let mut out = String::new();
  for note in notes {
    let _ = writeln!(
      out,
      "── #{} {} {} ──\n{}\n",
      note.id,
      note.role.as_str(),
      note.created_at.format("%Y-%m-%d %H:%M"),
      note.content
    );
  }
  out
}

pub fn resources(resources: &[Resource]) -> String {
  if resources.is_empty() {
    return "(no resources)\n".to_owned();
  }
  let mut out = String::new();
  for r in resources {
    let _ = writeln!(out, "- {} <{}>", r.title, r.url);
    if !r.snippet.is_empty() {
      let _ = writeln!(out, "  {}", r.snippet);
    }
  }
  out
}
