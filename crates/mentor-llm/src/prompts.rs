//! Prompt text sent to the model.

use mentor_core::generate::{DoubtRequest, LessonRequest, PlanRequest, QuizRequest};

pub const CURRICULUM_SYSTEM: &str = "You are a curriculum architect who designs intensive \
  daily study plans. Reply with a single JSON object and nothing else.";

pub const TEACHER_SYSTEM: &str = "You are a senior technical mentor. Write clear markdown \
  lessons with real-world examples. Never use the '#' character; use **BOLD CAPS** for headings.";

pub const TUTOR_SYSTEM: &str = "You are a support tutor. Resolve doubts quickly with \
  analogies and short code snippets. Never use the '#' character.";

pub fn plan(req: &PlanRequest) -> String {
  format!(
    "Design a {days}-day learning journey for {name} to master {subject} at a {level} level.\n\
     Provide exactly {days} modules, one per day, titled 'Day N: <topic>', with ids 1..={days}.\n\
     Each module has 3 learning_objectives, 3 daily_tasks and 2-3 resources (URLs).\n\
     Return JSON of the form:\n\
     {{\"subject\": str, \"level\": str, \"duration_weeks\": int, \"learner_name\": str,\n\
       \"modules\": [{{\"id\": int, \"title\": str, \"duration_days\": 1,\n\
       \"learning_objectives\": [str], \"daily_tasks\": [str], \"resources\": [str]}}],\n\
       \"metadata\": {{str: str}}}}",
    days = req.total_days,
    name = req.learner_name,
    subject = req.subject,
    level = req.level,
  )
}

pub fn quiz(req: &QuizRequest) -> String {
  let objectives = if req.objectives.is_empty() {
    "the core concepts".to_owned()
  } else {
    req.objectives.join(", ")
  };
  format!(
    "Create a {n}-question multiple choice quiz for a student learning '{subject}', \
     module '{title}'.\n\
     Base every question strictly on these learning objectives: {objectives}.\n\
     Each question has exactly 4 distinct options, one correct answer copied verbatim \
     from the options, and a short explanation.\n\
     Return JSON of the form:\n\
     {{\"module_id\": {id}, \"module_title\": str, \"questions\": [{{\"question\": str, \
     \"options\": [str, str, str, str], \"answer\": str, \"explanation\": str}}]}}",
    n = req.num_questions,
    subject = req.subject,
    title = req.module_title,
    id = req.module_id,
  )
}

pub fn lesson(req: &LessonRequest) -> String {
  format!(
    "TOPIC: {}\nLEARNER LEVEL: {}\nProvide a comprehensive markdown lesson.",
    req.topic, req.level
  )
}

pub fn doubt(req: &DoubtRequest) -> String {
  let mut prompt = format!("Question: {}\nSubject: {}", req.question, req.subject);
  if let Some(title) = &req.module_title {
    prompt.push_str(&format!("\nCurrent module: {title}"));
  }
  if !req.prior_notes.is_empty() {
    prompt.push_str("\nEarlier explanations the learner has seen:");
    for note in &req.prior_notes {
      prompt.push_str("\n---\n");
      prompt.push_str(note);
    }
  }
  prompt
}

pub fn topic_brief(topic: &str) -> String {
  format!(
    "Create a learning card for: {topic}\n\
     Include:\n\
     1. **ANALOGY**: a real-world mental model.\n\
     2. **PLAYGROUND**: a code snippet.\n\
     3. **VISUAL LOGIC**: a Mermaid diagram (graph TD ...).\n\
     4. **PITFALL**: a common mistake."
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quiz_prompt_falls_back_without_objectives() {
    let req = QuizRequest {
      subject:       "Python".into(),
      module_id:     3,
      module_title:  "Phase 3".into(),
      objectives:    vec![],
      num_questions: 5,
    };
    let p = quiz(&req);
    assert!(p.contains("the core concepts"));
    assert!(p.contains("\"module_id\": 3"));
  }

  #[test]
  fn doubt_prompt_includes_prior_notes() {
    let req = DoubtRequest {
      question:     "Why recursion?".into(),
      subject:      "Python".into(),
      module_title: Some("Day 4".into()),
      prior_notes:  vec!["Recursion is a function calling itself".into()],
    };
    let p = doubt(&req);
    assert!(p.contains("Current module: Day 4"));
    assert!(p.contains("Recursion is a function calling itself"));
  }
}
