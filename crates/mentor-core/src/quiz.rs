//! Multiple-choice quizzes generated for a single plan module.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Every question offers exactly this many choices.
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
  pub module_id:    i64,
  #[serde(default)]
  pub module_title: Option<String>,
  #[serde(default)]
  pub questions:    Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
  pub question:    String,
  pub options:     Vec<String>,
  /// Must equal one of `options` verbatim.
  pub answer:      String,
  #[serde(default)]
  pub explanation: Option<String>,
}

impl QuizQuestion {
  fn validate(&self, index: usize) -> Result<()> {
    if self.options.len() != OPTIONS_PER_QUESTION {
      return Err(Error::WrongOptionCount { index, count: self.options.len() });
    }
    if !self.options.iter().any(|o| *o == self.answer) {
      return Err(Error::AnswerNotInOptions { index, answer: self.answer.clone() });
    }
    Ok(())
  }
}

impl Quiz {
  /// Reject quizzes whose questions break the four-options / answer-in-options
  /// rule. The first offending question is reported.
  pub fn validate(&self) -> Result<()> {
    self
      .questions
      .iter()
      .enumerate()
      .try_for_each(|(i, q)| q.validate(i))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn question(options: &[&str], answer: &str) -> QuizQuestion {
    QuizQuestion {
      question:    "Which keyword defines a function?".into(),
      options:     options.iter().map(|s| s.to_string()).collect(),
      answer:      answer.into(),
      explanation: None,
    }
  }

  fn quiz(questions: Vec<QuizQuestion>) -> Quiz {
    Quiz { module_id: 1, module_title: Some("Day 1".into()), questions }
  }

  #[test]
  fn well_formed_quiz_passes() {
    let q = quiz(vec![question(&["def", "fn", "func", "lambda"], "def")]);
    assert!(q.validate().is_ok());
  }

  #[test]
  fn three_options_are_rejected() {
    let q = quiz(vec![
      question(&["def", "fn", "func", "lambda"], "def"),
      question(&["def", "fn", "func"], "def"),
    ]);
    assert!(matches!(
      q.validate(),
      Err(Error::WrongOptionCount { index: 1, count: 3 })
    ));
  }

  #[test]
  fn answer_must_be_an_option() {
    let q = quiz(vec![question(&["def", "fn", "func", "lambda"], "DEF")]);
    assert!(matches!(q.validate(), Err(Error::AnswerNotInOptions { index: 0, .. })));
  }

  #[test]
  fn empty_quiz_is_valid() {
    assert!(quiz(vec![]).validate().is_ok());
  }
}
