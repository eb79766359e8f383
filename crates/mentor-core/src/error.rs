//! Error types for `mentor-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("module id {0} appears more than once in the plan")]
  DuplicateModuleId(i64),

  #[error("quiz question {index} has {count} options, expected 4")]
  WrongOptionCount { index: usize, count: usize },

  #[error("quiz question {index} answer {answer:?} is not one of its options")]
  AnswerNotInOptions { index: usize, answer: String },

  #[error("unknown note role: {0:?}")]
  UnknownNoteRole(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
