//! Module annotations: notes and resources attached to a plan module.
//!
//! Annotations are strictly append-only: they are never edited or deleted,
//! and they survive plan overwrites. The `module_id` is a loose reference; no
//! check is made that the current plan contains that module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::Error;

/// Who authored a note.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoteRole {
  /// A lesson produced by the lesson generator.
  Teacher,
  #[default]
  Assistant,
}

impl NoteRole {
  pub fn as_str(&self) -> &str { self.as_ref() }

  pub fn parse(s: &str) -> Result<Self, Error> {
    s.parse().map_err(|_| Error::UnknownNoteRole(s.to_owned()))
  }
}

// ─── Notes ───────────────────────────────────────────────────────────────────

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleNote {
  pub id:         i64,
  pub module_id:  i64,
  pub role:       NoteRole,
  pub content:    String,
  pub created_at: DateTime<Utc>,
}

/// Input for [`ContextStore::add_note`](crate::store::ContextStore::add_note).
#[derive(Debug, Clone)]
pub struct NewNote {
  pub module_id: i64,
  pub role:      NoteRole,
  pub content:   String,
}

impl NewNote {
  /// A note with the default [`NoteRole::Assistant`] role.
  pub fn new(module_id: i64, content: impl Into<String>) -> Self {
    Self { module_id, role: NoteRole::default(), content: content.into() }
  }

  pub fn with_role(mut self, role: NoteRole) -> Self {
    self.role = role;
    self
  }
}

// ─── Resources ───────────────────────────────────────────────────────────────

/// A persisted learning resource link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
  pub id:         i64,
  pub module_id:  i64,
  pub title:      String,
  pub url:        String,
  pub snippet:    String,
  pub created_at: DateTime<Utc>,
}

/// Input for [`ContextStore::add_resource`](crate::store::ContextStore::add_resource).
#[derive(Debug, Clone, Deserialize)]
pub struct NewResource {
  pub module_id: i64,
  pub title:     String,
  pub url:       String,
  #[serde(default)]
  pub snippet:   String,
}
