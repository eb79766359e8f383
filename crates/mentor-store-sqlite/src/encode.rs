//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, note roles as their lowercase
//! name and the study plan as a JSON document.

use chrono::{DateTime, Utc};
use mentor_core::{
  annotation::{ModuleNote, NoteRole, Resource},
  plan::StudyPlan,
};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NoteRole ────────────────────────────────────────────────────────────────

pub fn encode_role(role: NoteRole) -> String { role.as_str().to_owned() }

pub fn decode_role(s: &str) -> Result<NoteRole> { Ok(NoteRole::parse(s)?) }

// ─── StudyPlan ───────────────────────────────────────────────────────────────

pub fn encode_plan(plan: &StudyPlan) -> Result<String> {
  Ok(serde_json::to_string(plan)?)
}

/// Decoding is infallible from the caller's point of view: a value written by
/// an older schema is discarded with a warning and treated as absent.
pub fn decode_plan(s: &str) -> Option<StudyPlan> {
  match serde_json::from_str(s) {
    Ok(plan) => Some(plan),
    Err(e) => {
      tracing::warn!(error = %e, "failed to decode stored study plan");
      None
    }
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `module_notes` row.
pub struct RawNote {
  pub id:         i64,
  pub module_id:  i64,
  pub role:       String,
  pub content:    String,
  pub created_at: String,
}

impl RawNote {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      module_id:  row.get(1)?,
      role:       row.get(2)?,
      content:    row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_note(self) -> Result<ModuleNote> {
    Ok(ModuleNote {
      id:         self.id,
      module_id:  self.module_id,
      role:       decode_role(&self.role)?,
      content:    self.content,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `resources` row.
pub struct RawResource {
  pub id:         i64,
  pub module_id:  i64,
  pub title:      String,
  pub url:        String,
  pub snippet:    String,
  pub created_at: String,
}

impl RawResource {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      module_id:  row.get(1)?,
      title:      row.get(2)?,
      url:        row.get(3)?,
      snippet:    row.get(4)?,
      created_at: row.get(5)?,
    })
  }

  pub fn into_resource(self) -> Result<Resource> {
    Ok(Resource {
      id:         self.id,
      module_id:  self.module_id,
      title:      self.title,
      url:        self.url,
      snippet:    self.snippet,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
