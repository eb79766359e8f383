//! [`SqliteStore`]: the SQLite implementation of [`ContextStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use mentor_core::{
  annotation::{ModuleNote, NewNote, NewResource, Resource},
  plan::StudyPlan,
  store::ContextStore,
};

use crate::{
  Result,
  encode::{RawNote, RawResource, decode_plan, encode_dt, encode_plan, encode_role},
  schema::SCHEMA,
};

/// Key of the single "current plan" row in the `context` table.
pub const PLAN_KEY: &str = "study_plan";

const NOTE_COLUMNS: &str = "id, module_id, role, content, created_at";
const RESOURCE_COLUMNS: &str = "id, module_id, title, url, snippet, created_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Mentor context store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// Missing parent directories are created.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent).await?;
    }
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened context store");
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Upsert a raw JSON value under `key` in a single statement, so a crash
  /// leaves either the old or the new value.
  pub(crate) async fn put_context(&self, key: &str, value: String) -> Result<()> {
    let key    = key.to_owned();
    let at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO context (key, value, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(key) DO UPDATE SET
             value      = excluded.value,
             updated_at = excluded.updated_at",
          rusqlite::params![key, value, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub(crate) async fn get_context(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();

    let value: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT value FROM context WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;
    Ok(value)
  }

  #[cfg(test)]
  pub(crate) async fn journal_mode(&self) -> Result<String> {
    let mode: String = self
      .conn
      .call(|conn| Ok(conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))?))
      .await?;
    Ok(mode)
  }

  async fn query_notes(&self, module_id: i64, needle: Option<String>) -> Result<Vec<ModuleNote>> {
    let raws: Vec<RawNote> = self
      .conn
      .call(move |conn| {
        // instr() is case-sensitive, unlike LIKE.
        let rows = if let Some(needle) = needle {
          let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM module_notes
             WHERE module_id = ?1 AND instr(content, ?2) > 0
             ORDER BY id DESC"
          ))?;
          stmt
            .query_map(rusqlite::params![module_id, needle], RawNote::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM module_notes
             WHERE module_id = ?1
             ORDER BY id DESC"
          ))?;
          stmt
            .query_map(rusqlite::params![module_id], RawNote::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }
}

// ─── ContextStore impl ───────────────────────────────────────────────────────

impl ContextStore for SqliteStore {
  type Error = crate::Error;

  // ── Plan ──────────────────────────────────────────────────────────────────

  async fn save_plan(&self, plan: &StudyPlan) -> Result<()> {
    plan.validate()?;
    let json = encode_plan(plan)?;
    self.put_context(PLAN_KEY, json).await?;
    tracing::info!(
      subject = %plan.subject,
      learner = %plan.learner_name,
      modules = plan.modules.len(),
      "saved study plan"
    );
    Ok(())
  }

  async fn load_plan(&self) -> Result<Option<StudyPlan>> {
    Ok(self.get_context(PLAN_KEY).await?.as_deref().and_then(decode_plan))
  }

  // ── Notes: append-only ───────────────────────────────────────────────────

  async fn add_note(&self, note: NewNote) -> Result<ModuleNote> {
    let created_at = Utc::now();
    let role_str   = encode_role(note.role);
    let at_str     = encode_dt(created_at);
    let content    = note.content.clone();
    let module_id  = note.module_id;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO module_notes (module_id, role, content, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![module_id, role_str, content, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(ModuleNote {
      id,
      module_id,
      role: note.role,
      content: note.content,
      created_at,
    })
  }

  async fn list_notes(&self, module_id: i64) -> Result<Vec<ModuleNote>> {
    self.query_notes(module_id, None).await
  }

  async fn search_notes(&self, module_id: i64, query: &str) -> Result<Vec<ModuleNote>> {
    self.query_notes(module_id, Some(query.to_owned())).await
  }

  // ── Resources: append-only ───────────────────────────────────────────────

  async fn add_resource(&self, resource: NewResource) -> Result<Resource> {
    let created_at = Utc::now();
    let at_str     = encode_dt(created_at);
    let row        = resource.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO resources (module_id, title, url, snippet, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![row.module_id, row.title, row.url, row.snippet, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Resource {
      id,
      module_id: resource.module_id,
      title: resource.title,
      url: resource.url,
      snippet: resource.snippet,
      created_at,
    })
  }

  async fn list_resources(&self, module_id: i64) -> Result<Vec<Resource>> {
    let raws: Vec<RawResource> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RESOURCE_COLUMNS} FROM resources
           WHERE module_id = ?1
           ORDER BY id DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![module_id], RawResource::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawResource::into_resource).collect()
  }
}
