//! SQL schema for the Mentor SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA busy_timeout = 30000;

-- Key/value context. The current study plan lives under 'study_plan'.
CREATE TABLE IF NOT EXISTS context (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,   -- JSON document
    updated_at  TEXT NOT NULL    -- ISO 8601 UTC
);

-- Notes and resources are strictly append-only.
-- No UPDATE or DELETE is ever issued against these tables.
-- module_id is not a foreign key: plans live as JSON in `context`.
CREATE TABLE IF NOT EXISTS module_notes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    module_id   INTEGER NOT NULL,
    role        TEXT NOT NULL,   -- 'teacher' | 'assistant'
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS resources (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    module_id   INTEGER NOT NULL,
    title       TEXT NOT NULL,
    url         TEXT NOT NULL,
    snippet     TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS module_notes_module_idx ON module_notes(module_id);
CREATE INDEX IF NOT EXISTS resources_module_idx    ON resources(module_id);

PRAGMA user_version = 1;
";
