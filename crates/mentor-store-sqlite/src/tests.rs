//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::BTreeMap;

use mentor_core::{
  annotation::{NewNote, NewResource, NoteRole},
  plan::{Module, StudyPlan},
  store::ContextStore,
};

use crate::{Error, PLAN_KEY, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn python_plan() -> StudyPlan {
  let mut day1 = Module::new(1, "Day 1: Variables");
  day1.duration_days = 1;
  day1.learning_objectives = vec!["Name things".into(), "Use types".into()];
  day1.daily_tasks = vec!["Write hello world".into()];
  day1.resources = vec!["https://docs.python.org/3/tutorial/".into()];

  let mut day2 = Module::new(2, "Day 2: Functions");
  day2.duration_days = 1;
  day2.learning_objectives = vec!["Define functions".into()];

  StudyPlan {
    subject:        "Python".into(),
    level:          "beginner".into(),
    duration_weeks: 1,
    learner_name:   "Ada".into(),
    modules:        vec![day1, day2],
    metadata:       BTreeMap::from([
      ("theme".to_owned(), "Mastering Python in 2 Days".to_owned()),
      ("estimated_total_hours".to_owned(), "4".to_owned()),
    ]),
  }
}

// ─── Plan ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_without_plan_returns_none() {
  let s = store().await;
  assert!(s.load_plan().await.unwrap().is_none());
}

#[tokio::test]
async fn save_and_load_plan_roundtrip() {
  let s = store().await;
  let plan = python_plan();

  s.save_plan(&plan).await.unwrap();
  let loaded = s.load_plan().await.unwrap().expect("plan saved");

  assert_eq!(loaded, plan);
  let ids: Vec<i64> = loaded.modules.iter().map(|m| m.id).collect();
  assert_eq!(ids, [1, 2]);
}

#[tokio::test]
async fn second_save_overwrites_first() {
  let s = store().await;
  s.save_plan(&python_plan()).await.unwrap();

  let mut rust = python_plan();
  rust.subject = "Rust".into();
  rust.modules.truncate(1);
  s.save_plan(&rust).await.unwrap();

  let loaded = s.load_plan().await.unwrap().unwrap();
  assert_eq!(loaded.subject, "Rust");
  assert_eq!(loaded.modules.len(), 1);
}

#[tokio::test]
async fn corrupt_plan_loads_as_none() {
  let s = store().await;
  s.put_context(PLAN_KEY, r#"{"subject": 42}"#.to_owned())
    .await
    .unwrap();
  assert!(s.load_plan().await.unwrap().is_none());

  s.put_context(PLAN_KEY, "not json at all".to_owned())
    .await
    .unwrap();
  assert!(s.load_plan().await.unwrap().is_none());
}

#[tokio::test]
async fn resolve_unknown_module_falls_back_to_first() {
  let s = store().await;
  s.save_plan(&python_plan()).await.unwrap();

  let resolved = s.resolve(99).await.unwrap();
  assert_eq!(resolved.plan.unwrap().subject, "Python");
  assert_eq!(resolved.module.unwrap().id, 1);
}

#[tokio::test]
async fn resolve_without_plan_returns_nothing() {
  let s = store().await;
  let resolved = s.resolve(1).await.unwrap();
  assert!(resolved.plan.is_none());
  assert!(resolved.module.is_none());
  assert_eq!(resolved.level(), "beginner");
}

#[tokio::test]
async fn plan_persists_across_reopen() {
  let dir = std::env::temp_dir().join(format!("mentor-store-{}", std::process::id()));
  let path = dir.join("nested").join("context.sqlite");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.save_plan(&python_plan()).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.load_plan().await.unwrap().unwrap(), python_plan());

  drop(s);
  std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn duplicate_module_ids_are_not_saved() {
  let s = store().await;
  s.save_plan(&python_plan()).await.unwrap();

  let mut broken = python_plan();
  broken.subject = "Broken".into();
  broken.modules[1].id = 1;
  let err = s.save_plan(&broken).await.unwrap_err();
  assert!(matches!(err, Error::Core(mentor_core::Error::DuplicateModuleId(1))));
  assert_eq!(s.load_plan().await.unwrap().unwrap().subject, "Python");
}

#[tokio::test]
async fn file_store_uses_wal_and_shares_the_file() {
  let dir = std::env::temp_dir().join(format!("mentor-wal-{}", std::process::id()));
  let path = dir.join("context.sqlite");
  let writer = SqliteStore::open(&path).await.unwrap();
  let reader = SqliteStore::open(&path).await.unwrap();

  assert_eq!(writer.journal_mode().await.unwrap(), "wal");
  assert_eq!(reader.journal_mode().await.unwrap(), "wal");

  let mut tasks = Vec::new();
  for i in 0..25 {
    let w = writer.clone();
    tasks.push(tokio::spawn(async move {
      w.save_plan(&python_plan()).await.unwrap();
      w.add_note(NewNote::new(1, format!("shared note {i}"))).await.unwrap();
    }));
    let r = reader.clone();
    tasks.push(tokio::spawn(async move {
      if let Some(plan) = r.load_plan().await.unwrap() {
        assert_eq!(plan, python_plan());
      }
      r.search_notes(1, "shared").await.unwrap();
    }));
  }
  for task in tasks {
    task.await.unwrap();
  }

  assert_eq!(reader.search_notes(1, "shared").await.unwrap().len(), 25);
  assert_eq!(reader.load_plan().await.unwrap().unwrap(), python_plan());

  drop(writer);
  drop(reader);
  std::fs::remove_dir_all(&dir).ok();
}

// ─── Notes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_note_assigns_id_and_role() {
  let s = store().await;
  let note = s
    .add_note(NewNote::new(1, "Variables hold values").with_role(NoteRole::Teacher))
    .await
    .unwrap();

  assert_eq!(note.module_id, 1);
  assert_eq!(note.role, NoteRole::Teacher);

  let notes = s.list_notes(1).await.unwrap();
  assert_eq!(notes.len(), 1);
  assert_eq!(notes[0], note);
}

#[tokio::test]
async fn duplicate_notes_are_both_kept() {
  let s = store().await;
  s.add_note(NewNote::new(1, "same")).await.unwrap();
  s.add_note(NewNote::new(1, "same")).await.unwrap();
  assert_eq!(s.list_notes(1).await.unwrap().len(), 2);
}

#[tokio::test]
async fn notes_are_listed_most_recent_first() {
  let s = store().await;
  for i in 0..3 {
    s.add_note(NewNote::new(7, format!("note {i}"))).await.unwrap();
  }
  let contents: Vec<String> = s
    .list_notes(7)
    .await
    .unwrap()
    .into_iter()
    .map(|n| n.content)
    .collect();
  assert_eq!(contents, ["note 2", "note 1", "note 0"]);
}

#[tokio::test]
async fn search_returns_exactly_matching_notes() {
  let s = store().await;
  let contents = [
    "Loops repeat work",
    "A for loop iterates",
    "Functions group code",
    "while loops check first",
    "Recursion is a function calling itself",
  ];
  for c in contents {
    s.add_note(NewNote::new(3, c)).await.unwrap();
  }
  // Same text under another module must not leak in.
  s.add_note(NewNote::new(4, "another loop")).await.unwrap();

  let hits = s.search_notes(3, "loop").await.unwrap();
  assert_eq!(hits.len(), 2);
  assert!(hits.iter().all(|n| n.module_id == 3 && n.content.contains("loop")));
}

#[tokio::test]
async fn search_is_case_sensitive() {
  let s = store().await;
  s.add_note(NewNote::new(1, "Python lists")).await.unwrap();
  s.add_note(NewNote::new(1, "python dicts")).await.unwrap();

  let hits = s.search_notes(1, "Python").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].content, "Python lists");
}

#[tokio::test]
async fn search_treats_like_wildcards_literally() {
  let s = store().await;
  s.add_note(NewNote::new(1, "100% coverage")).await.unwrap();
  s.add_note(NewNote::new(1, "1000 coverage")).await.unwrap();

  let hits = s.search_notes(1, "0%").await.unwrap();
  assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn empty_query_matches_every_note() {
  let s = store().await;
  s.add_note(NewNote::new(1, "a")).await.unwrap();
  s.add_note(NewNote::new(1, "b")).await.unwrap();
  assert_eq!(s.search_notes(1, "").await.unwrap().len(), 2);
}

#[tokio::test]
async fn notes_survive_plan_overwrite() {
  let s = store().await;
  s.save_plan(&python_plan()).await.unwrap();
  s.add_note(NewNote::new(1, "kept")).await.unwrap();

  let mut other = python_plan();
  other.subject = "Go".into();
  s.save_plan(&other).await.unwrap();

  assert_eq!(s.list_notes(1).await.unwrap().len(), 1);
}

// ─── Resources ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_resources() {
  let s = store().await;
  let first = s
    .add_resource(NewResource {
      module_id: 2,
      title:     "Python tutorial".into(),
      url:       "https://docs.python.org/3/tutorial/".into(),
      snippet:   "The official tutorial".into(),
    })
    .await
    .unwrap();
  s.add_resource(NewResource {
    module_id: 2,
    title:     "Real Python".into(),
    url:       "https://realpython.com".into(),
    snippet:   String::new(),
  })
  .await
  .unwrap();

  let listed = s.list_resources(2).await.unwrap();
  assert_eq!(listed.len(), 2);
  assert_eq!(listed[0].title, "Real Python");
  assert_eq!(listed[1], first);

  assert!(s.list_resources(1).await.unwrap().is_empty());
}
