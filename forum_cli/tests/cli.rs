use std::path::{Path, PathBuf};

use forum::models::{Post, Topic, User};
use forum::prelude::*;
use forum_cli::{clear_data, connect, init, migrate, migration_status, rollback};
use forum_test_helper::Scene;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn initialized() -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join(".forum");
    let db = tmp.path().join("forum.db");
    init(&base, "sqlite", db.to_str().unwrap()).unwrap();
    (tmp, base)
}

fn applied(base: &Path) -> Vec<bool> {
    migration_status(base)
        .unwrap()
        .into_iter()
        .map(|(_, applied)| applied)
        .collect()
}

#[test]
fn init_saves_connection() {
    let (_tmp, base) = initialized();
    assert!(base.join("connection.json").is_file());
    let spec = forum_cli::load_connspec(&base).unwrap();
    assert_eq!(spec.backend_name, "sqlite");
}

#[test]
fn init_rejects_unknown_backend() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join(".forum");
    let err = init(&base, "oracle", "db").unwrap_err();
    assert_eq!(err.to_string(), "Unknown backend oracle");
    assert!(!base.exists());
}

#[test]
fn commands_need_init() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(migrate(&tmp.path().join(".forum")).is_err());
}

#[test]
fn migrate_applies_pending_once() {
    let (_tmp, base) = initialized();
    assert_eq!(applied(&base), vec![false, false, false]);
    assert_eq!(migrate(&base).unwrap(), 3);
    assert_eq!(migrate(&base).unwrap(), 0);
    assert_eq!(applied(&base), vec![true, true, true]);
}

#[test]
fn rollback_latest_then_to_name() {
    let (_tmp, base) = initialized();
    migrate(&base).unwrap();

    assert_eq!(rollback(&base, None).unwrap(), 1);
    assert_eq!(applied(&base), vec![true, true, false]);

    assert_eq!(
        rollback(&base, Some("0001_users_topics_advertisements")).unwrap(),
        1
    );
    assert_eq!(applied(&base), vec![true, false, false]);

    assert!(rollback(&base, Some("9999_missing")).is_err());
    assert_eq!(rollback(&base, None).unwrap(), 1);
    assert_eq!(rollback(&base, None).unwrap(), 0);
}

#[test]
fn clear_data_keeps_schema() {
    let (_tmp, base) = initialized();
    migrate(&base).unwrap();
    {
        let mut conn = connect(&base).unwrap();
        Scene::build(&mut conn);
    }

    // user, topic, post and the author's upvote
    assert_eq!(clear_data(&base).unwrap(), 4);

    let conn = connect(&base).unwrap();
    assert_eq!(User::query().count(&conn).unwrap(), 0);
    assert_eq!(Topic::query().count(&conn).unwrap(), 0);
    assert_eq!(Post::query().count(&conn).unwrap(), 0);
    assert_eq!(applied(&base), vec![true, true, true]);
}
