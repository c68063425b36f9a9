use crate::db::*;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_database_open_creates_tables() {
    let dir = tempdir().unwrap();
    let db = Database::open(&dir.path().join("nerdbase.db"), Duration::from_secs(1)).unwrap();

    let count: i64 = db
        .with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('card', 'topic')",
                    [],
                    |row| row.get(0),
                )
                .unwrap())
        })
        .unwrap();

    assert_eq!(count, 2);
}

#[test]
fn test_default_topic_is_seeded_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nerdbase.db");

    drop(Database::open(&path, Duration::from_secs(1)).unwrap());
    let db = Database::open(&path, Duration::from_secs(1)).unwrap();

    assert_eq!(db.count_rows("topic").unwrap(), 1);
    let name: String = db
        .with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT name FROM topic WHERE id = ?1",
                    [DEFAULT_TOPIC_ID],
                    |row| row.get(0),
                )
                .unwrap())
        })
        .unwrap();
    assert_eq!(name, "Default");
}

#[test]
fn test_foreign_keys_enforced() {
    let db = Database::open_in_memory().unwrap();

    let result = db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO card (title, question, topic) VALUES ('t', 'q', 99)",
            [],
        )
        .map_err(|e| crate::error::NerdError::db_operation("insert card", e))
    });

    let err = result.unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
    assert_eq!(db.count_rows("card").unwrap(), 0);
}

#[test]
fn test_deleting_topic_resets_cards_to_default() {
    let db = Database::open_in_memory().unwrap();

    db.with_conn(|conn| {
        conn.execute("INSERT INTO topic (name) VALUES ('Science')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO card (title, question, topic) VALUES ('t', 'q', 1)",
            [],
        )
        .unwrap();
        conn.execute("DELETE FROM topic WHERE id = 1", []).unwrap();
        Ok(())
    })
    .unwrap();

    let topic: i64 = db
        .with_conn(|conn| Ok(conn.query_row("SELECT topic FROM card", [], |r| r.get(0)).unwrap()))
        .unwrap();
    assert_eq!(topic, DEFAULT_TOPIC_ID);
}

#[test]
fn test_open_in_unwritable_location_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("nerdbase.db");

    let err = Database::open(&path, Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, crate::error::NerdError::Storage { .. }));
}
