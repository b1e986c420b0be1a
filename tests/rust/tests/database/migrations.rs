//! Migration tests against on-disk databases

use mcpcatalog_storage::Database;
use tests::db::TestDatabase;

#[test]
fn test_fresh_database_is_fully_migrated() {
    let test_db = TestDatabase::new();
    assert_eq!(test_db.db.schema_version().unwrap(), 1);
    assert!(test_db.db_path().exists());
}

#[test]
fn test_reopen_does_not_rerun_migrations() {
    let test_db = TestDatabase::new();
    let path = test_db.db_path().to_path_buf();

    let applied: i64 = test_db
        .db
        .connection()
        .query_row("SELECT count(*) FROM schema_migrations", [], |row| row.get(0))
        .unwrap();
    assert_eq!(applied, 1);

    let reopened = Database::open(&path).unwrap();
    let applied: i64 = reopened
        .connection()
        .query_row("SELECT count(*) FROM schema_migrations", [], |row| row.get(0))
        .unwrap();
    assert_eq!(applied, 1);
}

#[test]
fn test_foreign_keys_enabled() {
    let test_db = TestDatabase::in_memory();
    let enabled: i64 = test_db
        .db
        .connection()
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}
