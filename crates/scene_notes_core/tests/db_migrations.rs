use rusqlite::Connection;
use scene_notes_core::db::migrations::latest_version;
use scene_notes_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().expect("in-memory project should open");

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "notes");
    assert_table_exists(&conn, "store_state");
    assert_table_exists(&conn, "scene");
    assert_table_exists(&conn, "scene_cameras");
}

#[test]
fn fresh_database_starts_with_singleton_rows() {
    let conn = open_db_in_memory().expect("in-memory project should open");
    let active_index: i64 = conn
        .query_row("SELECT active_index FROM store_state WHERE id = 1;", [], |row| {
            row.get(0)
        })
        .expect("store_state row should exist");
    assert_eq!(active_index, 0);

    let scene_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM scene;", [], |row| row.get(0))
        .expect("scene row count should be readable");
    assert_eq!(scene_rows, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("project.sqlite3");

    let conn_first = open_db(&path).expect("project file should open");
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).expect("project file should open");
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "notes");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).expect("raw connection should open");
    conn.execute_batch("PRAGMA user_version = 999;").expect("user_version should be set");
    drop(conn);

    let err = open_db(&path).expect_err("newer schema should be rejected");
    match err {
        DbError::ProjectFromNewerBuild { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .expect("user_version should be readable")
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .expect("sqlite_master should be readable");
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
