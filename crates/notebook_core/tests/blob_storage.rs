use notebook_core::db::migrations::latest_version;
use notebook_core::db::{open_db, open_db_in_memory, DbError};
use notebook_core::{
    BlobStorage, LoadOutcome, NoteStore, SqliteBlobStorage, StorageError, DEFAULT_STORAGE_KEY,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_blobs');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("notebook.sqlite3");

    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = SqliteBlobStorage::open(&path).err().unwrap();
    assert!(matches!(err, StorageError::Db(_)));
}

#[test]
fn sqlite_storage_upserts_by_key() {
    let mut storage = SqliteBlobStorage::open_in_memory().unwrap();
    assert_eq!(storage.get("notes").unwrap(), None);

    storage.set("notes", "[1]").unwrap();
    storage.set("notes", "[2]").unwrap();
    storage.set("archive", "[]").unwrap();

    assert_eq!(storage.get("notes").unwrap().as_deref(), Some("[2]"));
    assert_eq!(storage.keys().unwrap(), vec!["archive", "notes"]);
}

#[test]
fn notes_survive_a_restart_through_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notebook.sqlite3");

    let expected = {
        let mut store = NoteStore::new(SqliteBlobStorage::open(&path).unwrap());
        store.add("persisted", "across restarts", "is-warning");
        let removed = store.add("removed", "before restart", "is-warning");
        store.remove(removed.id);
        store.all_notes().to_vec()
    };

    let mut store = NoteStore::new(SqliteBlobStorage::open(&path).unwrap());
    assert_eq!(store.load(), LoadOutcome::Restored(1));
    assert_eq!(store.all_notes(), expected.as_slice());
    assert_eq!(store.storage_key(), DEFAULT_STORAGE_KEY);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
