//! SQLite implementation of the Noteful store traits.

use noteful_core::{
    get_pending_migrations, CreateNote, Error, Folder, JoinRow, NoteFilter, Store, Tag,
    Transaction, UpdateNote, SCHEMA_VERSION,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// How long a writer waits for another connection's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const JOINED_ROWS_SQL: &str = "SELECT n.id, n.title, n.content, f.id, f.name, t.id, t.name
     FROM notes n
     LEFT JOIN folders f ON n.folder_id = f.id
     LEFT JOIN notes_tags nt ON nt.note_id = n.id
     LEFT JOIN tags t ON nt.tag_id = t.id";

fn storage(e: rusqlite::Error) -> Error {
    Error::Storage(e.to_string())
}

/// Like [`storage`], but a UNIQUE violation on a tag name is the caller's fault.
fn tag_write(name: &str) -> impl FnOnce(rusqlite::Error) -> Error + '_ {
    move |e| match e {
        rusqlite::Error::SqliteFailure(ref err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Error::Validation(format!("tag {:?} already exists", name))
        }
        e => storage(e),
    }
}

/// SQLite-backed store implementation.
///
/// A single connection sits behind a mutex, so every write transaction runs
/// alone.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a database at the given path and run any pending migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let conn = Connection::open(path).map_err(storage)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database and run migrations.
    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory().map_err(storage)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, Error> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(storage)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(storage)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.conn
            .lock()
            .map_err(|_| Error::Storage("connection mutex poisoned".into()))
    }

    /// Run any pending database migrations.
    fn run_migrations(&self) -> Result<(), Error> {
        let conn = self.lock()?;

        // Ensure _noteful_meta table exists
        conn.execute(
            "CREATE TABLE IF NOT EXISTS _noteful_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(storage)?;

        let current_version: i64 = conn
            .query_row(
                "SELECT value FROM _noteful_meta WHERE key = 'schema_version'",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(storage)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        if current_version >= SCHEMA_VERSION {
            return Ok(());
        }

        for migration in get_pending_migrations(current_version) {
            tracing::debug!(
                version = migration.version,
                name = migration.name,
                "applying migration"
            );
            for statement in migration.statements {
                // Skip _noteful_meta creation (already done above)
                if statement.contains("_noteful_meta") {
                    continue;
                }
                conn.execute(statement, []).map_err(|e| {
                    Error::Storage(format!("Migration {} failed: {}", migration.name, e))
                })?;
            }
        }

        conn.execute(
            "INSERT OR REPLACE INTO _noteful_meta (key, value) VALUES ('schema_version', ?1)",
            params![SCHEMA_VERSION.to_string()],
        )
        .map_err(storage)?;

        Ok(())
    }
}

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'`.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn join_row(row: &Row<'_>) -> rusqlite::Result<JoinRow> {
    Ok(JoinRow {
        note_id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        folder_id: row.get(3)?,
        folder_name: row.get(4)?,
        tag_id: row.get(5)?,
        tag_name: row.get(6)?,
    })
}

/// Run the joined-row query on `conn`. Tag rows keep the order the
/// associations were inserted in.
fn query_joined_rows(conn: &Connection, filter: &NoteFilter) -> Result<Vec<JoinRow>, Error> {
    let mut sql = String::from(JOINED_ROWS_SQL);
    let mut conditions = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(id) = filter.note_id {
        values.push(Value::Integer(id));
        conditions.push(format!("n.id = ?{}", values.len()));
    }

    if let Some(folder_id) = filter.folder_id {
        values.push(Value::Integer(folder_id));
        conditions.push(format!("n.folder_id = ?{}", values.len()));
    }

    if let Some(tag_id) = filter.tag_id {
        values.push(Value::Integer(tag_id));
        conditions.push(format!(
            "n.id IN (SELECT note_id FROM notes_tags WHERE tag_id = ?{})",
            values.len()
        ));
    }

    if let Some(ref term) = filter.search_term {
        values.push(Value::Text(like_pattern(term)));
        conditions.push(format!("n.title LIKE ?{} ESCAPE '\\'", values.len()));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(" ORDER BY n.id, nt.rowid");

    let mut stmt = conn.prepare(&sql).map_err(storage)?;
    let rows = stmt
        .query_map(params_from_iter(values.iter()), join_row)
        .map_err(storage)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(storage)?;

    Ok(rows)
}

fn exists(conn: &Connection, sql: &str, id: i64) -> Result<bool, Error> {
    conn.query_row(sql, params![id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
        .map_err(storage)
}

/// Write statements bound to an open rusqlite transaction.
struct SqliteTransaction<'a> {
    conn: &'a Connection,
}

impl Transaction for SqliteTransaction<'_> {
    fn insert_note(&self, note: &CreateNote) -> Result<i64, Error> {
        self.conn
            .execute(
                "INSERT INTO notes (title, content, folder_id) VALUES (?1, ?2, ?3)",
                params![note.title, note.content, note.folder_id],
            )
            .map_err(storage)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_note(&self, id: i64, update: &UpdateNote) -> Result<usize, Error> {
        let mut sets = vec![String::from("updated_at = datetime('now')")];
        let mut values: Vec<Value> = Vec::new();

        if let Some(ref title) = update.title {
            values.push(Value::Text(title.clone()));
            sets.push(format!("title = ?{}", values.len()));
        }

        if let Some(ref content) = update.content {
            values.push(content.clone().map_or(Value::Null, Value::Text));
            sets.push(format!("content = ?{}", values.len()));
        }

        if let Some(folder_id) = update.folder_id {
            values.push(folder_id.map_or(Value::Null, Value::Integer));
            sets.push(format!("folder_id = ?{}", values.len()));
        }

        values.push(Value::Integer(id));
        let sql = format!(
            "UPDATE notes SET {} WHERE id = ?{}",
            sets.join(", "),
            values.len()
        );

        self.conn
            .execute(&sql, params_from_iter(values.iter()))
            .map_err(storage)
    }

    fn delete_note(&self, id: i64) -> Result<usize, Error> {
        self.conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])
            .map_err(storage)
    }

    fn insert_associations(&self, note_id: i64, tag_ids: &[i64]) -> Result<(), Error> {
        let mut stmt = self
            .conn
            .prepare(
                "INSERT INTO notes_tags (note_id, tag_id) VALUES (?1, ?2)
                 ON CONFLICT (note_id, tag_id) DO NOTHING",
            )
            .map_err(storage)?;
        for tag_id in tag_ids {
            stmt.execute(params![note_id, tag_id]).map_err(storage)?;
        }
        Ok(())
    }

    fn delete_associations(&self, note_id: i64) -> Result<usize, Error> {
        self.conn
            .execute("DELETE FROM notes_tags WHERE note_id = ?1", params![note_id])
            .map_err(storage)
    }

    fn folder_exists(&self, id: i64) -> Result<bool, Error> {
        exists(self.conn, "SELECT 1 FROM folders WHERE id = ?1", id)
    }

    fn tag_exists(&self, id: i64) -> Result<bool, Error> {
        exists(self.conn, "SELECT 1 FROM tags WHERE id = ?1", id)
    }

    fn query_joined_rows(&self, filter: &NoteFilter) -> Result<Vec<JoinRow>, Error> {
        query_joined_rows(self.conn, filter)
    }
}

#[async_trait::async_trait(?Send)]
impl Store for SqliteStore {
    async fn run_in_transaction<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&dyn Transaction) -> Result<T, Error>,
    {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(storage)?;
        // Foreign keys are checked at COMMIT, so a closure can look at its
        // own writes before deciding whether references are valid.
        tx.execute_batch("PRAGMA defer_foreign_keys = ON;")
            .map_err(storage)?;

        // Dropping `tx` without committing rolls back, including after a
        // COMMIT that failed on a deferred constraint.
        let value = f(&SqliteTransaction { conn: &tx })?;

        tx.commit().map_err(storage)?;
        Ok(value)
    }

    async fn query_joined_rows(&self, filter: &NoteFilter) -> Result<Vec<JoinRow>, Error> {
        let conn = self.lock()?;
        query_joined_rows(&conn, filter)
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, Error> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, name FROM folders ORDER BY id")
            .map_err(storage)?;
        let folders = stmt
            .query_map([], |row| {
                Ok(Folder {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(storage)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage)?;
        Ok(folders)
    }

    async fn get_folder(&self, id: i64) -> Result<Option<Folder>, Error> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, name FROM folders WHERE id = ?1",
            params![id],
            |row| {
                Ok(Folder {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(storage)
    }

    async fn insert_folder(&self, name: &str) -> Result<Folder, Error> {
        let conn = self.lock()?;
        conn.execute("INSERT INTO folders (name) VALUES (?1)", params![name])
            .map_err(storage)?;
        Ok(Folder {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    async fn update_folder(&self, id: i64, name: &str) -> Result<Option<Folder>, Error> {
        let conn = self.lock()?;
        let rows = conn
            .execute(
                "UPDATE folders SET name = ?1 WHERE id = ?2",
                params![name, id],
            )
            .map_err(storage)?;
        Ok((rows > 0).then(|| Folder {
            id,
            name: name.to_string(),
        }))
    }

    async fn delete_folder(&self, id: i64) -> Result<bool, Error> {
        let conn = self.lock()?;
        let rows = conn
            .execute("DELETE FROM folders WHERE id = ?1", params![id])
            .map_err(storage)?;
        Ok(rows > 0)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, name FROM tags ORDER BY id")
            .map_err(storage)?;
        let tags = stmt
            .query_map([], |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(storage)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage)?;
        Ok(tags)
    }

    async fn get_tag(&self, id: i64) -> Result<Option<Tag>, Error> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, name FROM tags WHERE id = ?1",
            params![id],
            |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(storage)
    }

    async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>, Error> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, name FROM tags WHERE name = ?1",
            params![name],
            |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(storage)
    }

    async fn insert_tag(&self, name: &str) -> Result<Tag, Error> {
        let conn = self.lock()?;
        conn.execute("INSERT INTO tags (name) VALUES (?1)", params![name])
            .map_err(tag_write(name))?;
        Ok(Tag {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    async fn update_tag(&self, id: i64, name: &str) -> Result<Option<Tag>, Error> {
        let conn = self.lock()?;
        let rows = conn
            .execute("UPDATE tags SET name = ?1 WHERE id = ?2", params![name, id])
            .map_err(tag_write(name))?;
        Ok((rows > 0).then(|| Tag {
            id,
            name: name.to_string(),
        }))
    }

    async fn delete_tag(&self, id: i64) -> Result<bool, Error> {
        let conn = self.lock()?;
        let rows = conn
            .execute("DELETE FROM tags WHERE id = ?1", params![id])
            .map_err(storage)?;
        Ok(rows > 0)
    }
}

impl SqliteStore {
    /// Tag IDs currently associated with a note, straight from `notes_tags`.
    pub fn association_tag_ids(&self, note_id: i64) -> Result<Vec<i64>, Error> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT tag_id FROM notes_tags WHERE note_id = ?1 ORDER BY rowid")
            .map_err(storage)?;
        let ids = stmt
            .query_map(params![note_id], |row| row.get(0))
            .map_err(storage)?
            .collect::<Result<Vec<i64>, _>>()
            .map_err(storage)?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn note(title: &str, folder_id: Option<i64>, tag_ids: Vec<i64>) -> CreateNote {
        CreateNote {
            title: title.to_string(),
            content: Some(format!("{} content", title)),
            folder_id,
            tag_ids,
        }
    }

    async fn insert(store: &SqliteStore, create: CreateNote) -> i64 {
        store
            .run_in_transaction(|tx| {
                let id = tx.insert_note(&create)?;
                tx.insert_associations(id, &create.tag_ids)?;
                Ok(id)
            })
            .await
            .unwrap()
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("cats"), "%cats%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[tokio::test]
    async fn test_open_file_runs_migrations_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("noteful.db");

        let store = SqliteStore::open(&path).unwrap();
        let folder = store.insert_folder("Work").await.unwrap();
        drop(store);

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get_folder(folder.id).await.unwrap(), Some(folder));
    }

    #[tokio::test]
    async fn test_rows_for_one_note_agree_on_note_columns() {
        let store = SqliteStore::open_in_memory().unwrap();
        let folder = store.insert_folder("Work").await.unwrap();
        let a = store.insert_tag("a").await.unwrap();
        let b = store.insert_tag("b").await.unwrap();
        let c = store.insert_tag("c").await.unwrap();

        insert(&store, note("first", Some(folder.id), vec![a.id, b.id, c.id])).await;
        insert(&store, note("second", None, vec![])).await;
        insert(&store, note("third", Some(folder.id), vec![c.id, a.id])).await;

        let rows = store.query_joined_rows(&NoteFilter::default()).await.unwrap();
        assert_eq!(rows.len(), 3 + 1 + 2);

        let mut by_note: HashMap<i64, &JoinRow> = HashMap::new();
        for row in &rows {
            let first = by_note.entry(row.note_id).or_insert(row);
            assert_eq!(first.title, row.title);
            assert_eq!(first.content, row.content);
            assert_eq!(first.folder_id, row.folder_id);
            assert_eq!(first.folder_name, row.folder_name);
            assert_eq!(row.folder_id.is_none(), row.folder_name.is_none());
            assert_eq!(row.tag_id.is_none(), row.tag_name.is_none());
        }
        assert_eq!(by_note.len(), 3);
    }

    #[tokio::test]
    async fn test_note_without_tags_yields_single_null_tag_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = insert(&store, note("lonely", None, vec![])).await;

        let rows = store.query_joined_rows(&NoteFilter::by_id(id)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tag_id, None);
        assert_eq!(rows[0].tag_name, None);
    }

    #[tokio::test]
    async fn test_tag_filter_keeps_other_tags() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.insert_tag("a").await.unwrap();
        let b = store.insert_tag("b").await.unwrap();
        let tagged = insert(&store, note("tagged", None, vec![a.id, b.id])).await;
        insert(&store, note("other", None, vec![b.id])).await;

        let rows = store
            .query_joined_rows(&NoteFilter {
                tag_id: Some(a.id),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(rows.iter().all(|r| r.note_id == tagged));
        let tag_ids: Vec<Option<i64>> = rows.iter().map(|r| r.tag_id).collect();
        assert_eq!(tag_ids, vec![Some(a.id), Some(b.id)]);
    }

    #[tokio::test]
    async fn test_search_term_matches_title_substring() {
        let store = SqliteStore::open_in_memory().unwrap();
        insert(&store, note("Ten facts about cats", None, vec![])).await;
        insert(&store, note("Dogs", None, vec![])).await;
        insert(&store, note("100% cats", None, vec![])).await;

        let search = |term: &str| NoteFilter {
            search_term: Some(term.to_string()),
            ..Default::default()
        };

        let rows = store.query_joined_rows(&search("CATS")).await.unwrap();
        assert_eq!(rows.len(), 2);

        let rows = store.query_joined_rows(&search("0%")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "100% cats");
    }

    #[tokio::test]
    async fn test_failed_transaction_rolls_back() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.insert_tag("a").await.unwrap();
        let b = store.insert_tag("b").await.unwrap();
        let id = insert(&store, note("n", None, vec![a.id])).await;

        let result: Result<(), Error> = store
            .run_in_transaction(|tx| {
                tx.replace_associations(id, &[b.id])?;
                tx.update_note(
                    id,
                    &UpdateNote {
                        title: Some("changed".to_string()),
                        ..Default::default()
                    },
                )?;
                Err(Error::Storage("boom".into()))
            })
            .await;

        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(store.association_tag_ids(id).unwrap(), vec![a.id]);
        let rows = store.query_joined_rows(&NoteFilter::by_id(id)).await.unwrap();
        assert_eq!(rows[0].title, "n");
    }

    #[tokio::test]
    async fn test_association_to_missing_tag_is_a_storage_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = insert(&store, note("n", None, vec![])).await;

        let result = store
            .run_in_transaction(|tx| tx.insert_associations(id, &[42]))
            .await;

        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(store.association_tag_ids(id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_associations_ignores_existing_pairs() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.insert_tag("a").await.unwrap();
        let id = insert(&store, note("n", None, vec![a.id])).await;

        store
            .run_in_transaction(|tx| tx.insert_associations(id, &[a.id, a.id]))
            .await
            .unwrap();

        assert_eq!(store.association_tag_ids(id).unwrap(), vec![a.id]);
    }

    #[tokio::test]
    async fn test_update_note_clears_nullable_columns() {
        let store = SqliteStore::open_in_memory().unwrap();
        let folder = store.insert_folder("Work").await.unwrap();
        let id = insert(&store, note("n", Some(folder.id), vec![])).await;

        let affected = store
            .run_in_transaction(|tx| {
                tx.update_note(
                    id,
                    &UpdateNote {
                        content: Some(None),
                        folder_id: Some(None),
                        ..Default::default()
                    },
                )
            })
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let rows = store.query_joined_rows(&NoteFilter::by_id(id)).await.unwrap();
        assert_eq!(rows[0].title, "n");
        assert_eq!(rows[0].content, None);
        assert_eq!(rows[0].folder_id, None);
    }

    #[tokio::test]
    async fn test_delete_folder_detaches_notes() {
        let store = SqliteStore::open_in_memory().unwrap();
        let folder = store.insert_folder("Work").await.unwrap();
        let id = insert(&store, note("n", Some(folder.id), vec![])).await;

        assert!(store.delete_folder(folder.id).await.unwrap());
        assert!(!store.delete_folder(folder.id).await.unwrap());

        let rows = store.query_joined_rows(&NoteFilter::by_id(id)).await.unwrap();
        assert_eq!(rows[0].folder_id, None);
        assert_eq!(rows[0].folder_name, None);
    }

    #[tokio::test]
    async fn test_delete_tag_cascades_to_associations() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.insert_tag("a").await.unwrap();
        let b = store.insert_tag("b").await.unwrap();
        let id = insert(&store, note("n", None, vec![a.id, b.id])).await;

        assert!(store.delete_tag(a.id).await.unwrap());
        assert_eq!(store.association_tag_ids(id).unwrap(), vec![b.id]);
    }

    #[tokio::test]
    async fn test_duplicate_tag_name_is_a_validation_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_tag("a").await.unwrap();
        let b = store.insert_tag("b").await.unwrap();

        assert!(matches!(
            store.insert_tag("a").await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            store.update_tag(b.id, "a").await,
            Err(Error::Validation(_))
        ));
        assert_eq!(store.get_tag(b.id).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn test_foreign_keys_are_checked_at_commit() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = insert(&store, note("n", None, vec![])).await;

        let result = store
            .run_in_transaction(|tx| {
                tx.update_note(
                    id,
                    &UpdateNote {
                        folder_id: Some(Some(77)),
                        ..Default::default()
                    },
                )?;
                tx.folder_exists(77)
            })
            .await;

        assert!(matches!(result, Err(Error::Storage(_))));
        let rows = store.query_joined_rows(&NoteFilter::by_id(id)).await.unwrap();
        assert_eq!(rows[0].folder_id, None);
    }
}
