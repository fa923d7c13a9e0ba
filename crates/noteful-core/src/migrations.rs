//! Embedded database migrations for Noteful.
//!
//! Migrations are versioned and run automatically when a store is opened.
//! The schema version is tracked in the `_noteful_meta` table.

/// Current schema version. Increment when adding new migrations.
pub const SCHEMA_VERSION: i64 = 1;

/// A database migration with version number and SQL statements.
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

/// All migrations in order. Each migration should be idempotent where possible.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    statements: &[
        "CREATE TABLE IF NOT EXISTS _noteful_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS folders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT,
            folder_id INTEGER REFERENCES folders(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        "CREATE TABLE IF NOT EXISTS notes_tags (
            note_id INTEGER NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
            tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (note_id, tag_id)
        )",
        "CREATE INDEX IF NOT EXISTS idx_notes_folder_id ON notes(folder_id)",
        "CREATE INDEX IF NOT EXISTS idx_notes_tags_tag_id ON notes_tags(tag_id)",
    ],
}];

/// Get migrations that need to be applied given the current version.
pub fn get_pending_migrations(current_version: i64) -> Vec<&'static Migration> {
    MIGRATIONS
        .iter()
        .filter(|m| m.version > current_version)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_increasing() {
        let versions: Vec<i64> = MIGRATIONS.iter().map(|m| m.version).collect();
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(versions.last().copied(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_pending_migrations() {
        assert_eq!(get_pending_migrations(0).len(), MIGRATIONS.len());
        assert!(get_pending_migrations(SCHEMA_VERSION).is_empty());
    }
}
