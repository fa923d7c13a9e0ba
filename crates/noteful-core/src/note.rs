use serde::{Deserialize, Serialize};

/// One row of `notes LEFT JOIN folders LEFT JOIN notes_tags LEFT JOIN tags`.
///
/// A note with several tags produces several rows that differ only in the
/// tag columns. A note with no tags produces a single row with both tag
/// columns null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRow {
    pub note_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub folder_name: Option<String>,
    pub tag_id: Option<i64>,
    pub tag_name: Option<String>,
}

/// A tag as embedded in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: i64,
    pub name: String,
}

/// A full note with its folder and tags, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub folder_name: Option<String>,
    pub tags: Vec<TagRef>,
}

/// A folder notes can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
}

/// A tag that can be attached to any number of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Restricts which notes a joined-row query returns.
///
/// Filtering by tag selects the notes carrying that tag; the returned rows
/// still include every tag of those notes.
#[derive(Debug, Default, Clone)]
pub struct NoteFilter {
    pub note_id: Option<i64>,
    pub folder_id: Option<i64>,
    pub tag_id: Option<i64>,
    /// Case-insensitive substring of the title.
    pub search_term: Option<String>,
}

impl NoteFilter {
    pub fn by_id(id: i64) -> Self {
        Self {
            note_id: Some(id),
            ..Default::default()
        }
    }
}

/// Parameters for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub tag_ids: Vec<i64>,
}

/// Parameters for updating an existing note.
///
/// The outer `Option` says whether a field was supplied at all. For the
/// nullable columns the inner `Option` distinguishes "set to null" from
/// "set to a value".
#[derive(Debug, Default, Clone)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub folder_id: Option<Option<i64>>,
    /// Replaces the whole tag set when present. `Some(vec![])` clears it.
    pub tag_ids: Option<Vec<i64>>,
}
