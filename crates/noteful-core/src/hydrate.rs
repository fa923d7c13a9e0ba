//! Folding joined rows back into notes.

use std::collections::{HashMap, HashSet};

use crate::{JoinRow, Note, TagRef};

/// Group flat join rows into one [`Note`] per distinct `note_id`.
///
/// Notes come out in the order their id was first seen. Each note's tags
/// keep the order of their rows and appear once per tag id. Rows for the
/// same note need not be contiguous.
pub fn hydrate(rows: Vec<JoinRow>) -> Vec<Note> {
    let mut notes: Vec<Note> = Vec::new();
    // note_id -> (position in `notes`, tag ids already attached)
    let mut seen: HashMap<i64, (usize, HashSet<i64>)> = HashMap::new();

    for row in rows {
        let (index, tag_ids) = seen.entry(row.note_id).or_insert_with(|| {
            notes.push(Note {
                id: row.note_id,
                title: row.title.clone(),
                content: row.content.clone(),
                folder_id: row.folder_id,
                folder_name: row.folder_name.clone(),
                tags: Vec::new(),
            });
            (notes.len() - 1, HashSet::new())
        });

        if let Some(tag_id) = row.tag_id {
            if tag_ids.insert(tag_id) {
                notes[*index].tags.push(TagRef {
                    id: tag_id,
                    name: row.tag_name.unwrap_or_default(),
                });
            }
        }
    }

    notes
}
