use crate::{
    hydrate, CreateNote, Error, Folder, JoinRow, Note, NoteFilter, Store, Tag, Transaction,
    UpdateNote,
};

/// The main service that contains all business logic.
/// Generic over the storage implementation.
pub struct NotefulService<S: Store> {
    store: S,
}

impl<S: Store> NotefulService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a note together with its tag associations.
    pub async fn create_note(&self, note: CreateNote) -> Result<Note, Error> {
        let title = note.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::Validation("title cannot be empty".into()));
        }

        let note = CreateNote {
            title,
            tag_ids: dedup_ids(note.tag_ids),
            ..note
        };

        let rows = self
            .store
            .run_in_transaction(|tx| {
                check_references(tx, note.folder_id, Some(&note.tag_ids))?;
                let id = tx.insert_note(&note)?;
                tx.insert_associations(id, &note.tag_ids)?;
                tx.query_joined_rows(&NoteFilter::by_id(id))
            })
            .await?;

        let created = single_note(rows)?;
        tracing::info!(
            note_id = created.id,
            tags = created.tags.len(),
            "created note"
        );
        Ok(created)
    }

    /// Update a note. Supplied fields overwrite stored ones; supplied tag IDs
    /// replace the note's whole tag set.
    pub async fn update_note(&self, id: i64, update: UpdateNote) -> Result<Note, Error> {
        if let Some(ref title) = update.title {
            if title.trim().is_empty() {
                return Err(Error::Validation("title cannot be empty".into()));
            }
        }

        let update = UpdateNote {
            title: update.title.map(|t| t.trim().to_string()),
            tag_ids: update.tag_ids.map(dedup_ids),
            ..update
        };

        let rows = self
            .store
            .run_in_transaction(|tx| {
                if tx.update_note(id, &update)? == 0 {
                    return Err(Error::NotFound(format!("note {}", id)));
                }
                check_references(tx, update.folder_id.flatten(), update.tag_ids.as_deref())?;
                if let Some(ref tag_ids) = update.tag_ids {
                    tx.replace_associations(id, tag_ids)?;
                }
                tx.query_joined_rows(&NoteFilter::by_id(id))
            })
            .await?;

        let updated = single_note(rows)?;
        tracing::info!(
            note_id = updated.id,
            tags = updated.tags.len(),
            "updated note"
        );
        Ok(updated)
    }

    /// Delete a note and every association that references it.
    pub async fn delete_note(&self, id: i64) -> Result<(), Error> {
        self.store
            .run_in_transaction(|tx| {
                tx.delete_associations(id)?;
                if tx.delete_note(id)? == 0 {
                    return Err(Error::NotFound(format!("note {}", id)));
                }
                Ok(())
            })
            .await?;

        tracing::info!(note_id = id, "deleted note");
        Ok(())
    }

    /// Get a note by ID.
    pub async fn get_note(&self, id: i64) -> Result<Option<Note>, Error> {
        let rows = self.store.query_joined_rows(&NoteFilter::by_id(id)).await?;
        Ok(hydrate(rows).into_iter().next())
    }

    /// List notes with optional filters.
    pub async fn list_notes(&self, filter: NoteFilter) -> Result<Vec<Note>, Error> {
        let filter = NoteFilter {
            search_term: filter
                .search_term
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            ..filter
        };
        let rows = self.store.query_joined_rows(&filter).await?;
        tracing::debug!(rows = rows.len(), "hydrating notes");
        Ok(hydrate(rows))
    }

    /// List all folders.
    pub async fn list_folders(&self) -> Result<Vec<Folder>, Error> {
        self.store.list_folders().await
    }

    /// Get a folder by ID.
    pub async fn get_folder(&self, id: i64) -> Result<Option<Folder>, Error> {
        self.store.get_folder(id).await
    }

    /// Create a folder.
    pub async fn create_folder(&self, name: &str) -> Result<Folder, Error> {
        let name = normalize_name(name)?;
        let folder = self.store.insert_folder(&name).await?;
        tracing::info!(folder_id = folder.id, "created folder");
        Ok(folder)
    }

    /// Rename a folder.
    pub async fn update_folder(&self, id: i64, name: &str) -> Result<Folder, Error> {
        let name = normalize_name(name)?;
        self.store
            .update_folder(id, &name)
            .await?
            .ok_or_else(|| Error::NotFound(format!("folder {}", id)))
    }

    /// Delete a folder. Its notes stay, with no folder.
    pub async fn delete_folder(&self, id: i64) -> Result<(), Error> {
        if !self.store.delete_folder(id).await? {
            return Err(Error::NotFound(format!("folder {}", id)));
        }
        tracing::info!(folder_id = id, "deleted folder");
        Ok(())
    }

    /// List all tags.
    pub async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
        self.store.list_tags().await
    }

    /// Get a tag by ID.
    pub async fn get_tag(&self, id: i64) -> Result<Option<Tag>, Error> {
        self.store.get_tag(id).await
    }

    /// Create a tag. Tag names are unique.
    pub async fn create_tag(&self, name: &str) -> Result<Tag, Error> {
        let name = normalize_name(name)?;
        if self.store.get_tag_by_name(&name).await?.is_some() {
            return Err(Error::Validation(format!("tag {:?} already exists", name)));
        }
        let tag = self.store.insert_tag(&name).await?;
        tracing::info!(tag_id = tag.id, "created tag");
        Ok(tag)
    }

    /// Rename a tag.
    pub async fn update_tag(&self, id: i64, name: &str) -> Result<Tag, Error> {
        let name = normalize_name(name)?;
        if let Some(existing) = self.store.get_tag_by_name(&name).await? {
            if existing.id != id {
                return Err(Error::Validation(format!("tag {:?} already exists", name)));
            }
        }
        self.store
            .update_tag(id, &name)
            .await?
            .ok_or_else(|| Error::NotFound(format!("tag {}", id)))
    }

    /// Delete a tag, detaching it from every note.
    pub async fn delete_tag(&self, id: i64) -> Result<(), Error> {
        if !self.store.delete_tag(id).await? {
            return Err(Error::NotFound(format!("tag {}", id)));
        }
        tracing::info!(tag_id = id, "deleted tag");
        Ok(())
    }
}

/// Reject writes that would point at a folder or tag that does not exist.
fn check_references(
    tx: &dyn Transaction,
    folder_id: Option<i64>,
    tag_ids: Option<&[i64]>,
) -> Result<(), Error> {
    if let Some(folder_id) = folder_id {
        if !tx.folder_exists(folder_id)? {
            tracing::warn!(folder_id, "rejected unknown folder");
            return Err(Error::Validation(format!("folder {} does not exist", folder_id)));
        }
    }

    for &tag_id in tag_ids.unwrap_or_default() {
        if !tx.tag_exists(tag_id)? {
            tracing::warn!(tag_id, "rejected unknown tag");
            return Err(Error::Validation(format!("tag {} does not exist", tag_id)));
        }
    }

    Ok(())
}

/// Drop repeated IDs, keeping the first occurrence of each.
fn dedup_ids(ids: Vec<i64>) -> Vec<i64> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

fn normalize_name(name: &str) -> Result<String, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation("name cannot be empty".into()));
    }
    Ok(name.to_string())
}

fn single_note(rows: Vec<JoinRow>) -> Result<Note, Error> {
    hydrate(rows)
        .into_iter()
        .next()
        .ok_or_else(|| Error::Storage("note vanished after write".into()))
}
