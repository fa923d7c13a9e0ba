use crate::{CreateNote, Error, Folder, JoinRow, NoteFilter, Tag, UpdateNote};

/// Statements available inside a write transaction.
///
/// Nothing written through a `Transaction` is visible to other readers until
/// the enclosing [`Store::run_in_transaction`] commits.
pub trait Transaction {
    /// Insert a note row and return its generated ID.
    fn insert_note(&self, note: &CreateNote) -> Result<i64, Error>;

    /// Apply the supplied fields to a note row. Returns the affected row count.
    fn update_note(&self, id: i64, update: &UpdateNote) -> Result<usize, Error>;

    /// Delete a note row. Returns the affected row count.
    fn delete_note(&self, id: i64) -> Result<usize, Error>;

    /// Attach tags to a note. Pairs that already exist are left alone.
    fn insert_associations(&self, note_id: i64, tag_ids: &[i64]) -> Result<(), Error>;

    /// Detach every tag from a note. Returns the number of pairs removed.
    fn delete_associations(&self, note_id: i64) -> Result<usize, Error>;

    /// Make `tag_ids` the exact tag set of a note.
    fn replace_associations(&self, note_id: i64, tag_ids: &[i64]) -> Result<(), Error> {
        self.delete_associations(note_id)?;
        self.insert_associations(note_id, tag_ids)
    }

    fn folder_exists(&self, id: i64) -> Result<bool, Error>;

    fn tag_exists(&self, id: i64) -> Result<bool, Error>;

    /// Joined rows as seen from inside the transaction.
    fn query_joined_rows(&self, filter: &NoteFilter) -> Result<Vec<JoinRow>, Error>;
}

/// Storage abstraction the service is generic over.
///
/// Uses `async_trait` with `?Send` so single-threaded backends can hold
/// non-`Send` handles.
#[async_trait::async_trait(?Send)]
pub trait Store {
    /// Run `f` in a transaction. Commits when `f` returns `Ok`; any error
    /// rolls back every statement `f` issued.
    async fn run_in_transaction<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&dyn Transaction) -> Result<T, Error>;

    /// Joined note/folder/tag rows matching the filter, ordered by note ID.
    async fn query_joined_rows(&self, filter: &NoteFilter) -> Result<Vec<JoinRow>, Error>;

    async fn list_folders(&self) -> Result<Vec<Folder>, Error>;

    async fn get_folder(&self, id: i64) -> Result<Option<Folder>, Error>;

    async fn insert_folder(&self, name: &str) -> Result<Folder, Error>;

    /// Rename a folder. Returns `None` if it does not exist.
    async fn update_folder(&self, id: i64, name: &str) -> Result<Option<Folder>, Error>;

    /// Delete a folder. Returns true if deleted, false if not found.
    async fn delete_folder(&self, id: i64) -> Result<bool, Error>;

    async fn list_tags(&self) -> Result<Vec<Tag>, Error>;

    async fn get_tag(&self, id: i64) -> Result<Option<Tag>, Error>;

    async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>, Error>;

    async fn insert_tag(&self, name: &str) -> Result<Tag, Error>;

    /// Rename a tag. Returns `None` if it does not exist.
    async fn update_tag(&self, id: i64, name: &str) -> Result<Option<Tag>, Error>;

    /// Delete a tag and its associations. Returns true if deleted.
    async fn delete_tag(&self, id: i64) -> Result<bool, Error>;
}
