//! Noteful core library - shared types, traits, and business logic.
//!
//! This crate contains no I/O. Storage backends implement [`Store`] and
//! [`Transaction`]; [`NotefulService`] drives them.

mod error;
mod hydrate;
mod migrations;
mod note;
mod service;
mod store;

pub use error::Error;
pub use hydrate::hydrate;
pub use migrations::{get_pending_migrations, Migration, MIGRATIONS, SCHEMA_VERSION};
pub use note::{CreateNote, Folder, JoinRow, Note, NoteFilter, Tag, TagRef, UpdateNote};
pub use service::NotefulService;
pub use store::{Store, Transaction};
