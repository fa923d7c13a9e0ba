//! Noteful CLI - notes, folders and tags backed by SQLite.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use noteful_core::{CreateNote, Error, NoteFilter, NotefulService, UpdateNote};
use noteful_sqlite::SqliteStore;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const NOTEFUL_DIR: &str = ".noteful";
const DB_FILE: &str = "noteful.db";

#[derive(Parser)]
#[command(name = "noteful", about = "Notes, folders and tags", version)]
struct Cli {
    /// Path to the database file (defaults to the nearest .noteful directory)
    #[arg(long, global = true, env = "NOTEFUL_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new noteful database in the current directory
    Init {
        /// Delete existing database and reinitialize
        #[arg(long)]
        reinitialize: bool,
    },
    /// Manage folders
    Folders {
        #[command(subcommand)]
        command: NamedCommands,
    },
    /// Manage tags
    Tags {
        #[command(subcommand)]
        command: NamedCommands,
    },
    /// Manage notes
    Notes {
        #[command(subcommand)]
        command: NoteCommands,
    },
}

/// Subcommands shared by folders and tags.
#[derive(Subcommand)]
enum NamedCommands {
    /// List all
    Ls,
    /// Show one by ID
    Show { id: i64 },
    /// Create a new one
    Add { name: String },
    /// Rename
    Edit { id: i64, name: String },
    /// Delete
    Rm { id: i64 },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// List notes
    Ls {
        /// Only notes whose title contains this text
        #[arg(long)]
        search: Option<String>,
        /// Only notes in this folder
        #[arg(long)]
        folder: Option<i64>,
        /// Only notes carrying this tag ID
        #[arg(long)]
        tag: Option<i64>,
    },
    /// Show a note
    Show { id: i64 },
    /// Add a new note
    Add {
        /// Note title
        #[arg(long)]
        title: String,
        /// Note content
        #[arg(long)]
        content: Option<String>,
        /// Folder ID
        #[arg(long)]
        folder: Option<i64>,
        /// Comma-separated tag IDs
        #[arg(long)]
        tags: Option<String>,
    },
    /// Edit a note
    Edit {
        /// Note ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New content
        #[arg(long, conflicts_with = "clear_content")]
        content: Option<String>,
        /// Remove the content
        #[arg(long)]
        clear_content: bool,
        /// Move to this folder ID
        #[arg(long, conflicts_with = "no_folder")]
        folder: Option<i64>,
        /// Remove the note from its folder
        #[arg(long)]
        no_folder: bool,
        /// Replace the tags with these comma-separated tag IDs ("" clears them)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a note
    Rm { id: i64 },
}

/// Find the .noteful directory by searching up from current directory
fn find_noteful_dir() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;
    loop {
        let noteful_path = current.join(NOTEFUL_DIR);
        if noteful_path.is_dir() {
            return Some(noteful_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolve the database path from --db/NOTEFUL_DB or the nearest .noteful directory
fn get_db_path(db: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = db {
        return Ok(path);
    }
    match find_noteful_dir() {
        Some(dir) => Ok(dir.join(DB_FILE)),
        None => bail!("No .noteful directory found. Run 'noteful init' to initialize a new database."),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("NOTEFUL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("noteful=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_ids(ids: &str) -> Result<Vec<i64>> {
    ids.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().context(format!("Invalid tag ID: {}", s)))
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a missing entity the way every subcommand does and exit non-zero.
fn not_found(what: &str, id: i64) -> ! {
    eprintln!("{} {} not found", what, id);
    std::process::exit(1);
}

/// Turn a service result into the CLI's output conventions.
fn report<T>(result: Result<T, Error>, what: &str, id: i64) -> Result<T> {
    match result {
        Err(Error::NotFound(_)) => not_found(what, id),
        other => Ok(other?),
    }
}

async fn run_folders(service: &NotefulService<SqliteStore>, command: NamedCommands) -> Result<()> {
    match command {
        NamedCommands::Ls => print_json(&service.list_folders().await?),
        NamedCommands::Show { id } => match service.get_folder(id).await? {
            Some(folder) => print_json(&folder),
            None => not_found("Folder", id),
        },
        NamedCommands::Add { name } => print_json(&service.create_folder(&name).await?),
        NamedCommands::Edit { id, name } => {
            let folder = report(service.update_folder(id, &name).await, "Folder", id)?;
            print_json(&folder)
        }
        NamedCommands::Rm { id } => {
            report(service.delete_folder(id).await, "Folder", id)?;
            println!("Deleted folder {}", id);
            Ok(())
        }
    }
}

async fn run_tags(service: &NotefulService<SqliteStore>, command: NamedCommands) -> Result<()> {
    match command {
        NamedCommands::Ls => print_json(&service.list_tags().await?),
        NamedCommands::Show { id } => match service.get_tag(id).await? {
            Some(tag) => print_json(&tag),
            None => not_found("Tag", id),
        },
        NamedCommands::Add { name } => print_json(&service.create_tag(&name).await?),
        NamedCommands::Edit { id, name } => {
            let tag = report(service.update_tag(id, &name).await, "Tag", id)?;
            print_json(&tag)
        }
        NamedCommands::Rm { id } => {
            report(service.delete_tag(id).await, "Tag", id)?;
            println!("Deleted tag {}", id);
            Ok(())
        }
    }
}

async fn run_notes(service: &NotefulService<SqliteStore>, command: NoteCommands) -> Result<()> {
    match command {
        NoteCommands::Ls {
            search,
            folder,
            tag,
        } => {
            let filter = NoteFilter {
                note_id: None,
                folder_id: folder,
                tag_id: tag,
                search_term: search,
            };
            print_json(&service.list_notes(filter).await?)
        }

        NoteCommands::Show { id } => match service.get_note(id).await? {
            Some(note) => print_json(&note),
            None => not_found("Note", id),
        },

        NoteCommands::Add {
            title,
            content,
            folder,
            tags,
        } => {
            let tag_ids = tags.map(|t| parse_ids(&t)).transpose()?.unwrap_or_default();
            let note = service
                .create_note(CreateNote {
                    title,
                    content,
                    folder_id: folder,
                    tag_ids,
                })
                .await?;
            print_json(&note)
        }

        NoteCommands::Edit {
            id,
            title,
            content,
            clear_content,
            folder,
            no_folder,
            tags,
        } => {
            let update = UpdateNote {
                title,
                content: if clear_content { Some(None) } else { content.map(Some) },
                folder_id: if no_folder { Some(None) } else { folder.map(Some) },
                tag_ids: tags.map(|t| parse_ids(&t)).transpose()?,
            };

            if update.title.is_none()
                && update.content.is_none()
                && update.folder_id.is_none()
                && update.tag_ids.is_none()
            {
                eprintln!("Nothing to update");
                std::process::exit(1);
            }

            let note = report(service.update_note(id, update).await, "Note", id)?;
            print_json(&note)
        }

        NoteCommands::Rm { id } => {
            report(service.delete_note(id).await, "Note", id)?;
            println!("Deleted note {}", id);
            Ok(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    if let Commands::Init { reinitialize } = cli.command {
        let db_path = match cli.db {
            Some(path) => path,
            None => {
                let dir = PathBuf::from(NOTEFUL_DIR);
                std::fs::create_dir_all(&dir)
                    .context("Failed to create .noteful directory")?;
                dir.join(DB_FILE)
            }
        };

        if db_path.exists() {
            if !reinitialize {
                bail!("Noteful is already initialized here. Use --reinitialize to delete and recreate.");
            }
            std::fs::remove_file(&db_path).context("Failed to remove existing database")?;
        }

        let _store = SqliteStore::open(&db_path).context("Failed to create database")?;

        if reinitialize {
            println!("Reinitialized noteful database at {}", db_path.display());
        } else {
            println!("Initialized noteful database at {}", db_path.display());
        }
        return Ok(());
    }

    // All other commands need the database
    let db_path = get_db_path(cli.db)?;
    tracing::debug!(path = %db_path.display(), "opening database");
    let store = SqliteStore::open(&db_path).context("Failed to open database")?;
    let service = NotefulService::new(store);

    match cli.command {
        Commands::Init { .. } => unreachable!(),
        Commands::Folders { command } => run_folders(&service, command).await,
        Commands::Tags { command } => run_tags(&service, command).await,
        Commands::Notes { command } => run_notes(&service, command).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("1, 2,,3").unwrap(), vec![1, 2, 3]);
        assert!(parse_ids("").unwrap().is_empty());
        assert!(parse_ids("1,x").is_err());
    }

    #[test]
    fn test_cli_parses_note_edit() {
        let cli = Cli::try_parse_from([
            "noteful", "notes", "edit", "4", "--no-folder", "--tags", "1,2",
        ])
        .unwrap();

        match cli.command {
            Commands::Notes {
                command:
                    NoteCommands::Edit {
                        id,
                        no_folder,
                        tags,
                        title,
                        ..
                    },
            } => {
                assert_eq!(id, 4);
                assert!(no_folder);
                assert_eq!(tags.as_deref(), Some("1,2"));
                assert!(title.is_none());
            }
            _ => panic!("expected notes edit"),
        }
    }

    #[test]
    fn test_cli_rejects_conflicting_folder_flags() {
        assert!(Cli::try_parse_from([
            "noteful", "notes", "edit", "4", "--folder", "2", "--no-folder",
        ])
        .is_err());
    }
}
