//! Subcommand dispatch and report rendering.
//!
//! # Responsibility
//! - Map one parsed subcommand to one session action.
//! - Shape results into a [`Report`] that renders as text or JSON.
//!
//! # Invariants
//! - Dispatch never touches disk except through the session.
//! - Read-only subcommands report `mutates() == false` and are not saved.

use clap::Subcommand;
use notebox_core::{AppConfig, Note, NoteSession, NoteStore, SessionResult, DEFAULT_CATEGORY};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List categories with their note counts
    Categories,

    /// List note titles, optionally for one category
    List {
        /// Category name (all categories when omitted)
        category: Option<String>,
    },

    /// Print one note
    Show {
        category: String,
        /// Zero-based position inside the category
        index: usize,
    },

    /// Add a note
    Add {
        #[arg(long, short)]
        title: String,
        /// Category name (defaults to "Uncategorized")
        #[arg(long, short)]
        category: Option<String>,
        /// Initial body text
        #[arg(long, default_value = "")]
        content: String,
    },

    /// Replace the body of a note
    Edit {
        category: String,
        index: usize,
        #[arg(long)]
        content: String,
    },

    /// Change the title of a note
    Retitle {
        category: String,
        index: usize,
        title: String,
    },

    /// Move a note to another category
    Move {
        category: String,
        index: usize,
        /// Target category (created when missing)
        to: String,
    },

    /// Delete a note
    Delete { category: String, index: usize },

    /// Create an empty category
    AddCategory { name: String },

    /// Rename a category
    RenameCategory { old: String, new: String },

    /// Delete a category and all of its notes
    DeleteCategory { name: String },

    /// Find notes whose body contains QUERY (case-insensitive)
    Search { query: String },

    /// Write all notes to another file
    Export { path: PathBuf },

    /// Replace all notes with the contents of another file
    Import { path: PathBuf },

    /// Print the effective configuration
    Config,
}

impl Command {
    /// Whether the notes file must be written after this command.
    pub fn mutates(&self) -> bool {
        !matches!(
            self,
            Self::Categories
                | Self::List { .. }
                | Self::Show { .. }
                | Self::Search { .. }
                | Self::Export { .. }
                | Self::Config
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub notes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteItem {
    /// Key of the category holding the note, usable with `show`/`edit`.
    pub category: String,
    pub index: usize,
    pub title: String,
    pub chars: usize,
}

/// Result of one subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Categories { items: Vec<CategorySummary> },
    Notes { items: Vec<NoteItem> },
    Note { index: usize, note: Note },
    Done { message: String },
    Config { config: AppConfig },
}

/// Runs `command` against an open session.
pub fn execute(
    session: &mut NoteSession,
    command: Command,
    config: &AppConfig,
) -> SessionResult<Report> {
    match command {
        Command::Categories => {
            let store = session.store();
            let items = store
                .categories()
                .map(|name| CategorySummary {
                    name: name.to_string(),
                    notes: store.get(name).len(),
                })
                .collect();
            Ok(Report::Categories { items })
        }
        Command::List { category } => {
            let items = match category {
                Some(category) => {
                    let notes = session.select_category(&category)?;
                    notes
                        .iter()
                        .enumerate()
                        .map(|(index, note)| note_item(&category, index, note))
                        .collect()
                }
                None => {
                    let store = session.store();
                    store
                        .categories()
                        .flat_map(move |name| {
                            store
                                .get(name)
                                .iter()
                                .enumerate()
                                .map(move |(index, note)| note_item(name, index, note))
                        })
                        .collect()
                }
            };
            Ok(Report::Notes { items })
        }
        Command::Show { category, index } => {
            let note = session.select(&category, index)?.clone();
            Ok(Report::Note { index, note })
        }
        Command::Add {
            title,
            category,
            content,
        } => {
            let category = category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
            let index = session.add_note_with_content(&title, &content, &category)?;
            Ok(done(format!("Added note {index} to `{category}`.")))
        }
        Command::Edit {
            category,
            index,
            content,
        } => {
            session.select(&category, index)?;
            session.save_note(&content)?;
            Ok(done(format!("Updated note {index} in `{category}`.")))
        }
        Command::Retitle {
            category,
            index,
            title,
        } => {
            session.select(&category, index)?;
            session.edit_title(&title)?;
            Ok(done(format!("Retitled note {index} in `{category}`.")))
        }
        Command::Move {
            category,
            index,
            to,
        } => {
            session.select(&category, index)?;
            session.edit_category(&to)?;
            let new_index = session.selected_note().unwrap_or_default();
            Ok(done(format!(
                "Moved note {index} from `{category}` to `{to}` as note {new_index}."
            )))
        }
        Command::Delete { category, index } => {
            session.select(&category, index)?;
            let removed = session.delete_note()?;
            Ok(done(format!(
                "Deleted note {index} (`{}`) from `{category}`.",
                removed.title
            )))
        }
        Command::AddCategory { name } => {
            session.add_category(&name)?;
            Ok(done(format!("Category `{name}` is ready.")))
        }
        Command::RenameCategory { old, new } => {
            session.rename_category(&old, &new)?;
            Ok(done(format!("Category `{old}` renamed to `{new}`.")))
        }
        Command::DeleteCategory { name } => {
            let removed = session.delete_category(&name)?;
            Ok(done(format!(
                "Category `{name}` deleted with {} note(s).",
                removed.len()
            )))
        }
        Command::Search { query } => {
            let store = session.store();
            let items = session
                .search(&query)
                .into_iter()
                .filter_map(|hit| {
                    let (category, index) = locate(store, hit)?;
                    Some(note_item(category, index, hit))
                })
                .collect();
            Ok(Report::Notes { items })
        }
        Command::Export { path } => {
            session.export_to(&path)?;
            Ok(done(format!("Notes exported to {}.", path.display())))
        }
        Command::Import { path } => {
            session.import_from(&path)?;
            Ok(done(format!("Notes imported from {}.", path.display())))
        }
        Command::Config => Ok(Report::Config {
            config: config.clone(),
        }),
    }
}

impl Report {
    /// Human-readable rendering.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        match self {
            Self::Categories { items } => {
                if items.is_empty() {
                    out.push_str("No categories.\n");
                }
                for item in items {
                    let _ = writeln!(out, "{} ({})", item.name, item.notes);
                }
            }
            Self::Notes { items } => {
                if items.is_empty() {
                    out.push_str("No notes.\n");
                }
                for item in items {
                    let _ = writeln!(
                        out,
                        "[{}] {}: {} ({} chars)",
                        item.category, item.index, item.title, item.chars
                    );
                }
            }
            Self::Note { index, note } => {
                let _ = writeln!(out, "{} [{} #{}]", note.title, note.category, index);
                if !note.content.is_empty() {
                    out.push('\n');
                    out.push_str(&note.content);
                    out.push('\n');
                }
            }
            Self::Done { message } => {
                out.push_str(message);
                out.push('\n');
            }
            Self::Config { config } => {
                let _ = writeln!(out, "notes_path = {}", config.notes_path.display());
                let _ = writeln!(out, "autosave = {}", config.autosave);
                let _ = writeln!(out, "log_level = {}", config.log_level);
                let log_dir = config
                    .log_dir
                    .as_ref()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_else(|| "-".to_string());
                let _ = writeln!(out, "log_dir = {log_dir}");
                let _ = writeln!(out, "theme = {:?}", config.display.theme);
                let _ = writeln!(out, "font_size = {}", config.display.font_size);
            }
        }
        out
    }
}

/// Finds the category key and position holding `note`.
///
/// Matches by address, so the key is found even when the note's own label
/// differs from the key it is filed under.
fn locate<'a>(store: &'a NoteStore, note: &Note) -> Option<(&'a str, usize)> {
    store.as_categories().iter().find_map(|(category, notes)| {
        notes
            .iter()
            .position(|candidate| std::ptr::eq(candidate, note))
            .map(|index| (category.as_str(), index))
    })
}

fn note_item(category: &str, index: usize, note: &Note) -> NoteItem {
    NoteItem {
        category: category.to_string(),
        index,
        title: note.title.clone(),
        chars: note.content_chars(),
    }
}

fn done(message: String) -> Report {
    Report::Done { message }
}
