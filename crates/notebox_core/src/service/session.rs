//! Interactive note session.
//!
//! # Responsibility
//! - Hold front-end selection state (category, note index) over a store.
//! - Validate user input before calling into [`NoteStore`].
//! - Persist after each mutation when autosave is enabled, and on close.
//!
//! # Invariants
//! - A selected note index always has a selected category.
//! - Selection follows a note moved to another category and a category
//!   that gets renamed.
//! - Store errors are surfaced; the store itself never sees blank input.

use crate::config::AppConfig;
use crate::model::note::Note;
use crate::search::content::search_notes;
use crate::store::note_store::NoteStore;
use crate::store::StoreError;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type SessionResult<T> = Result<T, SessionError>;

/// Error for user actions rejected by the session.
#[derive(Debug)]
pub enum SessionError {
    /// A required text input was blank.
    EmptyField(&'static str),
    /// The action needs a selected category/note and none is selected.
    NoSelection,
    UnknownCategory(String),
    IndexOutOfRange { category: String, index: usize },
    CategoryExists(String),
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} is required"),
            Self::NoSelection => write!(f, "no note selected"),
            Self::UnknownCategory(name) => write!(f, "unknown category: `{name}`"),
            Self::IndexOutOfRange { category, index } => {
                write!(f, "no note at index {index} in category `{category}`")
            }
            Self::CategoryExists(name) => write!(f, "category already exists: `{name}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::CategoryNotFound(name) => Self::UnknownCategory(name),
            StoreError::CategoryExists(name) => Self::CategoryExists(name),
            StoreError::EmptyCategoryName => Self::EmptyField("category"),
            other => Self::Store(other),
        }
    }
}

/// Note store plus the selection and autosave state of one front end.
#[derive(Debug)]
pub struct NoteSession {
    store: NoteStore,
    notes_path: PathBuf,
    autosave: bool,
    selected_category: Option<String>,
    selected_note: Option<usize>,
}

impl NoteSession {
    /// Creates a session over an existing store without touching disk.
    pub fn new(store: NoteStore, notes_path: impl Into<PathBuf>, autosave: bool) -> Self {
        Self {
            store,
            notes_path: notes_path.into(),
            autosave,
            selected_category: None,
            selected_note: None,
        }
    }

    /// Opens a session and loads the configured notes file.
    ///
    /// A missing notes file starts an empty session.
    pub fn open(config: &AppConfig) -> SessionResult<Self> {
        let mut store = NoteStore::new();
        store.load(&config.notes_path)?;
        info!(
            "event=session_open module=session status=ok path={} autosave={} store={}",
            config.notes_path.display(),
            config.autosave,
            store
        );
        Ok(Self::new(store, config.notes_path.clone(), config.autosave))
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn notes_path(&self) -> &Path {
        &self.notes_path
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave
    }

    pub fn set_autosave(&mut self, enabled: bool) {
        self.autosave = enabled;
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn selected_note(&self) -> Option<usize> {
        self.selected_note
    }

    /// Adds an empty category. Existing categories are left as they are.
    pub fn add_category(&mut self, name: &str) -> SessionResult<()> {
        let name = require("category", name)?;
        if self.store.ensure_category(name) {
            self.autosave()?;
        }
        Ok(())
    }

    /// Adds an empty-bodied note and returns its index in `category`.
    pub fn add_note(&mut self, title: &str, category: &str) -> SessionResult<usize> {
        self.add_note_with_content(title, "", category)
    }

    /// Adds a note with initial content and returns its index in `category`.
    pub fn add_note_with_content(
        &mut self,
        title: &str,
        content: &str,
        category: &str,
    ) -> SessionResult<usize> {
        let title = require("title", title)?;
        let category = require("category", category)?;
        self.store.add(title, content, Some(category));
        let index = self.store.get(category).len() - 1;
        self.autosave()?;
        Ok(index)
    }

    /// Selects a category and clears the note selection.
    pub fn select_category(&mut self, name: &str) -> SessionResult<&[Note]> {
        if !self.store.contains_category(name) {
            return Err(SessionError::UnknownCategory(name.to_string()));
        }
        self.selected_category = Some(name.to_string());
        self.selected_note = None;
        Ok(self.store.get(name))
    }

    /// Selects a note in the selected category and returns its content.
    pub fn select_note(&mut self, index: usize) -> SessionResult<&str> {
        let category = self
            .selected_category
            .as_deref()
            .ok_or(SessionError::NoSelection)?;
        if index >= self.store.get(category).len() {
            return Err(SessionError::IndexOutOfRange {
                category: category.to_string(),
                index,
            });
        }
        self.selected_note = Some(index);
        debug!(
            "event=note_select module=session status=ok category={} index={}",
            category, index
        );
        Ok(self.store.get_content(category, index))
    }

    /// Selects `(category, index)` in one step.
    pub fn select(&mut self, category: &str, index: usize) -> SessionResult<&Note> {
        self.select_category(category)?;
        self.select_note(index)?;
        self.current_note()
    }

    /// Returns the selected note.
    pub fn current_note(&self) -> SessionResult<&Note> {
        let (category, index) = self.selection()?;
        self.store
            .note(&category, index)
            .ok_or(SessionError::NoSelection)
    }

    /// Replaces the selected note's body, keeping its title.
    ///
    /// Surrounding whitespace is trimmed from `content`.
    pub fn save_note(&mut self, content: &str) -> SessionResult<()> {
        let (category, index) = self.selection()?;
        let title = self
            .store
            .note(&category, index)
            .map(|note| note.title.clone())
            .ok_or(SessionError::NoSelection)?;
        self.store.update(&category, index, title, content.trim());
        self.autosave()
    }

    /// Deletes the selected note and clears the note selection.
    pub fn delete_note(&mut self) -> SessionResult<Note> {
        let (category, index) = self.selection()?;
        let removed = self
            .store
            .delete(&category, index)
            .ok_or(SessionError::NoSelection)?;
        self.selected_note = None;
        self.autosave()?;
        Ok(removed)
    }

    /// Retitles the selected note.
    pub fn edit_title(&mut self, title: &str) -> SessionResult<()> {
        let title = require("title", title)?;
        let (category, index) = self.selection()?;
        self.store.set_title(&category, index, title);
        self.autosave()
    }

    /// Moves the selected note to `category`; the selection follows it.
    pub fn edit_category(&mut self, category: &str) -> SessionResult<()> {
        let target = require("category", category)?;
        let (current, index) = self.selection()?;
        let new_index = self
            .store
            .move_note(&current, index, Some(target))
            .ok_or(SessionError::NoSelection)?;
        self.selected_category = Some(target.to_string());
        self.selected_note = Some(new_index);
        self.autosave()
    }

    /// Renames a category; a selected category is renamed with it.
    pub fn rename_category(&mut self, old: &str, new: &str) -> SessionResult<()> {
        let new = require("category", new)?;
        self.store.rename_category(old, new)?;
        if self.selected_category.as_deref() == Some(old) {
            self.selected_category = Some(new.to_string());
        }
        self.autosave()
    }

    /// Deletes a category and its notes, clearing a selection inside it.
    pub fn delete_category(&mut self, name: &str) -> SessionResult<Vec<Note>> {
        let removed = self
            .store
            .remove_category(name)
            .ok_or_else(|| SessionError::UnknownCategory(name.to_string()))?;
        if self.selected_category.as_deref() == Some(name) {
            self.clear_selection();
        }
        self.autosave()?;
        Ok(removed)
    }

    /// Searches note bodies across all categories.
    ///
    /// A blank query performs no search and returns nothing.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let hits = search_notes(self.store.all_notes(), query);
        info!(
            "event=notes_search module=session status=ok hits={}",
            hits.len()
        );
        hits
    }

    /// Writes all notes to `path` without changing the session's notes file.
    pub fn export_to(&self, path: impl AsRef<Path>) -> SessionResult<()> {
        self.store.save(path)?;
        Ok(())
    }

    /// Replaces all notes with the contents of `path`.
    pub fn import_from(&mut self, path: impl AsRef<Path>) -> SessionResult<()> {
        self.store.load(path)?;
        self.clear_selection();
        self.autosave()
    }

    /// Saves when autosave is enabled; otherwise does nothing.
    pub fn autosave(&self) -> SessionResult<()> {
        if self.autosave {
            self.store.save(&self.notes_path)?;
        }
        Ok(())
    }

    /// Saves unconditionally to the session's notes file.
    pub fn close(self) -> SessionResult<NoteStore> {
        self.store.save(&self.notes_path)?;
        info!(
            "event=session_close module=session status=ok path={} store={}",
            self.notes_path.display(),
            self.store
        );
        Ok(self.store)
    }

    fn selection(&self) -> SessionResult<(String, usize)> {
        match (self.selected_category.as_ref(), self.selected_note) {
            (Some(category), Some(index)) => Ok((category.clone(), index)),
            _ => Err(SessionError::NoSelection),
        }
    }

    fn clear_selection(&mut self) {
        self.selected_category = None;
        self.selected_note = None;
    }
}

fn require<'a>(field: &'static str, value: &'a str) -> SessionResult<&'a str> {
    if value.trim().is_empty() {
        return Err(SessionError::EmptyField(field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{NoteSession, SessionError};
    use crate::store::note_store::NoteStore;

    fn session() -> NoteSession {
        NoteSession::new(NoteStore::new(), "unused.json", false)
    }

    #[test]
    fn add_note_requires_title_and_category() {
        let mut session = session();
        assert!(matches!(
            session.add_note("  ", "Work"),
            Err(SessionError::EmptyField("title"))
        ));
        assert!(matches!(
            session.add_note("Title", ""),
            Err(SessionError::EmptyField("category"))
        ));
        assert!(session.store().is_empty());
    }

    #[test]
    fn note_actions_require_selection() {
        let mut session = session();
        session.add_note("A", "Work").unwrap();
        assert!(matches!(
            session.save_note("body"),
            Err(SessionError::NoSelection)
        ));
        session.select_category("Work").unwrap();
        assert!(matches!(session.delete_note(), Err(SessionError::NoSelection)));
        assert!(matches!(
            session.select_note(3),
            Err(SessionError::IndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn selecting_category_clears_note_selection() {
        let mut session = session();
        session.add_note("A", "Work").unwrap();
        session.add_category("Home").unwrap();
        session.select("Work", 0).unwrap();
        session.select_category("Home").unwrap();
        assert_eq!(session.selected_note(), None);
        assert_eq!(session.selected_category(), Some("Home"));
    }

    #[test]
    fn blank_search_returns_nothing() {
        let mut session = session();
        session.add_note_with_content("A", "text", "Work").unwrap();
        assert!(session.search("   ").is_empty());
        assert_eq!(session.search(" TEXT ").len(), 1);
    }
}
