//! Category-keyed note store.
//!
//! # Responsibility
//! - Provide add/update/delete/list/read over positional note addresses.
//! - Persist the whole store as one JSON document.
//!
//! # Invariants
//! - Notes are addressed by `(category, index)`; there is no other identity.
//! - `delete`/`update` on a missing category or out-of-range index are
//!   silent no-ops. Their return values report what happened but callers are
//!   free to ignore them.
//! - Store-level multi-note edits (`move_note`, `rename_category`) keep every
//!   note's `category` equal to the key that holds it.

use super::document::{self, CategoryMap};
use super::{StoreError, StoreResult};
use crate::model::note::{normalize_category, Note};
use log::{error, info};
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// In-memory owner of all notes, keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStore {
    categories: CategoryMap,
}

impl NoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an already-grouped mapping.
    pub fn from_categories(categories: CategoryMap) -> Self {
        Self { categories }
    }

    /// Appends a new note to `category`, creating the category when absent.
    ///
    /// `None` or an empty label files the note under the default category.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        category: Option<&str>,
    ) -> Note {
        let note = Note::new(title, content, category);
        self.categories
            .entry(note.category.clone())
            .or_default()
            .push(note.clone());
        info!(
            "event=note_add module=store status=ok category={} index={} note={}",
            note.category,
            self.get(&note.category).len() - 1,
            note
        );
        note
    }

    /// Removes the note at `index` in `category`.
    ///
    /// Returns the removed note, or `None` when nothing matched.
    pub fn delete(&mut self, category: &str, index: usize) -> Option<Note> {
        let notes = self.categories.get_mut(category)?;
        if index >= notes.len() {
            return None;
        }
        let removed = notes.remove(index);
        info!(
            "event=note_delete module=store status=ok category={} index={} note={}",
            category, index, removed
        );
        Some(removed)
    }

    /// Replaces title and content of the note at `index` in `category`.
    ///
    /// The note's category is never changed. Returns whether a note was hit.
    pub fn update(
        &mut self,
        category: &str,
        index: usize,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> bool {
        let Some(note) = self.note_mut(category, index) else {
            return false;
        };
        note.title = title.into();
        note.content = content.into();
        info!(
            "event=note_update module=store status=ok category={} index={} note={}",
            category, index, note
        );
        true
    }

    /// Replaces only the title of the note at `index` in `category`.
    pub fn set_title(&mut self, category: &str, index: usize, title: impl Into<String>) -> bool {
        let Some(note) = self.note_mut(category, index) else {
            return false;
        };
        note.title = title.into();
        info!(
            "event=note_retitle module=store status=ok category={} index={} note={}",
            category, index, note
        );
        true
    }

    /// Returns the notes in `category`, or an empty slice when absent.
    pub fn get(&self, category: &str) -> &[Note] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the content at `(category, index)`, or `""` when absent.
    pub fn get_content(&self, category: &str, index: usize) -> &str {
        self.get(category)
            .get(index)
            .map(|note| note.content.as_str())
            .unwrap_or("")
    }

    /// Returns one note by position.
    pub fn note(&self, category: &str, index: usize) -> Option<&Note> {
        self.get(category).get(index)
    }

    /// Creates an empty category if it does not exist yet.
    ///
    /// Returns `true` when the category was created.
    pub fn ensure_category(&mut self, category: &str) -> bool {
        if self.categories.contains_key(category) {
            return false;
        }
        self.categories.insert(category.to_string(), Vec::new());
        info!(
            "event=category_add module=store status=ok category={}",
            category
        );
        true
    }

    /// Moves one note to the end of another category.
    ///
    /// The source category is kept even when it becomes empty. Returns the
    /// note's index inside the target category.
    pub fn move_note(&mut self, from: &str, index: usize, to: Option<&str>) -> Option<usize> {
        let target = normalize_category(to);
        let notes = self.categories.get_mut(from)?;
        if index >= notes.len() {
            return None;
        }
        let mut note = notes.remove(index);
        note.category = target.clone();
        let target_notes = self.categories.entry(target.clone()).or_default();
        target_notes.push(note);
        let new_index = target_notes.len() - 1;
        info!(
            "event=note_move module=store status=ok from={} index={} to={} new_index={}",
            from, index, target, new_index
        );
        Some(new_index)
    }

    /// Renames a category in place and relabels all notes it holds.
    ///
    /// # Errors
    /// - `EmptyCategoryName` when `new` is empty.
    /// - `CategoryNotFound` when `old` does not exist.
    /// - `CategoryExists` when `new` is already a category.
    pub fn rename_category(&mut self, old: &str, new: &str) -> StoreResult<()> {
        if new.is_empty() {
            return Err(StoreError::EmptyCategoryName);
        }
        if !self.categories.contains_key(old) {
            return Err(StoreError::CategoryNotFound(old.to_string()));
        }
        if self.categories.contains_key(new) {
            return Err(StoreError::CategoryExists(new.to_string()));
        }

        let Some((position, _, mut notes)) = self.categories.shift_remove_full(old) else {
            return Err(StoreError::CategoryNotFound(old.to_string()));
        };
        for note in &mut notes {
            note.category = new.to_string();
        }
        self.categories.shift_insert(position, new.to_string(), notes);
        info!(
            "event=category_rename module=store status=ok from={} to={}",
            old, new
        );
        Ok(())
    }

    /// Drops a category together with its notes.
    pub fn remove_category(&mut self, category: &str) -> Option<Vec<Note>> {
        let removed = self.categories.shift_remove(category)?;
        info!(
            "event=category_delete module=store status=ok category={} notes={}",
            category,
            removed.len()
        );
        Some(removed)
    }

    /// Category names in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// All notes flattened in category order, then note order.
    pub fn all_notes(&self) -> impl Iterator<Item = &Note> {
        self.categories.values().flatten()
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn note_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Read-only view of the underlying mapping.
    pub fn as_categories(&self) -> &CategoryMap {
        &self.categories
    }

    /// Writes the whole store to `path` in the category mapping shape.
    ///
    /// Any existing file is overwritten.
    pub fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let started_at = Instant::now();
        let bytes = document::encode(&self.categories).map_err(StoreError::Encode)?;
        if let Err(err) = std::fs::write(path, bytes) {
            error!(
                "event=notes_save module=store status=error path={} duration_ms={} error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
        info!(
            "event=notes_save module=store status=ok path={} categories={} notes={} duration_ms={}",
            path.display(),
            self.category_count(),
            self.note_count(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Replaces the whole store with the contents of `path`.
    ///
    /// A missing file yields an empty store and is not an error.
    ///
    /// # Errors
    /// - `Io` when the file exists but cannot be read.
    /// - `Format` when the file is not one of the accepted shapes. The
    ///   in-memory store is left unchanged in both cases.
    pub fn load(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let started_at = Instant::now();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=notes_load module=store status=skip reason=file_not_found path={}",
                    path.display()
                );
                self.categories.clear();
                return Ok(());
            }
            Err(err) => {
                error!(
                    "event=notes_load module=store status=error path={} error_code=read_failed error={}",
                    path.display(),
                    err
                );
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        let parsed = match document::decode(&bytes) {
            Ok(parsed) => parsed,
            Err(err) => {
                error!(
                    "event=notes_load module=store status=error path={} error_code=bad_format error={}",
                    path.display(),
                    err
                );
                return Err(StoreError::Format {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        let legacy = parsed.is_legacy();
        self.categories = parsed.into_categories();
        info!(
            "event=notes_load module=store status=ok path={} legacy={} categories={} notes={} duration_ms={}",
            path.display(),
            legacy,
            self.category_count(),
            self.note_count(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn note_mut(&mut self, category: &str, index: usize) -> Option<&mut Note> {
        self.categories.get_mut(category)?.get_mut(index)
    }
}

impl Display for NoteStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NoteStore({} categories, {} notes)",
            self.category_count(),
            self.note_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::NoteStore;
    use crate::model::note::DEFAULT_CATEGORY;

    #[test]
    fn add_without_category_uses_default() {
        let mut store = NoteStore::new();
        let note = store.add("t", "c", None);
        assert_eq!(note.category, DEFAULT_CATEGORY);
        assert_eq!(store.get(DEFAULT_CATEGORY).len(), 1);
    }

    #[test]
    fn out_of_range_access_is_silent() {
        let mut store = NoteStore::new();
        store.add("t", "c", Some("Work"));

        assert_eq!(store.delete("Work", 5), None);
        assert_eq!(store.delete("Missing", 0), None);
        assert!(!store.update("Work", 1, "x", "y"));
        assert!(!store.set_title("Missing", 0, "x"));
        assert_eq!(store.get_content("Work", 1), "");
        assert_eq!(store.get_content("Missing", 0), "");
        assert!(store.get("Missing").is_empty());
        assert_eq!(store.get("Work")[0].title, "t");
    }

    #[test]
    fn display_summarizes_counts() {
        let mut store = NoteStore::new();
        store.add("a", "", Some("Work"));
        store.add("b", "", Some("Home"));
        store.add("c", "", Some("Home"));
        assert_eq!(store.to_string(), "NoteStore(2 categories, 3 notes)");
    }
}
