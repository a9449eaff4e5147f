//! Case-insensitive content search.
//!
//! # Invariants
//! - Results keep the input order.
//! - An empty query matches every note.
//! - Only `content` is matched; titles and categories are ignored.

use crate::model::note::Note;

/// Returns every note whose content contains `query`, ignoring case.
///
/// Accepts any iterator of note references, so both a single category
/// (`store.get(..)`) and the flattened store (`store.all_notes()`) work.
pub fn search_notes<'a, I>(notes: I, query: &str) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let needle = query.to_lowercase();
    notes
        .into_iter()
        .filter(|note| note.content.to_lowercase().contains(needle.as_str()))
        .collect()
}
