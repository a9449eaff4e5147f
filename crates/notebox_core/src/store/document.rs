//! On-disk notes document codec.
//!
//! Two shapes are accepted on read:
//! - current: `{"<category>": [note, ...], ...}`
//! - legacy: `[note, ...]`, each note carrying its own `category`
//!
//! Writes always use the current shape.

use crate::model::note::Note;
use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt::Formatter;

/// Category-keyed notes in insertion order.
pub type CategoryMap = IndexMap<String, Vec<Note>>;

/// Parsed notes file, one variant per accepted shape.
///
/// The top-level JSON token picks the variant: an object is the mapping
/// shape, an array is the legacy shape, anything else is rejected. Errors
/// inside the chosen shape are reported as-is.
#[derive(Debug)]
pub enum NotesDocument {
    Categorized(CategoryMap),
    Legacy(Vec<Note>),
}

impl NotesDocument {
    /// Converts either shape into the category mapping.
    ///
    /// Legacy notes are grouped by their own `category` in first-seen order.
    pub fn into_categories(self) -> CategoryMap {
        match self {
            Self::Categorized(categories) => categories,
            Self::Legacy(notes) => {
                let mut categories = CategoryMap::new();
                for note in notes {
                    categories
                        .entry(note.category.clone())
                        .or_default()
                        .push(note);
                }
                categories
            }
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

impl<'de> Deserialize<'de> for NotesDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = NotesDocument;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a category mapping or a legacy note array")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut categories = CategoryMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((category, notes)) = map.next_entry::<String, Vec<Note>>()? {
            categories.insert(category, notes);
        }
        Ok(NotesDocument::Categorized(categories))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut notes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(note) = seq.next_element::<Note>()? {
            notes.push(note);
        }
        Ok(NotesDocument::Legacy(notes))
    }
}

/// Parses raw file bytes into a notes document.
pub fn decode(bytes: &[u8]) -> Result<NotesDocument, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Encodes categories in the current (mapping) shape.
pub fn encode(categories: &CategoryMap) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(categories)
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, CategoryMap, NotesDocument};
    use crate::model::note::{Note, DEFAULT_CATEGORY};

    #[test]
    fn mapping_shape_keeps_category_order() {
        let raw = br#"{
            "Work": [{"title": "A", "content": "x", "category": "Work"}],
            "Home": [],
            "Archive": [{"title": "B", "content": "y", "category": "Archive"}]
        }"#;
        let document = decode(raw).unwrap();
        assert!(!document.is_legacy());
        let categories = document.into_categories();
        let keys = categories.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, vec!["Work", "Home", "Archive"]);
        assert!(categories["Home"].is_empty());
    }

    #[test]
    fn legacy_array_is_regrouped_by_note_category() {
        let raw = br#"[
            {"title": "A", "content": "1", "category": "Work"},
            {"title": "B", "content": "2"},
            {"title": "C", "content": "3", "category": "Work"}
        ]"#;
        let document = decode(raw).unwrap();
        assert!(document.is_legacy());
        let categories = document.into_categories();
        assert_eq!(categories.len(), 2);
        let work = categories["Work"]
            .iter()
            .map(|note| note.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(work, vec!["A", "C"]);
        assert_eq!(categories[DEFAULT_CATEGORY][0].title, "B");
    }

    #[test]
    fn third_shape_is_rejected() {
        assert!(decode(b"42").is_err());
        assert!(decode(br#"{"Work": "not a list"}"#).is_err());
        assert!(decode(br#"[{"content": "missing title"}]"#).is_err());
    }

    #[test]
    fn array_encoded_notes_are_rejected_in_both_shapes() {
        assert!(decode(br#"[["A", "x", "Work"]]"#).is_err());
        assert!(decode(br#"{"Work": [["A", "x"]]}"#).is_err());
    }

    #[test]
    fn decode_errors_point_at_the_bad_field() {
        let err = decode(br#"{"Work": [{"title": 1}]}"#).unwrap_err();
        assert!(err.to_string().contains("expected a string"), "unexpected: {err}");

        let err = decode(b"42").unwrap_err();
        assert!(
            err.to_string().contains("category mapping or a legacy note array"),
            "unexpected: {err}"
        );
    }

    #[test]
    fn empty_containers_pick_their_shape() {
        assert!(!decode(b"{}").unwrap().is_legacy());
        assert!(decode(b"[]").unwrap().is_legacy());
    }

    #[test]
    fn encode_emits_mapping_shape() {
        let mut categories = CategoryMap::new();
        categories.insert("Work".to_string(), vec![Note::new("A", "x", Some("Work"))]);
        let value: serde_json::Value = serde_json::from_slice(&encode(&categories).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"Work": [{"title": "A", "content": "x", "category": "Work"}]})
        );
        assert!(matches!(
            decode(&encode(&categories).unwrap()).unwrap(),
            NotesDocument::Categorized(_)
        ));
    }
}
