//! Note domain model.
//!
//! # Responsibility
//! - Define the single record type stored under every category.
//! - Normalize the category label on construction and on decode.
//!
//! # Invariants
//! - `category` is never empty; absent, null and blank labels become
//!   [`DEFAULT_CATEGORY`].
//! - A note has no identity beyond its position inside its category.
//! - A note decodes only from a JSON object; array-encoded notes are rejected.

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Category label used when a note is created or decoded without one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A short text note filed under one category.
///
/// Serialized as `{"title", "content", "category"}` for the notes file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub title: String,
    pub content: String,
    /// Must match the key of the category sequence holding this note.
    pub category: String,
}

/// Field layout of one note object in the notes file.
#[derive(Deserialize)]
struct NoteFields {
    title: String,
    content: String,
    #[serde(
        default = "default_category",
        deserialize_with = "deserialize_category"
    )]
    category: String,
}

struct NoteVisitor;

impl<'de> Visitor<'de> for NoteVisitor {
    type Value = Note;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a note object with `title` and `content`")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let fields = NoteFields::deserialize(MapAccessDeserializer::new(map))?;
        Ok(Note {
            title: fields.title,
            content: fields.content,
            category: fields.category,
        })
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(NoteVisitor)
    }
}

impl Note {
    /// Creates a note, falling back to [`DEFAULT_CATEGORY`] when `category`
    /// is `None` or blank.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: Option<&str>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: normalize_category(category),
        }
    }

    /// Number of characters (not bytes) in the note body.
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Note({}, {} chars, {})",
            self.title,
            self.content_chars(),
            self.category
        )
    }
}

/// Resolves an optional category label to the stored key.
pub fn normalize_category(category: Option<&str>) -> String {
    match category {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn deserialize_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_category(raw.as_deref()))
}
