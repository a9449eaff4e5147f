//! Domain model for categorized notes.
//!
//! # Responsibility
//! - Define the note record shared by store, search and session layers.
//!
//! # Invariants
//! - Notes carry their own category label; the store keys on the same label.

pub mod note;
