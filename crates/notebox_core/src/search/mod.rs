//! Note search entry points.
//!
//! # Responsibility
//! - Filter note sequences by content without any index.

pub mod content;
