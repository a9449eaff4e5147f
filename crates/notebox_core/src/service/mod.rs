//! Front-end facing use-case layer.
//!
//! # Responsibility
//! - Turn user actions into store calls with input validation.
//! - Keep CLI/GUI layers free of selection and autosave bookkeeping.

pub mod session;
