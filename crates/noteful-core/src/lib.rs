//! # noteful-core
//!
//! Core types, traits, and abstractions for the noteful API.
//!
//! This crate holds the domain model (folders, tags, notes), the repository
//! traits the database layer implements, and the note hydrator that folds
//! flat `notes × folders × tags` join rows into nested notes.

pub mod error;
pub mod hydrate;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use hydrate::{hydrate_note, hydrate_notes};
pub use models::*;
pub use traits::*;
