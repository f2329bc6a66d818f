//! Boundary errors for fontshelf-core (made by FontLab https://www.fontlab.com/)

use thiserror::Error;

/// Rejected catalog contents. These are caller programming errors: a catalog
/// that fails validation is never silently repaired.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate font id {0}")]
    DuplicateId(u32),

    #[error("font {id} has an empty name")]
    EmptyName { id: u32 },

    #[error("font {id} ({name}) must have at least one style")]
    NoStyles { id: u32, name: String },

    #[error("font {id} ({name}) lists no writing systems")]
    NoWritingSystems { id: u32, name: String },
}

/// Rejected filter values coming from a host (CLI flags, HTTP bodies).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("unknown category: {0} (expected All, Sans Serif, Serif, Display, Handwriting or Monospace)")]
    UnknownCategory(String),

    #[error("unknown writing system: {0} (expected Latin, Korean, Japanese, Chinese, Cyrillic or Greek)")]
    UnknownWritingSystem(String),

    #[error("reveal limit must be at least 1")]
    ZeroRevealLimit,
}
