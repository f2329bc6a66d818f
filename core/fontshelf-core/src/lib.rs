//! fontshelf-core: filtering and incremental reveal for font catalogs
//!
//! A catalog is a fixed, ordered list of font records. A host UI collects
//! user input (search text, category, writing system, scroll position) and
//! asks this crate which records to draw.
//!
//! ## Pieces
//!
//! - [`catalog`]: [`FontRecord`](catalog::FontRecord), the category and
//!   writing-system enumerations, and the read-only [`Catalog`](catalog::Catalog)
//! - [`criteria`]: [`FilterCriteria`](criteria::FilterCriteria) and record matching
//! - [`projection`]: [`project`](projection::project), the filtered,
//!   order-preserving, length-capped view of the catalog
//! - [`reveal`]: [`grow_reveal`](reveal::grow_reveal) and the scroll proximity signal
//! - [`session`]: an explicit state bag wiring the above to input events
//! - [`output`]: JSON and NDJSON writers
//!
//! ## Example
//!
//! ```rust
//! use fontshelf_core::catalog::{Catalog, WritingSystem};
//! use fontshelf_core::criteria::FilterCriteria;
//! use fontshelf_core::projection::project;
//! use fontshelf_core::reveal::{grow_reveal, REVEAL_STEP};
//!
//! let catalog = Catalog::sample();
//! let criteria = FilterCriteria::new()
//!     .with_query("lato")
//!     .with_writing_system(WritingSystem::Latin)
//!     .with_reveal_limit(12);
//!
//! let visible = project(&catalog, &criteria);
//! assert!(visible.iter().all(|font| font.name == "Lato"));
//!
//! assert_eq!(grow_reveal(12, catalog.len(), REVEAL_STEP), 20);
//! ```
//!
//! ---
//!
//! Made by FontLab https://www.fontlab.com/

pub mod catalog;
pub mod criteria;
pub mod error;
pub mod output;
pub mod projection;
pub mod reveal;
pub mod session;
