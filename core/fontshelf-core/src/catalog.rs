//! Font records and the read-only catalog store (made by FontLab https://www.fontlab.com/)

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CriteriaError};

/// Design classification of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Category {
    SansSerif,
    Serif,
    Display,
    Handwriting,
    Monospace,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::SansSerif,
        Category::Serif,
        Category::Display,
        Category::Handwriting,
        Category::Monospace,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::SansSerif => "Sans Serif",
            Category::Serif => "Serif",
            Category::Display => "Display",
            Category::Handwriting => "Handwriting",
            Category::Monospace => "Monospace",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = CriteriaError;

    /// Accepts the display label in any case, plus `sans-serif` / `sans_serif`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let folded: String = raw
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect::<String>()
            .to_lowercase();

        Category::ALL
            .into_iter()
            .find(|cat| cat.label().to_lowercase() == folded)
            .ok_or_else(|| CriteriaError::UnknownCategory(raw.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = CriteriaError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Category> for &'static str {
    fn from(cat: Category) -> Self {
        cat.label()
    }
}

/// Writing systems a family can cover. `Latin` comes first and is the
/// session default, since the writing-system filter has no "All" value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum WritingSystem {
    #[default]
    Latin,
    Korean,
    Japanese,
    Chinese,
    Cyrillic,
    Greek,
}

impl WritingSystem {
    pub const ALL: [WritingSystem; 6] = [
        WritingSystem::Latin,
        WritingSystem::Korean,
        WritingSystem::Japanese,
        WritingSystem::Chinese,
        WritingSystem::Cyrillic,
        WritingSystem::Greek,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WritingSystem::Latin => "Latin",
            WritingSystem::Korean => "Korean",
            WritingSystem::Japanese => "Japanese",
            WritingSystem::Chinese => "Chinese",
            WritingSystem::Cyrillic => "Cyrillic",
            WritingSystem::Greek => "Greek",
        }
    }
}

impl fmt::Display for WritingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for WritingSystem {
    type Err = CriteriaError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        WritingSystem::ALL
            .into_iter()
            .find(|ws| ws.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CriteriaError::UnknownWritingSystem(raw.to_string()))
    }
}

impl TryFrom<String> for WritingSystem {
    type Error = CriteriaError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<WritingSystem> for &'static str {
    fn from(ws: WritingSystem) -> Self {
        ws.label()
    }
}

/// One family in the catalog. Never mutated once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRecord {
    pub id: u32,
    pub name: String,
    pub designer: String,
    pub styles: u32,
    /// Generic family used as a rendering hint, e.g. `sans-serif`.
    pub family: String,
    pub category: Category,
    #[serde(rename = "languages")]
    pub writing_systems: Vec<WritingSystem>,
}

impl FontRecord {
    pub fn supports(&self, ws: WritingSystem) -> bool {
        self.writing_systems.contains(&ws)
    }
}

/// Ordered, read-only collection of font records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<FontRecord>,
}

impl Catalog {
    /// Validate and take ownership of `records`, keeping their order.
    ///
    /// Duplicate writing systems inside a record are collapsed (first
    /// occurrence wins); everything else that breaks a record's contract is
    /// rejected.
    pub fn new(mut records: Vec<FontRecord>) -> Result<Self, CatalogError> {
        let mut seen_ids = HashSet::with_capacity(records.len());

        for record in records.iter_mut() {
            if !seen_ids.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
            if record.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { id: record.id });
            }
            if record.styles == 0 {
                return Err(CatalogError::NoStyles {
                    id: record.id,
                    name: record.name.clone(),
                });
            }
            if record.writing_systems.is_empty() {
                return Err(CatalogError::NoWritingSystems {
                    id: record.id,
                    name: record.name.clone(),
                });
            }
            dedup_writing_systems(&mut record.writing_systems);
        }

        Ok(Self { records })
    }

    /// The built-in 30-family sample dataset.
    pub fn sample() -> Self {
        const NAMES: [&str; 5] = ["Roboto", "Open Sans", "Lato", "Montserrat", "Noto Sans"];
        const DESIGNERS: [&str; 5] = [
            "Google",
            "Steve Matteson",
            "Łukasz Dziedzic",
            "Julieta Ulanovsky",
            "Google",
        ];
        const STYLES: [u32; 5] = [12, 10, 8, 6, 14];

        let records = (0..30usize)
            .map(|i| FontRecord {
                id: i as u32 + 1,
                name: NAMES[i % 5].to_string(),
                designer: DESIGNERS[i % 5].to_string(),
                styles: STYLES[i % 5],
                family: "sans-serif".to_string(),
                category: Category::ALL[i % 5],
                writing_systems: WritingSystem::ALL[..(i % 4) + 2].to_vec(),
            })
            .collect();

        Self { records }
    }

    /// Parse a JSON array of records and validate it.
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        let records: Vec<FontRecord> =
            serde_json::from_reader(reader).context("parsing catalog JSON")?;
        Ok(Self::new(records)?)
    }

    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening catalog {}", path.display()))?;
        let catalog = Self::from_json_reader(BufReader::new(file))
            .with_context(|| format!("loading catalog {}", path.display()))?;
        info!("loaded {} fonts from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn records(&self) -> &[FontRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FontRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&FontRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a FontRecord;
    type IntoIter = std::slice::Iter<'a, FontRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn dedup_writing_systems(systems: &mut Vec<WritingSystem>) {
    let mut seen = HashSet::with_capacity(systems.len());
    systems.retain(|ws| seen.insert(*ws));
}
