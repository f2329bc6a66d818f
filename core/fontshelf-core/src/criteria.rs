//! Filter criteria and record matching (made by FontLab https://www.fontlab.com/)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, FontRecord, WritingSystem};
use crate::error::CriteriaError;
use crate::reveal::INITIAL_REVEAL;

/// Category selection: either the "All" sentinel or one exact category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn admits(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.pad("All"),
            CategoryFilter::Only(cat) => fmt::Display::fmt(cat, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CriteriaError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        raw.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = CriteriaError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl From<Category> for CategoryFilter {
    fn from(cat: Category) -> Self {
        CategoryFilter::Only(cat)
    }
}

/// The current search parameters applied to a catalog.
///
/// Deserialization fills missing fields with the session-start defaults and
/// rejects a zero reveal limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCriteria")]
pub struct FilterCriteria {
    query: String,
    category: CategoryFilter,
    #[serde(rename = "language")]
    writing_system: WritingSystem,
    reveal_limit: usize,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: CategoryFilter::All,
            writing_system: WritingSystem::default(),
            reveal_limit: INITIAL_REVEAL,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawCriteria {
    query: String,
    category: CategoryFilter,
    language: WritingSystem,
    reveal_limit: usize,
}

impl Default for RawCriteria {
    fn default() -> Self {
        let base = FilterCriteria::default();
        Self {
            query: base.query,
            category: base.category,
            language: base.writing_system,
            reveal_limit: base.reveal_limit,
        }
    }
}

impl TryFrom<RawCriteria> for FilterCriteria {
    type Error = CriteriaError;

    fn try_from(raw: RawCriteria) -> Result<Self, Self::Error> {
        Ok(Self {
            query: raw.query,
            category: raw.category,
            writing_system: raw.language,
            reveal_limit: parse_reveal_limit(raw.reveal_limit)?,
        })
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_writing_system(mut self, ws: WritingSystem) -> Self {
        self.writing_system = ws;
        self
    }

    pub fn with_reveal_limit(mut self, limit: usize) -> Self {
        self.reveal_limit = limit;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn writing_system(&self) -> WritingSystem {
        self.writing_system
    }

    pub fn reveal_limit(&self) -> usize {
        self.reveal_limit
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub(crate) fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub(crate) fn set_writing_system(&mut self, ws: WritingSystem) {
        self.writing_system = ws;
    }

    pub(crate) fn set_reveal_limit(&mut self, limit: usize) {
        self.reveal_limit = limit;
    }

    /// Whether two criteria select the same records, ignoring the reveal limit.
    pub fn same_filter(&self, other: &FilterCriteria) -> bool {
        self.query == other.query
            && self.category == other.category
            && self.writing_system == other.writing_system
    }

    /// Check whether a record passes the text, category and writing-system filters.
    pub fn matches(&self, record: &FontRecord) -> bool {
        if !self.category.admits(record.category) {
            return false;
        }

        if !record.supports(self.writing_system) {
            return false;
        }

        name_contains(&record.name, &self.query)
    }
}

/// Case-insensitive substring test; an empty needle matches everything.
fn name_contains(name: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&needle.to_lowercase())
}

/// Parse a reveal limit supplied by a host, rejecting zero.
pub fn parse_reveal_limit(raw: usize) -> Result<usize, CriteriaError> {
    if raw == 0 {
        Err(CriteriaError::ZeroRevealLimit)
    } else {
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lato() -> FontRecord {
        FontRecord {
            id: 3,
            name: "Lato".to_string(),
            designer: "Łukasz Dziedzic".to_string(),
            styles: 8,
            family: "sans-serif".to_string(),
            category: Category::Display,
            writing_systems: vec![WritingSystem::Latin, WritingSystem::Japanese],
        }
    }

    #[test]
    fn empty_query_matches_any_name() {
        assert!(FilterCriteria::new().matches(&lato()));
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        assert!(FilterCriteria::new().with_query("aT").matches(&lato()));
        assert!(!FilterCriteria::new().with_query("Lator").matches(&lato()));
    }

    #[test]
    fn category_must_match_exactly_unless_all() {
        let record = lato();
        assert!(FilterCriteria::new()
            .with_category(Category::Display)
            .matches(&record));
        assert!(!FilterCriteria::new()
            .with_category(Category::Serif)
            .matches(&record));
        assert!(FilterCriteria::new()
            .with_category(CategoryFilter::All)
            .matches(&record));
    }

    #[test]
    fn writing_system_must_be_listed() {
        let record = lato();
        assert!(FilterCriteria::new()
            .with_writing_system(WritingSystem::Japanese)
            .matches(&record));
        assert!(!FilterCriteria::new()
            .with_writing_system(WritingSystem::Greek)
            .matches(&record));
    }

    #[test]
    fn category_filter_parses_all_sentinel() {
        assert_eq!("ALL".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Handwriting".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Handwriting))
        );
        assert!("Fancy".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn defaults_match_session_start() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.query(), "");
        assert_eq!(criteria.category(), CategoryFilter::All);
        assert_eq!(criteria.writing_system(), WritingSystem::Latin);
        assert_eq!(criteria.reveal_limit(), INITIAL_REVEAL);
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"category": "Serif", "language": "Greek"}"#).expect("json");
        assert_eq!(criteria.category(), CategoryFilter::Only(Category::Serif));
        assert_eq!(criteria.writing_system(), WritingSystem::Greek);
        assert_eq!(criteria.reveal_limit(), INITIAL_REVEAL);

        let bad = serde_json::from_str::<FilterCriteria>(r#"{"language": "Klingon"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn deserializing_zero_reveal_limit_fails() {
        let err = serde_json::from_str::<FilterCriteria>(r#"{"reveal_limit": 0}"#).unwrap_err();
        assert!(err.to_string().contains("reveal limit must be at least 1"), "{err}");

        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"query": "Lato", "reveal_limit": 20}"#).expect("json");
        assert_eq!(criteria.reveal_limit(), 20);

        let round_trip: FilterCriteria =
            serde_json::from_value(serde_json::to_value(&criteria).expect("to json"))
                .expect("from json");
        assert_eq!(round_trip, criteria);
    }

    #[test]
    fn same_filter_ignores_reveal_limit() {
        let a = FilterCriteria::new().with_query("Lato");
        let b = a.clone().with_reveal_limit(30);
        assert!(a.same_filter(&b));
        assert!(!a.same_filter(&b.with_query("Roboto")));
    }

    #[test]
    fn zero_reveal_limit_is_rejected() {
        assert_eq!(parse_reveal_limit(0), Err(CriteriaError::ZeroRevealLimit));
        assert_eq!(parse_reveal_limit(8), Ok(8));
    }
}
