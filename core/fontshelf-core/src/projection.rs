//! Catalog projection (made by FontLab https://www.fontlab.com/)

use crate::catalog::{Catalog, FontRecord};
use crate::criteria::FilterCriteria;

/// Filter the catalog by `criteria` and cap the result at its reveal limit.
///
/// The result borrows from the catalog and keeps catalog order.
pub fn project<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a FontRecord> {
    catalog
        .iter()
        .filter(|record| criteria.matches(record))
        .take(criteria.reveal_limit())
        .collect()
}

/// Number of records matching `criteria`, ignoring the reveal limit.
pub fn count_matches(catalog: &Catalog, criteria: &FilterCriteria) -> usize {
    catalog
        .iter()
        .filter(|record| criteria.matches(record))
        .count()
}

/// A projection together with how many matches it left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub fonts: Vec<&'a FontRecord>,
    pub total_matches: usize,
}

impl<'a> Projection<'a> {
    /// Single pass: counts every match, keeps the first `reveal_limit`.
    pub fn compute(catalog: &'a Catalog, criteria: &FilterCriteria) -> Self {
        let limit = criteria.reveal_limit();
        let mut fonts = Vec::with_capacity(limit.min(catalog.len()));
        let mut total_matches = 0;

        for record in catalog.iter().filter(|record| criteria.matches(record)) {
            if total_matches < limit {
                fonts.push(record);
            }
            total_matches += 1;
        }

        Self {
            fonts,
            total_matches,
        }
    }

    pub fn has_more(&self) -> bool {
        self.total_matches > self.fonts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, WritingSystem};

    #[test]
    fn lato_latin_scenario() {
        let catalog = Catalog::sample();
        let criteria = FilterCriteria::new()
            .with_query("Lato")
            .with_writing_system(WritingSystem::Latin)
            .with_reveal_limit(12);

        let ids: Vec<u32> = project(&catalog, &criteria).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 8, 13, 18, 23, 28]);
    }

    #[test]
    fn display_japanese_scenario_is_not_truncated() {
        let catalog = Catalog::sample();
        let criteria = FilterCriteria::new()
            .with_category(Category::Display)
            .with_writing_system(WritingSystem::Japanese)
            .with_reveal_limit(30);

        let projected = Projection::compute(&catalog, &criteria);
        let expected: Vec<u32> = catalog
            .iter()
            .filter(|r| r.category == Category::Display && r.supports(WritingSystem::Japanese))
            .map(|r| r.id)
            .collect();

        let ids: Vec<u32> = projected.fonts.iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);
        assert!(!ids.is_empty());
        assert!(!projected.has_more());
    }

    #[test]
    fn truncates_to_reveal_limit_in_catalog_order() {
        let catalog = Catalog::sample();
        let criteria = FilterCriteria::new().with_reveal_limit(5);

        let projected = Projection::compute(&catalog, &criteria);
        let ids: Vec<u32> = projected.fonts.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(projected.total_matches, 30);
        assert!(projected.has_more());
    }

    #[test]
    fn compute_agrees_with_project_and_count() {
        let catalog = Catalog::sample();
        for limit in [0, 1, 6, 12, 30, 50] {
            let criteria = FilterCriteria::new()
                .with_writing_system(WritingSystem::Japanese)
                .with_reveal_limit(limit);

            let projected = Projection::compute(&catalog, &criteria);
            assert_eq!(projected.fonts, project(&catalog, &criteria));
            assert_eq!(projected.total_matches, count_matches(&catalog, &criteria));
        }
    }

    #[test]
    fn no_matches_is_empty_not_error() {
        let catalog = Catalog::sample();
        let criteria = FilterCriteria::new().with_query("Garamond");
        assert!(project(&catalog, &criteria).is_empty());
        assert_eq!(count_matches(&catalog, &criteria), 0);
    }
}
