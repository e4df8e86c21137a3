//! Browse view
//!
//! Filtering and ordering of studies for participants looking for work.
//! Pure functions over a slice of studies; nothing here touches the store.

use std::cmp::Ordering;

use crate::store::types::{Study, StudyCategory, StudyLocation, StudyMethodology};

/// Filter settings of the browse page
///
/// `None` for an enum filter means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseFilter {
    pub search_term: String,
    pub category: Option<StudyCategory>,
    pub methodology: Option<StudyMethodology>,
    pub location: Option<StudyLocation>,
    pub min_compensation: f64,
}

impl BrowseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn category(mut self, category: StudyCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn methodology(mut self, methodology: StudyMethodology) -> Self {
        self.methodology = Some(methodology);
        self
    }

    pub fn location(mut self, location: StudyLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn min_compensation(mut self, amount: f64) -> Self {
        self.min_compensation = amount;
        self
    }

    /// Check if a study passes every filter
    pub fn matches(&self, study: &Study) -> bool {
        self.matches_with_needle(study, &self.search_term.to_lowercase())
    }

    fn matches_with_needle(&self, study: &Study, needle: &str) -> bool {
        if !study.is_active() {
            return false;
        }

        if !needle.is_empty() && !study.matches_search(needle) {
            return false;
        }

        if let Some(category) = self.category {
            if study.category != category {
                return false;
            }
        }

        if let Some(methodology) = self.methodology {
            if study.methodology != methodology {
                return false;
            }
        }

        if let Some(location) = self.location {
            if study.location != location {
                return false;
            }
        }

        study.compensation >= self.min_compensation
    }

    /// Matching studies, best paid first (ties keep their store order)
    pub fn apply<'a>(&self, studies: &'a [Study]) -> Vec<&'a Study> {
        let needle = self.search_term.to_lowercase();

        let mut matched: Vec<&Study> = studies
            .iter()
            .filter(|s| self.matches_with_needle(s, &needle))
            .collect();

        matched.sort_by(|a, b| {
            b.compensation
                .partial_cmp(&a.compensation)
                .unwrap_or(Ordering::Equal)
        });
        matched
    }
}

/// Run the browse view over a collection of studies
pub fn browse<'a>(studies: &'a [Study], filter: &BrowseFilter) -> Vec<&'a Study> {
    filter.apply(studies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use crate::store::types::StudyStatus;

    fn ids(studies: &[&Study]) -> Vec<String> {
        studies.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_default_filter_sorts_all_active_by_compensation() {
        let studies = seed::studies();
        let result = browse(&studies, &BrowseFilter::new());

        assert_eq!(ids(&result), vec!["5", "8", "2", "7", "3", "1", "6", "4"]);
    }

    #[test]
    fn test_filter_by_category() {
        let studies = seed::studies();
        let filter = BrowseFilter::new().category(StudyCategory::UxResearch);

        let result = browse(&studies, &filter);
        assert_eq!(ids(&result), vec!["8", "3", "1"]);
    }

    #[test]
    fn test_filter_by_min_compensation() {
        let studies = seed::studies();
        let filter = BrowseFilter::new().min_compensation(200.0);

        let result = browse(&studies, &filter);
        assert_eq!(ids(&result), vec!["5", "8", "2"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_description_and_tags() {
        let studies = seed::studies();

        // title
        let result = browse(&studies, &BrowseFilter::new().search("HEALTHCARE"));
        assert_eq!(ids(&result), vec!["3"]);

        // tag only
        let result = browse(&studies, &BrowseFilter::new().search("iot"));
        assert_eq!(ids(&result), vec!["5"]);

        // description only
        let result = browse(&studies, &BrowseFilter::new().search("eco-friendly"));
        assert_eq!(ids(&result), vec!["7"]);

        let result = browse(&studies, &BrowseFilter::new().search("underwater basket"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_by_methodology_and_location() {
        let studies = seed::studies();

        let filter = BrowseFilter::new()
            .methodology(StudyMethodology::UsabilityTest)
            .location(StudyLocation::Remote);
        assert_eq!(ids(&browse(&studies, &filter)), vec!["8", "1", "6"]);

        let filter = BrowseFilter::new().location(StudyLocation::InPerson);
        assert_eq!(ids(&browse(&studies, &filter)), vec!["5"]);
    }

    #[test]
    fn test_inactive_studies_are_hidden() {
        let mut studies = seed::studies();
        studies[4].status = StudyStatus::Closed; // study 5
        studies[7].status = StudyStatus::Completed; // study 8

        let result = browse(&studies, &BrowseFilter::new().min_compensation(200.0));
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_ties_keep_store_order() {
        let mut studies = seed::studies();
        studies[0].compensation = 200.0; // study 1 ties with study 2

        let result = browse(&studies, &BrowseFilter::new().min_compensation(200.0));
        assert_eq!(ids(&result), vec!["5", "8", "1", "2"]);
    }

    #[test]
    fn test_matches_single_study() {
        let studies = seed::studies();
        let filter = BrowseFilter::new().search("mobile").category(StudyCategory::UxResearch);

        assert!(filter.matches(&studies[0]));
        assert!(!filter.matches(&studies[1]));
    }
}
