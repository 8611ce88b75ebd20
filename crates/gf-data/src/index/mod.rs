//! Category index over the shop dataset
//!
//! Drives the problem and city checklists: each distinct value is listed once,
//! in sorted order.

use std::collections::BTreeSet;

use gf_core::Dataset;

/// Distinct problem and city values
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    problems: BTreeSet<String>,
    cities: BTreeSet<String>,
}

impl CategoryIndex {
    /// Build the index from every row, reference rows included
    pub fn build(dataset: &Dataset) -> Self {
        let mut index = Self::default();
        for record in dataset.records() {
            if !index.problems.contains(&record.problem) {
                index.problems.insert(record.problem.clone());
            }
            if !index.cities.contains(&record.city) {
                index.cities.insert(record.city.clone());
            }
        }
        index
    }

    /// Distinct problems, sorted
    pub fn problem_options(&self) -> Vec<&str> {
        self.problems.iter().map(String::as_str).collect()
    }

    /// Distinct cities, sorted
    pub fn city_options(&self) -> Vec<&str> {
        self.cities.iter().map(String::as_str).collect()
    }
}
