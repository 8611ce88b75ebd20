//! Filter criteria built from the current widget state

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Problem selected when a session starts
pub const DEFAULT_PROBLEM: &str = "clutch replacement";

/// City selected when a session starts
pub const DEFAULT_CITY: &str = "Bristol";

/// Closed distance interval in miles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct DistanceRange {
    pub lo: f64,
    pub hi: f64,
}

impl DistanceRange {
    /// Smallest value the range slider offers
    pub const MIN: f64 = 0.0;

    /// Largest value the range slider offers
    pub const MAX: f64 = 15.0;

    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Inclusive at both ends. An inverted range contains nothing.
    pub fn contains(&self, distance: f64) -> bool {
        self.lo <= distance && distance <= self.hi
    }
}

impl Default for DistanceRange {
    fn default() -> Self {
        Self::new(0.0, 6.0)
    }
}

impl From<[f64; 2]> for DistanceRange {
    fn from([lo, hi]: [f64; 2]) -> Self {
        Self::new(lo, hi)
    }
}

impl From<DistanceRange> for [f64; 2] {
    fn from(range: DistanceRange) -> Self {
        [range.lo, range.hi]
    }
}

/// Current selection of problems, cities and distance range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub problems: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub distance_range: DistanceRange,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            problems: BTreeSet::from([DEFAULT_PROBLEM.to_string()]),
            cities: BTreeSet::from([DEFAULT_CITY.to_string()]),
            distance_range: DistanceRange::default(),
        }
    }
}

impl FilterCriteria {
    /// Criteria that match nothing
    pub fn empty() -> Self {
        Self {
            problems: BTreeSet::new(),
            cities: BTreeSet::new(),
            distance_range: DistanceRange::new(DistanceRange::MIN, DistanceRange::MAX),
        }
    }

    pub fn with_problems<I, S>(mut self, problems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.problems = problems.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities = cities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_distance(mut self, lo: f64, hi: f64) -> Self {
        self.distance_range = DistanceRange::new(lo, hi);
        self
    }

    /// Check or uncheck a problem in the checklist
    pub fn set_problem(&mut self, problem: &str, selected: bool) {
        toggle(&mut self.problems, problem, selected);
    }

    /// Check or uncheck a city in the checklist
    pub fn set_city(&mut self, city: &str, selected: bool) {
        toggle(&mut self.cities, city, selected);
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str, selected: bool) {
    if selected {
        set.insert(value.to_string());
    } else {
        set.remove(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.problems, BTreeSet::from(["clutch replacement".to_string()]));
        assert_eq!(criteria.cities, BTreeSet::from(["Bristol".to_string()]));
        assert_eq!(criteria.distance_range, DistanceRange::new(0.0, 6.0));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = DistanceRange::new(2.0, 6.0);
        assert!(range.contains(2.0));
        assert!(range.contains(6.0));
        assert!(!range.contains(1.999));
        assert!(!range.contains(6.001));
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn test_inverted_range_contains_nothing() {
        let range = DistanceRange::new(9.0, 3.0);
        assert!(!range.contains(3.0));
        assert!(!range.contains(6.0));
        assert!(!range.contains(9.0));
    }

    #[test]
    fn test_checklist_toggle() {
        let mut criteria = FilterCriteria::default();
        criteria.set_city("Bath", true);
        criteria.set_city("Bristol", false);
        criteria.set_problem("brakes", true);

        assert_eq!(criteria.cities, BTreeSet::from(["Bath".to_string()]));
        assert_eq!(criteria.problems.len(), 2);
    }

    #[test]
    fn test_deserialize_partial() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"cities": ["Bath"], "distance_range": [1, 9]}"#).unwrap();
        assert_eq!(criteria.cities, BTreeSet::from(["Bath".to_string()]));
        assert_eq!(criteria.problems, FilterCriteria::default().problems);
        assert_eq!(criteria.distance_range, DistanceRange::new(1.0, 9.0));
    }
}
