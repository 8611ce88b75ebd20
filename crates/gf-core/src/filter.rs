//! Filter engine splitting the dataset into candidate and reference rows

use tracing::debug;

use crate::criteria::FilterCriteria;
use crate::shop::{Dataset, Row, REFERENCE_SHOP_NAME};

/// Result of one filter pass. Both lists keep dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition<'a> {
    /// Non-reference rows matching every criterion
    pub candidates: Vec<Row<'a>>,
    /// Every reference row, regardless of criteria
    pub reference_rows: Vec<Row<'a>>,
}

/// Applies filter criteria to a dataset
#[derive(Debug, Clone)]
pub struct FilterEngine {
    reference_name: String,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(REFERENCE_SHOP_NAME)
    }
}

impl FilterEngine {
    /// Create an engine treating rows named `reference_name` as the reference location
    pub fn new(reference_name: impl Into<String>) -> Self {
        Self {
            reference_name: reference_name.into(),
        }
    }

    pub fn reference_name(&self) -> &str {
        &self.reference_name
    }

    /// Split `dataset` into candidates matching `criteria` and the unfiltered reference rows.
    ///
    /// Empty problem or city sets and inverted distance ranges yield no
    /// candidates; they are not errors.
    pub fn filter<'a>(&self, dataset: &'a Dataset, criteria: &FilterCriteria) -> Partition<'a> {
        let mut partition = Partition::default();

        for row in dataset.rows() {
            if row.record.is_reference(&self.reference_name) {
                partition.reference_rows.push(row);
            } else if Self::matches(row, criteria) {
                partition.candidates.push(row);
            }
        }

        debug!(
            candidates = partition.candidates.len(),
            reference_rows = partition.reference_rows.len(),
            "Filtered {} rows",
            dataset.len()
        );

        partition
    }

    fn matches(row: Row<'_>, criteria: &FilterCriteria) -> bool {
        let record = row.record;
        criteria.cities.contains(&record.city)
            && criteria.problems.contains(&record.problem)
            && criteria.distance_range.contains(record.distance_from_reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::{RowId, ShopRecord};

    fn shop(name: &str, city: &str, problem: &str, distance: f64) -> ShopRecord {
        ShopRecord {
            shop_name: name.to_string(),
            city: city.to_string(),
            problem: problem.to_string(),
            distance_from_reference: distance,
            latitude: 51.45,
            longitude: -2.58,
            price: "£120".to_string(),
            earliest_availability: Some("9am Mon".to_string()),
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            shop("Fix It", "Bristol", "clutch replacement", 3.0),
            shop("Far Garage", "Bristol", "clutch replacement", 9.0),
            shop(REFERENCE_SHOP_NAME, "Bristol", "clutch replacement", 0.0),
            shop("Bath Motors", "Bath", "clutch replacement", 2.0),
            shop("Brake Bay", "Bristol", "brakes", 1.0),
            shop("Edge Low", "Bristol", "clutch replacement", 0.0),
            shop("Edge High", "Bristol", "clutch replacement", 6.0),
            shop(REFERENCE_SHOP_NAME, "Bath", "brakes", 12.0),
        ])
    }

    fn names<'a>(rows: &[Row<'a>]) -> Vec<&'a str> {
        rows.iter().map(|row| row.record.shop_name.as_str()).collect()
    }

    #[test]
    fn test_bristol_clutch_within_six_miles() {
        let dataset = Dataset::new(vec![
            shop("Near", "Bristol", "clutch replacement", 3.0),
            shop("Far", "Bristol", "clutch replacement", 9.0),
        ]);
        let criteria = FilterCriteria::default()
            .with_cities(["Bristol"])
            .with_problems(["clutch replacement"])
            .with_distance(0.0, 6.0);

        let partition = FilterEngine::default().filter(&dataset, &criteria);
        assert_eq!(names(&partition.candidates), vec!["Near"]);
        assert!(partition.reference_rows.is_empty());
    }

    #[test]
    fn test_reference_rows_ignore_criteria() {
        let dataset = sample_dataset();
        let engine = FilterEngine::default();
        let expected = vec![RowId(2), RowId(7)];

        for criteria in [
            FilterCriteria::default(),
            FilterCriteria::empty(),
            FilterCriteria::default().with_distance(10.0, 1.0),
            FilterCriteria::default().with_cities(["Nowhere"]),
        ] {
            let partition = engine.filter(&dataset, &criteria);
            let ids: Vec<_> = partition.reference_rows.iter().map(|row| row.id).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_every_candidate_satisfies_all_predicates() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria::default()
            .with_cities(["Bristol", "Bath"])
            .with_problems(["clutch replacement", "brakes"])
            .with_distance(1.0, 6.0);

        let partition = FilterEngine::default().filter(&dataset, &criteria);
        for row in &partition.candidates {
            assert!(criteria.cities.contains(&row.record.city));
            assert!(criteria.problems.contains(&row.record.problem));
            assert!(criteria.distance_range.contains(row.record.distance_from_reference));
            assert_ne!(row.record.shop_name, REFERENCE_SHOP_NAME);
        }
        assert_eq!(
            names(&partition.candidates),
            vec!["Fix It", "Bath Motors", "Brake Bay", "Edge High"]
        );
    }

    #[test]
    fn test_inclusive_boundaries() {
        let dataset = sample_dataset();
        let partition = FilterEngine::default().filter(&dataset, &FilterCriteria::default());
        assert_eq!(names(&partition.candidates), vec!["Fix It", "Edge Low", "Edge High"]);
    }

    #[test]
    fn test_empty_sets_yield_no_candidates() {
        let dataset = sample_dataset();
        let partition = FilterEngine::default().filter(&dataset, &FilterCriteria::empty());
        assert!(partition.candidates.is_empty());
        assert_eq!(partition.reference_rows.len(), 2);

        let only_cities = FilterCriteria::empty().with_cities(["Bristol"]);
        assert!(FilterEngine::default().filter(&dataset, &only_cities).candidates.is_empty());
    }

    #[test]
    fn test_inverted_range_is_degenerate() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria::default().with_distance(6.0, 0.0);
        let partition = FilterEngine::default().filter(&dataset, &criteria);
        assert!(partition.candidates.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let dataset = sample_dataset();
        let engine = FilterEngine::default();
        let criteria = FilterCriteria::default().with_distance(0.0, 15.0);
        assert_eq!(engine.filter(&dataset, &criteria), engine.filter(&dataset, &criteria));
    }

    #[test]
    fn test_custom_reference_name() {
        let dataset = sample_dataset();
        let engine = FilterEngine::new("Fix It");
        let partition = engine.filter(&dataset, &FilterCriteria::default());
        assert_eq!(names(&partition.reference_rows), vec!["Fix It"]);
        assert!(names(&partition.candidates).contains(&REFERENCE_SHOP_NAME));
    }
}
