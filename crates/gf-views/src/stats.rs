//! Statistical utilities for map composition

/// Quantile using linear interpolation between closest ranks.
///
/// Non-finite values are ignored. Returns `None` when no finite value remains.
pub fn quantile(values: impl IntoIterator<Item = f64>, q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let idx = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    Some(interpolate(&sorted, idx))
}

/// Median; an even-sized sample averages the two middle values
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    quantile(values, 0.5)
}

fn interpolate(sorted: &[f64], idx: f64) -> f64 {
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper || upper >= sorted.len() {
        sorted[lower]
    } else {
        let fraction = idx - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        assert_eq!(median([3.0, 1.0, 2.0]), Some(2.0));
    }

    #[test]
    fn test_median_even_averages_middle() {
        assert_eq!(median([4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_median_single_and_empty() {
        assert_eq!(median([51.45]), Some(51.45));
        assert_eq!(median(std::iter::empty()), None);
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        assert_eq!(median([f64::NAN, 5.0, f64::INFINITY, 1.0]), Some(3.0));
        assert_eq!(median([f64::NAN]), None);
    }

    #[test]
    fn test_quantile_bounds() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(quantile(values, 0.0), Some(10.0));
        assert_eq!(quantile(values, 1.0), Some(50.0));
        assert_eq!(quantile(values, 0.25), Some(20.0));
    }
}
