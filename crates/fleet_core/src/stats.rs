//! Population statistics over per-snapshot samples.

/// Mean, median, and population standard deviation of one sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl SampleStats {
    /// Compute statistics over a non-empty sample.
    ///
    /// # Panics
    ///
    /// Panics when `values` is empty. The only snapshot input that may
    /// legitimately be empty is the completed-trips set, and that case is
    /// handled by [`SampleStats::zeros`] before reaching here.
    pub fn from_values(values: &[f64]) -> Self {
        assert!(
            !values.is_empty(),
            "statistics require at least one sample"
        );

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).expect("samples are finite"));
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            mean,
            median,
            std_dev: variance.sqrt(),
        }
    }

    /// All-zero statistics, the defined output when no trips completed.
    pub fn zeros() -> Self {
        Self {
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
        }
    }
}
