use serde::Serialize;

/// Box-and-whisker summary of a sample.
///
/// Quartiles use linear interpolation between closest ranks. Whiskers reach
/// the most extreme data points within 1.5 × IQR of the box; everything
/// beyond them is an outlier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Whisker reach as a multiple of the interquartile range.
    pub const WHISKER_IQR: f64 = 1.5;

    /// Summarize unsorted values. `None` for an empty sample.
    ///
    /// ```
    /// # use election_explorer::analysis::stats::BoxStats;
    /// let stats = BoxStats::new([9.0, 1.0, 5.0, 3.0, 7.0, 2.0, 4.0, 6.0, 8.0]).unwrap();
    /// assert_eq!(stats.median, 5.0);
    /// assert_eq!((stats.q1, stats.q3), (3.0, 7.0));
    /// ```
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Summarize values already sorted in ascending order.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        debug_assert!(sorted.is_sorted_by(|a, b| a <= b));

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let q1 = quantile(sorted, 0.25);
        let median = quantile(sorted, 0.5);
        let q3 = quantile(sorted, 0.75);

        let reach = Self::WHISKER_IQR * (q3 - q1);
        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - reach)
            .unwrap_or(min);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + reach)
            .unwrap_or(max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_whisker || v > upper_whisker)
            .collect();

        Some(Self {
            count,
            mean,
            min,
            max,
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Quantile `q` (0.0-1.0) of non-empty sorted values, linearly interpolated.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
