use std::ops::Range;

use serde::Serialize;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the observed range `[min, max]` into bins of equal
/// width and counts the values falling into each bin. Every value lands in
/// exactly one bin, so the bin counts always sum to the number of values.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    ///
    /// The last bin also contains values equal to its end.
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates an equal-width histogram.
    ///
    /// When all values are identical the range is widened to
    /// `[value - 0.5, value + 0.5]` so the bins have a non-zero width.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from.
    /// * `num_bins` - The number of bins to create.
    ///
    /// # Returns
    ///
    /// A `Histogram` with `num_bins` bins, or no bins at all if `values` is
    /// empty or `num_bins` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gamescore_stats::histogram::Histogram;
    /// let histogram = Histogram::equal_width([0.0, 1.0, 2.0, 3.0, 4.0], 2);
    /// assert_eq!(histogram.bins.len(), 2);
    /// assert_eq!(histogram.bins[0].count, 2);
    /// assert_eq!(histogram.bins[1].count, 3);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn equal_width<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max - min < f64::EPSILON {
            min -= 0.5;
            max += 0.5;
        }
        let bin_width = (max - min) / num_bins as f64;

        // Recompute each boundary from `min` to avoid accumulating rounding errors
        let boundary = |idx: usize| {
            if idx == num_bins {
                max
            } else {
                min + bin_width * idx as f64
            }
        };
        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                range: boundary(idx)..boundary(idx + 1),
                count: 0,
            })
            .collect::<Vec<_>>();

        for val in values {
            let idx = ((val - min) / bin_width).floor() as usize;
            // `max` itself belongs to the last bin
            bins[idx.min(num_bins - 1)].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(Histogram::equal_width(Vec::<f64>::new(), 15).bins.is_empty());
        assert!(Histogram::equal_width([1.0], 0).bins.is_empty());
    }

    #[test]
    fn test_all_same_value() {
        let histogram = Histogram::equal_width([2.0; 7], 4);
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(histogram.bins[0].range.start, 1.5);
        assert_eq!(histogram.bins[3].range.end, 2.5);
        assert_eq!(histogram.total(), 7);
        assert_eq!(histogram.bins[2].count, 7);
    }

    #[test]
    fn test_preserves_all_values() {
        let values = [-2.1, -0.3, 0.0, 0.4, 1.2, 1.9, 2.5, -1.0];
        let histogram = Histogram::equal_width(values, 15);
        assert_eq!(histogram.bins.len(), 15);
        assert_eq!(histogram.total(), 8);
        assert_eq!(histogram.bins.first().unwrap().range.start, -2.1);
        assert_eq!(histogram.bins.last().unwrap().range.end, 2.5);
        assert_eq!(histogram.bins.first().unwrap().count, 1);
        assert_eq!(histogram.bins.last().unwrap().count, 1);
    }

    #[test]
    fn test_bins_are_contiguous() {
        let histogram = Histogram::equal_width([0.0, 10.0, 3.3, 7.1], 5);
        for pair in histogram.bins.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
    }
}
