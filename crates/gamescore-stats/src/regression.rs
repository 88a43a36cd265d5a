use serde::Serialize;

/// A least-squares line of best fit, `y = slope * x + intercept`.
///
/// # Examples
///
/// ```
/// use gamescore_stats::regression::LinearTrend;
///
/// let trend = LinearTrend::fit([(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]).unwrap();
/// assert_eq!(trend.slope, 2.0);
/// assert_eq!(trend.intercept, 1.0);
/// assert_eq!(trend.predict(3.0), 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearTrend {
    /// Change in `y` per unit of `x`.
    pub slope: f64,
    /// Value of `y` at `x = 0`.
    pub intercept: f64,
}

impl LinearTrend {
    /// Fits an ordinary least-squares line through `(x, y)` points.
    ///
    /// When every point shares the same `x` (including the single-point case)
    /// the slope is undetermined; the fit is then the horizontal line through
    /// the mean of `y`.
    ///
    /// # Returns
    ///
    /// * `Some(LinearTrend)` - if there is at least one point
    /// * `None` - if `points` is empty
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fit<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points = points.into_iter().collect::<Vec<_>>();
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
            let dx = x - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });

        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    /// Evaluates the line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_points() {
        assert!(LinearTrend::fit(Vec::<(f64, f64)>::new()).is_none());
    }

    #[test]
    fn test_single_point_is_flat() {
        let trend = LinearTrend::fit([(4.0, 10.0)]).unwrap();
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.predict(100.0), 10.0);
    }

    #[test]
    fn test_vertical_points_use_mean() {
        let trend = LinearTrend::fit([(1.0, 2.0), (1.0, 4.0)]).unwrap();
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.intercept, 3.0);
    }

    #[test]
    fn test_noisy_fit() {
        let trend =
            LinearTrend::fit([(0.0, 11.0), (1.0, 8.0), (2.0, 9.0), (3.0, 6.0)]).unwrap();
        assert!((trend.slope - -1.4).abs() < 1e-12);
        assert!((trend.intercept - 10.6).abs() < 1e-12);
    }
}
