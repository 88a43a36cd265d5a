//! Statistical building blocks for game score analysis.
//!
//! This crate provides the numeric tools used by `gamescore-table` and the
//! `gamescore` command:
//!
//! - **Descriptive statistics**: mean, median, population variance and standard deviation
//! - **Linear trend**: least-squares line of best fit through a series
//! - **Histogram generation**: equal-width frequency distributions
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`regression`]: Ordinary least-squares trend lines
//! - [`histogram`]: Histogram construction for visualizing data distributions
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use gamescore_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Fitting a trend line
//!
//! ```
//! use gamescore_stats::regression::LinearTrend;
//!
//! let trend = LinearTrend::fit([(0.0, 10.0), (1.0, 12.0), (2.0, 14.0)]).unwrap();
//! assert_eq!(trend.slope, 2.0);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use gamescore_stats::histogram::Histogram;
//!
//! let values = [-1.5, -0.2, 0.0, 0.3, 1.1, 2.4];
//! let histogram = Histogram::equal_width(values, 15);
//! assert_eq!(histogram.total(), 6);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod regression;
