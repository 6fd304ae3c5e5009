//! Statistical utilities for the rxplore project.
//!
//! This crate provides the small set of descriptive tools the explorer
//! charts are built from:
//!
//! - **Descriptive statistics**: mean, median, variance, standard deviation
//! - **Percentiles**: linear-interpolation quantiles
//! - **Histograms**: equal-width frequency distributions
//! - **Kernel density**: Gaussian KDE curves drawn over histograms
//! - **Box summaries**: quartiles, whiskers and outliers for box plots
//! - **Value counts**: frequency tables of categorical values
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use rxplore_stats::descriptive::DescriptiveStats;
//!
//! let ratings = [8.0, 6.5, 9.0, 7.5];
//! let stats = DescriptiveStats::new(ratings).unwrap();
//! assert_eq!(stats.mean, 7.75);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use rxplore_stats::histogram::Histogram;
//!
//! let ratings = [0.0, 2.5, 5.0, 7.5, 10.0];
//! let histogram = Histogram::new(ratings, 10);
//! assert_eq!(histogram.total(), 5);
//! ```
//!
//! ## Summarizing groups for a box plot
//!
//! ```
//! use rxplore_stats::box_plot::BoxSummary;
//!
//! let summary = BoxSummary::new([6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
//! assert_eq!(summary.median, 8.0);
//! ```

pub mod box_plot;
pub mod descriptive;
pub mod histogram;
pub mod kde;
pub mod percentiles;
pub mod value_counts;
