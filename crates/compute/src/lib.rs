//! Per-label summary statistics over a labeled feature matrix.
//!
//! Rows sharing a label are reduced column by column to a single statistic,
//! either one row per label (`label_variances`, `label_medians`,
//! `label_standard_deviations`) or broadcast back onto every row of the label
//! (`label_means`). Labels are enumerated in ascending order.

pub mod algorithms;
pub mod engine;

pub use algorithms::grouping::LabelGroups;
pub use algorithms::reduce::Statistic;
pub use engine::{
    label_means, label_medians, label_standard_deviations, label_variances, LabelAggregator,
    LabelSummary,
};
pub use labelstat_core::{AggregationConfig, Config, LabelStatError, Matrix, Result};
