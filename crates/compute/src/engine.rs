use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use labelstat_core::{AggregationConfig, Config, LabelStatError, Matrix, Result};

use crate::algorithms::grouping::LabelGroups;
use crate::algorithms::reduce::{reduce_group, Statistic};

/// One aggregate row per distinct label, in ascending label order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSummary<L> {
    pub labels: Vec<L>,
    /// Shape (labels.len(), features).
    pub values: Matrix,
}

impl<L: Ord> LabelSummary<L> {
    /// Aggregate row for `label`, if present.
    pub fn row_for(&self, label: &L) -> Option<&[f64]> {
        self.labels
            .binary_search(label)
            .ok()
            .map(|i| self.values.row(i))
    }
}

/// Group-by-label reducer over a feature matrix.
///
/// Reductions for distinct labels are independent; when the label count
/// reaches `parallel_min_labels` they run on rayon. Output order is the
/// ascending label order either way.
#[derive(Debug)]
pub struct LabelAggregator {
    config: AggregationConfig,
    pool: Option<rayon::ThreadPool>,
}

impl Default for LabelAggregator {
    fn default() -> Self {
        Self {
            config: AggregationConfig::default(),
            pool: None,
        }
    }
}

impl LabelAggregator {
    pub fn new(config: AggregationConfig) -> Result<Self> {
        config.validate()?;

        let pool = if config.parallel && config.worker_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.worker_threads)
                .build()
                .map_err(|e| LabelStatError::Config(format!("failed to build thread pool: {}", e)))?;
            info!("Label aggregator using dedicated pool with {} workers", config.worker_threads);
            Some(pool)
        } else {
            None
        };

        Ok(Self { config, pool })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.aggregation.clone())
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Reduce each label's rows to one row of `stat`, shape (L, F).
    pub fn summarize<L: Ord + Clone>(
        &self,
        x: &Matrix,
        y: &[L],
        stat: Statistic,
    ) -> Result<LabelSummary<L>> {
        let groups = self.group(x, y)?;
        let reduced = self.reduce_groups(x, &groups, stat)?;
        let values = Matrix::from_rows(&reduced)?;

        Ok(LabelSummary {
            labels: groups.labels().to_vec(),
            values,
        })
    }

    /// Replace every row of a copy of `x` with its label's `stat`, shape (R, F).
    pub fn broadcast<L: Ord + Clone>(&self, x: &Matrix, y: &[L], stat: Statistic) -> Result<Matrix> {
        let groups = self.group(x, y)?;
        let reduced = self.reduce_groups(x, &groups, stat)?;

        let mut out = x.clone();
        for row in 0..x.rows() {
            let values = groups
                .group_of_row(row)
                .and_then(|g| reduced.get(g))
                .ok_or_else(|| {
                    LabelStatError::Computation(format!("row {} has no reduced group", row))
                })?;
            out.row_mut(row).copy_from_slice(values);
        }
        Ok(out)
    }

    fn group<L: Ord + Clone>(&self, x: &Matrix, y: &[L]) -> Result<LabelGroups<L>> {
        if y.len() != x.rows() {
            return Err(LabelStatError::ShapeMismatch {
                rows: x.rows(),
                labels: y.len(),
            });
        }
        Ok(LabelGroups::from_labels(y))
    }

    fn reduce_groups<L>(
        &self,
        x: &Matrix,
        groups: &LabelGroups<L>,
        stat: Statistic,
    ) -> Result<Vec<Vec<f64>>> {
        let parallel = self.config.use_parallel(groups.len());
        debug!(
            "Computing per-label {} over {} rows x {} features ({} labels, parallel={})",
            stat,
            x.rows(),
            x.cols(),
            groups.len(),
            parallel
        );

        let row_groups = groups.groups();
        let reduce = |rows: &Vec<usize>| reduce_group(x, rows, stat);

        if !parallel {
            return row_groups.iter().map(reduce).collect();
        }

        let run = || row_groups.par_iter().map(reduce).collect::<Result<Vec<_>>>();
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Every row replaced by the per-column mean of its label's rows, shape (R, F).
pub fn label_means<L: Ord + Clone>(x: &Matrix, y: &[L]) -> Result<Matrix> {
    LabelAggregator::default().broadcast(x, y, Statistic::Mean)
}

/// Population variance per label and column, shape (L, F).
pub fn label_variances<L: Ord + Clone>(x: &Matrix, y: &[L]) -> Result<Matrix> {
    LabelAggregator::default()
        .summarize(x, y, Statistic::Variance)
        .map(|s| s.values)
}

/// Median per label and column, shape (L, F).
pub fn label_medians<L: Ord + Clone>(x: &Matrix, y: &[L]) -> Result<Matrix> {
    LabelAggregator::default()
        .summarize(x, y, Statistic::Median)
        .map(|s| s.values)
}

/// Population standard deviation per label and column, shape (L, F).
pub fn label_standard_deviations<L: Ord + Clone>(x: &Matrix, y: &[L]) -> Result<Matrix> {
    LabelAggregator::default()
        .summarize(x, y, Statistic::StandardDeviation)
        .map(|s| s.values)
}
