//! Column reductions applied to a single label group.
//!
//! Variance and standard deviation are population statistics (divide by n).

use serde::{Deserialize, Serialize};

use labelstat_core::{LabelStatError, Matrix, Result};

/// Aggregate statistic computed per label and feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    Mean,
    Variance,
    Median,
    StandardDeviation,
}

impl Statistic {
    pub const ALL: [Statistic; 4] = [
        Statistic::Mean,
        Statistic::Variance,
        Statistic::Median,
        Statistic::StandardDeviation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Variance => "variance",
            Statistic::Median => "median",
            Statistic::StandardDeviation => "standard_deviation",
        }
    }

    /// Reduce `values` to this statistic.
    pub fn apply(&self, values: &[f64]) -> Result<f64> {
        match self {
            Statistic::Mean => mean(values),
            Statistic::Variance => variance(values),
            Statistic::Median => median(values),
            Statistic::StandardDeviation => std_dev(values),
        }
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn ensure_non_empty(values: &[f64], what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(LabelStatError::Computation(format!(
            "{} of an empty group",
            what
        )));
    }
    Ok(())
}

pub fn mean(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "mean")?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance.
pub fn variance(values: &[f64]) -> Result<f64> {
    let m = mean(values)?;
    let sum_sq: f64 = values
        .iter()
        .map(|v| {
            let d = v - m;
            d * d
        })
        .sum();
    Ok(sum_sq / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Result<f64> {
    variance(values).map(f64::sqrt)
}

/// Middle value, or the mean of the two middle values for even lengths.
/// Any NaN in the input yields NaN.
pub fn median(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "median")?;
    if values.iter().any(|v| v.is_nan()) {
        return Ok(f64::NAN);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Reduce the rows `indices` of `x` to one value per column.
pub fn reduce_group(x: &Matrix, indices: &[usize], stat: Statistic) -> Result<Vec<f64>> {
    ensure_non_empty_group(indices)?;

    let mut column = Vec::with_capacity(indices.len());
    let mut out = Vec::with_capacity(x.cols());
    for col in 0..x.cols() {
        column.clear();
        for &row in indices {
            let value = x.get(row, col).ok_or_else(|| {
                LabelStatError::Computation(format!(
                    "row index {} out of range for {} rows",
                    row,
                    x.rows()
                ))
            })?;
            column.push(value);
        }
        out.push(stat.apply(&column)?);
    }
    Ok(out)
}

fn ensure_non_empty_group(indices: &[usize]) -> Result<()> {
    if indices.is_empty() {
        return Err(LabelStatError::Computation(
            "cannot reduce a group with no rows".to_string(),
        ));
    }
    Ok(())
}
