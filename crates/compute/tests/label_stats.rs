//! End-to-end checks of the four per-label statistics against hand-computed
//! values, plus shape, ordering and purity properties.

use labelstat_compute::{
    label_means, label_medians, label_standard_deviations, label_variances, AggregationConfig,
    LabelAggregator, LabelStatError, Matrix, Statistic,
};

const TOL: f64 = 1e-10;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sample() -> (Matrix, Vec<i64>) {
    let x = Matrix::from_rows(&[
        vec![1.0, 2.0],
        vec![3.0, 4.0],
        vec![5.0, 6.0],
        vec![7.0, 8.0],
    ])
    .unwrap();
    (x, vec![0, 1, 0, 1])
}

/// Deterministic pseudo-random dataset: `n` rows, `f` features, `k` labels.
fn synthetic(n: usize, f: usize, k: u64) -> (Matrix, Vec<u64>) {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut data = Vec::with_capacity(n * f);
    let mut labels = Vec::with_capacity(n);
    for _ in 0..n {
        labels.push(next() % k);
        for _ in 0..f {
            data.push((next() % 10_000) as f64 / 100.0 - 50.0);
        }
    }
    (Matrix::new(n, f, data).unwrap(), labels)
}

fn assert_rows_close(actual: &Matrix, expected: &[Vec<f64>]) {
    assert_eq!(actual.rows(), expected.len(), "row count");
    for (i, (a, e)) in actual.rows_iter().zip(expected).enumerate() {
        assert_eq!(a.len(), e.len(), "row {} width", i);
        for (j, (av, ev)) in a.iter().zip(e).enumerate() {
            assert!((av - ev).abs() < TOL, "[{}][{}]: {} != {}", i, j, av, ev);
        }
    }
}

// ── Worked example ──────────────────────────────────────────

#[test]
fn means_are_broadcast_to_every_row() {
    init_tracing();
    let (x, y) = sample();
    let out = label_means(&x, &y).unwrap();
    assert_eq!(out.shape(), x.shape());
    assert_rows_close(
        &out,
        &[vec![3.0, 4.0], vec![5.0, 6.0], vec![3.0, 4.0], vec![5.0, 6.0]],
    );
}

#[test]
fn variances_per_label() {
    let (x, y) = sample();
    let out = label_variances(&x, &y).unwrap();
    assert_rows_close(&out, &[vec![4.0, 4.0], vec![4.0, 4.0]]);
}

#[test]
fn medians_per_label() {
    let (x, y) = sample();
    let out = label_medians(&x, &y).unwrap();
    assert_rows_close(&out, &[vec![3.0, 4.0], vec![5.0, 6.0]]);
}

#[test]
fn standard_deviations_per_label() {
    let (x, y) = sample();
    let out = label_standard_deviations(&x, &y).unwrap();
    assert_rows_close(&out, &[vec![2.0, 2.0], vec![2.0, 2.0]]);
}

// ── Boundaries ──────────────────────────────────────────────

#[test]
fn singleton_label_has_zero_spread() {
    let x = Matrix::from_rows(&[vec![1.0, -1.0], vec![4.0, 9.0], vec![3.0, 3.0]]).unwrap();
    let y = vec!["solo", "pair", "pair"];

    // Ascending order: "pair" then "solo".
    assert_rows_close(&label_variances(&x, &y).unwrap(), &[vec![0.25, 9.0], vec![0.0, 0.0]]);
    assert_rows_close(
        &label_standard_deviations(&x, &y).unwrap(),
        &[vec![0.5, 3.0], vec![0.0, 0.0]],
    );
    assert_rows_close(&label_medians(&x, &y).unwrap(), &[vec![3.5, 6.0], vec![1.0, -1.0]]);
}

#[test]
fn odd_group_median_is_middle_value() {
    let x = Matrix::from_rows(&[vec![9.0], vec![1.0], vec![5.0]]).unwrap();
    let out = label_medians(&x, &[7, 7, 7]).unwrap();
    assert_rows_close(&out, &[vec![5.0]]);
}

#[test]
fn mismatched_lengths_fail_every_function() {
    let (x, _) = sample();
    let y = [0, 1];
    let expected = LabelStatError::ShapeMismatch { rows: 4, labels: 2 };
    assert_eq!(label_means(&x, &y).unwrap_err(), expected);
    assert_eq!(label_variances(&x, &y).unwrap_err(), expected);
    assert_eq!(label_medians(&x, &y).unwrap_err(), expected);
    assert_eq!(label_standard_deviations(&x, &y).unwrap_err(), expected);
}

#[test]
fn empty_and_ragged_inputs_fail_at_construction() {
    let empty: Vec<Vec<f64>> = Vec::new();
    assert_eq!(Matrix::from_rows(&empty).unwrap_err(), LabelStatError::EmptyInput);
    assert!(matches!(
        Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]),
        Err(LabelStatError::RaggedRows { row: 1, .. })
    ));
}

// ── Properties ──────────────────────────────────────────────

#[test]
fn means_leave_input_untouched_and_match_group_means() {
    let (x, y) = synthetic(300, 4, 6);
    let before = x.clone();
    let out = label_means(&x, &y).unwrap();

    assert_eq!(x, before);
    assert_eq!(out.shape(), x.shape());

    for (r, label) in y.iter().enumerate() {
        for c in 0..x.cols() {
            let members: Vec<f64> = y
                .iter()
                .enumerate()
                .filter(|(_, l)| *l == label)
                .map(|(i, _)| x.row(i)[c])
                .collect();
            let expected = members.iter().sum::<f64>() / members.len() as f64;
            assert!((out.row(r)[c] - expected).abs() < 1e-9);
        }
    }
}

#[test]
fn summaries_have_one_row_per_label_in_ascending_order() {
    let (x, y) = synthetic(250, 3, 9);
    let mut distinct = y.clone();
    distinct.sort_unstable();
    distinct.dedup();

    let aggregator = LabelAggregator::default();
    for stat in [Statistic::Variance, Statistic::Median, Statistic::StandardDeviation] {
        let summary = aggregator.summarize(&x, &y, stat).unwrap();
        assert_eq!(summary.labels, distinct, "{}", stat);
        assert_eq!(summary.values.shape(), (distinct.len(), 3), "{}", stat);
    }
}

#[test]
fn std_dev_is_sqrt_of_variance() {
    let (x, y) = synthetic(120, 5, 4);
    let var = label_variances(&x, &y).unwrap();
    let sd = label_standard_deviations(&x, &y).unwrap();
    for (v, s) in var.as_slice().iter().zip(sd.as_slice()) {
        assert!((v.sqrt() - s).abs() < 1e-12);
    }
}

#[test]
fn repeated_calls_are_bit_identical() {
    let (x, y) = synthetic(500, 6, 12);
    assert_eq!(label_means(&x, &y).unwrap(), label_means(&x, &y).unwrap());
    assert_eq!(label_variances(&x, &y).unwrap(), label_variances(&x, &y).unwrap());
    assert_eq!(label_medians(&x, &y).unwrap(), label_medians(&x, &y).unwrap());
    assert_eq!(
        label_standard_deviations(&x, &y).unwrap(),
        label_standard_deviations(&x, &y).unwrap()
    );
}

#[test]
fn parallel_and_sequential_agree() {
    init_tracing();
    let (x, y) = synthetic(1_000, 4, 40);
    let parallel = LabelAggregator::new(AggregationConfig {
        parallel: true,
        parallel_min_labels: 1,
        worker_threads: 0,
    })
    .unwrap();
    let sequential = LabelAggregator::new(AggregationConfig::sequential()).unwrap();

    for stat in Statistic::ALL {
        assert_eq!(
            parallel.broadcast(&x, &y, stat).unwrap(),
            sequential.broadcast(&x, &y, stat).unwrap(),
            "{}",
            stat
        );
        assert_eq!(
            parallel.summarize(&x, &y, stat).unwrap(),
            sequential.summarize(&x, &y, stat).unwrap(),
            "{}",
            stat
        );
    }
}

#[test]
fn summary_serializes_with_labels() {
    let (x, y) = sample();
    let summary = LabelAggregator::default()
        .summarize(&x, &y, Statistic::Median)
        .unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["labels"], serde_json::json!([0, 1]));
    assert_eq!(json["values"]["rows"], 2);
    assert_eq!(json["values"]["cols"], 2);
}
