//! Property-based tests for the log-softmax layer using proptest.
//!
//! Every column of the output must be a log-probability distribution, whatever the
//! input values are.

use ann::{Layer, LogSoftmax};
use common::{Matrix, RowsMatrixBuilder};
use proptest::prelude::*;

/// Columns of up to four rows keep the fast exponential's error under 1e-4; taller
/// columns are only checked with the exact exponential.
const FAST_EXP_TOLERANCE: f64 = 1e-4;

fn matrix_strategy(
    max_rows: usize,
    max_columns: usize,
    min: f64,
    max: f64,
) -> impl Strategy<Value = Matrix> {
    (1..=max_rows, 1..=max_columns).prop_flat_map(move |(num_rows, num_columns)| {
        prop::collection::vec(prop::collection::vec(min..max, num_columns), num_rows)
            .prop_map(|rows| build_from_rows(&rows))
    })
}

fn same_shape_pair_strategy() -> impl Strategy<Value = (Matrix, Matrix)> {
    (1..=8_usize, 1..=8_usize).prop_flat_map(|(num_rows, num_columns)| {
        let values = || {
            prop::collection::vec(prop::collection::vec(-10.0_f64..10.0, num_columns), num_rows)
        };
        (values(), values()).prop_map(|(a, b)| (build_from_rows(&a), build_from_rows(&b)))
    })
}

fn build_from_rows(rows: &[Vec<f64>]) -> Matrix {
    let mut builder = RowsMatrixBuilder::new();
    for r in rows {
        builder.push_row(r);
    }
    builder.build()
}

fn column_exp_sums(m: &Matrix) -> Vec<f64> {
    m.map(f64::exp).column_sums()
}

proptest! {
    #[test]
    fn forward_keeps_the_input_shape(input in matrix_strategy(12, 6, -1000.0, 1000.0)) {
        let output = LogSoftmax::new().forward(&input);
        prop_assert_eq!(output.shape(), input.shape());
    }

    #[test]
    fn fast_forward_columns_sum_to_one(input in matrix_strategy(4, 6, -10.0, 10.0)) {
        let output = LogSoftmax::new().forward(&input);
        for sum in column_exp_sums(&output) {
            prop_assert!((sum - 1.0).abs() < FAST_EXP_TOLERANCE, "column sums to {}", sum);
        }
    }

    #[test]
    fn exact_forward_columns_sum_to_one(input in matrix_strategy(12, 6, -50.0, 50.0)) {
        let output = LogSoftmax::exact().forward(&input);
        for sum in column_exp_sums(&output) {
            prop_assert!((sum - 1.0).abs() < 1e-9, "column sums to {}", sum);
        }
    }

    #[test]
    fn forward_stays_finite_and_non_positive(input in matrix_strategy(8, 4, -1.0e6, 1.0e6)) {
        let output = LogSoftmax::new().forward(&input);
        for x in output.iter() {
            prop_assert!(x.is_finite());
            prop_assert!(*x <= 0.0);
        }
    }

    #[test]
    fn raising_one_entry_lowers_every_other_entry(
        (values, index) in prop::collection::vec(-4.0_f64..4.0, 2..=6)
            .prop_flat_map(|values| {
                let len = values.len();
                (Just(values), 0..len)
            }),
        delta in 0.01_f64..3.0,
    ) {
        let layer = LogSoftmax::new();
        let before = layer.forward(&Matrix::new_column_vector(&values));

        let mut raised = values.clone();
        raised[index] += delta;
        let after = layer.forward(&Matrix::new_column_vector(&raised));

        for i in 0..values.len() {
            if i == index {
                prop_assert!(after.get(i, 0) > before.get(i, 0));
            } else {
                prop_assert!(after.get(i, 0) < before.get(i, 0));
            }
        }
    }

    #[test]
    fn backward_keeps_the_input_shape((input, grad_output) in same_shape_pair_strategy()) {
        let layer = LogSoftmax::new();
        let grad_input = layer.backward(&input, &grad_output).unwrap();
        prop_assert_eq!(grad_input.shape(), input.shape());

        for i in 0..input.num_rows() {
            for j in 0..input.num_columns() {
                prop_assert_eq!(
                    grad_input.get(i, j),
                    input.get(i, j).exp() + grad_output.get(i, j)
                );
            }
        }
    }
}
