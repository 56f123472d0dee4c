use common::{Matrix, ShapeMismatch};
use log::trace;
use serde_derive::{Deserialize, Serialize};

use crate::exponential::{ExactNegExp, FastNegExp, NegExp};
use crate::layer::Layer;

/// Log-softmax over each column of the input.
///
/// The layer is stateless. `E` picks how `exp(-x)` is evaluated in the forward pass; the
/// default is the fast polynomial approximation. Its error adds up over the rows of a
/// column: `exp` of the output sums to 1 within 1e-4 for columns of up to four rows, and
/// drifts further for taller ones (about 4e-4 at twenty rows). Use `LogSoftmax::exact()`
/// when a tighter bound matters. Nothing is persisted when serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogSoftmax<E = FastNegExp> {
    #[serde(skip)]
    exponential: E,
}

impl LogSoftmax<FastNegExp> {
    pub fn new() -> Self {
        Self {
            exponential: FastNegExp,
        }
    }
}

impl LogSoftmax<ExactNegExp> {
    pub fn exact() -> Self {
        Self {
            exponential: ExactNegExp,
        }
    }
}

impl<E: NegExp> LogSoftmax<E> {
    pub fn with_exponential(exponential: E) -> Self {
        Self { exponential }
    }
}

impl<E: NegExp> Layer for LogSoftmax<E> {
    /// `output[i,j] = input[i,j] - (max_j + ln(sum_i exp(input[i,j] - max_j)))`
    fn forward(&self, input: &Matrix) -> Matrix {
        trace!("log softmax forward on a {} input", input.shape());

        let max_per_column = input.column_maxima();

        // max - x is never negative, which is the domain of exp_neg.
        let mut exp_m = input.map_with_column(&max_per_column, |x, max| max - x);
        exp_m.map_in_place(|x| self.exponential.exp_neg(x));

        let offsets = max_per_column
            .iter()
            .zip(exp_m.column_sums())
            .map(|(max, sum)| max + sum.ln())
            .collect::<Vec<f64>>();

        input.map_with_column(&offsets, |x, offset| x - offset)
    }

    /// `grad_input = exp(input) + grad_output`, the form expected when this layer feeds a
    /// negative log likelihood loss.
    fn backward(&self, input: &Matrix, grad_output: &Matrix) -> Result<Matrix, ShapeMismatch> {
        trace!("log softmax backward on a {} input", input.shape());

        input.ensure_same_shape(grad_output, "grad_output must have the shape of the input")?;
        Ok(input.zip_map(grad_output, |x, g| x.exp() + g))
    }
}
