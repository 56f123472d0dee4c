use common::{Matrix, ShapeMismatch};

/// A step in a feed-forward chain.
///
/// Matrices hold one sample per column. `backward` gets the same `input` that was given
/// to `forward` along with the gradient flowing back from the next layer, and must
/// return a gradient of the same shape as `input`.
pub trait Layer {
    fn forward(&self, input: &Matrix) -> Matrix;

    fn backward(&self, input: &Matrix, grad_output: &Matrix) -> Result<Matrix, ShapeMismatch>;
}
