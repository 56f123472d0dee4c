use thiserror::Error;

use crate::linalg::MatrixShape;

/// Returned when two matrices that must agree on their dimensions do not.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("MatrixShapeMismatch: expected {expected} but got {actual} ({context})")]
pub struct ShapeMismatch {
    pub expected: MatrixShape,
    pub actual: MatrixShape,
    pub context: String,
}

impl ShapeMismatch {
    pub fn new(expected: MatrixShape, actual: MatrixShape) -> Self {
        Self {
            expected,
            actual,
            context: String::from("matrix dimensions must match"),
        }
    }

    pub fn new_with_msg(expected: MatrixShape, actual: MatrixShape, context: &str) -> Self {
        Self {
            expected,
            actual,
            context: context.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_both_shapes() {
        let e = ShapeMismatch::new_with_msg(
            MatrixShape::new(3, 2),
            MatrixShape::new(2, 3),
            "grad_output must match input",
        );
        assert_eq!(
            e.to_string(),
            "MatrixShapeMismatch: expected 3x2 but got 2x3 (grad_output must match input)"
        );
    }
}
