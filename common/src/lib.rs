pub mod errors;
pub mod linalg;

pub use errors::ShapeMismatch;
pub use linalg::{ColumnsMatrixBuilder, Matrix, MatrixShape, RowsMatrixBuilder};
