use rand::distributions::{Distribution, Uniform};
use rand_distr::{Normal, NormalError};
use rayon::prelude::*;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ShapeMismatch;

#[macro_export]
macro_rules! column_matrix {
    ($($y:expr),+ $(,)?) => (
        $crate::linalg::Matrix::new_column_vector(&[$($y),+])
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixShape {
    pub num_rows: usize,
    pub num_columns: usize,
}

impl MatrixShape {
    pub fn new(num_rows: usize, num_columns: usize) -> Self {
        Self {
            num_rows,
            num_columns,
        }
    }
}

impl fmt::Display for MatrixShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.num_rows, self.num_columns)
    }
}

/// A dense matrix of f64 values stored row by row.
///
/// Layers treat each column as one sample and each row as one feature, so most of
/// the reductions here work per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    num_rows: usize,
    num_columns: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn shape(&self) -> MatrixShape {
        MatrixShape::new(self.num_rows, self.num_columns)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn init(num_rows: usize, num_columns: usize, init_value: f64) -> Matrix {
        Matrix {
            num_rows,
            num_columns,
            data: vec![init_value; num_rows * num_columns],
        }
    }

    pub fn new_zero_matrix(num_rows: usize, num_columns: usize) -> Self {
        Self::init(num_rows, num_columns, 0.0)
    }

    pub fn new_column_vector(items: &[f64]) -> Self {
        Self {
            num_rows: items.len(),
            num_columns: 1,
            data: items.to_vec(),
        }
    }

    pub fn new_row_vector(items: &[f64]) -> Self {
        Self {
            num_rows: 1,
            num_columns: items.len(),
            data: items.to_vec(),
        }
    }

    /// Builds a matrix from a list of equally long columns.
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Self {
        let mut builder = ColumnsMatrixBuilder::new();
        for c in columns.iter() {
            builder.push_column(c);
        }
        builder.build()
    }

    pub fn new_matrix_with_random_values_from_uniform_distribution(
        num_rows: usize,
        num_columns: usize,
        min: f64,
        max: f64,
    ) -> Self {
        let mut rng = rand::thread_rng();
        let uniform = Uniform::new(min, max);

        let data = (0..num_rows * num_columns)
            .map(|_| uniform.sample(&mut rng))
            .collect();

        Self {
            num_rows,
            num_columns,
            data,
        }
    }

    pub fn new_matrix_with_random_values_from_normal_distribution(
        num_rows: usize,
        num_columns: usize,
        mean: f64,
        std_dev: f64,
    ) -> Result<Self, NormalError> {
        if std_dev < 0.0 {
            return Err(NormalError::BadVariance);
        }

        let mut rng = rand::thread_rng();
        let normal = Normal::new(mean, std_dev)?;

        let data = (0..num_rows * num_columns)
            .map(|_| normal.sample(&mut rng))
            .collect();

        Ok(Self {
            num_rows,
            num_columns,
            data,
        })
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.data[row * self.num_columns + column]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// Applies `f` to every element, producing a new matrix of the same shape.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        Matrix {
            num_rows: self.num_rows,
            num_columns: self.num_columns,
            data: self.data.par_iter().map(|x| f(*x)).collect(),
        }
    }

    pub fn map_in_place<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        self.data.par_iter_mut().for_each(|x| *x = f(*x));
    }

    /// Combines two same-shaped matrices element by element.
    pub fn zip_map<F>(&self, other: &Matrix, f: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        if self.shape() != other.shape() {
            panic!(
                "Matrix dimensions are not compatible for an element-wise operation: self is {} and other is {}",
                self.shape(),
                other.shape()
            );
        }

        let data = self
            .data
            .par_iter()
            .zip(other.data.par_iter())
            .map(|(x, y)| f(*x, *y))
            .collect();

        Matrix {
            num_rows: self.num_rows,
            num_columns: self.num_columns,
            data,
        }
    }

    /// Applies `f(element, column_values[column])` to every element.
    ///
    /// `column_values` holds one value per column, e.g. the output of `column_maxima`.
    pub fn map_with_column<F>(&self, column_values: &[f64], f: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        if column_values.len() != self.num_columns {
            panic!(
                "expected one value per column ({}) but got {}",
                self.num_columns,
                column_values.len()
            );
        }

        if self.is_empty() {
            return self.clone();
        }

        let mut res = self.clone();
        res.data
            .par_chunks_mut(self.num_columns)
            .for_each(|row| {
                row.iter_mut()
                    .zip(column_values.iter())
                    .for_each(|(x, c)| *x = f(*x, *c));
            });
        res
    }

    /// The largest value of each column. Columns of a matrix with no rows report `-inf`.
    pub fn column_maxima(&self) -> Vec<f64> {
        self.fold_columns(f64::NEG_INFINITY, f64::max)
    }

    pub fn column_sums(&self) -> Vec<f64> {
        self.fold_columns(0.0, |acc, x| acc + x)
    }

    fn fold_columns<F>(&self, init: f64, f: F) -> Vec<f64>
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut res = vec![init; self.num_columns];
        if self.num_columns == 0 {
            return res;
        }

        for row in self.data.chunks(self.num_columns) {
            for (acc, x) in res.iter_mut().zip(row.iter()) {
                *acc = f(*acc, *x);
            }
        }
        res
    }

    pub fn ensure_same_shape(&self, other: &Matrix, context: &str) -> Result<(), ShapeMismatch> {
        if self.shape() != other.shape() {
            return Err(ShapeMismatch::new_with_msg(
                self.shape(),
                other.shape(),
                context,
            ));
        }
        Ok(())
    }
}

pub struct RowsMatrixBuilder {
    num_columns: Option<usize>,
    rows: Vec<Vec<f64>>,
}

impl RowsMatrixBuilder {
    pub fn new() -> Self {
        Self {
            num_columns: None,
            rows: Vec::new(),
        }
    }

    /// For non-chaining use
    pub fn push_row(&mut self, row: &[f64]) {
        if let Some(num_columns) = self.num_columns {
            if row.len() != num_columns {
                panic!("row must have the same number of columns as previous rows");
            }
        } else {
            self.num_columns = Some(row.len());
        }

        self.rows.push(row.to_vec());
    }

    /// For chaining use
    pub fn with_row(mut self, row: &[f64]) -> Self {
        self.push_row(row);
        self
    }

    pub fn build(self) -> Matrix {
        let num_columns = match self.num_columns {
            Some(n) => n,
            None => panic!("rows must have at least one row"),
        };

        Matrix {
            num_rows: self.rows.len(),
            num_columns,
            data: self.rows.concat(),
        }
    }
}

impl Default for RowsMatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ColumnsMatrixBuilder {
    num_rows: Option<usize>,
    columns: Vec<Vec<f64>>,
}

impl ColumnsMatrixBuilder {
    pub fn new() -> Self {
        Self {
            num_rows: None,
            columns: Vec::new(),
        }
    }

    pub fn push_column(&mut self, column: &[f64]) {
        if let Some(num_rows) = self.num_rows {
            if column.len() != num_rows {
                panic!("column must have the same number of rows as previous columns");
            }
        } else {
            self.num_rows = Some(column.len());
        }

        self.columns.push(column.to_vec());
    }

    /// For chaining use
    pub fn with_column(mut self, column: &[f64]) -> Self {
        self.push_column(column);
        self
    }

    pub fn build(self) -> Matrix {
        let num_rows = match self.num_rows {
            Some(n) => n,
            None => panic!("columns must have at least one column"),
        };
        let num_columns = self.columns.len();

        let mut data = Vec::with_capacity(num_rows * num_columns);
        for i_row in 0..num_rows {
            for c in self.columns.iter() {
                data.push(c[i_row]);
            }
        }

        Matrix {
            num_rows,
            num_columns,
            data,
        }
    }
}

impl Default for ColumnsMatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}
