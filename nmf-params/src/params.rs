use common::{Matrix, MatrixShape, ShapeMismatch};
use log::{debug, warn};
use serde_derive::{Deserialize, Serialize};

use crate::errors::NmfParamsError;
use crate::update_rules::UpdateRules;

pub const DEFAULT_MAX_ITERATIONS: usize = 10000;
pub const DEFAULT_MIN_RESIDUE: f64 = 1e-5;

/// Validated parameters of one NMF run factorizing `input ~ w * h`.
///
/// `w` is `input.rows x rank` and `h` is `rank x input.columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NmfParams {
    input: Matrix,
    rank: usize,
    update_rules: UpdateRules,
    max_iterations: usize,
    min_residue: f64,
    initial_w: Option<Matrix>,
    initial_h: Option<Matrix>,
}

impl NmfParams {
    pub fn builder() -> NmfParamsBuilder {
        NmfParamsBuilder::new()
    }

    pub fn input(&self) -> &Matrix {
        &self.input
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn update_rules(&self) -> UpdateRules {
        self.update_rules
    }

    /// 0 means no limit on the number of iterations.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn min_residue(&self) -> f64 {
        self.min_residue
    }

    pub fn initial_w(&self) -> Option<&Matrix> {
        self.initial_w.as_ref()
    }

    pub fn initial_h(&self) -> Option<&Matrix> {
        self.initial_h.as_ref()
    }

    pub fn w_shape(&self) -> MatrixShape {
        MatrixShape::new(self.input.num_rows(), self.rank)
    }

    pub fn h_shape(&self) -> MatrixShape {
        MatrixShape::new(self.rank, self.input.num_columns())
    }
}

/// Collects NMF options as they arrive from the caller, unchecked.
///
/// Integer options are signed so out of range values can be reported instead of
/// wrapping. Nothing is validated until `build`.
#[derive(Debug, Clone)]
pub struct NmfParamsBuilder {
    input: Option<Matrix>,
    rank: i64,
    update_rules: String,
    max_iterations: i64,
    min_residue: f64,
    initial_w: Option<Matrix>,
    initial_h: Option<Matrix>,
}

impl NmfParamsBuilder {
    pub fn new() -> Self {
        Self {
            input: None,
            rank: 0,
            update_rules: UpdateRules::default().to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS as i64,
            min_residue: DEFAULT_MIN_RESIDUE,
            initial_w: None,
            initial_h: None,
        }
    }

    pub fn with_input(mut self, input: Matrix) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_update_rules(mut self, update_rules: &str) -> Self {
        self.update_rules = update_rules.to_owned();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: i64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_min_residue(mut self, min_residue: f64) -> Self {
        self.min_residue = min_residue;
        self
    }

    pub fn with_initial_w(mut self, initial_w: Matrix) -> Self {
        self.initial_w = Some(initial_w);
        self
    }

    pub fn with_initial_h(mut self, initial_h: Matrix) -> Self {
        self.initial_h = Some(initial_h);
        self
    }

    pub fn build(self) -> Result<NmfParams, NmfParamsError> {
        match self.validate() {
            Ok(params) => {
                debug!(
                    "nmf params: {} input, rank {}, update rules {}, max_iterations {}, min_residue {}",
                    params.input.shape(),
                    params.rank,
                    params.update_rules,
                    params.max_iterations,
                    params.min_residue
                );
                Ok(params)
            }
            Err(e) => {
                warn!("rejecting nmf params: {}", e);
                Err(e)
            }
        }
    }

    fn validate(self) -> Result<NmfParams, NmfParamsError> {
        let input = self.input.ok_or(NmfParamsError::MissingInput)?;

        if self.rank <= 0 {
            return Err(NmfParamsError::InvalidRank(self.rank));
        }
        let rank = self.rank as usize;

        if self.max_iterations < 0 {
            return Err(NmfParamsError::InvalidMaxIterations(self.max_iterations));
        }
        let max_iterations = self.max_iterations as usize;

        let update_rules = self.update_rules.parse::<UpdateRules>()?;

        if !self.min_residue.is_finite() || self.min_residue < 0.0 {
            return Err(NmfParamsError::InvalidMinResidue(self.min_residue));
        }

        if let Some(w) = &self.initial_w {
            let expected = MatrixShape::new(input.num_rows(), rank);
            if w.shape() != expected {
                return Err(NmfParamsError::InitialWShape(ShapeMismatch::new_with_msg(
                    expected,
                    w.shape(),
                    "initial_w must have as many rows as input and rank columns",
                )));
            }
        }

        if let Some(h) = &self.initial_h {
            let expected = MatrixShape::new(rank, input.num_columns());
            if h.shape() != expected {
                return Err(NmfParamsError::InitialHShape(ShapeMismatch::new_with_msg(
                    expected,
                    h.shape(),
                    "initial_h must have rank rows and as many columns as input",
                )));
            }
        }

        Ok(NmfParams {
            input,
            rank,
            update_rules,
            max_iterations,
            min_residue: self.min_residue,
            initial_w: self.initial_w,
            initial_h: self.initial_h,
        })
    }
}

impl Default for NmfParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
