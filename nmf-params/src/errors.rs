use common::ShapeMismatch;
use thiserror::Error;

/// Reasons an NMF invocation is rejected before any factorization starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NmfParamsError {
    #[error("an input matrix must be given")]
    MissingInput,

    #[error("rank must be positive, got {0}")]
    InvalidRank(i64),

    #[error("max_iterations must be non-negative, got {0}")]
    InvalidMaxIterations(i64),

    #[error("invalid update rule '{0}': must be one of 'multdist', 'multdiv' or 'als'")]
    InvalidUpdateRule(String),

    #[error("min_residue must be a non-negative finite number, got {0}")]
    InvalidMinResidue(f64),

    #[error("invalid initial_w: {0}")]
    InitialWShape(ShapeMismatch),

    #[error("invalid initial_h: {0}")]
    InitialHShape(ShapeMismatch),
}
