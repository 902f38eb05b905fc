use thiserror::Error;

use crate::capability::Capability;

/// Simplified `Result` using [`RegressorError`](crate::RegressorError) as error type
pub type Result<T> = std::result::Result<T, RegressorError>;

/// Error variants raised when validating a feature matrix or a target vector.
/// They are always raised before any dispatch to a concrete model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeOrTypeError {
    #[error("X(input) is not two dimensional array (found {0} dimensions)")]
    InputRank(usize),
    #[error("t(target) must be one dimensional array (found {0} dimensions)")]
    TargetRank(usize),
    #[error("mismatch in dimension 1 of X(input) (size {found} is different from {expected})")]
    FeatureCount { expected: usize, found: usize },
}

/// The regressor does not implement the requested capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} unsupported")]
pub struct CapabilityError(pub Capability);

impl CapabilityError {
    pub fn capability(&self) -> Capability {
        self.0
    }
}

/// Error variants from hyperparameter construction or model estimation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("invalid alpha {0}")]
    InvalidAlpha(f32),
    #[error("invalid beta {0}")]
    InvalidBeta(f32),
    #[error("invalid tolerance {0}")]
    InvalidTolerance(f32),
    #[error("invalid max_iterations {0}")]
    InvalidMaxIterations(usize),
    #[error("invalid option `{key}`: expected {expected}")]
    InvalidOption { key: String, expected: &'static str },
    #[error("t(target) has {found} samples but X(input) has {expected}")]
    SampleSizeMismatch { expected: usize, found: usize },
    #[error("singular system: {0}")]
    SingularSystem(&'static str),
    #[error("model has not been fitted")]
    NotFitted,
}

/// Errors surfaced by the regressor contract
#[derive(Debug, Error)]
pub enum RegressorError {
    #[error(transparent)]
    ShapeOrType(#[from] ShapeOrTypeError),
    #[error(transparent)]
    Capability(#[from] CapabilityError),
    #[error(transparent)]
    Estimator(#[from] EstimatorError),
    /// Failure reported by a concrete model outside this crate
    #[error(transparent)]
    Model(Box<dyn std::error::Error + Send + Sync>),
}

impl RegressorError {
    pub fn is_shape_or_type(&self) -> bool {
        matches!(self, RegressorError::ShapeOrType(_))
    }

    pub fn is_capability(&self) -> bool {
        matches!(self, RegressorError::Capability(_))
    }
}
