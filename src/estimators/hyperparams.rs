use super::param_guard::ParamGuard;
use crate::error::EstimatorError;
use crate::Float;

/// A verified hyperparameter set ready for the construction of a ridge
/// regression model
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeValidParams<F> {
    alpha: F,
}

impl<F: Float> RidgeValidParams<F> {
    pub fn alpha(&self) -> F {
        self.alpha
    }
}

/// A hyper-parameter set during construction
///
/// Configures the maximum a posteriori estimate of the coefficients under an
/// isotropic Gaussian prior, i.e. minimizes:
/// ```ignore
/// ||t - Xw||^2_2 + alpha * ||w||^2_2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeParams<F>(RidgeValidParams<F>);

impl<F: Float> Default for RidgeParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> RidgeParams<F> {
    /// Create default ridge hyper parameters
    pub fn new() -> RidgeParams<F> {
        Self(RidgeValidParams { alpha: F::one() })
    }

    /// Set the precision of the prior over the coefficients. A higher value
    /// shrinks the coefficients towards zero.
    /// Defaults to `1` if not set.
    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }
}

impl<F: Float> ParamGuard for RidgeParams<F> {
    type Checked = RidgeValidParams<F>;
    type Error = EstimatorError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked, EstimatorError> {
        if !(self.0.alpha >= F::zero()) {
            Err(EstimatorError::InvalidAlpha(
                self.0.alpha.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, EstimatorError> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for the construction of a Bayesian
/// linear regression model
#[derive(Debug, Clone, PartialEq)]
pub struct BayesianValidParams<F> {
    alpha: F,
    beta: F,
    max_iterations: usize,
    tolerance: F,
    verbose: bool,
}

impl<F: Float> BayesianValidParams<F> {
    pub fn alpha(&self) -> F {
        self.alpha
    }

    pub fn beta(&self) -> F {
        self.beta
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// A hyper-parameter set during construction
///
/// Configures the Gaussian model
/// ```ignore
/// p(w) = N(w | 0, alpha^-1 I)
/// p(t | X, w) = N(t | Xw, beta^-1 I)
/// ```
/// `alpha` and `beta` are the starting point of the empirical Bayes
/// iterations, which update them in place.
#[derive(Debug, Clone, PartialEq)]
pub struct BayesianParams<F>(BayesianValidParams<F>);

impl<F: Float> Default for BayesianParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> BayesianParams<F> {
    /// Create default Bayesian regression hyper parameters
    pub fn new() -> BayesianParams<F> {
        Self(BayesianValidParams {
            alpha: F::one(),
            beta: F::one(),
            max_iterations: 100,
            tolerance: F::cast(1e-5),
            verbose: false,
        })
    }

    /// Set the precision of the prior over the coefficients.
    /// Defaults to `1` if not set.
    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }

    /// Set the precision of the observation noise.
    /// Defaults to `1` if not set.
    pub fn beta(mut self, beta: F) -> Self {
        self.0.beta = beta;
        self
    }

    /// Set the maximum number of evidence maximization iterations.
    /// Defaults to `100` if not set.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Set the stopping criterion of the evidence maximization: iterations
    /// stop once neither `alpha` nor `beta` moves by more than `tolerance`.
    /// Defaults to `1e-5` if not set.
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Sets the verbosity level of the evidence maximization.
    ///
    /// Defaults to `false` if not set.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.0.verbose = verbose;
        self
    }
}

impl<F: Float> ParamGuard for BayesianParams<F> {
    type Checked = BayesianValidParams<F>;
    type Error = EstimatorError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked, EstimatorError> {
        if !(self.0.alpha > F::zero()) {
            Err(EstimatorError::InvalidAlpha(
                self.0.alpha.to_f32().unwrap_or(f32::NAN),
            ))
        } else if !(self.0.beta > F::zero()) {
            Err(EstimatorError::InvalidBeta(
                self.0.beta.to_f32().unwrap_or(f32::NAN),
            ))
        } else if !(self.0.tolerance >= F::zero()) {
            Err(EstimatorError::InvalidTolerance(
                self.0.tolerance.to_f32().unwrap_or(f32::NAN),
            ))
        } else if self.0.max_iterations == 0 {
            Err(EstimatorError::InvalidMaxIterations(self.0.max_iterations))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, EstimatorError> {
        self.check_ref()?;
        Ok(self.0)
    }
}
