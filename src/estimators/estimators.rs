use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use super::hyperparams::{RidgeParams, RidgeValidParams};
use super::param_guard::ParamGuard;
use crate::error::{EstimatorError, Result};
use crate::helpers::linalg::solve_lin_sys;
use crate::options::Options;
use crate::regressor::{MaximumAPosteriori, MaximumLikelihood, Predict, Regressor};
use crate::Float;

/// This function checks that the targets are aligned with the rows of the
/// feature matrix. The dispatch layer leaves this check to the estimators.
pub(crate) fn check_sample_size<F>(
    X: &ArrayView2<F>,
    t: &ArrayView1<F>,
) -> std::result::Result<(), EstimatorError> {
    let expected = X.len_of(Axis(0));
    let found = t.len();
    if expected != found {
        return Err(EstimatorError::SampleSizeMismatch { expected, found });
    }
    Ok(())
}

/// This function solves the regularized normal equations
/// `(alpha I + X^T X) w = X^T t`.
fn solve_normal_equations<F: Float>(
    X: ArrayView2<F>,
    t: ArrayView1<F>,
    alpha: F,
) -> std::result::Result<Array1<F>, EstimatorError> {
    let n_features = X.len_of(Axis(1));
    let gram = Array2::<F>::eye(n_features) * alpha + X.t().dot(&X);
    let Xtt = X.t().dot(&t);
    solve_lin_sys(gram.view(), Xtt.view()).map_err(EstimatorError::SingularSystem)
}

fn predict_linear<F: Float>(
    X: ArrayView2<F>,
    coefficients: Option<&Array1<F>>,
) -> std::result::Result<Array1<F>, EstimatorError> {
    match coefficients {
        Some(w) => Ok(X.dot(w)),
        None => Err(EstimatorError::NotFitted),
    }
}

/// Linear regression
///
/// The linear regression model `t = Xw + noise` fitted by maximum likelihood,
/// which amounts to ordinary least squares. The noise variance is estimated
/// alongside the coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression<F> {
    coefficients: Option<Array1<F>>,
    variance: Option<F>,
    n_features: Option<usize>,
}

impl<F: Float> Default for LinearRegression<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> LinearRegression<F> {
    /// This method instantiates an unfitted linear regression model.
    pub fn new() -> Self {
        LinearRegression {
            coefficients: None,
            variance: None,
            n_features: None,
        }
    }

    /// This method is a getter for the coefficients vector.
    pub fn coefficients(&self) -> Option<ArrayView1<F>> {
        self.coefficients.as_ref().map(|w| w.view())
    }

    /// This method is a getter for the maximum likelihood estimate of the
    /// noise variance.
    pub fn variance(&self) -> Option<F> {
        self.variance
    }
}

impl<F: Float> MaximumLikelihood<F> for LinearRegression<F> {
    fn fit_ml(&mut self, X: ArrayView2<F>, t: ArrayView1<F>) -> Result<()> {
        check_sample_size(&X, &t)?;
        let w = solve_normal_equations(X.view(), t.view(), F::zero())?;

        let residuals = X.dot(&w) - &t;
        let variance = residuals.dot(&residuals) / F::cast(t.len());

        self.coefficients = Some(w);
        self.variance = Some(variance);
        self.n_features = Some(X.len_of(Axis(1)));
        Ok(())
    }
}

impl<F: Float> Predict<F> for LinearRegression<F> {
    fn predict_values(&self, X: ArrayView2<F>, _options: &Options) -> Result<Array1<F>> {
        Ok(predict_linear(X, self.coefficients.as_ref())?)
    }
}

impl<F: Float> Regressor<F> for LinearRegression<F> {
    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn maximum_likelihood(&mut self) -> Option<&mut dyn MaximumLikelihood<F>> {
        Some(self)
    }

    fn predictor(&self) -> Option<&dyn Predict<F>> {
        Some(self)
    }
}

/// Ridge regression
///
/// The maximum a posteriori estimate of the linear regression coefficients
/// under the prior `N(0, alpha^-1 I)`, with unit noise precision.
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeRegression<F> {
    params: RidgeValidParams<F>,
    coefficients: Option<Array1<F>>,
    n_features: Option<usize>,
}

impl<F: Float> RidgeRegression<F> {
    /// This method instantiates ridge hyperparameters with default values.
    pub fn params() -> RidgeParams<F> {
        RidgeParams::new()
    }

    /// This method builds an unfitted model from hyperparameters, after
    /// checking them.
    pub fn new(params: RidgeParams<F>) -> std::result::Result<Self, EstimatorError> {
        Ok(RidgeRegression {
            params: params.check()?,
            coefficients: None,
            n_features: None,
        })
    }

    pub fn alpha(&self) -> F {
        self.params.alpha()
    }

    /// This method is a getter for the coefficients vector.
    pub fn coefficients(&self) -> Option<ArrayView1<F>> {
        self.coefficients.as_ref().map(|w| w.view())
    }
}

impl<F: Float> MaximumAPosteriori<F> for RidgeRegression<F> {
    fn fit_map(&mut self, X: ArrayView2<F>, t: ArrayView1<F>) -> Result<()> {
        check_sample_size(&X, &t)?;
        let w = solve_normal_equations(X.view(), t, self.params.alpha())?;

        self.coefficients = Some(w);
        self.n_features = Some(X.len_of(Axis(1)));
        Ok(())
    }
}

impl<F: Float> Predict<F> for RidgeRegression<F> {
    fn predict_values(&self, X: ArrayView2<F>, _options: &Options) -> Result<Array1<F>> {
        Ok(predict_linear(X, self.coefficients.as_ref())?)
    }
}

impl<F: Float> Regressor<F> for RidgeRegression<F> {
    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn maximum_a_posteriori(&mut self) -> Option<&mut dyn MaximumAPosteriori<F>> {
        Some(self)
    }

    fn predictor(&self) -> Option<&dyn Predict<F>> {
        Some(self)
    }
}
