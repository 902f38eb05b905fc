use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Dimension};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::estimators::check_sample_size;
use super::hyperparams::{BayesianParams, BayesianValidParams};
use super::param_guard::ParamGuard;
use crate::error::{EstimatorError, Result};
use crate::helpers::linalg::{cholesky, invert};
use crate::options::Options;
use crate::regressor::{Bayesian, EmpiricalBayes, Predict, Regressor};
use crate::validation::check_input;
use crate::Float;

/// Gaussian posterior over the coefficients, stored both in precision and
/// covariance form.
#[derive(Debug, Clone, PartialEq)]
struct Posterior<F> {
    mean: Array1<F>,
    precision: Array2<F>,
    covariance: Array2<F>,
}

impl<F: Float> Posterior<F> {
    /// This function computes the posterior obtained by observing `(X, t)`
    /// under the prior `N(prior_mean, prior_precision^-1)` and the noise
    /// precision `beta`.
    fn update(
        X: ArrayView2<F>,
        t: ArrayView1<F>,
        prior_mean: ArrayView1<F>,
        prior_precision: ArrayView2<F>,
        beta: F,
    ) -> std::result::Result<Self, EstimatorError> {
        let precision = &prior_precision + &(X.t().dot(&X) * beta);
        let covariance = invert(precision.view()).map_err(EstimatorError::SingularSystem)?;
        let mean = covariance.dot(&(prior_precision.dot(&prior_mean) + X.t().dot(&t) * beta));
        Ok(Posterior {
            mean,
            precision,
            covariance,
        })
    }

    /// Posterior obtained from the isotropic prior `N(0, alpha^-1 I)`.
    fn from_isotropic_prior(
        X: ArrayView2<F>,
        t: ArrayView1<F>,
        alpha: F,
        beta: F,
    ) -> std::result::Result<Self, EstimatorError> {
        let n_features = X.len_of(Axis(1));
        let prior_mean = Array1::<F>::zeros(n_features);
        let prior_precision = Array2::<F>::eye(n_features) * alpha;
        Self::update(X, t, prior_mean.view(), prior_precision.view(), beta)
    }
}

/// Bayesian linear regression
///
/// The coefficients of the linear model `t = Xw + noise` are given the prior
/// `N(0, alpha^-1 I)` and the noise has precision `beta`. Fitting computes the
/// Gaussian posterior over the coefficients:
/// - [`Bayesian`] updates the current posterior with new observations, so that
///   calling it on successive batches is equivalent to a single call on their
///   concatenation,
/// - [`EmpiricalBayes`] also estimates `alpha` and `beta` by maximizing the
///   evidence, starting from the prior.
#[derive(Debug, Clone, PartialEq)]
pub struct BayesianRegression<F> {
    params: BayesianValidParams<F>,
    alpha: F,
    beta: F,
    posterior: Option<Posterior<F>>,
    n_features: Option<usize>,
}

impl<F: Float> BayesianRegression<F> {
    /// This method instantiates Bayesian regression hyperparameters with
    /// default values.
    pub fn params() -> BayesianParams<F> {
        BayesianParams::new()
    }

    /// This method builds an unfitted model from hyperparameters, after
    /// checking them.
    pub fn new(params: BayesianParams<F>) -> std::result::Result<Self, EstimatorError> {
        let params = params.check()?;
        Ok(BayesianRegression {
            alpha: params.alpha(),
            beta: params.beta(),
            params,
            posterior: None,
            n_features: None,
        })
    }

    /// Current precision of the prior over the coefficients.
    pub fn alpha(&self) -> F {
        self.alpha
    }

    /// Current precision of the observation noise.
    pub fn beta(&self) -> F {
        self.beta
    }

    pub fn posterior_mean(&self) -> Option<ArrayView1<F>> {
        self.posterior.as_ref().map(|posterior| posterior.mean.view())
    }

    pub fn posterior_covariance(&self) -> Option<ArrayView2<F>> {
        self.posterior
            .as_ref()
            .map(|posterior| posterior.covariance.view())
    }

    /// This method computes the standard deviation of the predictive
    /// distribution of each sample of `X`, which accounts for both the noise
    /// and the uncertainty over the coefficients.
    pub fn predictive_std<S, D>(&self, X: &ArrayBase<S, D>) -> Result<Array1<F>>
    where
        S: Data<Elem = F>,
        D: Dimension,
    {
        let X = check_input(X, self.n_features)?;
        let posterior = self.posterior.as_ref().ok_or(EstimatorError::NotFitted)?;
        let variance = (X.dot(&posterior.covariance) * &X).sum_axis(Axis(1));
        let noise = F::one() / self.beta;
        Ok(variance.mapv(|v| (v + noise).sqrt()))
    }

    /// This function draws a coefficient vector from the posterior.
    fn sample_coefficients(
        posterior: &Posterior<F>,
        seed: Option<u64>,
    ) -> std::result::Result<Array1<F>, EstimatorError> {
        let L = cholesky(posterior.covariance.view()).map_err(EstimatorError::SingularSystem)?;
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let z = Array1::from_shape_simple_fn(posterior.mean.len(), || {
            F::cast(rng.sample::<f64, _>(StandardNormal))
        });
        Ok(&posterior.mean + &L.dot(&z))
    }
}

impl<F: Float> Bayesian<F> for BayesianRegression<F> {
    fn fit_bayes(&mut self, X: ArrayView2<F>, t: ArrayView1<F>) -> Result<()> {
        check_sample_size(&X, &t)?;
        let posterior = match &self.posterior {
            Some(prior) => Posterior::update(
                X,
                t,
                prior.mean.view(),
                prior.precision.view(),
                self.beta,
            )?,
            None => Posterior::from_isotropic_prior(X, t, self.alpha, self.beta)?,
        };

        self.posterior = Some(posterior);
        self.n_features = Some(X.len_of(Axis(1)));
        Ok(())
    }
}

impl<F: Float> EmpiricalBayes<F> for BayesianRegression<F> {
    /// Recognized options: `max_iterations` (integer) and `tolerance`
    /// (number), which override the hyperparameters of the same name.
    fn fit_empirical_bayes(
        &mut self,
        X: ArrayView2<F>,
        t: ArrayView1<F>,
        options: &Options,
    ) -> Result<()> {
        check_sample_size(&X, &t)?;
        let max_iterations = options
            .get_usize("max_iterations")?
            .unwrap_or(self.params.max_iterations());
        let tolerance = options
            .get_f64("tolerance")?
            .map(F::cast)
            .unwrap_or(self.params.tolerance());
        if max_iterations == 0 {
            return Err(EstimatorError::InvalidMaxIterations(max_iterations).into());
        }
        if !(tolerance >= F::zero()) {
            let tolerance = tolerance.to_f32().unwrap_or(f32::NAN);
            return Err(EstimatorError::InvalidTolerance(tolerance).into());
        }

        let n_samples = F::cast(X.len_of(Axis(0)));
        let n_features = F::cast(X.len_of(Axis(1)));
        let verbose = self.params.verbose();

        let mut alpha = self.alpha;
        let mut beta = self.beta;
        let mut posterior = Posterior::from_isotropic_prior(X, t, alpha, beta)?;

        for iter in 0..max_iterations {
            // Effective number of parameters determined by the data
            let gamma = n_features - alpha * posterior.covariance.diag().sum();
            let residuals = &t - &X.dot(&posterior.mean);
            let new_alpha = gamma / posterior.mean.dot(&posterior.mean);
            let new_beta = (n_samples - gamma) / residuals.dot(&residuals);

            if !(new_alpha.is_finite() && new_alpha > F::zero())
                || !(new_beta.is_finite() && new_beta > F::zero())
            {
                if verbose {
                    println!("---- Degenerate evidence update. Keeping previous estimates.");
                }
                break;
            }

            let converged = num_traits::Float::abs(new_alpha - alpha) <= tolerance
                && num_traits::Float::abs(new_beta - beta) <= tolerance;
            alpha = new_alpha;
            beta = new_beta;
            posterior = Posterior::from_isotropic_prior(X, t, alpha, beta)?;

            if verbose {
                println!(
                    "Iteration {}, alpha: {:#?}, beta: {:#?}, gamma: {:#?}",
                    iter + 1,
                    alpha,
                    beta,
                    gamma
                );
            }
            if converged {
                if verbose {
                    println!("Converged after {} iterations.", iter + 1);
                }
                break;
            }
        }

        self.alpha = alpha;
        self.beta = beta;
        self.posterior = Some(posterior);
        self.n_features = Some(X.len_of(Axis(1)));
        Ok(())
    }
}

impl<F: Float> Predict<F> for BayesianRegression<F> {
    /// Predicts with the posterior mean of the coefficients. With the option
    /// `sample: true`, predicts with a single draw from the posterior instead;
    /// `seed` (integer) makes the draw reproducible.
    fn predict_values(&self, X: ArrayView2<F>, options: &Options) -> Result<Array1<F>> {
        let posterior = self.posterior.as_ref().ok_or(EstimatorError::NotFitted)?;
        if options.get_bool("sample")?.unwrap_or(false) {
            let w = Self::sample_coefficients(posterior, options.get_u64("seed")?)?;
            return Ok(X.dot(&w));
        }
        Ok(X.dot(&posterior.mean))
    }
}

impl<F: Float> Regressor<F> for BayesianRegression<F> {
    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn bayesian(&mut self) -> Option<&mut dyn Bayesian<F>> {
        Some(self)
    }

    fn empirical_bayes_estimator(&mut self) -> Option<&mut dyn EmpiricalBayes<F>> {
        Some(self)
    }

    fn predictor(&self) -> Option<&dyn Predict<F>> {
        Some(self)
    }
}
